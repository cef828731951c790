//! Admin access gate.
//!
//! A gate starts `Unknown` while the identity lookup is outstanding and
//! settles exactly once. Every request builds a fresh gate, so a settled
//! state never changes within a single render pass.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState<U> {
    Unknown,
    Authenticated(U),
    Unauthenticated,
}

/// What the protected view should do for the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision<U> {
    /// Identity not known yet; render nothing.
    Pending,
    Render(U),
    Redirect(String),
}

#[derive(Debug, Clone)]
pub struct AuthGate<U> {
    state: AuthState<U>,
    login_path: String,
}

impl<U: Clone> AuthGate<U> {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            state: AuthState::Unknown,
            login_path: login_path.into(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AuthState<U> {
        &self.state
    }

    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        !matches!(self.state, AuthState::Unknown)
    }

    /// Settles the gate with the looked-up identity.
    ///
    /// Returns `false` and leaves the state alone if already settled.
    pub fn resolve(&mut self, user: Option<U>) -> bool {
        if self.is_resolved() {
            return false;
        }
        self.state = match user {
            Some(user) => AuthState::Authenticated(user),
            None => AuthState::Unauthenticated,
        };
        true
    }

    #[must_use]
    pub fn decision(&self) -> GateDecision<U> {
        match &self.state {
            AuthState::Unknown => GateDecision::Pending,
            AuthState::Authenticated(user) => GateDecision::Render(user.clone()),
            AuthState::Unauthenticated => GateDecision::Redirect(self.login_path.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_renders_nothing() {
        let gate: AuthGate<String> = AuthGate::new("/login");
        assert_eq!(gate.decision(), GateDecision::Pending);
        assert!(!gate.is_resolved());
    }

    #[test]
    fn authenticated_renders_content() {
        let mut gate = AuthGate::new("/login");
        assert!(gate.resolve(Some("admin@example.com".to_string())));
        assert_eq!(
            gate.decision(),
            GateDecision::Render("admin@example.com".to_string())
        );
    }

    #[test]
    fn unauthenticated_redirects_to_login() {
        let mut gate: AuthGate<String> = AuthGate::new("/login");
        gate.resolve(None);
        assert_eq!(gate.decision(), GateDecision::Redirect("/login".to_string()));
    }

    #[test]
    fn settled_state_is_terminal() {
        let mut gate = AuthGate::new("/login");
        gate.resolve(None);
        assert!(!gate.resolve(Some("late".to_string())));
        assert_eq!(gate.state(), &AuthState::Unauthenticated);
    }
}
