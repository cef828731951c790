//! `SeaORM` implementation of the `AuthService` trait.

use crate::config::Config;
use crate::db::Store;
use crate::forms::Credentials;
use crate::services::auth_service::{AuthError, AuthService, LoginResult, UserInfo};
use async_trait::async_trait;
use sea_orm::{DbErr, SqlErr};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

pub struct SeaOrmAuthService {
    store: Store,
    config: Arc<RwLock<Config>>,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, config: Arc<RwLock<Config>>) -> Self {
        Self { store, config }
    }
}

/// A concurrent sign-up can pass the lookup above and still lose on the
/// unique email index.
fn signup_error(err: anyhow::Error) -> AuthError {
    let email_taken = err
        .downcast_ref::<DbErr>()
        .and_then(DbErr::sql_err)
        .is_some_and(|e| matches!(e, SqlErr::UniqueConstraintViolation(msg) if msg.contains("email")));

    if email_taken {
        AuthError::EmailTaken
    } else {
        AuthError::from(err)
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn signup(&self, credentials: &Credentials) -> Result<LoginResult, AuthError> {
        let security = self.config.read().await.security.clone();
        if !security.allow_signup {
            return Err(AuthError::SignupDisabled);
        }

        if self
            .store
            .get_user_by_email(&credentials.email)
            .await?
            .is_some()
        {
            return Err(AuthError::EmailTaken);
        }

        let user = self
            .store
            .create_user(&credentials.email, &credentials.password, &security)
            .await
            .map_err(signup_error)?;

        info!(email = %user.email, "Admin account created");

        Ok(LoginResult {
            email: user.email,
            api_key: user.api_key,
        })
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResult, AuthError> {
        let user = self
            .store
            .verify_user_password(&credentials.email, &credentials.password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(LoginResult {
            email: user.email,
            api_key: user.api_key,
        })
    }

    async fn verify_api_key(&self, api_key: &str) -> Result<Option<String>, AuthError> {
        let user = self.store.verify_api_key(api_key).await?;
        Ok(user.map(|u| u.email))
    }

    async fn get_user_info(&self, email: &str) -> Result<UserInfo, AuthError> {
        let user = self
            .store
            .get_user_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(UserInfo {
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        })
    }

    async fn regenerate_api_key(&self, email: &str) -> Result<String, AuthError> {
        Ok(self.store.regenerate_api_key(email).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SecurityConfig;

    async fn temp_store() -> Store {
        let path =
            std::env::temp_dir().join(format!("cdrama-auth-test-{}.db", uuid::Uuid::new_v4()));
        Store::new(&format!("sqlite:{}", path.display())).await.unwrap()
    }

    fn fast_security() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            ..SecurityConfig::default()
        }
    }

    #[tokio::test]
    async fn duplicate_insert_maps_to_email_taken() {
        let store = temp_store().await;
        let security = fast_security();

        store
            .create_user("admin@example.com", "secret123", &security)
            .await
            .unwrap();
        let err = store
            .create_user("admin@example.com", "secret123", &security)
            .await
            .unwrap_err();

        assert!(matches!(signup_error(err), AuthError::EmailTaken));
    }

    #[test]
    fn other_failures_stay_internal() {
        let err = anyhow::anyhow!("Password hashing task panicked");
        assert!(matches!(signup_error(err), AuthError::Internal(_)));
    }

    #[tokio::test]
    async fn concurrent_signups_yield_one_account() {
        let mut config = Config::default();
        config.security = fast_security();
        let service = SeaOrmAuthService::new(temp_store().await, Arc::new(RwLock::new(config)));

        let credentials = Credentials {
            email: "admin@example.com".to_string(),
            password: "secret123".to_string(),
        };
        let (a, b) = tokio::join!(service.signup(&credentials), service.signup(&credentials));

        assert_eq!(usize::from(a.is_ok()) + usize::from(b.is_ok()), 1);
        let loser = a.err().or(b.err()).unwrap();
        assert!(matches!(loser, AuthError::EmailTaken));
    }
}
