//! Domain service for admin accounts.
//!
//! Handles sign-up, login and API key lookups. Session handling stays in the
//! HTTP layer.

use crate::forms::Credentials;
use serde::Serialize;
use thiserror::Error;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("An account with this email already exists")]
    EmailTaken,

    #[error("Sign-up is disabled")]
    SignupDisabled,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Identity returned by login and sign-up.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub email: String,
    pub api_key: String,
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account from already validated credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmailTaken`] if the email is registered and
    /// [`AuthError::SignupDisabled`] when sign-up is switched off.
    async fn signup(&self, credentials: &Credentials) -> Result<LoginResult, AuthError>;

    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn login(&self, credentials: &Credentials) -> Result<LoginResult, AuthError>;

    /// Verifies an API key and returns the owner's email if valid.
    async fn verify_api_key(&self, api_key: &str) -> Result<Option<String>, AuthError>;

    async fn get_user_info(&self, email: &str) -> Result<UserInfo, AuthError>;

    /// Regenerates the API key for a user and returns the new one.
    async fn regenerate_api_key(&self, email: &str) -> Result<String, AuthError>;
}
