use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

use super::ValidationErrors;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Normalized email plus the raw password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl SignUpForm {
    pub fn validate(self, min_password_length: usize) -> Result<Credentials, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let email = normalize_email(&self.email);
        if !EMAIL.is_match(&email) {
            errors.push("email", "Invalid email address");
        }

        if self.password.chars().count() < min_password_length {
            errors.push(
                "password",
                format!("Password must be at least {min_password_length} characters"),
            );
        }

        errors.finish(Credentials {
            email,
            password: self.password,
        })
    }
}

impl LoginForm {
    pub fn validate(self) -> Result<Credentials, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let email = normalize_email(&self.email);
        if email.is_empty() {
            errors.push("email", "Email is required");
        }
        if self.password.is_empty() {
            errors.push("password", "Password is required");
        }

        errors.finish(Credentials {
            email,
            password: self.password,
        })
    }
}
