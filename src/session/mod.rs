//! Login and the authenticated session.
//!
//! Passwords are compared as plain text, exactly as stored.
// TODO: replace plain-text storage with salted hashes and a constant-time compare.

use crate::user::{find_user_by_credentials, User, UserRegistry};
use thiserror::Error;
use tracing::debug;

/// Login failures, kept distinct so callers can tell them apart
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account '{0}' is not active. Please contact support")]
    AccountInactive(String),
}

/// Proof that a user logged in.
///
/// Only [`login`] constructs one, so owner-scoped project operations that
/// take a `&Session` always act for an authenticated account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: User,
}

impl Session {
    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.user.email
    }
}

/// Authenticate against the registry.
///
/// The first record matching both email and password decides the outcome.
pub fn login(registry: &UserRegistry, email: &str, password: &str) -> Result<Session, AuthError> {
    let Some(user) = find_user_by_credentials(registry.users(), email, password) else {
        debug!("Login rejected for {}", email);
        return Err(AuthError::InvalidCredentials);
    };

    if !user.active {
        debug!("Login refused for inactive account {}", email);
        return Err(AuthError::AccountInactive(user.email.clone()));
    }

    debug!("Login succeeded for {}", email);
    Ok(Session { user: user.clone() })
}
