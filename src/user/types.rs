//! User type definitions and error types.

use crate::store::StoreError;
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    /// Unique key, matched case-sensitively
    pub email: String,
    /// Stored exactly as entered
    pub password: String,
    pub mobile_phone: String,
    /// Only active accounts may log in
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

/// User-related errors
#[derive(Error, Debug)]
pub enum UserError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Email '{0}' is already registered")]
    EmailTaken(String),

    #[error("User '{0}' not found")]
    UserNotFound(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

#[cfg(test)]
#[path = "types_tests_1.rs"]
mod types_tests;
