//! User management module.
//!
//! This module provides functionality for managing accounts:
//! - Registering users with validated email, password and phone
//! - Looking users up by email or by credentials
//!
//! Users are stored in `users.json` in the data directory.

mod crud;
mod lookup;
mod types;

pub use crud::{RegisterUserOptions, UserRegistry};
pub use lookup::{find_user_by_credentials, find_user_by_email};
pub use types::{User, UserError};
