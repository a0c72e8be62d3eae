//! User registration and account state.

use super::lookup::find_user_by_email;
use super::types::{User, UserError};
use crate::store::{LoadResult, Store};
use crate::validation::{validate_email, validate_password, validate_phone};
use tracing::info;

/// Options for registering a user
#[derive(Debug, Clone, Default)]
pub struct RegisterUserOptions {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub mobile_phone: String,
}

/// The in-memory user collection, mirrored to the store's users file
#[derive(Debug)]
pub struct UserRegistry {
    store: Store,
    users: Vec<User>,
}

impl UserRegistry {
    #[must_use]
    pub fn new(store: Store, users: Vec<User>) -> Self {
        Self { store, users }
    }

    #[must_use]
    pub fn from_loaded(store: Store, loaded: LoadResult<User>) -> Self {
        Self::new(store, loaded.records)
    }

    /// Read the users file through `store`, starting empty if it is unusable.
    #[must_use]
    pub fn load(store: Store) -> Self {
        let loaded = store.load_users();
        Self::from_loaded(store, loaded)
    }

    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        find_user_by_email(&self.users, email)
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Register a new, active user and persist the collection.
    ///
    /// Checks run in order: email format, email uniqueness, password length,
    /// phone format. The first failure is returned and nothing is stored.
    pub fn register(&mut self, options: RegisterUserOptions) -> Result<User, UserError> {
        validate_email(&options.email)?;
        if self.find_by_email(&options.email).is_some() {
            return Err(UserError::EmailTaken(options.email));
        }
        validate_password(&options.password)?;
        validate_phone(&options.mobile_phone)?;

        let user = User {
            first_name: options.first_name,
            last_name: options.last_name,
            email: options.email,
            password: options.password,
            mobile_phone: options.mobile_phone,
            active: true,
        };

        self.users.push(user.clone());
        if let Err(e) = self.store.save_users(&self.users) {
            self.users.pop();
            return Err(e.into());
        }

        info!("Registered user: {}", user.email);
        Ok(user)
    }

    /// Flip the `active` flag of an existing account and persist.
    ///
    /// No interactive workflow calls this; login honors whatever the stored
    /// flag says.
    pub fn set_active(&mut self, email: &str, active: bool) -> Result<User, UserError> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.email == email)
            .ok_or_else(|| UserError::UserNotFound(email.to_string()))?;
        let previous = user.active;
        user.active = active;
        let updated = user.clone();

        if let Err(e) = self.store.save_users(&self.users) {
            if let Some(user) = self.users.iter_mut().find(|u| u.email == email) {
                user.active = previous;
            }
            return Err(e.into());
        }

        info!("Set active={} for user: {}", active, email);
        Ok(updated)
    }
}

#[cfg(test)]
#[path = "crud_tests.rs"]
mod tests;
