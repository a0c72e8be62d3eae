//! Lookups over an in-memory user collection.

use super::types::User;

/// First user with exactly this email (case-sensitive).
#[must_use]
pub fn find_user_by_email<'a>(users: &'a [User], email: &str) -> Option<&'a User> {
    users.iter().find(|u| u.email == email)
}

/// First user whose email and password both match exactly.
#[must_use]
pub fn find_user_by_credentials<'a>(
    users: &'a [User],
    email: &str,
    password: &str,
) -> Option<&'a User> {
    users
        .iter()
        .find(|u| u.email == email && u.password == password)
}

#[cfg(test)]
#[path = "lookup_tests.rs"]
mod tests;
