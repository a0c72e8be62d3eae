//! Common test utilities

use crowdfund::{login, ProjectRepository, RegisterUserOptions, Session, Store, UserRegistry};
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Load both collections from `store`, as the binary does at start-up
pub fn open(store: &Store) -> (UserRegistry, ProjectRepository) {
    let snapshot = store.load();
    (
        UserRegistry::from_loaded(store.clone(), snapshot.users),
        ProjectRepository::from_loaded(store.clone(), snapshot.projects),
    )
}

pub fn register_options(email: &str, password: &str) -> RegisterUserOptions {
    RegisterUserOptions {
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        email: email.to_string(),
        password: password.to_string(),
        mobile_phone: "01012345678".to_string(),
    }
}

/// Register a user and log them in
pub fn register_and_login(users: &mut UserRegistry, email: &str) -> Session {
    users
        .register(register_options(email, "secret1"))
        .expect("Failed to register user");
    login(users, email, "secret1").expect("Failed to log in")
}
