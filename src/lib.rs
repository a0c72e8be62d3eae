// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::indexing_slicing,
        clippy::float_cmp
    )
)]

pub mod config;
pub mod logging;
pub mod project;
pub mod session;
pub mod store;
pub mod user;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use config::{load_config, AppConfig, ConfigError, LoggingConfig, StorageConfig};
pub use project::{
    NewProject, Project, ProjectError, ProjectField, ProjectHandle, ProjectPatch, ProjectRepository,
    ProjectUpdate,
};
pub use session::{login, AuthError, Session};
pub use store::{LoadResult, LoadStatus, Snapshot, Store, StoreError};
pub use user::{RegisterUserOptions, User, UserError, UserRegistry};
pub use validation::{
    is_valid_date, is_valid_egyptian_phone, is_valid_email, is_valid_password, parse_date,
    parse_target, ValidationError,
};
