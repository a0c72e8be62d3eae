mod atomic;

pub use atomic::atomic_write;

use chrono::Timelike;
use std::path::{Path, PathBuf};

/// The per-user folder holding config and logs
pub const CROWDFUND_FOLDER: &str = ".crowdfund";

/// Default name of the persisted users collection
pub const USERS_FILE: &str = "users.json";

/// Default name of the persisted projects collection
pub const PROJECTS_FILE: &str = "projects.json";

/// Used when neither `--data-dir` nor the config file names one
pub const DEFAULT_DATA_DIR: &str = ".";

/// Default name of the config file inside the data directory
pub const CONFIG_FILE: &str = "crowdfund.toml";

/// Layout used for `created_at` timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Get the path to the per-user `~/.crowdfund` folder, falling back to `./.crowdfund`
#[must_use]
pub fn get_crowdfund_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CROWDFUND_FOLDER)
}

/// Get the default log directory (`~/.crowdfund/logs`)
#[must_use]
pub fn get_default_log_dir() -> PathBuf {
    get_crowdfund_home().join("logs")
}

/// Get the path to the config file for a data directory
#[must_use]
pub fn get_config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

/// Current local time truncated to whole seconds
#[must_use]
pub fn now_local() -> chrono::NaiveDateTime {
    let now = chrono::Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

#[cfg(test)]
#[path = "utils_tests_1.rs"]
mod tests;
