//! Storage operations for `users.json` and `projects.json`.
//!
//! Both collections are read wholesale at start-up and written wholesale on
//! every change. A missing or unparseable file is not an error: the collection
//! starts out empty and the reason is kept in [`LoadStatus`].

use crate::config::StorageConfig;
use crate::project::Project;
use crate::user::User;
use crate::utils::{atomic_write, PROJECTS_FILE, USERS_FILE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Storage write errors. Read problems never surface here.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to serialize {resource}: {source}")]
    Serialize {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// How a collection was obtained at load time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// File parsed successfully
    Loaded,
    /// File did not exist (fresh install)
    Missing,
    /// File existed but was not a JSON array of the expected records
    Corrupt(String),
    /// File existed but could not be read
    Unreadable(String),
}

/// A loaded collection plus how it was obtained.
///
/// Every status other than [`LoadStatus::Loaded`] comes with an empty
/// `records` vector.
#[derive(Debug, Clone)]
pub struct LoadResult<T> {
    pub records: Vec<T>,
    pub status: LoadStatus,
}

impl<T> LoadResult<T> {
    fn empty(status: LoadStatus) -> Self {
        Self {
            records: Vec::new(),
            status,
        }
    }

    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.status == LoadStatus::Missing
    }

    #[must_use]
    pub fn is_corrupt(&self) -> bool {
        matches!(self.status, LoadStatus::Corrupt(_) | LoadStatus::Unreadable(_))
    }
}

/// Both collections as read from disk
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub users: LoadResult<User>,
    pub projects: LoadResult<Project>,
}

/// Locations of the two persisted resources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    users_path: PathBuf,
    projects_path: PathBuf,
}

impl Store {
    #[must_use]
    pub fn new(users_path: impl Into<PathBuf>, projects_path: impl Into<PathBuf>) -> Self {
        Self {
            users_path: users_path.into(),
            projects_path: projects_path.into(),
        }
    }

    /// Store using the default file names inside `dir`
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(USERS_FILE), dir.join(PROJECTS_FILE))
    }

    #[must_use]
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(
            config.data_dir().join(&config.users_file),
            config.data_dir().join(&config.projects_file),
        )
    }

    #[must_use]
    pub fn users_path(&self) -> &Path {
        &self.users_path
    }

    #[must_use]
    pub fn projects_path(&self) -> &Path {
        &self.projects_path
    }

    /// Read both collections, falling back to empty on any read problem.
    #[must_use]
    pub fn load(&self) -> Snapshot {
        Snapshot {
            users: self.load_users(),
            projects: self.load_projects(),
        }
    }

    #[must_use]
    pub fn load_users(&self) -> LoadResult<User> {
        read_collection(&self.users_path, "users")
    }

    #[must_use]
    pub fn load_projects(&self) -> LoadResult<Project> {
        read_collection(&self.projects_path, "projects")
    }

    /// Overwrite both resources with the given collections.
    pub fn save(&self, users: &[User], projects: &[Project]) -> Result<(), StoreError> {
        self.save_users(users)?;
        self.save_projects(projects)
    }

    pub fn save_users(&self, users: &[User]) -> Result<(), StoreError> {
        write_collection(&self.users_path, "users", users)
    }

    pub fn save_projects(&self, projects: &[Project]) -> Result<(), StoreError> {
        write_collection(&self.projects_path, "projects", projects)
    }
}

fn read_collection<T: DeserializeOwned>(path: &Path, resource: &str) -> LoadResult<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No {} file at {}; starting empty", resource, path.display());
            return LoadResult::empty(LoadStatus::Missing);
        }
        Err(e) => {
            warn!(
                "Could not read {} from {}; starting empty: {}",
                resource,
                path.display(),
                e
            );
            return LoadResult::empty(LoadStatus::Unreadable(e.to_string()));
        }
    };

    match serde_json::from_str::<Vec<T>>(&content) {
        Ok(records) => {
            debug!(
                "Loaded {} {} from {}",
                records.len(),
                resource,
                path.display()
            );
            LoadResult {
                records,
                status: LoadStatus::Loaded,
            }
        }
        Err(e) => {
            warn!(
                "Corrupt {} file at {}; starting empty: {}",
                resource,
                path.display(),
                e
            );
            LoadResult::empty(LoadStatus::Corrupt(e.to_string()))
        }
    }
}

fn write_collection<T: Serialize>(
    path: &Path,
    resource: &'static str,
    records: &[T],
) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(records)
        .map_err(|source| StoreError::Serialize { resource, source })?;
    atomic_write(path, &content).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote {} {} to {}", records.len(), resource, path.display());
    Ok(())
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
