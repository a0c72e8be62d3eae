//! Project listings owned by registered users.
//!
//! Projects are stored in `projects.json` in the data directory. Edits and
//! deletions go through a [`ProjectHandle`], which can only be obtained from
//! the current user's own project list.

mod repository;
mod types;
mod update_helpers;

pub use repository::ProjectRepository;
pub use types::{
    NewProject, Project, ProjectError, ProjectField, ProjectHandle, ProjectPatch, ProjectUpdate,
};
