//! Project type definitions and error types.

use crate::store::StoreError;
use crate::validation::ValidationError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// A crowdfunding campaign listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Record identity; records stored without one get a fresh id on load
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    pub details: String,
    /// Funding goal in EGP, always > 0
    pub total_target: f64,
    pub start_date: NaiveDate,
    /// Strictly after `start_date`
    pub end_date: NaiveDate,
    /// Email of the creating user; never changes
    pub owner_email: String,
    #[serde(with = "timestamp_format")]
    pub created_at: NaiveDateTime,
}

impl Project {
    /// Whether `date` falls inside `[start_date, end_date]`
    #[must_use]
    pub fn is_running_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    #[must_use]
    pub fn is_owned_by(&self, email: &str) -> bool {
        self.owner_email == email
    }
}

/// Fields for creating a project, as gathered from the user
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub title: String,
    pub details: String,
    pub total_target: f64,
    pub start_date: String,
    pub end_date: String,
}

/// Partial edit of a project.
///
/// `None` and blank strings both mean "keep the current value".
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub details: Option<String>,
    pub total_target: Option<f64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ProjectPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        non_blank(self.title.as_deref()).is_none()
            && non_blank(self.details.as_deref()).is_none()
            && self.total_target.is_none()
            && non_blank(self.start_date.as_deref()).is_none()
            && non_blank(self.end_date.as_deref()).is_none()
    }
}

/// One editable field of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectField {
    Title,
    Details,
    TotalTarget,
    StartDate,
    EndDate,
}

impl fmt::Display for ProjectField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Title => "title",
            Self::Details => "details",
            Self::TotalTarget => "target",
            Self::StartDate => "start date",
            Self::EndDate => "end date",
        };
        f.write_str(name)
    }
}

/// Result of an edit: the saved project and the patch fields that failed
/// validation and were left at their previous values
#[derive(Debug, Clone)]
pub struct ProjectUpdate {
    pub project: Project,
    pub rejected: Vec<(ProjectField, ValidationError)>,
}

impl ProjectUpdate {
    /// Whether every supplied field was applied
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Reference to a project owned by an authenticated user.
///
/// Only [`super::ProjectRepository::owned`] and
/// [`super::ProjectRepository::select_owned`] hand these out, so update and
/// delete can never reach a project outside the caller's own list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectHandle {
    pub(super) id: Uuid,
    pub(super) owner_email: String,
}

impl ProjectHandle {
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn owner_email(&self) -> &str {
        &self.owner_email
    }
}

/// Project-related errors
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Project '{0}' not found")]
    NotFound(Uuid),

    #[error("Invalid project number {position}. You have {len} project(s)")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("Project does not belong to the current user")]
    NotOwner,

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// Serde adapter for `YYYY-MM-DD HH:MM:SS` timestamps
mod timestamp_format {
    use crate::utils::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
