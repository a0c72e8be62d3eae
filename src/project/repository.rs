//! The in-memory project collection and its operations.

use super::types::{NewProject, Project, ProjectError, ProjectHandle, ProjectPatch, ProjectUpdate};
use super::update_helpers::{apply_updates, resolve_patch, ResolvedPatch};
use crate::session::Session;
use crate::store::{LoadResult, Store};
use crate::utils::now_local;
use crate::validation::{parse_date, validate_date_range, validate_target};
use std::collections::HashSet;
use tracing::{info, warn};
use uuid::Uuid;

/// Projects in insertion order, mirrored to the store's projects file
#[derive(Debug)]
pub struct ProjectRepository {
    store: Store,
    projects: Vec<Project>,
}

impl ProjectRepository {
    #[must_use]
    pub fn new(store: Store, projects: Vec<Project>) -> Self {
        Self { store, projects }
    }

    /// Build from a load result, re-keying any record whose id was already
    /// taken by an earlier record so every handle names exactly one project.
    #[must_use]
    pub fn from_loaded(store: Store, loaded: LoadResult<Project>) -> Self {
        let mut projects = loaded.records;
        let mut seen = HashSet::with_capacity(projects.len());
        for project in &mut projects {
            if !seen.insert(project.id) {
                let fresh = Uuid::new_v4();
                warn!(
                    "Duplicate project id {} for '{}'; assigned {}",
                    project.id, project.title, fresh
                );
                project.id = fresh;
                seen.insert(fresh);
            }
        }
        Self::new(store, projects)
    }

    /// Read the projects file through `store`, starting empty if it is unusable.
    #[must_use]
    pub fn load(store: Store) -> Self {
        let loaded = store.load_projects();
        Self::from_loaded(store, loaded)
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Every project, in insertion order
    #[must_use]
    pub fn list_all(&self) -> &[Project] {
        &self.projects
    }

    /// Projects created by `owner_email`, in insertion order
    #[must_use]
    pub fn list_by_owner(&self, owner_email: &str) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| p.is_owned_by(owner_email))
            .collect()
    }

    /// Handles for the session user's projects, aligned with
    /// [`Self::list_by_owner`] for the same email.
    #[must_use]
    pub fn owned(&self, session: &Session) -> Vec<ProjectHandle> {
        self.list_by_owner(session.email())
            .into_iter()
            .map(|p| ProjectHandle {
                id: p.id,
                owner_email: p.owner_email.clone(),
            })
            .collect()
    }

    /// Pick the project at `position` (0-based) in the session user's own list.
    pub fn select_owned(
        &self,
        session: &Session,
        position: usize,
    ) -> Result<ProjectHandle, ProjectError> {
        let owned = self.owned(session);
        let len = owned.len();
        owned
            .into_iter()
            .nth(position)
            .ok_or(ProjectError::PositionOutOfRange { position, len })
    }

    #[must_use]
    pub fn get(&self, handle: &ProjectHandle) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == handle.id)
    }

    /// Create a project owned by the session user and persist.
    pub fn create(&mut self, session: &Session, new: NewProject) -> Result<Project, ProjectError> {
        let total_target = validate_target(new.total_target)?;
        let start_date = parse_date(&new.start_date)?;
        let end_date = parse_date(&new.end_date)?;
        validate_date_range(start_date, end_date)?;

        let project = Project {
            id: Uuid::new_v4(),
            title: new.title,
            details: new.details,
            total_target,
            start_date,
            end_date,
            owner_email: session.email().to_string(),
            created_at: now_local(),
        };

        self.projects.push(project.clone());
        if let Err(e) = self.store.save_projects(&self.projects) {
            self.projects.pop();
            return Err(e.into());
        }

        info!("Created project {} for {}", project.id, project.owner_email);
        Ok(project)
    }

    /// Apply the present, non-blank fields of `patch` that pass validation,
    /// then persist.
    ///
    /// Fields that fail are reported in [`ProjectUpdate::rejected`] and keep
    /// their current values. If the save fails the project is restored.
    pub fn update(
        &mut self,
        handle: &ProjectHandle,
        patch: ProjectPatch,
    ) -> Result<ProjectUpdate, ProjectError> {
        let idx = self.position_of(handle)?;
        let Some(project) = self.projects.get_mut(idx) else {
            return Err(ProjectError::NotFound(handle.id));
        };

        let ResolvedPatch { updates, rejected } = resolve_patch(project, patch);
        let previous = project.clone();
        apply_updates(project, updates);
        let updated = project.clone();

        if let Err(e) = self.store.save_projects(&self.projects) {
            if let Some(project) = self.projects.get_mut(idx) {
                *project = previous;
            }
            return Err(e.into());
        }

        if rejected.is_empty() {
            info!("Updated project {}", handle.id);
        } else {
            info!(
                "Updated project {} with {} field(s) rejected",
                handle.id,
                rejected.len()
            );
        }
        Ok(ProjectUpdate {
            project: updated,
            rejected,
        })
    }

    /// Remove exactly the referenced project and persist.
    pub fn delete(&mut self, handle: &ProjectHandle) -> Result<Project, ProjectError> {
        let idx = self.position_of(handle)?;
        let removed = self.projects.remove(idx);

        if let Err(e) = self.store.save_projects(&self.projects) {
            self.projects.insert(idx, removed);
            return Err(e.into());
        }

        info!("Deleted project {}", handle.id);
        Ok(removed)
    }

    /// Projects whose `[start_date, end_date]` contains `date`, inclusive.
    pub fn search_by_date(&self, date: &str) -> Result<Vec<&Project>, ProjectError> {
        let date = parse_date(date)?;
        Ok(self
            .projects
            .iter()
            .filter(|p| p.is_running_on(date))
            .collect())
    }

    fn position_of(&self, handle: &ProjectHandle) -> Result<usize, ProjectError> {
        let idx = self
            .projects
            .iter()
            .position(|p| p.id == handle.id)
            .ok_or(ProjectError::NotFound(handle.id))?;
        match self.projects.get(idx) {
            Some(p) if p.is_owned_by(&handle.owner_email) => Ok(idx),
            _ => Err(ProjectError::NotOwner),
        }
    }
}

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;
