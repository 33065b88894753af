//! # Open Projects
//!
//! The set of project roots the host has opened. Tools resolve the
//! `projectPath` argument against it through [`ProjectResolver`].
//!
//! ## Thread Safety
//!
//! `OpenProjects` is `Send + Sync`. Lookups take a read lock; opening and
//! closing take a write lock. No lock is held across tool execution.

use std::path::Path;

use parking_lot::RwLock;
use serde::Serialize;

use argspec_core::{ProjectLocation, ProjectResolver};

use crate::error::WorkspaceError;

/// An open project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    name: String,
    base_path: ProjectLocation,
}

impl Project {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_path(&self) -> &ProjectLocation {
        &self.base_path
    }
}

#[derive(Debug, Default)]
pub struct OpenProjects {
    projects: RwLock<Vec<Project>>,
}

impl OpenProjects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the directory at `path`. The path is canonicalized, so the
    /// project is found under its real location. Opening an already open
    /// project returns the existing entry.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<Project, WorkspaceError> {
        let path = path.as_ref();
        let canonical = std::fs::canonicalize(path).map_err(|source| WorkspaceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if !canonical.is_dir() {
            return Err(WorkspaceError::NotADirectory(canonical));
        }
        let Some(raw) = canonical.to_str() else {
            return Err(WorkspaceError::NonUtf8(canonical.clone()));
        };
        let base_path = ProjectLocation::new(raw)?;
        let name = canonical
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(raw)
            .to_string();

        let mut projects = self.projects.write();
        if let Some(existing) = projects.iter().find(|p| p.base_path == base_path) {
            return Ok(existing.clone());
        }
        let project = Project { name, base_path };
        tracing::info!(name = %project.name, path = %project.base_path, "opened project");
        projects.push(project.clone());
        Ok(project)
    }

    /// Close the project at `location`. Returns whether one was open.
    pub fn close(&self, location: &ProjectLocation) -> bool {
        let mut projects = self.projects.write();
        let before = projects.len();
        projects.retain(|p| &p.base_path != location);
        before != projects.len()
    }

    /// Snapshot of the open projects in opening order.
    pub fn list(&self) -> Vec<Project> {
        self.projects.read().clone()
    }

    pub fn len(&self) -> usize {
        self.projects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.read().is_empty()
    }
}

impl ProjectResolver for OpenProjects {
    type Project = Project;

    fn resolve_project(&self, location: &ProjectLocation) -> Option<Project> {
        self.projects
            .read()
            .iter()
            .find(|p| &p.base_path == location)
            .cloned()
    }
}
