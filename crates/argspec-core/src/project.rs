//! Project resolution.
//!
//! Turning a location into a live project handle belongs to the host. The
//! host passes that capability in as a [`ProjectResolver`]; the argument
//! layer itself never touches the project registry.

use std::sync::Arc;

use crate::arg::Arg;
use crate::builder::path::project_location;
use crate::error::ArgError;
use crate::path::ProjectLocation;
use crate::validated::Validated;

/// Key under which every project-scoped tool receives its project root.
pub const PROJECT_PATH_KEY: &str = "projectPath";

/// Advertised description of [`PROJECT_PATH_KEY`].
pub const PROJECT_PATH_DESCRIPTION: &str =
    "Absolute path to the project root directory. Get this value from list_projects if unknown.";

/// Looks up an open project by its root location.
pub trait ProjectResolver: Send + Sync {
    type Project: 'static;

    fn resolve_project(&self, location: &ProjectLocation) -> Option<Self::Project>;
}

impl<R: ProjectResolver + ?Sized> ProjectResolver for Arc<R> {
    type Project = R::Project;

    fn resolve_project(&self, location: &ProjectLocation) -> Option<Self::Project> {
        (**self).resolve_project(location)
    }
}

impl ProjectLocation {
    /// Resolve through `resolver`, reporting a miss against `key`.
    pub fn resolve_validated<R: ProjectResolver + ?Sized>(
        &self,
        key: &str,
        resolver: &R,
    ) -> Validated<R::Project> {
        match resolver.resolve_project(self) {
            Some(project) => Validated::Valid(project),
            None => {
                tracing::debug!(location = %self, "no open project at location");
                Validated::Invalid(ArgError::ProjectNotFound {
                    key: key.to_string(),
                    path: self.to_string(),
                })
            }
        }
    }
}

/// The required `projectPath` argument, resolved to a project handle.
pub fn project<R: ProjectResolver + 'static>(resolver: R) -> Arg<R::Project> {
    project_location(PROJECT_PATH_KEY, PROJECT_PATH_DESCRIPTION)
        .and_then(move |location| location.resolve_validated(PROJECT_PATH_KEY, &resolver))
}
