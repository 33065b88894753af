//! Path-valued argument factories.

use std::path::{Path, PathBuf};

use super::{lookup_str, Decoded};
use crate::arg::{Arg, SchemaType};
use crate::error::ArgError;
use crate::path::{PathError, ProjectLocation, ProjectRelativePath};

fn reject(key: &str, error: PathError) -> ArgError {
    let key = key.to_string();
    match error {
        PathError::Empty => ArgError::MissingRequired { key },
        PathError::NotAbsolute(_) => ArgError::NotAbsolute { key },
        PathError::Traversal(_) | PathError::Rooted(_) => ArgError::TraversalViolation { key },
    }
}

fn decoded<T: 'static>(
    key: String,
    description: String,
    parse: fn(&str) -> Result<T, PathError>,
) -> Decoded<T> {
    let lookup_key = key.clone();
    Decoded::new(key, description, SchemaType::String, move |arguments| {
        match lookup_str(arguments, &lookup_key)? {
            None => Ok(None),
            Some(raw) => parse(raw).map(Some).map_err(|e| reject(&lookup_key, e)),
        }
    })
}

/// Required absolute project root, trailing separators stripped.
pub fn project_location(
    key: impl Into<String>,
    description: impl Into<String>,
) -> Arg<ProjectLocation> {
    decoded(key.into(), description.into(), |raw| ProjectLocation::new(raw)).required()
}

/// Required path inside a project. Inputs that climb out of the project
/// or carry a root are rejected with "Path is outside the project directory".
pub fn project_relative_path(
    key: impl Into<String>,
    description: impl Into<String>,
) -> Arg<ProjectRelativePath> {
    decoded(key.into(), description.into(), |raw| ProjectRelativePath::new(raw)).required()
}

/// Optional variant of [`project_relative_path`]. Absent or blank yields `None`.
pub fn optional_project_relative_path(
    key: impl Into<String>,
    description: impl Into<String>,
) -> Arg<Option<ProjectRelativePath>> {
    decoded(key.into(), description.into(), |raw| ProjectRelativePath::new(raw)).optional()
}

/// Required absolute filesystem path, taken as given.
pub fn absolute_path(key: impl Into<String>, description: impl Into<String>) -> Arg<PathBuf> {
    decoded(key.into(), description.into(), |raw| {
        if Path::new(raw).is_absolute() {
            Ok(PathBuf::from(raw))
        } else {
            Err(PathError::NotAbsolute(raw.to_string()))
        }
    })
    .required()
}
