//! # Safe Path Values
//!
//! Two newtypes for paths supplied by remote callers:
//!
//! - [`ProjectLocation`]: an absolute project root, with trailing separators
//!   stripped so that equal roots compare equal.
//! - [`ProjectRelativePath`]: a path that, once constructed, is guaranteed to
//!   stay inside whatever base it is resolved against.
//!
//! ## Security Invariant
//!
//! A `ProjectRelativePath` can only be built through [`ProjectRelativePath::new`],
//! which rejects any input whose lexically normalized form climbs above its
//! starting point, and any input carrying a root or drive prefix (joining
//! such a path onto a base would discard the base). Resolution is the only
//! way to turn one into an absolute path.
//!
//! Lexical normalization does not see symlinks. Callers about to touch the
//! filesystem should use [`ProjectRelativePath::resolve_contained`], which
//! compares canonical paths.

use std::fmt;
use std::io;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Why a raw string was not accepted as a path value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The input was empty or whitespace.
    #[error("path is empty")]
    Empty,

    /// A project location must be absolute.
    #[error("path is not absolute: {0}")]
    NotAbsolute(String),

    /// A relative path normalized to a location above its base.
    #[error("path escapes its base directory: {0}")]
    Traversal(String),

    /// A relative path carried a root or drive prefix.
    #[error("path is not relative: {0}")]
    Rooted(String),
}

/// Failure of a filesystem-level containment check.
#[derive(Error, Debug)]
pub enum ContainmentError {
    #[error("cannot canonicalize {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The canonical target lies outside the canonical base.
    #[error("{target} resolves outside {base}")]
    Escapes { target: PathBuf, base: PathBuf },

    /// A symlink on the path points at nothing, so its target is unknown.
    #[error("dangling symlink at {0}")]
    DanglingLink(PathBuf),
}

/// Absolute location of a project root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProjectLocation(String);

impl ProjectLocation {
    /// Strip trailing `/` and `\` and require an absolute path.
    ///
    /// Nothing else is touched: surrounding whitespace is part of the path.
    /// A bare root such as `/` is kept as is. No symlinks are resolved.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, PathError> {
        let raw = raw.as_ref();
        if raw.trim().is_empty() {
            return Err(PathError::Empty);
        }
        let location = strip_trailing_separators(raw);
        if !Path::new(&location).is_absolute() {
            return Err(PathError::NotAbsolute(raw.to_string()));
        }
        Ok(Self(location))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// Absolute path of `relative` inside this project.
    pub fn join(&self, relative: &ProjectRelativePath) -> PathBuf {
        relative.resolve(self.as_path())
    }
}

impl fmt::Display for ProjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for ProjectLocation {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

fn strip_trailing_separators(raw: &str) -> String {
    let stripped = raw.trim_end_matches(['/', '\\']);
    if stripped.is_empty() {
        // The input was nothing but separators: keep one as the root.
        return raw[..1].to_string();
    }
    if cfg!(windows) && stripped.len() < raw.len() && is_drive_letter(stripped) {
        // `C:\` stays a drive root rather than the drive-relative `C:`.
        return raw[..stripped.len() + 1].to_string();
    }
    stripped.to_string()
}

fn is_drive_letter(s: &str) -> bool {
    matches!(s.as_bytes(), [letter, b':'] if letter.is_ascii_alphabetic())
}

/// A path guaranteed not to escape the base it is resolved against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProjectRelativePath(PathBuf);

impl ProjectRelativePath {
    /// Validate and normalize a caller-supplied relative path.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, PathError> {
        let raw = raw.as_ref();
        if raw.trim().is_empty() {
            return Err(PathError::Empty);
        }
        let path = Path::new(raw);
        if path.is_absolute() || path.has_root() || has_prefix(path) {
            return Err(PathError::Rooted(raw.to_string()));
        }
        let normalized = normalize(path);
        if starts_with_parent(&normalized) {
            return Err(PathError::Traversal(raw.to_string()));
        }
        Ok(Self(normalized))
    }

    /// True if `raw` normalizes to a path starting with `..`.
    pub fn is_traversal(raw: impl AsRef<Path>) -> bool {
        starts_with_parent(&normalize(raw.as_ref()))
    }

    /// The normalized relative path. Empty for the base itself.
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Join onto `base` and normalize lexically.
    pub fn resolve(&self, base: impl AsRef<Path>) -> PathBuf {
        normalize(&base.as_ref().join(&self.0))
    }

    /// Resolve against `base` and verify, with symlinks followed, that the
    /// result is still inside `base`.
    ///
    /// The target need not exist: the deepest existing ancestor is
    /// canonicalized and the remaining components are appended.
    ///
    /// # Errors
    ///
    /// [`ContainmentError::Escapes`] if a symlink leads outside `base`,
    /// [`ContainmentError::DanglingLink`] if a broken symlink is on the way,
    /// and [`ContainmentError::Io`] if `base` cannot be canonicalized.
    pub fn resolve_contained(&self, base: impl AsRef<Path>) -> Result<PathBuf, ContainmentError> {
        let base = base.as_ref();
        let canonical_base = std::fs::canonicalize(base).map_err(|source| ContainmentError::Io {
            path: base.to_path_buf(),
            source,
        })?;
        let target = canonical_base.join(&self.0);

        let mut existing = target.as_path();
        let mut missing = Vec::new();
        let canonical = loop {
            match std::fs::canonicalize(existing) {
                Ok(found) => break found,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    if std::fs::symlink_metadata(existing).is_ok() {
                        return Err(ContainmentError::DanglingLink(existing.to_path_buf()));
                    }
                    match (existing.file_name(), existing.parent()) {
                        (Some(name), Some(parent)) => {
                            missing.push(name.to_os_string());
                            existing = parent;
                        }
                        _ => {
                            return Err(ContainmentError::Io {
                                path: existing.to_path_buf(),
                                source: e,
                            })
                        }
                    }
                }
                Err(source) => {
                    return Err(ContainmentError::Io {
                        path: existing.to_path_buf(),
                        source,
                    })
                }
            }
        };

        let resolved = missing
            .into_iter()
            .rev()
            .fold(canonical, |path, name| path.join(name));
        if resolved.starts_with(&canonical_base) {
            Ok(resolved)
        } else {
            Err(ContainmentError::Escapes {
                target: resolved,
                base: canonical_base,
            })
        }
    }
}

impl fmt::Display for ProjectRelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Lexically normalize a path: drop `.`, fold `name/..`, and never climb
/// above a root. Leading `..` components of a relative path are kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last().copied() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    parts.iter().collect()
}

fn starts_with_parent(path: &Path) -> bool {
    matches!(path.components().next(), Some(Component::ParentDir))
}

fn has_prefix(path: &Path) -> bool {
    matches!(path.components().next(), Some(Component::Prefix(_)))
}
