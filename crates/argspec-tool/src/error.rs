//! Errors of the tool layer.
//!
//! Argument problems never show up here: they are part of a normal call
//! result. These are host-side failures.

use std::path::PathBuf;

use thiserror::Error;

use argspec_core::PathError;

/// Registry-level failure.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("a tool named {0} is already registered")]
    DuplicateTool(String),
}

/// Failure to open a project directory.
#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("cannot open project at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("project path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("project path is not valid UTF-8: {0}")]
    NonUtf8(PathBuf),

    #[error("invalid project location: {0}")]
    Location(#[from] PathError),
}
