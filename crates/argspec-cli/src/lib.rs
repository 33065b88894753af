//! # argspec-cli — Command-Line Tool Host
//!
//! Hosts the built-in tools outside any editor: projects are opened from
//! the command line or `ARGSPEC_PROJECTS`, and each invocation dispatches
//! one call through the same registry a transport would use.
//!
//! ## Subcommands
//!
//! - `argspec tools`: List registered tools.
//! - `argspec schema`: Print a tool's input schema.
//! - `argspec call`: Call a tool with JSON or YAML arguments.
//!
//! ```bash
//! argspec --project . tools
//! argspec schema search_text
//! argspec --project . call read_file --args '{"filePath": "Cargo.toml", "projectPath": "'$PWD'"}'
//! argspec --project . call search_text --args-file query.yaml --strict
//! ```

pub mod call;
pub mod input;
pub mod schema;

use std::sync::Arc;

use anyhow::{Context, Result};

use argspec_tool::{OpenProjects, Settings, ToolRegistry};

/// Open every configured project and build the default registry.
pub fn build_registry(settings: &Settings) -> Result<ToolRegistry> {
    let projects = Arc::new(OpenProjects::new());
    for path in &settings.projects {
        projects
            .open(path)
            .with_context(|| format!("failed to open project {}", path.display()))?;
    }
    tracing::debug!(projects = projects.len(), "workspace ready");
    Ok(ToolRegistry::with_defaults(projects, settings))
}
