//! # argspec-tool — Tools Built on Typed Arguments
//!
//! The layer between a transport and the argument framework: the [`Tool`]
//! trait, call results, the [`ToolRegistry`], the set of [`OpenProjects`]
//! that resolves `projectPath`, host [`Settings`], and the built-in
//! filesystem tools (`list_projects`, `read_file`, `search_text`).
//!
//! ## Call Flow
//!
//! 1. A transport asks the registry for tool specifications once, through
//!    [`ToolRegistry::register_all_with`].
//! 2. Each call is dispatched by name with [`ToolRegistry::call`].
//! 3. The tool validates every argument, then either runs or answers with
//!    one `"Error: ..."` result listing every rejected argument.
//!
//! ## Crate Policy
//!
//! - Tools never panic on caller input. Every failure is a call result.
//! - Filesystem access stays inside an open project root, symlinks included.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod error;
pub mod registry;
pub mod response;
pub mod tool;
pub mod tools;
pub mod workspace;

pub use config::{ConfigError, LogFormat, Settings, DEFAULT_MAX_READ_BYTES};
pub use error::{ToolError, WorkspaceError};
pub use registry::{ToolRegistry, ToolSink};
pub use response::{serialize_response, CallToolResult, ErrorResponse, LineRange, TextContent};
pub use tool::{DynTool, Tool, ToolSpecification};
pub use workspace::{OpenProjects, Project};
