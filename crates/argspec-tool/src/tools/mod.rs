//! Built-in filesystem tools.
//!
//! Each tool declares its arguments once in a [`Params`](argspec_schema::Params)
//! list; the advertised schema and the call-time validation both come from it.

mod list_projects;
mod read_file;
mod search_text;

pub use list_projects::{ListProjects, ListProjectsResponse};
pub use read_file::{ReadFile, ReadFileResponse};
pub use search_text::{SearchMatch, SearchText, SearchTextResponse};
