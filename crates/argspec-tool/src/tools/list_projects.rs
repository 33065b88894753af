use std::sync::Arc;

use serde::Serialize;

use argspec_core::Arguments;
use argspec_schema::{InputSchema, Params};

use crate::response::ErrorResponse;
use crate::tool::Tool;
use crate::workspace::{OpenProjects, Project};

#[derive(Debug, Clone, Serialize)]
pub struct ListProjectsResponse {
    pub projects: Vec<Project>,
}

/// `list_projects`: the open projects with their names and base paths.
pub struct ListProjects {
    projects: Arc<OpenProjects>,
    params: Params<()>,
}

impl ListProjects {
    pub fn new(projects: Arc<OpenProjects>) -> Self {
        Self {
            projects,
            params: Params::new(()),
        }
    }
}

impl Tool for ListProjects {
    type Response = ListProjectsResponse;

    fn name(&self) -> &str {
        "list_projects"
    }

    fn description(&self) -> &str {
        "List the open projects with their names and base paths"
    }

    fn input_schema(&self) -> &InputSchema {
        self.params.schema()
    }

    fn execute(&self, arguments: &Arguments) -> Result<ListProjectsResponse, ErrorResponse> {
        self.params
            .validate(arguments)
            .map_n(|| {
                Ok(ListProjectsResponse {
                    projects: self.projects.list(),
                })
            })
            .or_else_errors(|errors| Err(errors.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_has_no_properties_or_required() {
        let tool = ListProjects::new(Arc::new(OpenProjects::new()));
        assert_eq!(tool.input_schema().to_value(), json!({"type": "object"}));
    }

    #[test]
    fn test_lists_open_projects() {
        let dir = tempfile::tempdir().unwrap();
        let projects = Arc::new(OpenProjects::new());
        let project = projects.open(dir.path()).unwrap();

        let response = ListProjects::new(projects).execute(&Arguments::new()).unwrap();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["projects"][0]["name"], project.name());
        assert_eq!(value["projects"][0]["basePath"], project.base_path().as_str());
    }
}
