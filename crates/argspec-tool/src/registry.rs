//! # Tool Registry
//!
//! Holds every tool the host exposes, in registration order. Transports
//! receive the tool specifications through a [`ToolSink`] and dispatch
//! calls back through [`ToolRegistry::call`].

use std::sync::Arc;

use argspec_core::Arguments;

use crate::config::Settings;
use crate::error::ToolError;
use crate::response::CallToolResult;
use crate::tool::{DynTool, ToolSpecification};
use crate::tools::{ListProjects, ReadFile, SearchText};
use crate::workspace::OpenProjects;

/// Receiver of tool specifications at registration time.
pub trait ToolSink {
    fn add_tool(&mut self, specification: ToolSpecification);
}

impl ToolSink for Vec<ToolSpecification> {
    fn add_tool(&mut self, specification: ToolSpecification) {
        self.push(specification);
    }
}

#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn DynTool>>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in tools, backed by `projects`.
    pub fn with_defaults(projects: Arc<OpenProjects>, settings: &Settings) -> Self {
        let builtins: [Arc<dyn DynTool>; 3] = [
            Arc::new(ListProjects::new(Arc::clone(&projects))),
            Arc::new(ReadFile::new(Arc::clone(&projects), settings.max_read_bytes)),
            Arc::new(SearchText::new(projects, settings.max_read_bytes)),
        ];
        Self {
            tools: builtins.into(),
        }
    }

    /// Add a tool. Names are unique.
    pub fn register(&mut self, tool: impl DynTool + 'static) -> Result<(), ToolError> {
        if self.get(tool.name()).is_some() {
            return Err(ToolError::DuplicateTool(tool.name().to_string()));
        }
        self.tools.push(Arc::new(tool));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn tools(&self) -> &[Arc<dyn DynTool>] {
        &self.tools
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn DynTool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn specifications(&self) -> Vec<ToolSpecification> {
        self.tools.iter().map(|t| t.specification()).collect()
    }

    /// Run the named tool. Argument and execution failures come back as an
    /// error call result; only an unknown name is an `Err`.
    pub fn call(&self, name: &str, arguments: &Arguments) -> Result<CallToolResult, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        tracing::debug!(tool = name, "calling tool");
        Ok(tool.call(arguments))
    }

    /// Hand every specification to `sink`, in registration order.
    pub fn register_all_with(&self, sink: &mut impl ToolSink) {
        tracing::info!("Registering {} tools...", self.tools.len());
        for tool in &self.tools {
            sink.add_tool(tool.specification());
        }
        tracing::info!(tools = ?self.names(), "tools registered");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> ToolRegistry {
        ToolRegistry::with_defaults(Arc::new(OpenProjects::new()), &Settings::default())
    }

    #[test]
    fn test_defaults_in_order() {
        assert_eq!(
            registry().names(),
            vec!["list_projects", "read_file", "search_text"]
        );
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = registry();
        let err = registry
            .register(ListProjects::new(Arc::new(OpenProjects::new())))
            .unwrap_err();
        assert!(matches!(err, ToolError::DuplicateTool(name) if name == "list_projects"));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_unknown_tool() {
        let err = registry().call("nope", &Arguments::new()).unwrap_err();
        assert_eq!(err.to_string(), "unknown tool: nope");
    }

    #[test]
    fn test_register_all_with_sink() {
        let mut sink: Vec<ToolSpecification> = Vec::new();
        registry().register_all_with(&mut sink);
        let names: Vec<_> = sink.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["list_projects", "read_file", "search_text"]);
        assert!(sink[0].input_schema.properties().is_none());
    }

    #[test]
    fn test_call_with_bad_arguments_is_error_result() {
        let args = json!({"filePath": "../x"});
        let result = registry()
            .call("read_file", args.as_object().unwrap())
            .unwrap();
        assert!(result.is_error());
        assert_eq!(
            result.text(),
            "Error: Path is outside the project directory, projectPath is required"
        );
    }
}
