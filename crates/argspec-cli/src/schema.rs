//! # Tool Listing — `argspec tools` and `argspec schema`.
//!
//! ```bash
//! argspec tools
//! argspec tools --json
//! argspec schema read_file
//! ```

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use argspec_tool::{ToolError, ToolRegistry, ToolSpecification};

/// Arguments of `argspec tools`.
#[derive(Args, Debug)]
pub struct ToolsArgs {
    /// Print the full tool specifications as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments of `argspec schema`.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Tool name, as listed by `argspec tools`.
    pub tool: String,
}

pub fn run_tools(args: &ToolsArgs, registry: &ToolRegistry, out: &mut impl Write) -> Result<u8> {
    let mut specs: Vec<ToolSpecification> = Vec::new();
    registry.register_all_with(&mut specs);

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&specs)?)?;
        return Ok(0);
    }
    let width = specs.iter().map(|s| s.name.len()).max().unwrap_or(0);
    for spec in &specs {
        writeln!(out, "  {:<width$}  {}", spec.name, spec.description)?;
    }
    Ok(0)
}

pub fn run_schema(args: &SchemaArgs, registry: &ToolRegistry, out: &mut impl Write) -> Result<u8> {
    let tool = registry
        .get(&args.tool)
        .ok_or_else(|| ToolError::UnknownTool(args.tool.clone()))?;
    let schema = serde_json::to_string_pretty(tool.input_schema())
        .with_context(|| format!("failed to render schema of {}", args.tool))?;
    writeln!(out, "{schema}")?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use argspec_tool::{OpenProjects, Settings};
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn registry() -> ToolRegistry {
        ToolRegistry::with_defaults(Arc::new(OpenProjects::new()), &Settings::default())
    }

    #[test]
    fn test_tools_lists_names_and_descriptions() {
        let mut out = Vec::new();
        run_tools(&ToolsArgs { json: false }, &registry(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("  list_projects  List the open projects"));
        assert!(lines[1].starts_with("  read_file      Read the content of a file"));
    }

    #[test]
    fn test_tools_json_is_specifications() {
        let mut out = Vec::new();
        run_tools(&ToolsArgs { json: true }, &registry(), &mut out).unwrap();
        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0], json!({
            "name": "list_projects",
            "description": "List the open projects with their names and base paths",
            "inputSchema": {"type": "object"},
        }));
        assert_eq!(value[1]["inputSchema"]["required"], json!(["filePath", "projectPath"]));
    }

    #[test]
    fn test_schema_of_one_tool() {
        let mut out = Vec::new();
        let args = SchemaArgs { tool: "read_file".into() };
        run_schema(&args, &registry(), &mut out).unwrap();
        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["properties"]["startLine"]["type"], "integer");
        assert_eq!(
            value["properties"]["startLine"]["description"],
            "Start line number (1-based, inclusive). If not specified, reads from the beginning. (min: 1)"
        );
    }

    #[test]
    fn test_schema_of_unknown_tool() {
        let args = SchemaArgs { tool: "nope".into() };
        let err = run_schema(&args, &registry(), &mut Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "unknown tool: nope");
    }
}
