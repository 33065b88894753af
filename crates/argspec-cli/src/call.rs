//! # Tool Calls — `argspec call`.
//!
//! Dispatches one call through the registry and prints the call result
//! text. The exit code is 1 when the tool reports an error.
//!
//! With `--strict`, the arguments are first checked against the tool's
//! advertised JSON Schema, the way a strict client would before sending.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use argspec_core::Arguments;
use argspec_schema::{check_arguments, ConformanceError};
use argspec_tool::{ToolError, ToolRegistry};

use crate::input;

/// Arguments of `argspec call`.
#[derive(Args, Debug)]
pub struct CallArgs {
    /// Tool name, as listed by `argspec tools`.
    pub tool: String,

    /// Tool arguments as an inline JSON object.
    #[arg(long, conflicts_with = "args_file")]
    pub args: Option<String>,

    /// Read tool arguments from a .json, .yaml or .yml file.
    #[arg(long)]
    pub args_file: Option<PathBuf>,

    /// Check the arguments against the tool's input schema before calling.
    #[arg(long)]
    pub strict: bool,

    /// Print the full call result as JSON instead of its text.
    #[arg(long)]
    pub raw: bool,
}

impl CallArgs {
    fn arguments(&self) -> Result<Arguments> {
        match (&self.args, &self.args_file) {
            (Some(raw), _) => input::parse_json(raw),
            (None, Some(path)) => input::load_file(path),
            (None, None) => Ok(Arguments::new()),
        }
    }
}

pub fn run_call(args: &CallArgs, registry: &ToolRegistry, out: &mut impl Write) -> Result<u8> {
    let arguments = args.arguments()?;

    if args.strict {
        let tool = registry
            .get(&args.tool)
            .ok_or_else(|| ToolError::UnknownTool(args.tool.clone()))?;
        match check_arguments(tool.input_schema(), &arguments) {
            Ok(()) => {}
            Err(ConformanceError::Violations(violations)) => {
                writeln!(out, "Error: arguments do not match the input schema")?;
                writeln!(out, "{violations}")?;
                return Ok(1);
            }
            Err(e) => return Err(e.into()),
        }
    }

    let result = registry.call(&args.tool, &arguments)?;
    if args.raw {
        writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
    } else {
        writeln!(out, "{}", result.text())?;
    }
    Ok(u8::from(result.is_error()))
}
