//! # argspec CLI entry point
//!
//! Parses command-line arguments, loads settings from the environment,
//! installs logging and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use argspec_cli::build_registry;
use argspec_cli::call::{run_call, CallArgs};
use argspec_cli::schema::{run_schema, run_tools, SchemaArgs, ToolsArgs};
use argspec_tool::{LogFormat, Settings};

/// Host for argspec tools.
///
/// Opens project directories, advertises the built-in tools with their
/// derived input schemas, and runs single tool calls.
#[derive(Parser, Debug)]
#[command(name = "argspec", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Open a project directory. Repeatable; added to ARGSPEC_PROJECTS.
    #[arg(long = "project", global = true)]
    projects: Vec<PathBuf>,

    /// Log output format: text or json. Overrides ARGSPEC_LOG_FORMAT.
    #[arg(long, global = true, value_parser = parse_log_format)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the registered tools.
    Tools(ToolsArgs),

    /// Print the input schema of one tool.
    Schema(SchemaArgs),

    /// Call a tool and print its result.
    Call(CallArgs),
}

fn parse_log_format(raw: &str) -> Result<LogFormat, String> {
    raw.parse()
        .map_err(|_| format!("expected one of: text, json; got {raw:?}"))
}

fn init_tracing(verbose: u8, format: LogFormat) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("argspec: {e}");
            return ExitCode::from(2);
        }
    };
    settings.projects.extend(cli.projects.iter().cloned());
    if let Some(format) = cli.log_format {
        settings.log_format = format;
    }

    init_tracing(cli.verbose, settings.log_format);
    tracing::debug!(?settings, "argspec CLI starting");

    let result = build_registry(&settings).and_then(|registry| {
        let mut out = std::io::stdout().lock();
        match &cli.command {
            Commands::Tools(args) => run_tools(args, &registry, &mut out),
            Commands::Schema(args) => run_schema(args, &registry, &mut out),
            Commands::Call(args) => run_call(args, &registry, &mut out),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("argspec: {e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_tools() {
        let cli = Cli::try_parse_from(["argspec", "tools"]).unwrap();
        assert!(matches!(cli.command, Commands::Tools(ToolsArgs { json: false })));
        assert_eq!(cli.verbose, 0);
        assert!(cli.projects.is_empty());
        assert!(cli.log_format.is_none());
    }

    #[test]
    fn test_cli_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "argspec", "schema", "read_file", "-vv", "--project", "/a", "--project", "/b",
            "--log-format", "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.projects, vec![PathBuf::from("/a"), PathBuf::from("/b")]);
        assert_eq!(cli.log_format, Some(LogFormat::Json));
        if let Commands::Schema(args) = cli.command {
            assert_eq!(args.tool, "read_file");
        } else {
            panic!("expected schema command");
        }
    }

    #[test]
    fn test_cli_parse_call_inline_args() {
        let cli = Cli::try_parse_from([
            "argspec", "call", "search_text", "--args", r#"{"searchText":"x"}"#, "--strict",
        ])
        .unwrap();
        if let Commands::Call(args) = cli.command {
            assert_eq!(args.tool, "search_text");
            assert_eq!(args.args.as_deref(), Some(r#"{"searchText":"x"}"#));
            assert!(args.args_file.is_none());
            assert!(args.strict);
            assert!(!args.raw);
        } else {
            panic!("expected call command");
        }
    }

    #[test]
    fn test_cli_parse_call_args_file() {
        let cli = Cli::try_parse_from(["argspec", "call", "read_file", "--args-file", "args.yaml"])
            .unwrap();
        if let Commands::Call(args) = cli.command {
            assert_eq!(args.args_file, Some(PathBuf::from("args.yaml")));
        } else {
            panic!("expected call command");
        }
    }

    #[test]
    fn test_cli_rejects_both_argument_sources() {
        let result = Cli::try_parse_from([
            "argspec", "call", "read_file", "--args", "{}", "--args-file", "a.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_log_format() {
        let result = Cli::try_parse_from(["argspec", "tools", "--log-format", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["argspec"]).is_err());
    }
}
