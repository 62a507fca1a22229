//! Command-line argument definitions shared by the binary and the
//! `completions` command.

use crate::commands::{check::CheckArgs, completions::CompletionsArgs, eval::EvalArgs};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "shape",
    version = env!("CARGO_PKG_VERSION"),
    about = "Shape: abstract interpretation for a small JavaScript subset",
    long_about = r#"
Shape evaluates JavaScript over abstract values instead of concrete ones. It
reports the constructs it cannot model and the side effects a script may have.

EXAMPLES:
    shape check src/                      # Check every script under src/
    shape check main.js --side-effects    # Also list recorded side effects
    shape eval --expr "console.log(1)"    # Evaluate a snippet
    "#
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (use multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Set log level (overrides --verbose/--quiet)
    #[arg(long, global = true, value_enum)]
    pub log: Option<LogLevel>,

    /// Set log output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    pub log_format: LogFormat,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate scripts and report unsupported constructs
    Check(CheckArgs),

    /// Evaluate a snippet and print its abstract result
    Eval(EvalArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_check_with_global_flags() {
        let cli = Cli::try_parse_from(["shape", "-vv", "check", "a.js", "b", "--format", "json"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.paths, vec![PathBuf::from("a.js"), PathBuf::from("b")]);
                assert!(args.format.is_some());
            }
            other => panic!("expected check, got {other:?}"),
        }
    }
}
