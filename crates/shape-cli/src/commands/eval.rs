//! Snippet evaluation command implementation

use super::describe_side_effect;
use crate::{
    cli::CliConfig,
    diagnostics::{print_diagnostic, source_error},
    CliError, Result,
};
use clap::Args;
use console::style;
use shape_interpret::{check_source, InterpreterOptions};
use shape_javascript::{JavaScriptFrontend, JsParseMode};
use std::path::PathBuf;
use tracing::info;

const EXPR_NAME: &str = "<expr>";

/// Arguments for the eval command
#[derive(Debug, Clone, Args)]
pub struct EvalArgs {
    /// Script text to evaluate
    #[arg(short, long, conflicts_with = "file")]
    pub expr: Option<String>,
    /// Script file to evaluate
    #[arg(short, long)]
    pub file: Option<PathBuf>,
    /// Continue past recoverable parse errors
    #[arg(long)]
    pub loose: bool,
}

/// Execute the eval command
pub async fn eval_command(args: EvalArgs, config: &CliConfig) -> Result<()> {
    let (source, name, path) = if let Some(expr) = args.expr {
        (expr, EXPR_NAME.to_string(), None)
    } else if let Some(file) = args.file {
        let source = tokio::fs::read_to_string(&file).await?;
        (source, file.display().to_string(), Some(file))
    } else {
        return Err(CliError::InvalidInput(
            "Either --expr or --file must be provided".to_string(),
        ));
    };

    info!("Evaluating {}", name);

    let parse_mode = if args.loose {
        JsParseMode::Loose
    } else {
        config.check.parse_mode()
    };
    let frontend = JavaScriptFrontend::new(parse_mode);
    let options = InterpreterOptions::default().with_context(name.clone());
    let outcome = check_source(&frontend, &source, path.as_deref(), options);

    for effect in &outcome.side_effects {
        println!("{} {}", style("effect").magenta().bold(), describe_side_effect(effect));
    }
    if let Some(value) = outcome.final_value() {
        println!("{} {}", style("Result:").green().bold(), value);
    }
    if let Some(thrown) = outcome.uncaught() {
        println!("{} {}", style("Uncaught:").yellow().bold(), thrown);
    }

    let errors = outcome.diagnostics.iter().filter(|d| d.is_error()).count();
    for diagnostic in &outcome.diagnostics {
        print_diagnostic(source_error(diagnostic, &name, &source));
    }
    if errors > 0 {
        return Err(CliError::CheckFailed { errors, files: 1 });
    }
    Ok(())
}
