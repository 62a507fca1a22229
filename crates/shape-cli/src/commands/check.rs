//! Code checking command implementation

use super::describe_side_effect;
use crate::{
    cli::{CliConfig, OutputFormat},
    diagnostics::{print_diagnostic, source_error},
    utils::FileUtils,
    CliError, Result,
};
use clap::Args;
use console::style;
use serde_json::json;
use shape_core::diagnostics::{DiagnosticDisplayOptions, DiagnosticManager};
use shape_core::json::ToJson;
use shape_interpret::{check_source, InterpreterOptions, InterpreterOutcome};
use shape_javascript::{JavaScriptFrontend, JsParseMode};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Arguments for the check command
#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Files or directories to check
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,
    /// Exclude patterns (glob, relative to each directory argument)
    #[arg(long)]
    pub exclude: Vec<String>,
    /// Output format (defaults to the configured one)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
    /// Print the side effects recorded for each file
    #[arg(long)]
    pub side_effects: bool,
    /// Continue past recoverable parse errors
    #[arg(long)]
    pub loose: bool,
}

struct FileReport {
    path: String,
    source: String,
    outcome: InterpreterOutcome,
}

/// Execute the check command
pub async fn check_command(args: CheckArgs, config: &CliConfig) -> Result<()> {
    let format = args.format.unwrap_or(config.check.format);
    let show_side_effects = args.side_effects || config.check.show_side_effects;
    let parse_mode = if args.loose {
        JsParseMode::Loose
    } else {
        config.check.parse_mode()
    };

    let files = FileUtils::collect_sources(&args.paths, &config.check.extensions, &args.exclude)?;
    info!("Checking {} file(s)", files.len());

    let frontend = JavaScriptFrontend::new(parse_mode);
    let sink = Arc::new(DiagnosticManager::new());
    let mut reports = Vec::with_capacity(files.len());

    for path in &files {
        let source = tokio::fs::read_to_string(path).await?;
        let display = path.display().to_string();
        let options = InterpreterOptions::default()
            .with_context(display.clone())
            .with_diagnostics(sink.clone());
        let outcome = check_source(&frontend, &source, Some(path.as_path()), options);
        reports.push(FileReport {
            path: display,
            source,
            outcome,
        });
    }

    match format {
        OutputFormat::Pretty => render_pretty(&reports, show_side_effects),
        OutputFormat::Plain => render_plain(&reports, show_side_effects),
        OutputFormat::Json => render_json(&reports)?,
    }

    let errors = sink
        .get_diagnostics()
        .iter()
        .filter(|diagnostic| diagnostic.is_error())
        .count();
    if errors > 0 {
        let failed = reports.iter().filter(|r| r.outcome.has_errors()).count();
        return Err(CliError::CheckFailed {
            errors,
            files: failed,
        });
    }

    if format != OutputFormat::Json {
        println!(
            "{} {} file(s) checked, no errors",
            style("✓").green().bold(),
            reports.len()
        );
    }
    Ok(())
}

fn render_pretty(reports: &[FileReport], show_side_effects: bool) {
    for report in reports {
        for diagnostic in &report.outcome.diagnostics {
            print_diagnostic(source_error(diagnostic, &report.path, &report.source));
        }
        if show_side_effects {
            print_side_effects(report);
        }
    }
}

fn render_plain(reports: &[FileReport], show_side_effects: bool) {
    let options = DiagnosticDisplayOptions::plain(false);
    for report in reports {
        DiagnosticManager::emit(&report.outcome.diagnostics, Some(&report.path), &options);
        if show_side_effects {
            print_side_effects(report);
        }
    }
}

fn print_side_effects(report: &FileReport) {
    let effects = &report.outcome.side_effects;
    if effects.is_empty() {
        return;
    }
    println!("{} {}", style(&report.path).bold(), style("side effects:").dim());
    for effect in effects {
        println!("  {}", describe_side_effect(effect));
    }
}

fn render_json(reports: &[FileReport]) -> Result<()> {
    let mut files = Vec::with_capacity(reports.len());
    for report in reports {
        let outcome = &report.outcome;
        let uncaught = match outcome.uncaught() {
            Some(value) => value.to_json()?,
            None => serde_json::Value::Null,
        };
        files.push(json!({
            "path": report.path,
            "diagnostics": outcome.diagnostics.as_slice().to_json()?,
            "sideEffects": outcome.side_effects.as_slice().to_json()?,
            "uncaught": uncaught,
        }));
    }

    let document = json!({ "files": files });
    let rendered = serde_json::to_string_pretty(&document).map_err(shape_core::Error::from)?;
    println!("{}", rendered);
    Ok(())
}
