//! Diagnostic and error reporting utilities

use crate::{CliError, Result};
use console::style;
use miette::{Diagnostic, NamedSource, SourceSpan};
use shape_core::diagnostics::Diagnostic as ShapeDiagnostic;
use thiserror::Error;

/// Set up enhanced error reporting with miette
pub fn setup_error_reporting() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .map_err(|e| CliError::Config(format!("Failed to setup error reporting: {}", e)))?;

    Ok(())
}

/// An analysis diagnostic attached to the script it was raised for.
#[derive(Error, Debug, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(shape::analysis))]
pub struct ShapeError {
    pub message: String,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("here")]
    pub err_span: Option<SourceSpan>,
    #[help]
    pub help: Option<String>,
}

/// Attach `source` to an analysis diagnostic so it can be rendered with a
/// labelled snippet. Spans past the end of the source are clamped.
pub fn source_error(diagnostic: &ShapeDiagnostic, name: &str, source: &str) -> ShapeError {
    let err_span = diagnostic.span.map(|span| {
        let start = span.start().min(source.len());
        let len = span.len().min(source.len() - start);
        SourceSpan::from((start, len))
    });
    let help = (!diagnostic.suggestions.is_empty()).then(|| diagnostic.suggestions.join("\n"));

    ShapeError {
        message: diagnostic.message.clone(),
        src: NamedSource::new(name, source.to_string()),
        err_span,
        help,
    }
}

/// Pretty print diagnostics with context
pub fn print_diagnostic(error: ShapeError) {
    eprintln!("{:?}", miette::Report::new(error));
}

/// Render CLI errors that carry their own presentation. Returns false when the
/// caller should log the error instead.
pub fn render_cli_error(error: &CliError) -> bool {
    match error {
        CliError::CheckFailed { errors, files } => {
            eprintln!(
                "{} {} error(s) found in {} file(s)",
                style("✗").red().bold(),
                errors,
                files
            );
            true
        }
        CliError::Core(err) => {
            eprintln!("{} {}", style("error:").red().bold(), err);
            true
        }
        _ => false,
    }
}
