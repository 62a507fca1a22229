use crate::diagnostics::{Diagnostic, ENGINE_DIAGNOSTIC_CODE};
use crate::span::Span;
use std::result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The evaluator met a construct or condition it does not model. Aborts the
    /// whole evaluation.
    #[error("{message}")]
    Unsupported {
        message: String,
        span: Option<Span>,
        help: Option<String>,
    },
    /// The frontend could not parse the source text.
    #[error("Syntax error: {message}")]
    Syntax { message: String, span: Option<Span> },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Generic error: {0}")]
    Generic(String),
}

pub type Result<T> = result::Result<T, Error>;

impl Error {
    pub fn unsupported(message: impl Into<String>, span: Span) -> Self {
        Error::Unsupported {
            message: message.into(),
            span: Some(span),
            help: None,
        }
    }

    /// Attach a fix-it hint to an unsupported-construct error. Other variants
    /// are returned unchanged.
    pub fn with_help(self, hint: impl Into<String>) -> Self {
        match self {
            Error::Unsupported { message, span, .. } => Error::Unsupported {
                message,
                span,
                help: Some(hint.into()),
            },
            other => other,
        }
    }

    pub fn syntax(message: impl Into<String>, span: Option<Span>) -> Self {
        Error::Syntax {
            message: message.into(),
            span,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Error::Unsupported { span, .. } | Error::Syntax { span, .. } => *span,
            Error::Io(_) | Error::Generic(_) => None,
        }
    }

    /// Convert into the single error diagnostic reported for a failed run.
    pub fn into_diagnostic(self) -> Diagnostic {
        let span = self.span();
        let (message, help) = match self {
            Error::Unsupported { message, help, .. } => (message, help),
            Error::Syntax { message, .. } => (message, None),
            other => (other.to_string(), None),
        };
        let mut diagnostic = Diagnostic::error(message).with_code(ENGINE_DIAGNOSTIC_CODE);
        if let Some(span) = span {
            diagnostic = diagnostic.with_span(span);
        }
        if let Some(help) = help {
            diagnostic = diagnostic.with_suggestion(help);
        }
        diagnostic
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Generic(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Generic(s.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Generic(e.to_string())
    }
}
