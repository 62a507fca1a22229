//! Shape CLI Library
//!
//! Command-line front end for the shape abstract interpreter: finds JavaScript
//! sources, evaluates them, and renders the resulting diagnostics.

pub mod args;
pub mod cli;
pub mod commands;
pub mod diagnostics;
pub mod utils;

// CLI-specific error handling
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum CliError {
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("Configuration error: {0}")]
        Config(String),

        #[error("Invalid input: {0}")]
        InvalidInput(String),

        #[error(transparent)]
        Core(#[from] shape_core::Error),

        #[error("{errors} error(s) found in {files} file(s)")]
        CheckFailed { errors: usize, files: usize },
    }

    pub type Result<T> = std::result::Result<T, CliError>;
}

pub use error::{CliError, Result};
