//! Shape core
//!
//! Shared building blocks for the `shape` abstract interpreter: the abstract
//! value lattice, the lexical scope arena, the closed syntax tree consumed by
//! the evaluator, and the diagnostic/error types surfaced to callers.

#[macro_use]
pub mod macros;

pub mod ast;
pub mod diagnostics;
pub mod error;
pub mod frontend;
pub mod json;
pub mod scope;
pub mod span;
pub mod value;

// Re-export commonly used items for convenience
pub use tracing;

pub use frontend::{FrontendResult, LanguageFrontend};

// Alias for error types
pub type Error = crate::error::Error;
pub type Result<T> = crate::error::Result<T>;
