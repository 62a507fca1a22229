//! JavaScript frontend for the shape abstract interpreter.
//!
//! Parses source text with `swc_ecma_parser` and lowers the resulting script
//! into the closed `shape_core::ast` tree.

pub mod frontend;
mod lower;

pub use frontend::{parse_script, JavaScriptFrontend, JsParseMode};
