//! Shape interpreter
//!
//! Abstract evaluation of the `shape_core::ast` tree: every expression is
//! evaluated to a [`Value`](shape_core::value::Value) describing the set of
//! shapes it may take at runtime. The first construct the engine cannot reason
//! about aborts the run and is reported as a single diagnostic.

pub mod engine;
pub mod globals;
pub mod side_effects;

pub use engine::{
    check_source, evaluate, ExecResult, Interpreter, InterpreterOptions, InterpreterOutcome,
};
pub use side_effects::{SideEffect, SideEffectTracker};
