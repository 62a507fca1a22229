//! Bindings pre-populated in the global scope.

use std::collections::BTreeMap;

use shape_core::scope::ScopeArena;
use shape_core::value::{FunctionShape, NativeFunction, Value};

pub const CONSOLE: &str = "console";

/// Seed the root scope of `scopes` with the host environment.
pub fn install(scopes: &mut ScopeArena) {
    let root = scopes.root();
    scopes.declare(root, CONSOLE, console());
}

/// `console`, an object whose `log` records a side effect and yields `undefined`.
pub fn console() -> Value {
    let log = NativeFunction::new("console.log", |_args| Value::undefined());
    let mut properties = BTreeMap::new();
    properties.insert(
        "log".to_string(),
        Value::function(FunctionShape::native(log, true)),
    );
    Value::object(Some(properties))
}
