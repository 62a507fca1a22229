// Side effect tracker - records effectful native calls observed during evaluation

use serde_json::json;
use shape_core::json::ToJson;
use shape_core::span::Span;
use shape_core::value::Value;

/// An invocation of a native handler flagged as effectful.
#[derive(Debug, Clone, PartialEq)]
pub struct SideEffect {
    /// Name of the invoked native function, e.g. `console.log`.
    pub callee: String,
    pub args: Vec<Value>,
    /// Call expression that triggered the effect.
    pub span: Span,
}

impl SideEffect {
    pub fn new(callee: impl Into<String>, args: Vec<Value>, span: Span) -> Self {
        Self {
            callee: callee.into(),
            args,
            span,
        }
    }
}

impl ToJson for SideEffect {
    fn to_json(&self) -> shape_core::Result<serde_json::Value> {
        Ok(json!({
            "callee": self.callee,
            "args": self.args.as_slice().to_json()?,
            "span": self.span.to_json()?,
        }))
    }
}

/// Ordered log of side effects for one evaluation.
#[derive(Debug, Default)]
pub struct SideEffectTracker {
    side_effects: Vec<SideEffect>,
}

impl SideEffectTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_side_effect(&mut self, effect: SideEffect) {
        tracing::debug!(callee = %effect.callee, args = effect.args.len(), "side effect");
        self.side_effects.push(effect);
    }

    pub fn side_effects(&self) -> &[SideEffect] {
        &self.side_effects
    }

    pub fn take_side_effects(&mut self) -> Vec<SideEffect> {
        std::mem::take(&mut self.side_effects)
    }

    pub fn len(&self) -> usize {
        self.side_effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.side_effects.is_empty()
    }
}
