//! Command implementations for the shape CLI

pub mod check;
pub mod completions;
pub mod eval;

pub use check::check_command;
pub use completions::completions_command;
pub use eval::eval_command;

use shape_interpret::SideEffect;

/// One-line rendering of a recorded side effect, e.g.
/// `console.log(number(1)) at Span(0-14)`.
pub(crate) fn describe_side_effect(effect: &SideEffect) -> String {
    let args = effect
        .args
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}({}) at {}", effect.callee, args, effect.span)
}
