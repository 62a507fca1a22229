use std::path::Path;
use std::sync::Arc;

use shape_core::ast::{Node, NodeKind};
use shape_core::diagnostics::{Diagnostic, DiagnosticManager};
use shape_core::error::Result;
use shape_core::frontend::LanguageFrontend;
use shape_core::scope::{ScopeArena, ScopeId};
use shape_core::value::Value;
use shape_core::unsupported;

use crate::globals;
use crate::side_effects::{SideEffect, SideEffectTracker};

/// Unwrap the produced value of an [`ExecResult`], returning early from the
/// enclosing function when it carries a thrown value. A result with no value
/// reads as the unreachable value.
macro_rules! value_or_throw {
    ($result:expr) => {
        match $result {
            ExecResult::Throw(thrown) => return Ok(ExecResult::Throw(thrown)),
            ExecResult::Value { value, .. } => value,
            ExecResult::Empty => Value::never(),
        }
    };
}

mod eval_expr;
mod eval_stmt;

const DEFAULT_DIAGNOSTIC_CONTEXT: &str = "shape-interpreter";

#[derive(Debug, Clone)]
pub struct InterpreterOptions {
    /// Label attached to emitted diagnostics, usually the source path.
    pub diagnostic_context: String,
    /// Shared sink that also receives every diagnostic of the run.
    pub diagnostics: Option<Arc<DiagnosticManager>>,
}

impl Default for InterpreterOptions {
    fn default() -> Self {
        Self {
            diagnostic_context: DEFAULT_DIAGNOSTIC_CONTEXT.to_string(),
            diagnostics: None,
        }
    }
}

impl InterpreterOptions {
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.diagnostic_context = context.into();
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<DiagnosticManager>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }
}

/// Outcome of evaluating one node.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecResult {
    /// Pure statement, nothing produced.
    Empty,
    Value {
        value: Value,
        /// Set when the node was a bare identifier reference.
        ident: Option<String>,
    },
    /// Abstract program exception.
    Throw(Value),
}

impl ExecResult {
    pub fn value(value: Value) -> Self {
        ExecResult::Value { value, ident: None }
    }

    pub fn is_throw(&self) -> bool {
        matches!(self, ExecResult::Throw(_))
    }

    pub fn produced(&self) -> Option<&Value> {
        match self {
            ExecResult::Value { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn thrown(&self) -> Option<&Value> {
        match self {
            ExecResult::Throw(value) => Some(value),
            _ => None,
        }
    }

    pub fn ident(&self) -> Option<&str> {
        match self {
            ExecResult::Value { ident, .. } => ident.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct InterpreterOutcome {
    /// Empty, or exactly one error for the first unsupported construct.
    pub diagnostics: Vec<Diagnostic>,
    pub side_effects: Vec<SideEffect>,
    /// Result of the root node; `None` when the run was aborted.
    pub completion: Option<ExecResult>,
}

impl InterpreterOutcome {
    fn failed(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
            ..Self::default()
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Value of the last evaluated statement, if it produced one.
    pub fn final_value(&self) -> Option<&Value> {
        self.completion.as_ref().and_then(ExecResult::produced)
    }

    /// Abstract exception that escaped the root node.
    pub fn uncaught(&self) -> Option<&Value> {
        self.completion.as_ref().and_then(ExecResult::thrown)
    }
}

/// Abstract interpreter over a single source tree.
///
/// Owns its scope arena, so every instance starts from a freshly seeded
/// global scope; use one instance per evaluation.
pub struct Interpreter {
    scopes: ScopeArena,
    side_effects: SideEffectTracker,
    options: InterpreterOptions,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(InterpreterOptions::default())
    }
}

impl Interpreter {
    pub fn new(options: InterpreterOptions) -> Self {
        let mut scopes = ScopeArena::new();
        globals::install(&mut scopes);
        Self {
            scopes,
            side_effects: SideEffectTracker::new(),
            options,
        }
    }

    pub fn global_scope(&self) -> ScopeId {
        self.scopes.root()
    }

    pub fn scopes(&self) -> &ScopeArena {
        &self.scopes
    }

    pub fn scopes_mut(&mut self) -> &mut ScopeArena {
        &mut self.scopes
    }

    /// Add a host binding to the global scope.
    pub fn bind_global(&mut self, name: impl Into<String>, value: Value) {
        let root = self.scopes.root();
        self.scopes.declare(root, name, value);
    }

    pub fn side_effects(&self) -> &[SideEffect] {
        self.side_effects.side_effects()
    }

    /// Evaluate `node` against `scope`.
    ///
    /// `Err` is the engine-fatal channel (unsupported construct); a thrown
    /// abstract exception is an `Ok(ExecResult::Throw(..))`.
    pub fn exec(&mut self, node: &Node, scope: ScopeId) -> Result<ExecResult> {
        tracing::trace!(target: DEFAULT_DIAGNOSTIC_CONTEXT, kind = node.kind().name(), span = %node.span, "exec");
        match node.kind() {
            NodeKind::Script(stmts) => self.exec_script(stmts, scope),
            NodeKind::VarDecl { kind, decls } => self.exec_var_decl(node, *kind, decls, scope),
            NodeKind::ExprStmt(expr) => self.exec(expr, scope),
            NodeKind::Call { callee, args } => self.eval_call(node, callee, args, scope),
            NodeKind::Assign { target, value } => self.eval_assign(target, value, scope),
            NodeKind::Member { object, property } => {
                self.eval_member(node, object, property, scope)
            }
            NodeKind::Number(literal) => Ok(ExecResult::value(Value::number(Some(*literal)))),
            NodeKind::Ident(name) => Ok(self.eval_ident(name, scope)),
            NodeKind::Null => Ok(ExecResult::value(Value::null())),
            NodeKind::Bool(literal) => Ok(ExecResult::value(Value::boolean(Some(*literal)))),
            NodeKind::Unsupported(kind) => unsupported!(node.span, "unsupported syntax: {kind}"),
        }
    }

    /// Evaluate a whole tree from the global scope.
    ///
    /// The first unsupported construct aborts the walk and becomes the only
    /// diagnostic. Uncaught abstract exceptions are not reported as
    /// diagnostics; they are available through [`InterpreterOutcome::uncaught`].
    pub fn evaluate(mut self, node: &Node) -> InterpreterOutcome {
        let context = self.options.diagnostic_context.clone();
        let span = tracing::debug_span!("evaluate", context = %context);
        let _enter = span.enter();

        let root = self.scopes.root();
        let mut diagnostics = Vec::new();
        let completion = match self.exec(node, root) {
            Ok(result) => {
                if let ExecResult::Throw(thrown) = &result {
                    tracing::debug!(target: DEFAULT_DIAGNOSTIC_CONTEXT, "uncaught abstract exception: {thrown}");
                }
                Some(result)
            }
            Err(err) => {
                tracing::debug!(target: DEFAULT_DIAGNOSTIC_CONTEXT, "evaluation aborted: {err}");
                diagnostics.push(err.into_diagnostic().with_source_context(context));
                None
            }
        };

        if let Some(sink) = &self.options.diagnostics {
            sink.add_diagnostics(diagnostics.clone());
        }

        InterpreterOutcome {
            diagnostics,
            side_effects: self.side_effects.take_side_effects(),
            completion,
        }
    }
}

/// Evaluate `node` with a fresh interpreter and default options.
pub fn evaluate(node: &Node) -> InterpreterOutcome {
    Interpreter::default().evaluate(node)
}

/// Parse `source` with `frontend` and evaluate it. A parse failure is reported
/// as the run's single diagnostic.
pub fn check_source(
    frontend: &dyn LanguageFrontend,
    source: &str,
    path: Option<&Path>,
    options: InterpreterOptions,
) -> InterpreterOutcome {
    match frontend.parse(source, path) {
        Ok(parsed) => Interpreter::new(options).evaluate(&parsed.ast),
        Err(err) => {
            tracing::debug!(target: DEFAULT_DIAGNOSTIC_CONTEXT, "parse failed: {err}");
            let diagnostic = err
                .into_diagnostic()
                .with_source_context(options.diagnostic_context.clone());
            if let Some(sink) = &options.diagnostics {
                sink.add_diagnostic(diagnostic.clone());
            }
            InterpreterOutcome::failed(diagnostic)
        }
    }
}
