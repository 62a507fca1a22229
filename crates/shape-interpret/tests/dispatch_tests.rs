// Evaluator behaviour over multi-shape values that the JavaScript subset
// cannot construct on its own; hosts bind them directly.

use std::collections::BTreeMap;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use shape_core::ast::{Binding, Node, NodeKind, VarDeclKind, VarDeclarator};
use shape_core::diagnostics::DiagnosticManager;
use shape_core::span::Span;
use shape_core::value::{Constraint, FunctionShape, NativeFunction, Value};
use shape_core::Result;
use shape_interpret::{ExecResult, Interpreter, InterpreterOptions};

fn sp(lo: u32, hi: u32) -> Span {
    Span::new(lo, hi)
}

fn call(name: &str, args: Vec<Node>) -> Node {
    Node::call(Node::ident(name, sp(0, 1)), args, sp(0, 10))
}

#[test]
fn calls_join_results_across_callee_shapes() -> Result<()> {
    let one = NativeFunction::new("one", |_| Value::number(Some(1.0)));
    let maybe_null = NativeFunction::new("maybe_null", |_| {
        Value::new(vec![Constraint::Null, Constraint::Number(Some(1.0))])
    });
    let mut interpreter = Interpreter::default();
    interpreter.bind_global(
        "f",
        Value::new(vec![
            Constraint::Function(FunctionShape::native(one, false)),
            Constraint::Function(FunctionShape::native(maybe_null, false)),
        ]),
    );

    let root = interpreter.global_scope();
    let result = interpreter.exec(&call("f", vec![]), root)?;
    assert_eq!(
        result.produced().map(Value::constraints),
        Some(&[Constraint::Number(Some(1.0)), Constraint::Null][..])
    );
    assert!(interpreter.side_effects().is_empty());
    Ok(())
}

#[test]
fn declared_functions_contribute_nothing_and_degenerate_ones_widen() -> Result<()> {
    let declaration = Arc::new(Node::unsupported("function declaration", sp(0, 20)));
    let mut interpreter = Interpreter::default();
    interpreter.bind_global("user", Value::function(FunctionShape::declared(declaration)));
    interpreter.bind_global(
        "mixed",
        Value::new(vec![
            Constraint::Function(FunctionShape::default()),
            Constraint::Function(FunctionShape {
                side_effect: Some(false),
                native: None,
                node: None,
            }),
        ]),
    );

    let root = interpreter.global_scope();
    let user = interpreter.exec(&call("user", vec![]), root)?;
    assert_eq!(user.produced(), Some(&Value::never()));

    let mixed = interpreter.exec(&call("mixed", vec![]), root)?;
    assert_eq!(mixed.produced(), Some(&Value::any()));
    Ok(())
}

#[test]
fn any_result_still_records_every_side_effect() -> Result<()> {
    let effect = NativeFunction::new("effect", |_| Value::any());
    let mut interpreter = Interpreter::default();
    interpreter.bind_global(
        "g",
        Value::new(vec![
            Constraint::Function(FunctionShape::default()),
            Constraint::Function(FunctionShape::native(effect, true)),
        ]),
    );

    let root = interpreter.global_scope();
    let result = interpreter.exec(&call("g", vec![Node::number(3.0, sp(2, 3))]), root)?;
    assert_eq!(result.produced(), Some(&Value::any()));
    assert_eq!(interpreter.side_effects().len(), 1);
    assert_eq!(interpreter.side_effects()[0].args, vec![Value::number(Some(3.0))]);
    Ok(())
}

#[test]
fn a_single_non_function_shape_fails_the_call() {
    let noop = NativeFunction::new("noop", |_| Value::undefined());
    let mut interpreter = Interpreter::default();
    interpreter.bind_global(
        "h",
        Value::new(vec![
            Constraint::Function(FunctionShape::native(noop, false)),
            Constraint::Undefined,
        ]),
    );
    let root = interpreter.global_scope();
    let err = interpreter
        .exec(&call("h", vec![]), root)
        .expect_err("undefined is not callable");
    assert!(err.to_string().contains("called value may not be a function"));
    assert_eq!(err.span(), Some(sp(0, 10)));
}

// A generalized object widens any property to `any`, while a known object
// without the property yields the unreachable value rather than `undefined`.
#[test]
fn property_access_distinguishes_unknown_and_known_shapes() -> Result<()> {
    let mut known = BTreeMap::new();
    known.insert("a".to_string(), Value::number(Some(1.0)));
    let mut interpreter = Interpreter::default();
    interpreter.bind_global("unknown", Value::object(None));
    interpreter.bind_global("known", Value::object(Some(known.clone())));
    interpreter.bind_global(
        "either",
        Value::new(vec![
            Constraint::Object(Some(known)),
            Constraint::Object(Some(BTreeMap::new())),
        ]),
    );

    let root = interpreter.global_scope();
    let member = |object: &str, property: &str| {
        Node::member(Node::ident(object, sp(0, 1)), property, sp(0, 3))
    };

    let widened = interpreter.exec(&member("unknown", "a"), root)?;
    assert_eq!(widened.produced(), Some(&Value::any()));

    let missing = interpreter.exec(&member("known", "b"), root)?;
    assert_eq!(missing.produced(), Some(&Value::never()));

    let partial = interpreter.exec(&member("either", "a"), root)?;
    assert_eq!(partial.produced(), Some(&Value::number(Some(1.0))));
    Ok(())
}

#[test]
fn assignment_from_a_child_scope_updates_the_global_binding() -> Result<()> {
    let mut interpreter = Interpreter::default();
    let root = interpreter.global_scope();
    interpreter.bind_global("x", Value::number(Some(1.0)));
    let child = interpreter.scopes_mut().push_child(root);

    let assign = Node::assign(
        Node::ident("x", sp(0, 1)),
        Node::new(NodeKind::Bool(true), sp(4, 8)),
        sp(0, 8),
    );
    let result = interpreter.exec(&assign, child)?;
    assert_eq!(result, ExecResult::value(Value::boolean(Some(true))));
    assert!(!interpreter.scopes().has_local(child, "x"));
    assert_eq!(
        interpreter.scopes().lookup(root, "x"),
        Some(&Value::boolean(Some(true)))
    );
    Ok(())
}

#[test]
fn var_declarations_bind_in_the_current_scope() -> Result<()> {
    let mut interpreter = Interpreter::default();
    let root = interpreter.global_scope();
    let child = interpreter.scopes_mut().push_child(root);

    let decl = Node::new(
        NodeKind::VarDecl {
            kind: VarDeclKind::Var,
            decls: vec![VarDeclarator {
                span: sp(4, 5),
                binding: Binding::Ident("local".to_string()),
                init: None,
            }],
        },
        sp(0, 6),
    );
    assert_eq!(interpreter.exec(&decl, child)?, ExecResult::Empty);
    assert!(interpreter.scopes().has_local(child, "local"));
    assert!(interpreter.scopes().lookup(root, "local").is_none());
    Ok(())
}

#[test]
fn identifier_results_carry_the_resolved_name() -> Result<()> {
    let mut interpreter = Interpreter::default();
    let root = interpreter.global_scope();
    let result = interpreter.exec(&Node::ident("console", sp(0, 7)), root)?;
    assert_eq!(result.ident(), Some("console"));
    Ok(())
}

#[test]
fn shared_diagnostic_sink_receives_the_failure() {
    let sink = Arc::new(DiagnosticManager::new());
    let options = InterpreterOptions::default()
        .with_context("inline.js")
        .with_diagnostics(sink.clone());
    let script = Node::script(
        vec![Node::expr_stmt(Node::unsupported("this expression", sp(0, 4)), sp(0, 5))],
        sp(0, 5),
    );

    let outcome = Interpreter::new(options).evaluate(&script);
    assert!(outcome.has_errors());
    assert_eq!(outcome.diagnostics[0].source_context.as_deref(), Some("inline.js"));
    assert_eq!(outcome.diagnostics[0].message, "unsupported syntax: this expression");
    assert_eq!(sink.get_diagnostics(), outcome.diagnostics);
}

fn unsupported_message(result: Result<ExecResult>) -> (String, Option<Span>) {
    match result {
        Err(shape_core::error::Error::Unsupported { message, span, .. }) => (message, span),
        other => panic!("expected an unsupported construct, got {other:?}"),
    }
}

#[test]
fn any_receivers_and_callees_are_rejected() {
    let mut interpreter = Interpreter::default();
    interpreter.bind_global("unknown", Value::any());
    let root = interpreter.global_scope();

    let member = Node::member(Node::ident("unknown", sp(0, 7)), "a", sp(0, 9));
    let (message, span) = unsupported_message(interpreter.exec(&member, root));
    assert_eq!(message, "only objects support property access (found any)");
    assert_eq!(span, Some(sp(0, 9)));

    let invoke = Node::call(Node::ident("unknown", sp(0, 7)), vec![], sp(0, 9));
    let (message, span) = unsupported_message(interpreter.exec(&invoke, root));
    assert_eq!(message, "called value may not be a function (found any)");
    assert_eq!(span, Some(sp(0, 9)));
}

#[test]
fn chained_access_through_a_generalized_object_is_rejected() {
    let mut interpreter = Interpreter::default();
    interpreter.bind_global("opaque", Value::object(None));
    let root = interpreter.global_scope();

    let inner = Node::member(Node::ident("opaque", sp(0, 6)), "a", sp(0, 8));
    let chained = Node::member(inner.clone(), "b", sp(0, 10));
    let (message, span) = unsupported_message(interpreter.exec(&chained, root));
    assert_eq!(message, "only objects support property access (found any)");
    assert_eq!(span, Some(sp(0, 10)));

    let invoked = Node::call(inner, vec![], sp(0, 10));
    let (message, _) = unsupported_message(interpreter.exec(&invoked, root));
    assert_eq!(message, "called value may not be a function (found any)");
}
