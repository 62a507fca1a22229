use super::*;
use shape_core::unsupported;
use shape_core::error::Error;
use shape_core::value::Constraint;

impl Interpreter {
    pub(super) fn eval_ident(&self, name: &str, scope: ScopeId) -> ExecResult {
        if name == "undefined" {
            return ExecResult::value(Value::undefined());
        }
        match self.scopes.lookup(scope, name) {
            Some(value) => ExecResult::Value {
                value: value.clone(),
                ident: Some(name.to_string()),
            },
            None => {
                tracing::debug!(target: DEFAULT_DIAGNOSTIC_CONTEXT, "unresolved identifier `{name}`");
                ExecResult::Throw(Value::undefined())
            }
        }
    }

    pub(super) fn eval_assign(
        &mut self,
        target: &Node,
        value: &Node,
        scope: ScopeId,
    ) -> Result<ExecResult> {
        let NodeKind::Ident(name) = target.kind() else {
            unsupported!(
                target.span,
                "only identifiers can be assigned to (found {})",
                target.kind().name()
            );
        };
        if self.scopes.lookup(scope, name).is_none() {
            tracing::debug!(target: DEFAULT_DIAGNOSTIC_CONTEXT, "assignment to unresolved identifier `{name}`");
            return Ok(ExecResult::Throw(Value::undefined()));
        }
        let result = self.exec(value, scope)?;
        match &result {
            ExecResult::Throw(_) => {}
            ExecResult::Value { value, .. } => self.scopes.set_var(scope, name, value.clone()),
            ExecResult::Empty => self.scopes.set_var(scope, name, Value::never()),
        }
        Ok(result)
    }

    pub(super) fn eval_member(
        &mut self,
        node: &Node,
        object: &Node,
        property: &str,
        scope: ScopeId,
    ) -> Result<ExecResult> {
        let receiver = value_or_throw!(self.exec(object, scope)?);
        let result = receiver.join(|constraint| match constraint {
            Constraint::Object(None) => Ok(vec![Constraint::Any]),
            Constraint::Object(Some(properties)) => Ok(properties
                .get(property)
                .map(|value| value.constraints().to_vec())
                .unwrap_or_default()),
            other => Err(Error::unsupported(
                format!(
                    "only objects support property access (found {})",
                    other.value_type()
                ),
                node.span,
            )),
        })?;
        Ok(ExecResult::value(result))
    }

    pub(super) fn eval_call(
        &mut self,
        node: &Node,
        callee: &Node,
        args: &[Node],
        scope: ScopeId,
    ) -> Result<ExecResult> {
        let callee_value = value_or_throw!(self.exec(callee, scope)?);
        let mut arg_values = Vec::with_capacity(args.len());
        for arg in args {
            arg_values.push(value_or_throw!(self.exec(arg, scope)?));
        }

        let tracker = &mut self.side_effects;
        let result = callee_value.join(|constraint| {
            let Constraint::Function(shape) = constraint else {
                unsupported!(
                    node.span,
                    "called value may not be a function (found {})",
                    constraint.value_type()
                );
            };
            if let Some(native) = &shape.native {
                if shape.has_side_effect() {
                    tracker.add_side_effect(SideEffect::new(
                        native.name.clone(),
                        arg_values.clone(),
                        node.span,
                    ));
                }
                return Ok(native.call(&arg_values).into_constraints());
            }
            if shape.node.is_some() {
                // User-defined bodies are not evaluated yet.
                return Ok(Vec::new());
            }
            Ok(vec![Constraint::Any])
        })?;
        Ok(ExecResult::value(result))
    }
}
