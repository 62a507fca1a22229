use super::*;
use shape_core::error::Error;
use shape_core::ast::{Binding, VarDeclKind, VarDeclarator};

impl Interpreter {
    /// Run statements in order, stopping at the first thrown exception. The
    /// result is that of the last statement executed.
    pub(super) fn exec_script(&mut self, stmts: &[Node], scope: ScopeId) -> Result<ExecResult> {
        let mut last = ExecResult::Empty;
        for stmt in stmts {
            last = self.exec(stmt, scope)?;
            if last.is_throw() {
                tracing::debug!(
                    target: DEFAULT_DIAGNOSTIC_CONTEXT,
                    span = %stmt.span,
                    "statement threw, skipping the rest of the sequence"
                );
                break;
            }
        }
        Ok(last)
    }

    pub(super) fn exec_var_decl(
        &mut self,
        node: &Node,
        kind: VarDeclKind,
        decls: &[VarDeclarator],
        scope: ScopeId,
    ) -> Result<ExecResult> {
        if kind.is_block_scoped() {
            return Err(Error::unsupported(
                format!("block-scoped `{}` declarations are not supported", kind.keyword()),
                node.span,
            )
            .with_help("declare the binding with `var`"));
        }
        for decl in decls {
            let Binding::Ident(name) = &decl.binding else {
                return Err(Error::unsupported(
                    "destructuring declarations are not supported",
                    decl.span,
                )
                .with_help("bind each name with its own `var` declarator"));
            };
            let value = match &decl.init {
                Some(init) => value_or_throw!(self.exec(init, scope)?),
                None => Value::undefined(),
            };
            self.scopes.declare(scope, name.clone(), value);
        }
        Ok(ExecResult::Empty)
    }
}
