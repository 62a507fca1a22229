use shape_core::ast::{Binding, Node, NodeKind, VarDeclKind, VarDeclarator};
use shape_core::span::Span;
use swc_common::{BytePos, Spanned};
use swc_ecma_ast::{
    AssignOp, Callee, Decl, Expr, ExprOrSpread, Lit, MemberProp, Pat, PatOrExpr, Script, Stmt,
    VarDecl, VarDeclKind as SwcVarDeclKind,
};

/// Lowers an swc script into the closed syntax tree, rebasing spans onto the
/// start of the source file.
pub(crate) struct Lowerer {
    base: BytePos,
}

impl Lowerer {
    pub(crate) fn new(base: BytePos) -> Self {
        Self { base }
    }

    fn offset(&self, pos: BytePos) -> u32 {
        pos.0.saturating_sub(self.base.0)
    }

    fn span(&self, span: swc_common::Span) -> Span {
        Span::new(self.offset(span.lo), self.offset(span.hi))
    }

    pub(crate) fn lower_script(&self, script: &Script, source_len: usize) -> Node {
        let stmts = script.body.iter().map(|stmt| self.lower_stmt(stmt)).collect();
        let hi = u32::try_from(source_len).unwrap_or(u32::MAX);
        Node::script(stmts, Span::new(0, hi))
    }

    fn lower_stmt(&self, stmt: &Stmt) -> Node {
        match stmt {
            Stmt::Decl(Decl::Var(var)) => self.lower_var_decl(var),
            Stmt::Expr(expr_stmt) => {
                Node::expr_stmt(self.lower_expr(&expr_stmt.expr), self.span(expr_stmt.span))
            }
            other => Node::unsupported(stmt_kind(other), self.span(other.span())),
        }
    }

    fn lower_var_decl(&self, var: &VarDecl) -> Node {
        let kind = match var.kind {
            SwcVarDeclKind::Var => VarDeclKind::Var,
            SwcVarDeclKind::Let => VarDeclKind::Let,
            SwcVarDeclKind::Const => VarDeclKind::Const,
        };
        let decls = var
            .decls
            .iter()
            .map(|decl| VarDeclarator {
                span: self.span(decl.span),
                binding: match &decl.name {
                    Pat::Ident(binding) => Binding::Ident(binding.id.sym.to_string()),
                    _ => Binding::Pattern,
                },
                init: decl.init.as_ref().map(|init| self.lower_expr(init)),
            })
            .collect();
        Node::new(NodeKind::VarDecl { kind, decls }, self.span(var.span))
    }

    fn lower_expr(&self, expr: &Expr) -> Node {
        let span = self.span(expr.span());
        match expr {
            Expr::Ident(ident) => Node::ident(ident.sym.to_string(), span),
            Expr::Lit(Lit::Num(number)) => Node::number(number.value, span),
            Expr::Lit(Lit::Bool(boolean)) => Node::new(NodeKind::Bool(boolean.value), span),
            Expr::Lit(Lit::Null(_)) => Node::new(NodeKind::Null, span),
            Expr::Call(call) => {
                let callee = match &call.callee {
                    Callee::Expr(callee) => self.lower_expr(callee),
                    Callee::Super(callee) => Node::unsupported("super call", self.span(callee.span)),
                    Callee::Import(callee) => {
                        Node::unsupported("dynamic import", self.span(callee.span))
                    }
                };
                let args = call.args.iter().map(|arg| self.lower_arg(arg)).collect();
                Node::call(callee, args, span)
            }
            Expr::Member(member) => match &member.prop {
                MemberProp::Ident(property) => {
                    Node::member(self.lower_expr(&member.obj), property.sym.to_string(), span)
                }
                MemberProp::Computed(_) => Node::unsupported("computed property access", span),
                MemberProp::PrivateName(_) => Node::unsupported("private field access", span),
            },
            Expr::Assign(assign) if assign.op == AssignOp::Assign => Node::assign(
                self.lower_assign_target(&assign.left),
                self.lower_expr(&assign.right),
                span,
            ),
            Expr::Assign(_) => Node::unsupported("compound assignment", span),
            other => Node::unsupported(expr_kind(other), span),
        }
    }

    fn lower_arg(&self, arg: &ExprOrSpread) -> Node {
        match arg.spread {
            Some(spread) => Node::unsupported(
                "spread argument",
                Span::new(self.offset(spread.lo), self.offset(arg.expr.span().hi)),
            ),
            None => self.lower_expr(&arg.expr),
        }
    }

    fn lower_assign_target(&self, target: &PatOrExpr) -> Node {
        match target {
            PatOrExpr::Expr(expr) => self.lower_expr(expr),
            PatOrExpr::Pat(pat) => match pat.as_ref() {
                Pat::Ident(binding) => {
                    Node::ident(binding.id.sym.to_string(), self.span(binding.id.span))
                }
                Pat::Expr(expr) => self.lower_expr(expr),
                other => Node::unsupported("destructuring assignment", self.span(other.span())),
            },
        }
    }
}

fn stmt_kind(stmt: &Stmt) -> &'static str {
    match stmt {
        Stmt::Block(_) => "block statement",
        Stmt::Empty(_) => "empty statement",
        Stmt::Debugger(_) => "debugger statement",
        Stmt::With(_) => "with statement",
        Stmt::Return(_) => "return statement",
        Stmt::Labeled(_) => "labeled statement",
        Stmt::Break(_) => "break statement",
        Stmt::Continue(_) => "continue statement",
        Stmt::If(_) => "if statement",
        Stmt::Switch(_) => "switch statement",
        Stmt::Throw(_) => "throw statement",
        Stmt::Try(_) => "try statement",
        Stmt::While(_) => "while statement",
        Stmt::DoWhile(_) => "do-while statement",
        Stmt::For(_) => "for statement",
        Stmt::ForIn(_) => "for-in statement",
        Stmt::ForOf(_) => "for-of statement",
        Stmt::Decl(Decl::Fn(_)) => "function declaration",
        Stmt::Decl(Decl::Class(_)) => "class declaration",
        Stmt::Decl(_) => "declaration",
        _ => "statement",
    }
}

fn expr_kind(expr: &Expr) -> &'static str {
    match expr {
        Expr::This(_) => "this expression",
        Expr::Array(_) => "array literal",
        Expr::Object(_) => "object literal",
        Expr::Fn(_) => "function expression",
        Expr::Arrow(_) => "arrow function",
        Expr::Class(_) => "class expression",
        Expr::Unary(_) => "unary expression",
        Expr::Update(_) => "update expression",
        Expr::Bin(_) => "binary expression",
        Expr::Cond(_) => "conditional expression",
        Expr::New(_) => "new expression",
        Expr::Seq(_) => "sequence expression",
        Expr::Paren(_) => "parenthesized expression",
        Expr::Tpl(_) => "template literal",
        Expr::TaggedTpl(_) => "tagged template",
        Expr::Yield(_) => "yield expression",
        Expr::Await(_) => "await expression",
        Expr::OptChain(_) => "optional chain",
        Expr::SuperProp(_) => "super property access",
        Expr::MetaProp(_) => "meta property",
        Expr::Lit(Lit::Str(_)) => "string literal",
        Expr::Lit(Lit::BigInt(_)) => "bigint literal",
        Expr::Lit(Lit::Regex(_)) => "regular expression literal",
        Expr::Lit(_) => "literal",
        _ => "expression",
    }
}
