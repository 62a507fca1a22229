//! Closed syntax tree consumed by the evaluator.
//!
//! Frontends lower whatever their parser produces into [`Node`]. Constructs
//! the evaluator does not model are kept as [`NodeKind::Unsupported`] with
//! their span so that the failure can be reported at the right location.

use crate::span::Span;

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub span: Span,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarDeclKind {
    Var,
    Let,
    Const,
}

impl VarDeclKind {
    pub fn is_block_scoped(&self) -> bool {
        !matches!(self, VarDeclKind::Var)
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            VarDeclKind::Var => "var",
            VarDeclKind::Let => "let",
            VarDeclKind::Const => "const",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Ident(String),
    /// Object or array destructuring pattern.
    Pattern,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclarator {
    pub span: Span,
    pub binding: Binding,
    pub init: Option<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Top-level statement list.
    Script(Vec<Node>),
    VarDecl {
        kind: VarDeclKind,
        decls: Vec<VarDeclarator>,
    },
    ExprStmt(Box<Node>),
    Call {
        callee: Box<Node>,
        args: Vec<Node>,
    },
    /// Plain `=` assignment.
    Assign {
        target: Box<Node>,
        value: Box<Node>,
    },
    /// Dot-form property access.
    Member {
        object: Box<Node>,
        property: String,
    },
    Number(f64),
    Ident(String),
    Null,
    Bool(bool),
    /// A construct the tree does not model, named by its syntactic kind.
    Unsupported(&'static str),
}

impl NodeKind {
    /// Human readable name of the syntactic kind.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Script(_) => "script",
            NodeKind::VarDecl { .. } => "variable declaration",
            NodeKind::ExprStmt(_) => "expression statement",
            NodeKind::Call { .. } => "call expression",
            NodeKind::Assign { .. } => "assignment",
            NodeKind::Member { .. } => "property access",
            NodeKind::Number(_) => "numeric literal",
            NodeKind::Ident(_) => "identifier",
            NodeKind::Null => "null literal",
            NodeKind::Bool(_) => "boolean literal",
            NodeKind::Unsupported(kind) => kind,
        }
    }
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self { span, kind }
    }

    pub fn script(stmts: Vec<Node>, span: Span) -> Self {
        Self::new(NodeKind::Script(stmts), span)
    }

    pub fn expr_stmt(expr: Node, span: Span) -> Self {
        Self::new(NodeKind::ExprStmt(Box::new(expr)), span)
    }

    pub fn ident(name: impl Into<String>, span: Span) -> Self {
        Self::new(NodeKind::Ident(name.into()), span)
    }

    pub fn number(value: f64, span: Span) -> Self {
        Self::new(NodeKind::Number(value), span)
    }

    pub fn call(callee: Node, args: Vec<Node>, span: Span) -> Self {
        Self::new(
            NodeKind::Call {
                callee: Box::new(callee),
                args,
            },
            span,
        )
    }

    pub fn assign(target: Node, value: Node, span: Span) -> Self {
        Self::new(
            NodeKind::Assign {
                target: Box::new(target),
                value: Box::new(value),
            },
            span,
        )
    }

    pub fn member(object: Node, property: impl Into<String>, span: Span) -> Self {
        Self::new(
            NodeKind::Member {
                object: Box::new(object),
                property: property.into(),
            },
            span,
        )
    }

    pub fn unsupported(kind: &'static str, span: Span) -> Self {
        Self::new(NodeKind::Unsupported(kind), span)
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_var_is_function_scoped() {
        assert!(!VarDeclKind::Var.is_block_scoped());
        assert!(VarDeclKind::Let.is_block_scoped());
        assert!(VarDeclKind::Const.is_block_scoped());
    }
}
