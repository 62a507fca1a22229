//! Lexical environments.
//!
//! Scopes live in an arena and refer to their parent by [`ScopeId`]; the root
//! scope is the global scope. A child can only be created under an existing
//! scope, so every chain is finite and ends at the root.

use std::collections::HashMap;

use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("scope#{_0}")]
pub struct ScopeId(usize);

#[derive(Debug, Clone, Default)]
pub struct ScopeRecord {
    parent: Option<ScopeId>,
    bindings: HashMap<String, Value>,
}

impl ScopeRecord {
    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone)]
pub struct ScopeArena {
    scopes: Vec<ScopeRecord>,
}

impl Default for ScopeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeArena {
    /// Create an arena holding only the global scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![ScopeRecord::default()],
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn push_child(&mut self, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(ScopeRecord {
            parent: Some(parent),
            bindings: HashMap::new(),
        });
        id
    }

    pub fn record(&self, scope: ScopeId) -> &ScopeRecord {
        &self.scopes[scope.0]
    }

    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.record(scope).parent
    }

    pub fn has_local(&self, scope: ScopeId, name: &str) -> bool {
        self.record(scope).bindings.contains_key(name)
    }

    /// Scopes from `scope` up to the root, nearest first.
    pub fn chain(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(scope), move |current| self.parent(*current))
    }

    /// Nearest binding of `name`, searching `scope` then each ancestor.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<&Value> {
        self.chain(scope)
            .find_map(|id| self.scopes[id.0].bindings.get(name))
    }

    /// Insert or overwrite a binding in `scope` itself.
    pub fn declare(&mut self, scope: ScopeId, name: impl Into<String>, value: Value) {
        self.scopes[scope.0].bindings.insert(name.into(), value);
    }

    /// Rebind `name` in the nearest scope that already binds it, or at the
    /// root when no scope does. Never creates a binding in an intermediate
    /// scope.
    pub fn set_var(&mut self, scope: ScopeId, name: &str, value: Value) {
        let target = self
            .chain(scope)
            .find(|id| self.has_local(*id, name))
            .unwrap_or_else(|| self.root());
        self.declare(target, name, value);
    }
}
