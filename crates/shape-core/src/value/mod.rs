//! Abstract values.
//!
//! A [`Value`] approximates a runtime value as a union of [`Constraint`]s, one
//! shape hypothesis each. Values are immutable once built; operations produce
//! new values through [`Value::join`].

use std::collections::BTreeMap;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

use itertools::Itertools;
use serde_json::json;

use crate::ast::Node;
use crate::json::ToJson;

mod join;

/// Closed set of shapes a program value may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueType {
    Exception,
    Any,
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
    Function,
    Symbol,
}

impl ValueType {
    pub const COUNT: usize = 11;

    pub const ALL: [ValueType; ValueType::COUNT] = [
        ValueType::Exception,
        ValueType::Any,
        ValueType::Undefined,
        ValueType::Null,
        ValueType::Boolean,
        ValueType::Number,
        ValueType::String,
        ValueType::Array,
        ValueType::Object,
        ValueType::Function,
        ValueType::Symbol,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Exception => "exception",
            ValueType::Any => "any",
            ValueType::Undefined => "undefined",
            ValueType::Null => "null",
            ValueType::Boolean => "boolean",
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
            ValueType::Function => "function",
            ValueType::Symbol => "symbol",
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type NativeHandler = dyn Fn(&[Value]) -> Value + Send + Sync;

/// Host-implemented function body.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: String,
    handler: Arc<NativeHandler>,
}

impl NativeFunction {
    pub fn new(
        name: impl Into<String>,
        handler: impl Fn(&[Value]) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            handler: Arc::new(handler),
        }
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.handler)(args)
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "NativeFunction({})", self.name)
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        // Compare data pointers only; vtable addresses are not stable across codegen units.
        std::ptr::eq(
            Arc::as_ptr(&self.handler) as *const (),
            Arc::as_ptr(&other.handler) as *const (),
        )
    }
}

/// Refinement data of a Function constraint. All fields empty is the generic form.
#[derive(Debug, Clone, Default)]
pub struct FunctionShape {
    pub side_effect: Option<bool>,
    pub native: Option<NativeFunction>,
    /// Declaration of a user-defined function whose body is not modelled yet.
    pub node: Option<Arc<Node>>,
}

impl FunctionShape {
    pub fn native(native: NativeFunction, side_effect: bool) -> Self {
        Self {
            side_effect: Some(side_effect),
            native: Some(native),
            node: None,
        }
    }

    pub fn declared(node: Arc<Node>) -> Self {
        Self {
            side_effect: None,
            native: None,
            node: Some(node),
        }
    }

    pub fn is_generic(&self) -> bool {
        self.side_effect.is_none() && self.native.is_none() && self.node.is_none()
    }

    pub fn has_side_effect(&self) -> bool {
        self.side_effect.unwrap_or(false)
    }
}

impl PartialEq for FunctionShape {
    fn eq(&self, other: &Self) -> bool {
        let same_node = match (&self.node, &other.node) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        self.side_effect == other.side_effect && self.native == other.native && same_node
    }
}

/// One shape hypothesis of a [`Value`].
#[derive(Debug, Clone)]
pub enum Constraint {
    Exception,
    Any,
    Undefined,
    Null,
    Boolean(Option<bool>),
    Number(Option<f64>),
    String,
    Array,
    Object(Option<BTreeMap<String, Value>>),
    Function(FunctionShape),
    Symbol,
}

impl Constraint {
    /// The payload-free constraint of the given type.
    pub fn generic(ty: ValueType) -> Self {
        match ty {
            ValueType::Exception => Constraint::Exception,
            ValueType::Any => Constraint::Any,
            ValueType::Undefined => Constraint::Undefined,
            ValueType::Null => Constraint::Null,
            ValueType::Boolean => Constraint::Boolean(None),
            ValueType::Number => Constraint::Number(None),
            ValueType::String => Constraint::String,
            ValueType::Array => Constraint::Array,
            ValueType::Object => Constraint::Object(None),
            ValueType::Function => Constraint::Function(FunctionShape::default()),
            ValueType::Symbol => Constraint::Symbol,
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Constraint::Exception => ValueType::Exception,
            Constraint::Any => ValueType::Any,
            Constraint::Undefined => ValueType::Undefined,
            Constraint::Null => ValueType::Null,
            Constraint::Boolean(_) => ValueType::Boolean,
            Constraint::Number(_) => ValueType::Number,
            Constraint::String => ValueType::String,
            Constraint::Array => ValueType::Array,
            Constraint::Object(_) => ValueType::Object,
            Constraint::Function(_) => ValueType::Function,
            Constraint::Symbol => ValueType::Symbol,
        }
    }

    /// True when the constraint carries no refinement data.
    pub fn is_generic(&self) -> bool {
        match self {
            Constraint::Boolean(literal) => literal.is_none(),
            Constraint::Number(literal) => literal.is_none(),
            Constraint::Object(properties) => properties.is_none(),
            Constraint::Function(shape) => shape.is_generic(),
            Constraint::Exception
            | Constraint::Any
            | Constraint::Undefined
            | Constraint::Null
            | Constraint::String
            | Constraint::Array
            | Constraint::Symbol => true,
        }
    }

    /// Structural identity: same type, same refinement fields, same values.
    pub fn same_refinement(&self, other: &Constraint) -> bool {
        match (self, other) {
            (Constraint::Boolean(a), Constraint::Boolean(b)) => a == b,
            (Constraint::Number(a), Constraint::Number(b)) => match (a, b) {
                (Some(a), Some(b)) => a.total_cmp(b).is_eq(),
                (None, None) => true,
                _ => false,
            },
            (Constraint::Object(a), Constraint::Object(b)) => a == b,
            (Constraint::Function(a), Constraint::Function(b)) => a == b,
            _ => self.value_type() == other.value_type(),
        }
    }
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        self.same_refinement(other)
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Constraint::Boolean(Some(literal)) => write!(f, "boolean({literal})"),
            Constraint::Number(Some(literal)) => write!(f, "number({literal})"),
            Constraint::Object(Some(properties)) => write!(
                f,
                "object{{{}}}",
                properties
                    .iter()
                    .map(|(name, value)| format!("{name}: {value}"))
                    .join(", ")
            ),
            Constraint::Function(shape) if shape.native.is_some() => {
                let name = shape.native.as_ref().map(|n| n.name.as_str()).unwrap_or("");
                write!(f, "function {name}")
            }
            other => f.write_str(other.value_type().as_str()),
        }
    }
}

impl ToJson for Constraint {
    fn to_json(&self) -> crate::error::Result<serde_json::Value> {
        let ty = self.value_type().as_str();
        Ok(match self {
            Constraint::Boolean(Some(literal)) => json!({ "type": ty, "literal": literal }),
            Constraint::Number(Some(literal)) => json!({ "type": ty, "literal": literal }),
            Constraint::Object(Some(properties)) => {
                let mut map = serde_json::Map::new();
                for (name, value) in properties {
                    map.insert(name.clone(), value.to_json()?);
                }
                json!({ "type": ty, "properties": map })
            }
            Constraint::Function(shape) if !shape.is_generic() => json!({
                "type": ty,
                "native": shape.native.as_ref().map(|n| n.name.clone()),
                "sideEffect": shape.side_effect,
                "declared": shape.node.is_some(),
            }),
            _ => json!({ "type": ty }),
        })
    }
}

/// Union of possible shapes. An empty union is the unreachable value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Value {
    constraints: Vec<Constraint>,
}

impl Value {
    /// Build a value from constraints as given. Use [`Value::join_all`] to
    /// normalise an arbitrary sequence.
    pub fn new(constraints: Vec<Constraint>) -> Self {
        Self { constraints }
    }

    pub fn single(constraint: Constraint) -> Self {
        Self::new(vec![constraint])
    }

    pub fn never() -> Self {
        Self::default()
    }

    pub fn any() -> Self {
        Self::single(Constraint::Any)
    }

    pub fn undefined() -> Self {
        Self::single(Constraint::Undefined)
    }

    pub fn null() -> Self {
        Self::single(Constraint::Null)
    }

    pub fn boolean(literal: Option<bool>) -> Self {
        Self::single(Constraint::Boolean(literal))
    }

    pub fn number(literal: Option<f64>) -> Self {
        Self::single(Constraint::Number(literal))
    }

    pub fn object(properties: Option<BTreeMap<String, Value>>) -> Self {
        Self::single(Constraint::Object(properties))
    }

    pub fn function(shape: FunctionShape) -> Self {
        Self::single(Constraint::Function(shape))
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn into_constraints(self) -> Vec<Constraint> {
        self.constraints
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Constraint> {
        self.constraints.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_never(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn is_any(&self) -> bool {
        matches!(self.constraints.as_slice(), [Constraint::Any])
    }

    pub fn may_be(&self, ty: ValueType) -> bool {
        self.constraints
            .iter()
            .any(|c| c.value_type() == ty || c.value_type() == ValueType::Any)
    }
}

impl<'a> IntoIterator for &'a Value {
    type Item = &'a Constraint;
    type IntoIter = std::slice::Iter<'a, Constraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.constraints.is_empty() {
            return f.write_str("never");
        }
        write!(f, "{}", self.constraints.iter().join(" | "))
    }
}

impl ToJson for Value {
    fn to_json(&self) -> crate::error::Result<serde_json::Value> {
        self.constraints.as_slice().to_json()
    }
}
