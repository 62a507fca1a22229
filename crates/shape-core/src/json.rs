use serde_json::{json, Value};

use crate::span::Span;

/// Structured JSON view of engine data that cannot derive `Serialize`
/// (abstract values carry native handlers).
pub trait ToJson {
    fn to_json(&self) -> crate::error::Result<Value>;
}

impl ToJson for Span {
    fn to_json(&self) -> crate::error::Result<Value> {
        Ok(json!({ "start": self.start(), "length": self.len() }))
    }
}

impl<T: ToJson> ToJson for [T] {
    fn to_json(&self) -> crate::error::Result<Value> {
        let items = self
            .iter()
            .map(ToJson::to_json)
            .collect::<crate::error::Result<Vec<_>>>()?;
        Ok(Value::Array(items))
    }
}
