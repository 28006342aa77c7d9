//! Column selectors as they appear in a fitted specification.
//!
//! A selector is kept in its raw form (a JSON value) and validated element by
//! element at resolution time, so that errors can name the offending value.

use crate::error::{ComposeError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Key under which serialized arrays carry their content.
const ARRAY_CONTENT_KEY: &str = "data";

/// One validated selector element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnRef {
    Name(String),
    Index(i64),
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRef::Name(name) => write!(f, "'{name}'"),
            ColumnRef::Index(index) => write!(f, "{index}"),
        }
    }
}

/// A name, a position, or an ordered list of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSelector(Value);

impl ColumnSelector {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(Value::Array(
            names.into_iter().map(|n| Value::String(n.into())).collect(),
        ))
    }

    pub fn indices<I>(indices: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        Self(Value::Array(indices.into_iter().map(Value::from).collect()))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Raw elements in order. A scalar selector yields one element and a
    /// serialized array (`{"data": [...]}`) yields its content.
    pub fn elements(&self) -> Vec<&Value> {
        let value = match &self.0 {
            Value::Object(map) => match map.get(ARRAY_CONTENT_KEY) {
                Some(content @ Value::Array(_)) => content,
                _ => &self.0,
            },
            other => other,
        };
        match value {
            Value::Array(items) => items.iter().collect(),
            scalar => vec![scalar],
        }
    }

    /// Validate every element. `label` names the fitted entry for errors.
    pub fn refs(&self, label: &str) -> Result<Vec<ColumnRef>> {
        self.elements()
            .into_iter()
            .map(|value| parse_ref(value, label))
            .collect()
    }
}

impl From<&str> for ColumnSelector {
    fn from(name: &str) -> Self {
        Self(Value::String(name.to_string()))
    }
}

impl From<i64> for ColumnSelector {
    fn from(index: i64) -> Self {
        Self(Value::from(index))
    }
}

fn parse_ref(value: &Value, label: &str) -> Result<ColumnRef> {
    match value {
        Value::String(name) => Ok(ColumnRef::Name(name.clone())),
        Value::Number(n) => match n.as_i64() {
            Some(index) => Ok(ColumnRef::Index(index)),
            None => Err(unsupported(value, label)),
        },
        _ => Err(unsupported(value, label)),
    }
}

fn unsupported(value: &Value, label: &str) -> ComposeError {
    ComposeError::UnsupportedSelector {
        kind: json_kind(value).to_string(),
        label: label.to_string(),
    }
}

/// Type name of a JSON value, as reported in errors.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(n) if n.is_u64() && !n.is_i64() => "integer (out of i64 range)",
        Value::Number(_) => "integer",
        Value::String(_) => "str",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
