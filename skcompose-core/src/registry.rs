//! Field registry for one conversion session.
//!
//! Fields describe raw input columns. They are created lazily the first time a
//! raw-mode selector references a name, and every later lookup of that name
//! returns the same [`FieldId`].

use crate::config::ComposeConfig;
use crate::feature::Feature;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Declared data type of a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    #[default]
    Double,
    Float,
    Integer,
    String,
    Boolean,
}

/// Operational type of a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpType {
    #[default]
    Continuous,
    Categorical,
    Ordinal,
}

/// Identity of a field within a registry. Two ids are equal only if they
/// refer to the same registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(usize);

impl FieldId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A named raw input column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub dtype: DataType,
    pub optype: OpType,
}

/// Record of a transformer consuming a list of features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumptionRecord {
    pub transformer: String,
    pub features: Vec<String>,
}

/// Registry operations consumed by column resolution.
pub trait FieldRegistry {
    /// Look up a field by exact name.
    fn lookup_field(&self, name: &str) -> Option<FieldId>;

    /// Create a field with the registry's default types. Creating a name that
    /// already exists returns the existing id.
    fn create_field(&mut self, name: &str) -> FieldId;

    /// Access a field definition.
    fn field(&self, id: FieldId) -> Option<&Field>;

    /// Observer hook: `features` are about to be consumed by `transformer`.
    fn notify_consumed(&mut self, _features: &[Feature], _transformer: &str) {}
}

/// In-memory registry scoped to one conversion session.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    fields: Vec<Field>,
    index: HashMap<String, FieldId>,
    consumed: Vec<ConsumptionRecord>,
    default_dtype: DataType,
    default_optype: OpType,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry whose lazily created fields use the configured types.
    pub fn with_config(config: &ComposeConfig) -> Self {
        Self {
            default_dtype: config.default_dtype,
            default_optype: config.default_optype,
            ..Self::default()
        }
    }

    /// Declare a field with explicit types. An existing field keeps its
    /// original declaration.
    pub fn declare_field(&mut self, name: &str, dtype: DataType, optype: OpType) -> FieldId {
        if let Some(id) = self.index.get(name) {
            return *id;
        }
        let id = FieldId(self.fields.len());
        debug!(field = name, ?dtype, ?optype, "Creating field");
        self.fields.push(Field {
            name: name.to_string(),
            dtype,
            optype,
        });
        self.index.insert(name.to_string(), id);
        id
    }

    /// All fields in creation order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn consumption_log(&self) -> &[ConsumptionRecord] {
        &self.consumed
    }

    /// Name of the transformer that most recently consumed a feature with
    /// the given name.
    pub fn last_consumer(&self, feature_name: &str) -> Option<&str> {
        self.consumed
            .iter()
            .rev()
            .find(|record| record.features.iter().any(|f| f == feature_name))
            .map(|record| record.transformer.as_str())
    }
}

impl FieldRegistry for SessionRegistry {
    fn lookup_field(&self, name: &str) -> Option<FieldId> {
        self.index.get(name).copied()
    }

    fn create_field(&mut self, name: &str) -> FieldId {
        self.declare_field(name, self.default_dtype, self.default_optype)
    }

    fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.get(id.0)
    }

    fn notify_consumed(&mut self, features: &[Feature], transformer: &str) {
        self.consumed.push(ConsumptionRecord {
            transformer: transformer.to_string(),
            features: features.iter().map(|f| f.name().to_string()).collect(),
        });
    }
}
