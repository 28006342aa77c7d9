//! JSON form of a fitted column transformer.
//!
//! ```json
//! {
//!   "transformers": [
//!     ["num", "passthrough", ["age", "income"]],
//!     ["ids", "drop", [0]],
//!     ["nested", {"column_transformer": {"transformers": [["t", "passthrough", 0]]}}, [1, 2]]
//!   ]
//! }
//! ```
//!
//! Transformer values other than strings and nested column transformers are
//! opaque estimators; their kind comes from a `"class"` key when present.

use crate::column_transformer::{ColumnTransformer, FittedEntry};
use crate::config::ComposeConfig;
use crate::error::{ComposeError, Result};
use crate::selector::{ColumnSelector, json_kind};
use crate::transformer::TransformerRef;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

const NESTED_KEY: &str = "column_transformer";
const CLASS_KEY: &str = "class";

/// Serialized fitted column transformer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnTransformerDocument {
    pub transformers: Vec<EntryDocument>,
}

/// A `[label, transformer, columns]` triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryDocument(pub String, pub Value, pub ColumnSelector);

impl ColumnTransformerDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Build the orchestrator. Nested column transformers share `config`.
    pub fn into_transformer(self, config: &ComposeConfig) -> Result<ColumnTransformer> {
        let entries = self
            .transformers
            .into_iter()
            .map(|EntryDocument(label, transformer, columns)| -> Result<FittedEntry> {
                let transformer = transformer_ref(transformer, config, &label)?;
                Ok(FittedEntry::new(label, transformer, columns))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ColumnTransformer::with_entries(entries, config.clone()))
    }
}

fn transformer_ref(value: Value, config: &ComposeConfig, label: &str) -> Result<TransformerRef> {
    match value {
        Value::String(token) => Ok(TransformerRef::Token(token)),
        Value::Object(mut map) => {
            if let Some(nested) = map.remove(NESTED_KEY) {
                let document: ColumnTransformerDocument =
                    serde_json::from_value(nested).map_err(|e| {
                        ComposeError::document(format!("entry '{label}': {NESTED_KEY}: {e}"))
                    })?;
                let nested = document.into_transformer(config)?;
                return Ok(TransformerRef::Handle(Arc::new(nested)));
            }
            let kind = match map.get(CLASS_KEY) {
                Some(Value::String(class)) => class.clone(),
                _ => "object".to_string(),
            };
            Ok(TransformerRef::Opaque { kind })
        }
        other => Ok(TransformerRef::Opaque {
            kind: json_kind(&other).to_string(),
        }),
    }
}
