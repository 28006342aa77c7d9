//! Features flowing between pipeline stages.

use crate::registry::FieldId;
use serde::{Deserialize, Serialize};

/// How a feature came to exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeatureKind {
    /// Direct alias of a raw registry field.
    Wildcard { field: FieldId },
    /// Produced by a transformer; opaque to column resolution.
    Derived { producer: String },
}

/// A named unit of data usable by a transform step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    name: String,
    kind: FeatureKind,
}

impl Feature {
    pub fn wildcard(name: impl Into<String>, field: FieldId) -> Self {
        Self {
            name: name.into(),
            kind: FeatureKind::Wildcard { field },
        }
    }

    pub fn derived(name: impl Into<String>, producer: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FeatureKind::Derived {
                producer: producer.into(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FeatureKind {
        &self.kind
    }

    /// The underlying registry field, for wildcard features.
    pub fn field(&self) -> Option<FieldId> {
        match self.kind {
            FeatureKind::Wildcard { field } => Some(field),
            FeatureKind::Derived { .. } => None,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self.kind, FeatureKind::Wildcard { .. })
    }
}
