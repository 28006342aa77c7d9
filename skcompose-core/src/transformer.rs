//! Transformer contract and reference dispatch.
//!
//! A fitted entry names its transformer either with a reserved token or with a
//! handle to a real transformer. [`dispatch`] maps that reference onto the
//! closed [`TransformOp`] variant once, so the orchestrator never inspects
//! reference types itself.

use crate::config::ComposeConfig;
use crate::error::{ComposeError, Result};
use crate::feature::Feature;
use crate::registry::FieldRegistry;
use crate::sentinel::{DropTransformer, PassThroughTransformer};
use std::fmt;
use std::sync::Arc;

/// Trait that every sub-transformer implements.
pub trait Transformer: Send + Sync {
    /// Concrete kind, used in logs and error messages.
    fn kind(&self) -> &str;

    /// Derive output features from the resolved input features.
    fn encode_features(
        &self,
        features: Vec<Feature>,
        registry: &mut dyn FieldRegistry,
    ) -> Result<Vec<Feature>>;
}

/// Transformer reference as it appears in a fitted entry.
#[derive(Clone)]
pub enum TransformerRef {
    /// A string; only the reserved tokens are valid.
    Token(String),
    /// A real transformer.
    Handle(Arc<dyn Transformer>),
    /// An estimator object that is not a transformer.
    Opaque { kind: String },
}

impl TransformerRef {
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(token.into())
    }

    pub fn handle<T: Transformer + 'static>(transformer: T) -> Self {
        Self::Handle(Arc::new(transformer))
    }
}

impl fmt::Debug for TransformerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(token) => f.debug_tuple("Token").field(token).finish(),
            Self::Handle(t) => f.debug_tuple("Handle").field(&t.kind()).finish(),
            Self::Opaque { kind } => f.debug_struct("Opaque").field("kind", kind).finish(),
        }
    }
}

/// The operation a fitted entry applies to its resolved features.
#[derive(Clone)]
pub enum TransformOp {
    Drop,
    PassThrough,
    Delegate(Arc<dyn Transformer>),
}

impl TransformOp {
    pub fn kind(&self) -> &str {
        match self {
            Self::Drop => "Drop",
            Self::PassThrough => "PassThrough",
            Self::Delegate(t) => t.kind(),
        }
    }

    pub fn transform(
        &self,
        features: Vec<Feature>,
        registry: &mut dyn FieldRegistry,
    ) -> Result<Vec<Feature>> {
        match self {
            Self::Drop => DropTransformer.encode_features(features, registry),
            Self::PassThrough => PassThroughTransformer.encode_features(features, registry),
            Self::Delegate(t) => t.encode_features(features, registry),
        }
    }
}

impl fmt::Debug for TransformOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drop => f.write_str("Drop"),
            Self::PassThrough => f.write_str("PassThrough"),
            Self::Delegate(t) => f.debug_tuple("Delegate").field(&t.kind()).finish(),
        }
    }
}

/// Map a transformer reference onto the operation to invoke.
pub fn dispatch(
    reference: &TransformerRef,
    config: &ComposeConfig,
    label: &str,
) -> Result<TransformOp> {
    match reference {
        TransformerRef::Token(token) if *token == config.drop_token => Ok(TransformOp::Drop),
        TransformerRef::Token(token) if *token == config.passthrough_token => {
            Ok(TransformOp::PassThrough)
        }
        TransformerRef::Token(_) => Err(ComposeError::UnsupportedTransformer {
            kind: "str".to_string(),
            label: label.to_string(),
        }),
        TransformerRef::Handle(t) => Ok(TransformOp::Delegate(Arc::clone(t))),
        TransformerRef::Opaque { kind } => Err(ComposeError::UnsupportedTransformer {
            kind: kind.clone(),
            label: label.to_string(),
        }),
    }
}
