//! Configuration-free transformers selected by reserved tokens.

use crate::error::Result;
use crate::feature::Feature;
use crate::registry::FieldRegistry;
use crate::transformer::Transformer;

/// Excludes the selected columns from the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropTransformer;

impl Transformer for DropTransformer {
    fn kind(&self) -> &str {
        "Drop"
    }

    fn encode_features(
        &self,
        _features: Vec<Feature>,
        _registry: &mut dyn FieldRegistry,
    ) -> Result<Vec<Feature>> {
        Ok(Vec::new())
    }
}

/// Forwards the selected columns verbatim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassThroughTransformer;

impl Transformer for PassThroughTransformer {
    fn kind(&self) -> &str {
        "PassThrough"
    }

    fn encode_features(
        &self,
        features: Vec<Feature>,
        _registry: &mut dyn FieldRegistry,
    ) -> Result<Vec<Feature>> {
        Ok(features)
    }
}
