//! Column transformer orchestration.
//!
//! Walks the fitted entries in order. Each entry is dispatched, its columns are
//! resolved against the feature context, the registry is told which transformer
//! consumes them, and the transformer's output is appended to the result.
//! The first error aborts the whole pass and no partial output escapes.

use crate::config::ComposeConfig;
use crate::error::Result;
use crate::feature::Feature;
use crate::registry::FieldRegistry;
use crate::resolver::ColumnResolver;
use crate::selector::ColumnSelector;
use crate::transformer::{Transformer, TransformerRef, dispatch};
use tracing::{debug, info};

/// One `(label, transformer, columns)` triple of a fitted column transformer.
#[derive(Debug, Clone)]
pub struct FittedEntry {
    /// Informational only.
    pub label: String,
    pub transformer: TransformerRef,
    pub columns: ColumnSelector,
}

impl FittedEntry {
    pub fn new(
        label: impl Into<String>,
        transformer: TransformerRef,
        columns: impl Into<ColumnSelector>,
    ) -> Self {
        Self {
            label: label.into(),
            transformer,
            columns: columns.into(),
        }
    }
}

/// A fitted column transformer.
#[derive(Debug, Clone, Default)]
pub struct ColumnTransformer {
    entries: Vec<FittedEntry>,
    config: ComposeConfig,
}

impl ColumnTransformer {
    pub fn new(config: ComposeConfig) -> Self {
        Self {
            entries: Vec::new(),
            config,
        }
    }

    pub fn with_entries(entries: Vec<FittedEntry>, config: ComposeConfig) -> Self {
        Self { entries, config }
    }

    pub fn push(&mut self, entry: FittedEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[FittedEntry] {
        &self.entries
    }

    pub fn config(&self) -> &ComposeConfig {
        &self.config
    }

    /// Resolve over raw input columns (empty feature context).
    pub fn initialize_features(&self, registry: &mut dyn FieldRegistry) -> Result<Vec<Feature>> {
        self.resolve_features(&[], registry)
    }

    /// Resolve every entry against `context` and concatenate the outputs in
    /// entry order.
    pub fn resolve_features(
        &self,
        context: &[Feature],
        registry: &mut dyn FieldRegistry,
    ) -> Result<Vec<Feature>> {
        let resolver = ColumnResolver::new(&self.config);
        let mut result = Vec::new();

        for entry in &self.entries {
            let op = dispatch(&entry.transformer, &self.config, &entry.label)?;
            let features =
                resolver.resolve(&entry.columns, context, &mut *registry, &entry.label)?;

            registry.notify_consumed(&features, op.kind());

            let inputs = features.len();
            let output = op.transform(features, registry)?;
            debug!(
                label = %entry.label,
                transformer = op.kind(),
                inputs,
                outputs = output.len(),
                "Encoded column transformer entry"
            );
            result.extend(output);
        }

        info!(
            entries = self.entries.len(),
            context = context.len(),
            features = result.len(),
            "Resolved column transformer"
        );
        Ok(result)
    }
}

impl Transformer for ColumnTransformer {
    fn kind(&self) -> &str {
        "ColumnTransformer"
    }

    fn encode_features(
        &self,
        features: Vec<Feature>,
        registry: &mut dyn FieldRegistry,
    ) -> Result<Vec<Feature>> {
        self.resolve_features(&features, registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComposeError;
    use crate::registry::SessionRegistry;
    use pretty_assertions::assert_eq;

    struct Fail;

    impl Transformer for Fail {
        fn kind(&self) -> &str {
            "Fail"
        }

        fn encode_features(
            &self,
            _features: Vec<Feature>,
            _registry: &mut dyn FieldRegistry,
        ) -> Result<Vec<Feature>> {
            Err(ComposeError::transform("Fail", "boom"))
        }
    }

    fn names(features: &[Feature]) -> Vec<&str> {
        features.iter().map(Feature::name).collect()
    }

    #[test]
    fn test_passthrough_and_drop_over_raw_columns() {
        let ct = ColumnTransformer::with_entries(
            vec![
                FittedEntry::new(
                    "a",
                    TransformerRef::token("passthrough"),
                    ColumnSelector::indices([0]),
                ),
                FittedEntry::new(
                    "b",
                    TransformerRef::token("drop"),
                    ColumnSelector::indices([1]),
                ),
            ],
            ComposeConfig::default(),
        );
        let mut registry = SessionRegistry::new();

        let out = ct.initialize_features(&mut registry).unwrap();
        assert_eq!(names(&out), vec!["x1"]);
        assert!(out[0].is_wildcard());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_notifies_registry_per_entry() {
        let ct = ColumnTransformer::with_entries(
            vec![
                FittedEntry::new("keep", TransformerRef::token("passthrough"), "age"),
                FittedEntry::new("skip", TransformerRef::token("drop"), "age"),
            ],
            ComposeConfig::default(),
        );
        let mut registry = SessionRegistry::new();
        ct.initialize_features(&mut registry).unwrap();

        let log = registry.consumption_log();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].transformer, "PassThrough");
        assert_eq!(registry.last_consumer("age"), Some("Drop"));
    }

    #[test]
    fn test_error_discards_partial_output() {
        let ct = ColumnTransformer::with_entries(
            vec![
                FittedEntry::new("ok", TransformerRef::token("passthrough"), "age"),
                FittedEntry::new("bad", TransformerRef::handle(Fail), "income"),
            ],
            ComposeConfig::default(),
        );
        let mut registry = SessionRegistry::new();

        let err = ct.initialize_features(&mut registry).unwrap_err();
        assert!(matches!(err, ComposeError::Transform { .. }));
    }

    #[test]
    fn test_dispatch_error_precedes_resolution() {
        let ct = ColumnTransformer::with_entries(
            vec![FittedEntry::new(
                "clf",
                TransformerRef::Opaque { kind: "SVC".into() },
                "never_created",
            )],
            ComposeConfig::default(),
        );
        let mut registry = SessionRegistry::new();

        let err = ct.initialize_features(&mut registry).unwrap_err();
        assert!(matches!(err, ComposeError::UnsupportedTransformer { .. }));
        assert!(registry.lookup_field("never_created").is_none());
    }

    #[test]
    fn test_nested_column_transformer_chains_context() {
        let inner = ColumnTransformer::with_entries(
            vec![FittedEntry::new(
                "inner",
                TransformerRef::token("passthrough"),
                1i64,
            )],
            ComposeConfig::default(),
        );
        let outer = ColumnTransformer::with_entries(
            vec![FittedEntry::new(
                "outer",
                TransformerRef::handle(inner),
                ColumnSelector::names(["a", "b"]),
            )],
            ComposeConfig::default(),
        );
        let mut registry = SessionRegistry::new();

        let out = outer.initialize_features(&mut registry).unwrap();
        assert_eq!(names(&out), vec!["b"]);
    }

    #[test]
    fn test_empty_transformer_yields_nothing() {
        let ct = ColumnTransformer::new(ComposeConfig::default());
        let mut registry = SessionRegistry::new();
        assert!(ct.initialize_features(&mut registry).unwrap().is_empty());
    }
}
