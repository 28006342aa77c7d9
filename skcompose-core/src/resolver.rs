//! Column resolution.
//!
//! Turns a column selector into an ordered list of features. Resolution runs in
//! one of two modes, picked by the feature context:
//!
//! - **chained** (non-empty context): names match context features in order,
//!   indices address the context positionally.
//! - **raw** (empty context): names and synthesized positional names become
//!   wildcard features over registry fields, created on first use.

use crate::config::ComposeConfig;
use crate::error::{ComposeError, Result};
use crate::feature::Feature;
use crate::registry::FieldRegistry;
use crate::selector::{ColumnRef, ColumnSelector};
use tracing::trace;

/// Resolves selectors against a feature context.
#[derive(Debug, Clone, Copy)]
pub struct ColumnResolver<'a> {
    config: &'a ComposeConfig,
}

impl<'a> ColumnResolver<'a> {
    pub fn new(config: &'a ComposeConfig) -> Self {
        Self { config }
    }

    /// Resolve every selector element, one feature per element, in order.
    pub fn resolve<R>(
        &self,
        selector: &ColumnSelector,
        context: &[Feature],
        registry: &mut R,
        label: &str,
    ) -> Result<Vec<Feature>>
    where
        R: FieldRegistry + ?Sized,
    {
        let refs = selector.refs(label)?;
        if !self.config.allow_mixed_selectors && is_mixed(&refs) {
            return Err(ComposeError::MixedSelector {
                label: label.to_string(),
            });
        }

        refs.iter()
            .map(|column| {
                if context.is_empty() {
                    self.resolve_raw(column, &mut *registry, label)
                } else {
                    resolve_chained(column, context, label)
                }
            })
            .collect()
    }

    fn resolve_raw<R>(&self, column: &ColumnRef, registry: &mut R, label: &str) -> Result<Feature>
    where
        R: FieldRegistry + ?Sized,
    {
        let name = match column {
            ColumnRef::Name(name) => name.clone(),
            ColumnRef::Index(index) => {
                let position =
                    usize::try_from(*index).map_err(|_| ComposeError::NegativeIndex {
                        index: *index,
                        label: label.to_string(),
                    })?;
                self.config.index_field_name(position)
            }
        };

        let field = match registry.lookup_field(&name) {
            Some(id) => id,
            None => registry.create_field(&name),
        };
        trace!(column = %column, field = %name, "Resolved raw column");
        Ok(Feature::wildcard(name, field))
    }
}

fn resolve_chained(column: &ColumnRef, context: &[Feature], label: &str) -> Result<Feature> {
    match column {
        ColumnRef::Name(name) => context
            .iter()
            .find(|feature| feature.name() == name)
            .cloned()
            .ok_or_else(|| ComposeError::MissingColumn {
                column: name.clone(),
                label: label.to_string(),
            }),
        ColumnRef::Index(index) => usize::try_from(*index)
            .ok()
            .and_then(|position| context.get(position))
            .cloned()
            .ok_or_else(|| ComposeError::IndexOutOfRange {
                index: *index,
                len: context.len(),
                label: label.to_string(),
            }),
    }
}

fn is_mixed(refs: &[ColumnRef]) -> bool {
    let names = refs
        .iter()
        .filter(|r| matches!(r, ColumnRef::Name(_)))
        .count();
    names != 0 && names != refs.len()
}
