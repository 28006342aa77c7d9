//! # skcompose-core — Column Transformer Resolution
//!
//! Resolves a fitted column transformer, an ordered list of
//! `(label, transformer, columns)` entries, into an ordered list of output
//! features. Column selectors are names or positions, resolved either against
//! the features of an upstream stage or against raw input columns, in which
//! case fields are created in the session's [`FieldRegistry`] on first use.
//!
//! No numeric work happens here: entries are dispatched to the `drop` and
//! `passthrough` sentinels or delegated to real [`Transformer`]s.
//!
//! ```
//! use skcompose_core::{
//!     ColumnSelector, ColumnTransformer, ComposeConfig, FittedEntry, SessionRegistry,
//!     TransformerRef,
//! };
//!
//! let ct = ColumnTransformer::with_entries(
//!     vec![
//!         FittedEntry::new("keep", TransformerRef::token("passthrough"), ColumnSelector::indices([0])),
//!         FittedEntry::new("skip", TransformerRef::token("drop"), ColumnSelector::indices([1])),
//!     ],
//!     ComposeConfig::default(),
//! );
//! let mut registry = SessionRegistry::new();
//! let features = ct.initialize_features(&mut registry).unwrap();
//! assert_eq!(features[0].name(), "x1");
//! ```

pub mod column_transformer;
pub mod config;
pub mod document;
pub mod error;
pub mod feature;
pub mod registry;
pub mod resolver;
pub mod selector;
pub mod sentinel;
pub mod transformer;

pub use column_transformer::{ColumnTransformer, FittedEntry};
pub use config::{ComposeConfig, load_config};
pub use document::{ColumnTransformerDocument, EntryDocument};
pub use error::{ComposeError, Result};
pub use feature::{Feature, FeatureKind};
pub use registry::{
    ConsumptionRecord, DataType, Field, FieldId, FieldRegistry, OpType, SessionRegistry,
};
pub use resolver::ColumnResolver;
pub use selector::{ColumnRef, ColumnSelector};
pub use sentinel::{DropTransformer, PassThroughTransformer};
pub use transformer::{TransformOp, Transformer, TransformerRef, dispatch};
