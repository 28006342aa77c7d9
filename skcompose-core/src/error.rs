//! Error types for the skcompose core library.
//!
//! Every resolution failure is fatal to the orchestration call that raised it,
//! so each variant carries the entry label and the offending value.

/// Top-level error type for column transformer resolution.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("Column '{column}' is undefined (entry '{label}')")]
    MissingColumn { column: String, label: String },

    #[error("Column index {index} is out of range for {len} features (entry '{label}')")]
    IndexOutOfRange {
        index: i64,
        len: usize,
        label: String,
    },

    #[error("Column index {index} is negative; raw input columns start at 0 (entry '{label}')")]
    NegativeIndex { index: i64, label: String },

    #[error("The column object ({kind}) is not a string or integer (entry '{label}')")]
    UnsupportedSelector { kind: String, label: String },

    #[error("Column selector mixes names and indices (entry '{label}')")]
    MixedSelector { label: String },

    #[error("The estimator object ({kind}) is not a supported Transformer (entry '{label}')")]
    UnsupportedTransformer { kind: String, label: String },

    #[error("Transformer '{transformer}' failed: {message}")]
    Transform {
        transformer: String,
        message: String,
    },

    #[error("Invalid document: {0}")]
    Document(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ComposeError {
    pub fn transform(transformer: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transform {
            transformer: transformer.into(),
            message: message.into(),
        }
    }

    pub fn document(msg: impl Into<String>) -> Self {
        Self::Document(msg.into())
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ComposeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_names_the_column() {
        let err = ComposeError::MissingColumn {
            column: "missing".into(),
            label: "num".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'missing'"));
        assert!(msg.contains("num"));
    }

    #[test]
    fn test_unsupported_transformer_names_kind() {
        let err = ComposeError::UnsupportedTransformer {
            kind: "LogisticRegression".into(),
            label: "clf".into(),
        };
        assert!(err.to_string().contains("LogisticRegression"));
    }

    #[test]
    fn test_negative_index_does_not_claim_a_length() {
        let err = ComposeError::NegativeIndex {
            index: -1,
            label: "t".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("-1"));
        assert!(!msg.contains("out of range"));
    }

    #[test]
    fn test_from_serde_error() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ComposeError = serde_err.into();
        assert!(matches!(err, ComposeError::Serialization(_)));
    }
}
