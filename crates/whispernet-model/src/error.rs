//! Model error types

use thiserror::Error;

use crate::collection::RecordKind;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Record kind mismatch: collection holds {expected}, got {found}")]
    KindMismatch {
        expected: RecordKind,
        found: RecordKind,
    },
}

impl ModelError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ModelError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
