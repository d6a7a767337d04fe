//! Error types for the vector index
//!
//! Every fallible operation in memvec returns a [`VectorResult`]. Errors are
//! reported synchronously to the caller; nothing in the index retries.

use thiserror::Error;

use crate::types::ItemId;

/// Errors produced by vector collections and the collection registry
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VectorError {
    /// The queried item is not present in the (possibly restricted) index
    #[error("Item not found: {id}")]
    ItemNotFound {
        /// Identifier that was looked up
        id: ItemId,
    },

    /// Vector length doesn't match the collection's dimensionality
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Dimensionality fixed at collection creation
        expected: usize,
        /// Length of the offending vector
        got: usize,
    },

    /// Invalid dimension specified (must be > 0)
    #[error("Invalid dimension: {dimension} (must be > 0)")]
    InvalidDimension {
        /// The invalid dimension value
        dimension: usize,
    },

    /// An array-like input could not be converted into a vector
    #[error("Invalid vector: {reason}")]
    InvalidVector {
        /// What was wrong with the input
        reason: String,
    },

    /// Collection name is invalid
    #[error("Invalid collection name: {name} ({reason})")]
    InvalidCollectionName {
        /// The invalid name
        name: String,
        /// Reason why it's invalid
        reason: String,
    },

    /// Index configuration could not be loaded or is out of range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Internal invariant violation
    #[error("Internal error: {0}")]
    Internal(String),
}

impl VectorError {
    /// Shorthand for [`VectorError::ItemNotFound`]
    pub fn item_not_found(id: impl Into<ItemId>) -> Self {
        VectorError::ItemNotFound { id: id.into() }
    }

    /// Shorthand for [`VectorError::InvalidVector`]
    pub fn invalid_vector(reason: impl Into<String>) -> Self {
        VectorError::InvalidVector {
            reason: reason.into(),
        }
    }

    /// Check if this error indicates the item was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, VectorError::ItemNotFound { .. })
    }

    /// Check if this error is a validation error
    ///
    /// Validation errors are caused by caller input and never leave the
    /// index in a modified state.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            VectorError::DimensionMismatch { .. }
                | VectorError::InvalidDimension { .. }
                | VectorError::InvalidVector { .. }
                | VectorError::InvalidCollectionName { .. }
                | VectorError::InvalidConfig(_)
        )
    }
}

/// Result type alias for vector operations
pub type VectorResult<T> = Result<T, VectorError>;
