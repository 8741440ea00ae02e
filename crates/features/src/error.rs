//! Error types for feature construction.

use thiserror::Error;

/// Errors that can occur while building vectors in a fitted feature space.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeatureError {
    /// A built query vector does not line up with the catalog matrix.
    ///
    /// Every block of a query vector is derived from the fitted space
    /// itself (including zero-width blocks for empty vocabularies), so
    /// this can only mean an internal inconsistency. It is never repaired
    /// by padding.
    #[error("query vector has {found} columns but the feature space has {expected}")]
    DimensionMismatch { expected: usize, found: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, FeatureError>;
