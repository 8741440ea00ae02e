//! The request-level error taxonomy.
//!
//! Everything that can go wrong while answering one request collapses
//! into this enum, and the enum collapses into the `{"error": ...}`
//! response shape at the top level. Message outcomes (empty preference
//! query, zero candidates after filtering) are deliberately *not* errors;
//! they live on the success path as messages.

use catalog::CatalogError;
use features::FeatureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// No store location configured at all
    #[error("no catalog location configured: set the {0} environment variable")]
    ConfigurationMissing(String),

    /// Store unreachable, unreadable, or returned an empty catalog
    #[error("catalog data unavailable: {0}")]
    DataUnavailable(String),

    /// The supplied movie id is not a well-formed object id
    #[error("invalid movie id format: {0:?}")]
    InvalidIdentifier(String),

    /// The supplied movie id is well-formed but not in the snapshot
    #[error("movie with id {0} not found in the catalog")]
    NotFound(String),

    /// Query vector and catalog matrix disagree on column count
    #[error("query vector has {found} columns but the catalog matrix has {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Anything unexpected
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CatalogError> for EngineError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ConfigurationMissing { var } => Self::ConfigurationMissing(var),
            other => Self::DataUnavailable(other.to_string()),
        }
    }
}

impl From<FeatureError> for EngineError {
    fn from(err: FeatureError) -> Self {
        match err {
            FeatureError::DimensionMismatch { expected, found } => {
                Self::DimensionMismatch { expected, found }
            }
        }
    }
}

impl From<anyhow::Error> for EngineError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_errors_map_into_the_taxonomy() {
        let err: EngineError = CatalogError::ConfigurationMissing {
            var: "CATALOG_PATH".into(),
        }
        .into();
        assert!(matches!(err, EngineError::ConfigurationMissing(_)));

        let err: EngineError = CatalogError::Empty.into();
        assert!(matches!(err, EngineError::DataUnavailable(_)));
    }

    #[test]
    fn not_found_message_names_the_id() {
        let err = EngineError::NotFound("573a1390f29313caabcd42e8".into());
        let text = err.to_string();
        assert!(text.contains("not found"));
        assert!(text.contains("573a1390f29313caabcd42e8"));
    }
}
