//! Error types for the catalog crate.

use thiserror::Error;

/// Errors that can occur while locating or reading the catalog store.
///
/// Variants carry the context a caller needs to turn them into a
/// user-facing error response without re-inspecting the store.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// No store location was configured at all
    #[error("no catalog location configured: set the {var} environment variable")]
    ConfigurationMissing { var: String },

    /// The store exists in configuration but could not be read
    #[error("catalog store unreachable at {path}: {source}")]
    Unreachable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The store was readable but its contents are not a valid catalog export
    #[error("catalog store at {path} is not a valid export: {reason}")]
    Malformed { path: String, reason: String },

    /// The store answered but returned zero movie records
    #[error("catalog store returned no movie records")]
    Empty,
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
