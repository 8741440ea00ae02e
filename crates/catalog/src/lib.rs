//! # Catalog Crate
//!
//! This crate handles loading and indexing the movie catalog snapshot.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MovieRecord, CatalogSnapshot) and the
//!   fixed missing-field normalization policy
//! - **store**: The CatalogStore boundary plus the JSON-export and
//!   in-memory implementations
//! - **error**: Error types for catalog access
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{JsonFileStore, load};
//!
//! let store = JsonFileStore::from_env()?;
//! let snapshot = load(&store)?;
//!
//! let row = snapshot.row_of("573a1390f29313caabcd42e8").unwrap();
//! println!("{}", snapshot.get(row).unwrap().title);
//! ```

// Public modules
pub mod error;
pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use store::{CATALOG_PATH_VAR, CatalogStore, JsonFileStore, StaticStore, load};
pub use types::{CatalogSnapshot, MovieId, MovieRecord};
