//! # Features Crate
//!
//! This crate builds the combined feature space for a catalog snapshot
//! and the query vectors ranked against it.
//!
//! ## Main Components
//!
//! - **sparse**: SparseVector / CsrMatrix primitives and cosine scoring
//! - **binarizer**: Multi-hot encoding of categorical label lists
//! - **text**: TF-IDF vectorization of plot text
//! - **encoder**: The fitted FeatureSpace and catalog matrix
//! - **query**: Keyword and preference query vectors
//! - **error**: Feature construction errors
//!
//! ## Example Usage
//!
//! ```ignore
//! use features::{FeatureSpace, query};
//!
//! let (space, matrix) = FeatureSpace::fit(&snapshot);
//! let vector = query::keyword_vector(&space, "space pirates")?;
//! let scores = features::cosine_against_rows(&vector, &matrix);
//! ```
//!
//! The invariant that makes any of this meaningful: a query vector and
//! the catalog matrix must come from the *same* fitted FeatureSpace, so
//! their columns line up block for block.

// Public modules
pub mod binarizer;
pub mod encoder;
pub mod error;
pub mod query;
pub mod sparse;
pub mod text;

// Re-export commonly used types for convenience
pub use binarizer::MultiLabelBinarizer;
pub use encoder::{Block, CATEGORICAL_FIELDS, FeatureSpace, FieldSpec};
pub use error::{FeatureError, Result};
pub use query::{PreferenceProfile, keyword_vector, preference_vector};
pub use sparse::{CsrMatrix, SparseVector, cosine_against_rows};
pub use text::{TfidfConfig, TfidfVectorizer};
