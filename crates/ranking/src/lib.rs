//! # Ranking Crate
//!
//! This crate turns similarity scores into the final top-N selection.
//!
//! ## Main Components
//!
//! - **candidate**: The ScoredCandidate flowing through the pipeline
//! - **ranker**: Cosine scoring, stable ordering, truncation
//! - **traits** / **filter_pipeline**: Composable post-ranking filters
//! - **filters**: Positivity, self-exclusion and numeric-range filters
//! - **projector**: Mapping ranked rows onto the fixed response schema
//!
//! ## Example Usage
//!
//! ```ignore
//! use ranking::{FilterPipeline, filters::PositiveScoreFilter};
//!
//! let scored = ranking::score_catalog(&query, &matrix)?;
//! let pipeline = FilterPipeline::new().add_filter(PositiveScoreFilter);
//! let top = ranking::rank(scored, &snapshot, &pipeline, 10)?;
//! let items = ranking::project(&top, &snapshot);
//! ```

// Public modules
pub mod candidate;
pub mod filter_pipeline;
pub mod filters;
pub mod projector;
pub mod ranker;
pub mod traits;

// Re-export commonly used types for convenience
pub use candidate::ScoredCandidate;
pub use filter_pipeline::FilterPipeline;
pub use projector::{Recommendation, project, round_similarity};
pub use ranker::{pairwise_row, rank, score_catalog};
pub use traits::Filter;
