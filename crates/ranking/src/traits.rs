//! Core traits for the post-ranking filter pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to scored candidates before
//! truncation.

use crate::candidate::ScoredCandidate;
use anyhow::Result;
use catalog::CatalogSnapshot;

/// Core trait for filtering scored candidates.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be used in concurrent contexts
/// - Filters take ownership of the Vec and return a filtered Vec, which
///   allows transformations without unnecessary cloning
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of scored candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter (takes ownership)
    /// * `snapshot` - The catalog snapshot the rows point into
    ///
    /// # Returns
    /// * `Ok(Vec<ScoredCandidate>)` - The filtered candidates
    /// * `Err` - If filtering fails
    fn apply(
        &self,
        candidates: Vec<ScoredCandidate>,
        snapshot: &CatalogSnapshot,
    ) -> Result<Vec<ScoredCandidate>>;
}
