//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::candidate::ScoredCandidate;
use crate::traits::Filter;
use anyhow::Result;
use catalog::CatalogSnapshot;
use tracing;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(PositiveScoreFilter)
///     .add_filter(YearRangeFilter::new(Some(1990), Some(1999)));
///
/// let filtered = pipeline.apply(candidates, &snapshot)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Apply all filters in sequence to the candidates.
    ///
    /// # Arguments
    /// * `candidates` - The scored candidates to filter
    /// * `snapshot` - The catalog snapshot the rows point into
    ///
    /// # Returns
    /// * `Ok(Vec<ScoredCandidate>)` - The candidates surviving all filters
    /// * `Err` - If any filter fails
    pub fn apply(
        &self,
        candidates: Vec<ScoredCandidate>,
        snapshot: &CatalogSnapshot,
    ) -> Result<Vec<ScoredCandidate>> {
        let mut current = candidates;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, snapshot)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::PositiveScoreFilter;
    use catalog::{CatalogSnapshot, MovieRecord};

    fn empty_snapshot() -> CatalogSnapshot {
        CatalogSnapshot::new(vec![MovieRecord {
            id: "a".into(),
            ..Default::default()
        }])
    }

    #[test]
    fn empty_pipeline_passes_everything_through() {
        let pipeline = FilterPipeline::new();
        let candidates = vec![ScoredCandidate::new(0, 0.9), ScoredCandidate::new(1, -0.1)];

        let filtered = pipeline.apply(candidates.clone(), &empty_snapshot()).unwrap();
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn single_filter_is_applied() {
        let pipeline = FilterPipeline::new().add_filter(PositiveScoreFilter);
        let candidates = vec![ScoredCandidate::new(0, 0.9), ScoredCandidate::new(1, 0.0)];

        let filtered = pipeline.apply(candidates, &empty_snapshot()).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].row, 0);
    }
}
