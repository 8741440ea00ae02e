//! Filter that drops the query movie from its own recommendations.
//!
//! Only meaningful in by-id mode, where the query is a catalog row and
//! scores 1.0 against itself. Excluding by row index is exact; checking
//! for a leading 1.0 score would also drop genuine duplicates.

use crate::candidate::ScoredCandidate;
use crate::traits::Filter;
use anyhow::Result;
use catalog::CatalogSnapshot;

/// Removes the candidate whose row is the query row itself.
pub struct SelfExclusionFilter {
    row: usize,
}

impl SelfExclusionFilter {
    /// # Arguments
    /// * `row` - The snapshot row the query was taken from
    pub fn new(row: usize) -> Self {
        Self { row }
    }
}

impl Filter for SelfExclusionFilter {
    fn name(&self) -> &str {
        "SelfExclusionFilter"
    }

    fn apply(
        &self,
        candidates: Vec<ScoredCandidate>,
        _snapshot: &CatalogSnapshot,
    ) -> Result<Vec<ScoredCandidate>> {
        Ok(candidates
            .into_iter()
            .filter(|candidate| candidate.row != self.row)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::MovieRecord;

    #[test]
    fn query_row_is_removed_others_kept() {
        let snapshot = CatalogSnapshot::new(vec![MovieRecord::default()]);
        let candidates = vec![
            ScoredCandidate::new(1, 1.0),
            ScoredCandidate::new(0, 0.8),
            ScoredCandidate::new(2, 0.8),
        ];

        let filtered = SelfExclusionFilter::new(1).apply(candidates, &snapshot).unwrap();
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|c| c.row != 1));
    }
}
