//! Filter that keeps only genuinely similar candidates.
//!
//! A cosine score of zero means the query and the record share no feature
//! at all; recommending such a record would tie it to the query by list
//! position alone.

use crate::candidate::ScoredCandidate;
use crate::traits::Filter;
use anyhow::Result;
use catalog::CatalogSnapshot;

/// Removes candidates with similarity ≤ 0.
pub struct PositiveScoreFilter;

impl Filter for PositiveScoreFilter {
    fn name(&self) -> &str {
        "PositiveScoreFilter"
    }

    fn apply(
        &self,
        candidates: Vec<ScoredCandidate>,
        _snapshot: &CatalogSnapshot,
    ) -> Result<Vec<ScoredCandidate>> {
        Ok(candidates
            .into_iter()
            .filter(|candidate| candidate.score > 0.0)
            .collect())
    }
}
