//! Filter for inclusive runtime bounds, in minutes.
//!
//! Mirrors the year filter: a record with no runtime is excluded whenever
//! either bound is set.

use crate::candidate::ScoredCandidate;
use crate::traits::Filter;
use anyhow::Result;
use catalog::CatalogSnapshot;

/// Removes candidates outside the inclusive `[min, max]` runtime range.
pub struct RuntimeRangeFilter {
    min: Option<i64>,
    max: Option<i64>,
}

impl RuntimeRangeFilter {
    pub fn new(min: Option<i64>, max: Option<i64>) -> Self {
        Self { min, max }
    }
}

impl Filter for RuntimeRangeFilter {
    fn name(&self) -> &str {
        "RuntimeRangeFilter"
    }

    fn apply(
        &self,
        candidates: Vec<ScoredCandidate>,
        snapshot: &CatalogSnapshot,
    ) -> Result<Vec<ScoredCandidate>> {
        if self.min.is_none() && self.max.is_none() {
            return Ok(candidates);
        }

        Ok(candidates
            .into_iter()
            .filter(|candidate| {
                let runtime = snapshot
                    .get(candidate.row)
                    .and_then(|record| record.runtime);
                match runtime {
                    Some(runtime) => {
                        self.min.is_none_or(|min| runtime >= min)
                            && self.max.is_none_or(|max| runtime <= max)
                    }
                    None => false,
                }
            })
            .collect())
    }
}
