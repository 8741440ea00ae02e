//! Filter for inclusive release-year bounds.
//!
//! A record with no year cannot prove it satisfies a supplied bound, so
//! it is excluded whenever either bound is set.

use crate::candidate::ScoredCandidate;
use crate::traits::Filter;
use anyhow::Result;
use catalog::CatalogSnapshot;

/// Removes candidates outside the inclusive `[min, max]` year range.
///
/// With both bounds unset the filter passes everything through unchanged.
pub struct YearRangeFilter {
    min: Option<i64>,
    max: Option<i64>,
}

impl YearRangeFilter {
    pub fn new(min: Option<i64>, max: Option<i64>) -> Self {
        Self { min, max }
    }
}

impl Filter for YearRangeFilter {
    fn name(&self) -> &str {
        "YearRangeFilter"
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
                let year = snapshot.get(candidate.row).and_then(|record| record.year);
                match year {
                    Some(year) => {
                        self.min.is_none_or(|min| year >= min)
                            && self.max.is_none_or(|max| year <= max)
                    }
                    // Null year is excluded by any supplied bound
                    None => false,
                }
            })
            .collect())
    }
}
