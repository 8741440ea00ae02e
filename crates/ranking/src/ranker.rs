//! Similarity scoring and top-N selection.
//!
//! Scoring and selection are pure over their inputs: the catalog matrix
//! is only read, so ranking the same query twice yields the same ordered
//! output.

use crate::candidate::ScoredCandidate;
use crate::filter_pipeline::FilterPipeline;
use anyhow::Result;
use catalog::CatalogSnapshot;
use features::{CsrMatrix, FeatureError, SparseVector, cosine_against_rows};

/// Score a query vector against every catalog row.
///
/// Fails with [`FeatureError::DimensionMismatch`] when the query was not
/// built in the catalog's feature space.
pub fn score_catalog(
    query: &SparseVector,
    matrix: &CsrMatrix,
) -> std::result::Result<Vec<ScoredCandidate>, FeatureError> {
    if query.dims() != matrix.cols() {
        return Err(FeatureError::DimensionMismatch {
            expected: matrix.cols(),
            found: query.dims(),
        });
    }

    Ok(cosine_against_rows(query, matrix)
        .into_iter()
        .enumerate()
        .map(|(row, score)| ScoredCandidate::new(row, score))
        .collect())
}

/// The pairwise similarity row for one catalog record.
///
/// Used by the by-id mode: the query is the catalog row itself, so this
/// is row `row` of the full pairwise cosine matrix, computed on demand
/// rather than materializing all n² entries.
pub fn pairwise_row(matrix: &CsrMatrix, row: usize) -> Vec<ScoredCandidate> {
    let query = matrix.row_vector(row);
    cosine_against_rows(&query, matrix)
        .into_iter()
        .enumerate()
        .map(|(row, score)| ScoredCandidate::new(row, score))
        .collect()
}

/// Order candidates, apply the post-filter pipeline, truncate to `limit`.
///
/// ## Algorithm
/// 1. Stable sort by score descending — catalog row order wins ties
/// 2. Apply the filter pipeline (positivity, self-exclusion, numeric
///    bounds, depending on the query mode)
/// 3. Truncate to the requested N *after* filtering
pub fn rank(
    candidates: Vec<ScoredCandidate>,
    snapshot: &CatalogSnapshot,
    pipeline: &FilterPipeline,
    limit: usize,
) -> Result<Vec<ScoredCandidate>> {
    let mut ordered = candidates;
    ordered.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut filtered = pipeline.apply(ordered, snapshot)?;
    filtered.truncate(limit);
    Ok(filtered)
}
