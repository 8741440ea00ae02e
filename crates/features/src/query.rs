//! Query vectors in a fitted feature space.
//!
//! Two of the three query modes build a fresh vector here; the by-id mode
//! needs no vector at all because the catalog row itself is the query
//! (the ranker reads the pairwise similarity row instead).
//!
//! Every block is derived from the fitted space, so a width mismatch with
//! the catalog matrix can only be an internal inconsistency; it fails
//! fast as [`FeatureError::DimensionMismatch`] rather than being patched
//! over.

use crate::encoder::{CATEGORICAL_FIELDS, FeatureSpace};
use crate::error::{FeatureError, Result};
use crate::sparse::SparseVector;
use std::collections::HashSet;

/// A structured preference query: explicit labels per categorical field
/// plus optional numeric bounds.
///
/// The bounds are not part of the feature vector; the ranker applies them
/// as post-filters.
#[derive(Debug, Clone, Default)]
pub struct PreferenceProfile {
    pub genres: Vec<String>,
    pub cast: Vec<String>,
    pub directors: Vec<String>,
    pub writers: Vec<String>,
    pub languages: Vec<String>,
    pub countries: Vec<String>,
    pub min_year: Option<i64>,
    pub max_year: Option<i64>,
    pub min_runtime: Option<i64>,
    pub max_runtime: Option<i64>,
}

impl PreferenceProfile {
    /// True if any categorical field carries at least one label
    pub fn has_labels(&self) -> bool {
        CATEGORICAL_FIELDS
            .iter()
            .any(|field| !(field.profile)(self).is_empty())
    }

    /// True if any numeric bound is set
    pub fn has_bounds(&self) -> bool {
        self.min_year.is_some()
            || self.max_year.is_some()
            || self.min_runtime.is_some()
            || self.max_runtime.is_some()
    }

    /// All labels across fields joined into one synthetic text document
    fn joined_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        for field in &CATEGORICAL_FIELDS {
            parts.extend((field.profile)(self).iter().map(String::as_str));
        }
        parts.join(" ")
    }
}

/// Build the query vector for a free-text keyword search.
///
/// The keyword string goes through the text vectorizer for the text
/// block; for each categorical block, classes whose lower-cased form
/// appears among the whitespace tokens of the lower-cased keyword string
/// are selected (zero row when nothing matches).
pub fn keyword_vector(space: &FeatureSpace, keywords: &str) -> Result<SparseVector> {
    let tokens: HashSet<String> = keywords
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();

    let mut parts: Vec<SparseVector> = space
        .binarizers()
        .iter()
        .map(|binarizer| binarizer.match_keyword_tokens(&tokens))
        .collect();
    parts.push(space.text().transform(keywords));

    aligned(space, SparseVector::concat(&parts))
}

/// Build the query vector for a structured preference profile.
///
/// Each categorical field transforms its labels through the fitted
/// binarizer (canonical-form matching, unknown labels ignored); the text
/// block is the TF-IDF transform of all labels joined into one document.
pub fn preference_vector(space: &FeatureSpace, profile: &PreferenceProfile) -> Result<SparseVector> {
    let mut parts: Vec<SparseVector> = CATEGORICAL_FIELDS
        .iter()
        .zip(space.binarizers())
        .map(|(field, binarizer)| binarizer.transform_canonical((field.profile)(profile)))
        .collect();
    parts.push(space.text().transform(&profile.joined_text()));

    aligned(space, SparseVector::concat(&parts))
}

fn aligned(space: &FeatureSpace, vector: SparseVector) -> Result<SparseVector> {
    if vector.dims() != space.column_count() {
        return Err(FeatureError::DimensionMismatch {
            expected: space.column_count(),
            found: vector.dims(),
        });
    }
    Ok(vector)
}
