//! Multi-hot encoding of categorical label lists.
//!
//! One binarizer is fitted per categorical field (genres, cast, ...). Its
//! vocabulary is the full set of distinct labels observed in the snapshot,
//! with columns in lexicographic label order so the layout is
//! deterministic and reusable for query vectors.

use crate::sparse::SparseVector;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Canonical form used for preference matching: trimmed, with internal
/// whitespace removed (`" Tom  Hanks "` → `"TomHanks"`). Case is kept.
pub fn canonicalize(label: &str) -> String {
    label.split_whitespace().collect()
}

/// A fitted multi-label binarizer for one categorical field.
#[derive(Debug, Clone)]
pub struct MultiLabelBinarizer {
    /// Distinct observed labels, lexicographically sorted; column i is
    /// classes[i]
    classes: Vec<String>,
    /// label → column, exact observed form
    index: HashMap<String, usize>,
    /// canonical form → column, first (lowest) column wins on collisions
    canonical: HashMap<String, usize>,
}

impl MultiLabelBinarizer {
    /// Fit the label universe over all rows of one field.
    ///
    /// An empty universe is valid and yields a zero-column block.
    pub fn fit<'a>(rows: impl Iterator<Item = &'a [String]>) -> Self {
        let mut universe: BTreeSet<&str> = BTreeSet::new();
        for row in rows {
            for label in row {
                universe.insert(label.as_str());
            }
        }

        let classes: Vec<String> = universe.into_iter().map(str::to_string).collect();
        let index: HashMap<String, usize> = classes
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i))
            .collect();

        let mut canonical: HashMap<String, usize> = HashMap::with_capacity(classes.len());
        for (i, label) in classes.iter().enumerate() {
            canonical.entry(canonicalize(label)).or_insert(i);
        }

        Self {
            classes,
            index,
            canonical,
        }
    }

    /// Number of columns in this block
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Sorted label universe
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Multi-hot row for exact observed labels; unknown labels are ignored.
    pub fn transform(&self, labels: &[String]) -> SparseVector {
        let columns: BTreeSet<usize> = labels
            .iter()
            .filter_map(|label| self.index.get(label).copied())
            .collect();
        self.row_from(columns)
    }

    /// Multi-hot row for free-form preference labels.
    ///
    /// Both sides are compared in canonical form, so `"Tom Hanks"`,
    /// `" Tom Hanks "` and `"TomHanks"` all select the same column.
    /// Unknown labels are silently ignored.
    pub fn transform_canonical(&self, labels: &[String]) -> SparseVector {
        let columns: BTreeSet<usize> = labels
            .iter()
            .filter_map(|label| self.canonical.get(&canonicalize(label)).copied())
            .collect();
        self.row_from(columns)
    }

    /// Multi-hot row for keyword tokens: selects every class whose
    /// lower-cased form appears among the tokens.
    pub fn match_keyword_tokens(&self, tokens: &HashSet<String>) -> SparseVector {
        let columns: BTreeSet<usize> = self
            .classes
            .iter()
            .enumerate()
            .filter(|(_, class)| tokens.contains(&class.to_lowercase()))
            .map(|(i, _)| i)
            .collect();
        self.row_from(columns)
    }

    fn row_from(&self, columns: BTreeSet<usize>) -> SparseVector {
        SparseVector::from_pairs(
            self.classes.len(),
            columns.into_iter().map(|col| (col, 1.0)).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn fit(data: &[&[&str]]) -> MultiLabelBinarizer {
        let owned = rows(data);
        MultiLabelBinarizer::fit(owned.iter().map(Vec::as_slice))
    }

    #[test]
    fn vocabulary_is_sorted_and_distinct() {
        let binarizer = fit(&[&["Drama", "Action"], &["Action", "Comedy"]]);
        assert_eq!(binarizer.classes(), ["Action", "Comedy", "Drama"]);
    }

    #[test]
    fn transform_sets_one_column_per_known_label() {
        let binarizer = fit(&[&["Drama", "Action"], &["Comedy"]]);
        let row = binarizer.transform(&["Drama".into(), "Western".into()]);

        assert_eq!(row.dims(), 3);
        assert_eq!(row.iter().collect::<Vec<_>>(), vec![(2, 1.0)]);
    }

    #[test]
    fn duplicate_labels_still_produce_binary_row() {
        let binarizer = fit(&[&["Action"]]);
        let row = binarizer.transform(&["Action".into(), "Action".into()]);
        assert_eq!(row.iter().collect::<Vec<_>>(), vec![(0, 1.0)]);
    }

    #[test]
    fn canonical_matching_ignores_spacing() {
        let binarizer = fit(&[&["Tom Hanks", "Meg Ryan"]]);

        let row = binarizer.transform_canonical(&[" Tom  Hanks ".into()]);
        assert_eq!(row.nnz(), 1);

        let row = binarizer.transform_canonical(&["TomHanks".into()]);
        assert_eq!(row.nnz(), 1);

        // Case still matters
        let row = binarizer.transform_canonical(&["tomhanks".into()]);
        assert!(row.is_zero());
    }

    #[test]
    fn keyword_tokens_match_lowercased_classes() {
        let binarizer = fit(&[&["Drama", "Action"]]);
        let tokens: HashSet<String> = ["drama".to_string(), "thriller".to_string()]
            .into_iter()
            .collect();

        let row = binarizer.match_keyword_tokens(&tokens);
        assert_eq!(row.iter().collect::<Vec<_>>(), vec![(1, 1.0)]);
    }

    #[test]
    fn empty_universe_is_a_zero_column_block() {
        let binarizer = fit(&[&[], &[]]);
        assert!(binarizer.is_empty());
        assert_eq!(binarizer.transform(&["Anything".into()]).dims(), 0);
    }
}
