//! TF-IDF vectorization of plot text.
//!
//! Tokenizes plot text, builds a vocabulary with document frequencies over
//! the catalog, and produces L2-normalized sparse TF-IDF rows. Vocabulary
//! order is lexicographic so the column layout is deterministic for any
//! given catalog.

use crate::sparse::SparseVector;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::OnceLock;

/// Common English stop words removed before counting terms.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "cannot", "could", "did", "do", "does", "doing", "down", "during", "each",
    "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here",
    "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it",
    "its", "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now",
    "of", "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out",
    "over", "own", "same", "she", "should", "so", "some", "such", "than", "that", "the",
    "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this",
    "those", "through", "to", "too", "under", "until", "up", "very", "was", "we", "were",
    "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with", "would",
    "you", "your", "yours", "yourself", "yourselves",
];

fn stop_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

/// Vocabulary pruning parameters.
///
/// Defaults match the chosen policy: english stop words on, vocabulary
/// capped at 5000 terms, no document-frequency pruning.
#[derive(Debug, Clone)]
pub struct TfidfConfig {
    /// Remove english stop words before counting
    pub stop_words: bool,
    /// Keep only the most frequent terms across the corpus
    pub max_features: Option<usize>,
    /// Drop terms appearing in fewer than this many documents
    pub min_df: usize,
    /// Drop terms appearing in more than this fraction of documents
    pub max_df: f32,
}

impl Default for TfidfConfig {
    fn default() -> Self {
        Self {
            stop_words: true,
            max_features: Some(5000),
            min_df: 1,
            max_df: 1.0,
        }
    }
}

/// A fitted TF-IDF vectorizer: vocabulary plus per-term IDF weights.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    config: TfidfConfig,
    /// term → column index, columns in lexicographic term order
    vocabulary: HashMap<String, usize>,
    /// IDF weight per column
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Fit vocabulary and IDF weights over the document corpus.
    ///
    /// ## Algorithm
    /// 1. Tokenize every document, count document frequencies
    /// 2. Prune by min_df / max_df
    /// 3. If max_features is set, keep the terms with the highest corpus
    ///    counts (ties broken lexicographically)
    /// 4. Assign column indices in lexicographic term order
    /// 5. idf = ln((1 + n) / (1 + df)) + 1  (smoothed)
    pub fn fit<S: AsRef<str>>(config: &TfidfConfig, documents: &[S]) -> Self {
        let n_docs = documents.len();

        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        let mut corpus_freq: HashMap<String, usize> = HashMap::new();
        for document in documents {
            let tokens = tokenize(document.as_ref(), config.stop_words);
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term.to_string()).or_insert(0) += 1;
            }
            for token in &tokens {
                *corpus_freq.entry(token.clone()).or_insert(0) += 1;
            }
        }

        let max_doc_count = (config.max_df * n_docs as f32).floor() as usize;
        let mut kept: Vec<String> = doc_freq
            .iter()
            .filter(|(_, df)| **df >= config.min_df && **df <= max_doc_count.max(1))
            .map(|(term, _)| term.clone())
            .collect();

        if let Some(cap) = config.max_features {
            if kept.len() > cap {
                // Highest corpus counts first, lexicographic on ties
                kept.sort_by(|a, b| {
                    corpus_freq[b]
                        .cmp(&corpus_freq[a])
                        .then_with(|| a.cmp(b))
                });
                kept.truncate(cap);
            }
        }
        kept.sort();

        let vocabulary: HashMap<String, usize> = kept
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();

        let mut idf = vec![0.0; kept.len()];
        for (term, &idx) in &vocabulary {
            let df = doc_freq[term] as f32;
            idf[idx] = ((1.0 + n_docs as f32) / (1.0 + df)).ln() + 1.0;
        }

        Self {
            config: config.clone(),
            vocabulary,
            idf,
        }
    }

    /// Number of vocabulary columns
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Transform one document into a TF-IDF row in this vocabulary.
    ///
    /// Terms outside the fitted vocabulary are ignored; the row is
    /// L2-normalized. Works for an empty vocabulary (zero-width row).
    pub fn transform(&self, text: &str) -> SparseVector {
        if self.vocabulary.is_empty() {
            return SparseVector::zeros(0);
        }

        let mut counts: BTreeMap<usize, f32> = BTreeMap::new();
        for token in tokenize(text, self.config.stop_words) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let pairs: Vec<(usize, f32)> = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();

        let mut row = SparseVector::from_pairs(self.vocabulary.len(), pairs);
        row.normalize();
        row
    }
}

/// Lowercase alphanumeric tokens of at least two characters.
fn tokenize(text: &str, filter_stop_words: bool) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= 2)
        .filter(|token| !filter_stop_words || !stop_words().contains(token))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit(documents: &[&str]) -> TfidfVectorizer {
        TfidfVectorizer::fit(&TfidfConfig::default(), documents)
    }

    #[test]
    fn vocabulary_is_sorted_and_stop_words_removed() {
        let vectorizer = fit(&["the quick brown fox", "the lazy dog"]);

        let mut terms: Vec<(usize, String)> = vectorizer
            .vocabulary
            .iter()
            .map(|(t, i)| (*i, t.clone()))
            .collect();
        terms.sort();
        let ordered: Vec<&str> = terms.iter().map(|(_, t)| t.as_str()).collect();

        assert_eq!(ordered, vec!["brown", "dog", "fox", "lazy", "quick"]);
    }

    #[test]
    fn rarer_terms_weigh_more() {
        let vectorizer = fit(&["dog runs", "dog sleeps", "cat dreams"]);
        let row = vectorizer.transform("dog cat");

        let dog = vectorizer.vocabulary["dog"];
        let cat = vectorizer.vocabulary["cat"];
        let weights: HashMap<usize, f32> = row.iter().collect();

        assert!(weights[&cat] > weights[&dog]);
    }

    #[test]
    fn transform_ignores_unknown_terms() {
        let vectorizer = fit(&["space pirates"]);
        let row = vectorizer.transform("underwater basket weaving");
        assert!(row.is_zero());
    }

    #[test]
    fn transform_rows_are_unit_length() {
        let vectorizer = fit(&["a tale of love and war", "a tale of two cities"]);
        let row = vectorizer.transform("love war cities");
        assert!((row.l2_norm() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn max_features_keeps_most_frequent_terms() {
        let config = TfidfConfig {
            max_features: Some(2),
            ..Default::default()
        };
        let vectorizer = TfidfVectorizer::fit(
            &config,
            &["dragon dragon dragon castle", "dragon castle knight"],
        );

        assert_eq!(vectorizer.vocabulary_len(), 2);
        assert!(vectorizer.vocabulary.contains_key("dragon"));
        assert!(vectorizer.vocabulary.contains_key("castle"));
        assert!(!vectorizer.vocabulary.contains_key("knight"));
    }

    #[test]
    fn min_df_prunes_rare_terms() {
        let config = TfidfConfig {
            min_df: 2,
            ..Default::default()
        };
        let vectorizer =
            TfidfVectorizer::fit(&config, &["shark attack", "shark week", "quiet drama"]);

        assert!(vectorizer.vocabulary.contains_key("shark"));
        assert!(!vectorizer.vocabulary.contains_key("attack"));
    }

    #[test]
    fn empty_corpus_yields_zero_width_rows() {
        let vectorizer = fit(&[]);
        assert_eq!(vectorizer.vocabulary_len(), 0);
        assert_eq!(vectorizer.transform("anything").dims(), 0);
    }

    #[test]
    fn single_character_tokens_are_dropped() {
        let vectorizer = fit(&["x y z robot"]);
        assert_eq!(vectorizer.vocabulary_len(), 1);
        assert!(vectorizer.vocabulary.contains_key("robot"));
    }
}
