//! Feature space fitting and catalog encoding.
//!
//! One [`FeatureSpace::fit`] call turns a catalog snapshot into the fitted
//! encoders plus the catalog feature matrix. The column layout is a fixed
//! concatenation of seven blocks: one multi-hot block per categorical
//! field, in the order of [`CATEGORICAL_FIELDS`], followed by the TF-IDF
//! text block. Query vectors must be built against the same space so the
//! layouts line up column for column.

use crate::binarizer::MultiLabelBinarizer;
use crate::query::PreferenceProfile;
use crate::sparse::{CsrMatrix, SparseVector};
use crate::text::{TfidfConfig, TfidfVectorizer};
use catalog::{CatalogSnapshot, MovieRecord};
use rayon::prelude::*;

/// One categorical field of the movie record, with accessors for both
/// sides of the pipeline: catalog records at fit time and preference
/// profiles at query time.
pub struct FieldSpec {
    pub name: &'static str,
    pub record: fn(&MovieRecord) -> &[String],
    pub profile: fn(&PreferenceProfile) -> &[String],
}

fn record_genres(m: &MovieRecord) -> &[String] {
    &m.genres
}
fn record_cast(m: &MovieRecord) -> &[String] {
    &m.cast
}
fn record_directors(m: &MovieRecord) -> &[String] {
    &m.directors
}
fn record_writers(m: &MovieRecord) -> &[String] {
    &m.writers
}
fn record_languages(m: &MovieRecord) -> &[String] {
    &m.languages
}
fn record_countries(m: &MovieRecord) -> &[String] {
    &m.countries
}

fn profile_genres(p: &PreferenceProfile) -> &[String] {
    &p.genres
}
fn profile_cast(p: &PreferenceProfile) -> &[String] {
    &p.cast
}
fn profile_directors(p: &PreferenceProfile) -> &[String] {
    &p.directors
}
fn profile_writers(p: &PreferenceProfile) -> &[String] {
    &p.writers
}
fn profile_languages(p: &PreferenceProfile) -> &[String] {
    &p.languages
}
fn profile_countries(p: &PreferenceProfile) -> &[String] {
    &p.countries
}

/// The fixed block order of the feature space. Every encoder and every
/// query builder iterates this table; nothing branches per field name.
pub const CATEGORICAL_FIELDS: [FieldSpec; 6] = [
    FieldSpec {
        name: "genres",
        record: record_genres,
        profile: profile_genres,
    },
    FieldSpec {
        name: "cast",
        record: record_cast,
        profile: profile_cast,
    },
    FieldSpec {
        name: "directors",
        record: record_directors,
        profile: profile_directors,
    },
    FieldSpec {
        name: "writers",
        record: record_writers,
        profile: profile_writers,
    },
    FieldSpec {
        name: "languages",
        record: record_languages,
        profile: profile_languages,
    },
    FieldSpec {
        name: "countries",
        record: record_countries,
        profile: profile_countries,
    },
];

/// Position of one block in the concatenated column layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub name: &'static str,
    pub offset: usize,
    pub width: usize,
}

/// The fitted encoders and their column layout.
///
/// Immutable once fitted. A long-lived process may share it read-only
/// across calls as long as the underlying catalog has not changed;
/// otherwise it refits from scratch.
pub struct FeatureSpace {
    binarizers: Vec<MultiLabelBinarizer>,
    text: TfidfVectorizer,
    blocks: Vec<Block>,
    columns: usize,
}

impl FeatureSpace {
    /// Fit with the default text policy (english stop words, vocabulary
    /// capped at 5000 terms).
    pub fn fit(snapshot: &CatalogSnapshot) -> (Self, CsrMatrix) {
        Self::fit_with(&TfidfConfig::default(), snapshot)
    }

    /// Fit encoders over the snapshot and encode the whole catalog.
    ///
    /// ## Algorithm
    /// 1. Fit one binarizer per categorical field over all records
    /// 2. Fit the TF-IDF vectorizer over plot + fullplot per record
    /// 3. Lay the seven blocks out in fixed order
    /// 4. Encode every record into one sparse row (in parallel) and stack
    ///    the rows into the catalog matrix
    pub fn fit_with(config: &TfidfConfig, snapshot: &CatalogSnapshot) -> (Self, CsrMatrix) {
        let records = snapshot.records();

        let binarizers: Vec<MultiLabelBinarizer> = CATEGORICAL_FIELDS
            .iter()
            .map(|field| MultiLabelBinarizer::fit(records.iter().map(|r| (field.record)(r))))
            .collect();

        let corpus: Vec<String> = records.iter().map(text_document).collect();
        let text = TfidfVectorizer::fit(config, &corpus);

        let mut blocks = Vec::with_capacity(CATEGORICAL_FIELDS.len() + 1);
        let mut offset = 0;
        for (field, binarizer) in CATEGORICAL_FIELDS.iter().zip(&binarizers) {
            blocks.push(Block {
                name: field.name,
                offset,
                width: binarizer.len(),
            });
            offset += binarizer.len();
        }
        blocks.push(Block {
            name: "text",
            offset,
            width: text.vocabulary_len(),
        });
        let columns = offset + text.vocabulary_len();

        let space = Self {
            binarizers,
            text,
            blocks,
            columns,
        };

        for block in &space.blocks {
            tracing::debug!(block = block.name, width = block.width, "fitted feature block");
        }

        let rows: Vec<SparseVector> = records
            .par_iter()
            .map(|record| space.encode_record(record))
            .collect();
        let matrix = CsrMatrix::from_rows(columns, &rows);

        tracing::info!(
            rows = matrix.rows(),
            columns = matrix.cols(),
            nnz = matrix.nnz(),
            "encoded catalog feature matrix"
        );

        (space, matrix)
    }

    /// Encode one record into a full-width sparse row.
    fn encode_record(&self, record: &MovieRecord) -> SparseVector {
        let mut parts: Vec<SparseVector> = CATEGORICAL_FIELDS
            .iter()
            .zip(&self.binarizers)
            .map(|(field, binarizer)| binarizer.transform((field.record)(record)))
            .collect();
        parts.push(self.text.transform(&text_document(record)));
        SparseVector::concat(&parts)
    }

    /// Total column count of the concatenated layout
    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// The seven blocks in layout order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub(crate) fn binarizers(&self) -> &[MultiLabelBinarizer] {
        &self.binarizers
    }

    pub(crate) fn text(&self) -> &TfidfVectorizer {
        &self.text
    }
}

/// The text document for one record: plot and fullplot concatenated.
pub(crate) fn text_document(record: &MovieRecord) -> String {
    if record.fullplot.is_empty() {
        record.plot.clone()
    } else if record.plot.is_empty() {
        record.fullplot.clone()
    } else {
        format!("{} {}", record.plot, record.fullplot)
    }
}
