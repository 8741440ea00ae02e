//! Projection of ranked rows onto the fixed output schema.
//!
//! Every output field is always present with a type-correct default, so a
//! sparse source record can never produce a malformed response item. The
//! similarity score is rounded to 4 decimal places here, at the edge.

use crate::candidate::ScoredCandidate;
use catalog::CatalogSnapshot;
use serde::Serialize;
use serde_json::{Map, Value};

/// One recommendation item in the response, full-catalog schema.
///
/// Field order matches the documented response shape.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub similarity: f64,
    pub genres: Vec<String>,
    pub plot: String,
    pub fullplot: String,
    pub cast: Vec<String>,
    pub directors: Vec<String>,
    pub writers: Vec<String>,
    pub poster: String,
    pub languages: Vec<String>,
    pub released: String,
    pub awards: Map<String, Value>,
    pub lastupdated: String,
    pub year: Option<i64>,
    pub imdb: Map<String, Value>,
    pub countries: Vec<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub runtime: Option<i64>,
}

/// Round a similarity score to 4 decimal places.
pub fn round_similarity(score: f32) -> f64 {
    (score as f64 * 10_000.0).round() / 10_000.0
}

/// Map ranked candidates back to full response items, in rank order.
///
/// Rows that fell out of the snapshot would be an internal inconsistency;
/// they are skipped rather than fabricated.
pub fn project(candidates: &[ScoredCandidate], snapshot: &CatalogSnapshot) -> Vec<Recommendation> {
    candidates
        .iter()
        .filter_map(|candidate| {
            snapshot.get(candidate.row).map(|record| Recommendation {
                id: record.id.clone(),
                title: record.title.clone(),
                similarity: round_similarity(candidate.score),
                genres: record.genres.clone(),
                plot: record.plot.clone(),
                fullplot: record.fullplot.clone(),
                cast: record.cast.clone(),
                directors: record.directors.clone(),
                writers: record.writers.clone(),
                poster: record.poster.clone().unwrap_or_default(),
                languages: record.languages.clone(),
                released: record.released.clone().unwrap_or_default(),
                awards: record.awards.clone().unwrap_or_default(),
                lastupdated: record.lastupdated.clone().unwrap_or_default(),
                year: record.year,
                imdb: record.imdb.clone().unwrap_or_default(),
                countries: record.countries.clone(),
                kind: record.kind.clone().unwrap_or_default(),
                runtime: record.runtime,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::MovieRecord;

    #[test]
    fn sparse_record_projects_with_total_defaults() {
        let snapshot = CatalogSnapshot::new(vec![MovieRecord {
            id: "a".into(),
            title: "Bare".into(),
            ..Default::default()
        }]);

        let items = project(&[ScoredCandidate::new(0, 0.5)], &snapshot);
        let json = serde_json::to_value(&items[0]).unwrap();

        assert_eq!(json["id"], "a");
        assert_eq!(json["poster"], "");
        assert_eq!(json["awards"], serde_json::json!({}));
        assert_eq!(json["genres"], serde_json::json!([]));
        assert_eq!(json["year"], Value::Null);
        assert_eq!(json["runtime"], Value::Null);
        assert_eq!(json["type"], "");
    }

    #[test]
    fn similarity_is_rounded_to_four_decimals() {
        assert_eq!(round_similarity(0.123_456_79), 0.1235);
        assert_eq!(round_similarity(1.0), 1.0);
        assert_eq!(round_similarity(0.0), 0.0);
    }

    #[test]
    fn projection_preserves_rank_order() {
        let snapshot = CatalogSnapshot::new(vec![
            MovieRecord {
                id: "a".into(),
                ..Default::default()
            },
            MovieRecord {
                id: "b".into(),
                ..Default::default()
            },
        ]);

        let items = project(
            &[ScoredCandidate::new(1, 0.9), ScoredCandidate::new(0, 0.3)],
            &snapshot,
        );
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
