//! Core domain types for the movie catalog.
//!
//! A [`MovieRecord`] is one movie as the external store reports it, after
//! the fixed normalization policy has been applied: missing list fields
//! become empty lists, missing text fields become empty strings, and
//! numeric fields that are absent or non-numeric become `None`. The
//! normalization happens during deserialization so that no other component
//! ever observes a partially-missing record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Opaque, globally unique identifier for a movie.
///
/// In the backing store this is a database object id; the pipeline only
/// ever compares it for equality and echoes it back in responses.
pub type MovieId = String;

/// One movie record from the catalog store.
///
/// All fields the store may omit carry type-correct defaults, so a record
/// is total by the time it leaves deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Store identifier; accepts both a plain string and the extended-JSON
    /// `{"$oid": "..."}` form produced by collection exports.
    #[serde(alias = "_id", deserialize_with = "object_id", default)]
    pub id: MovieId,

    #[serde(default)]
    pub title: String,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub plot: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub fullplot: String,

    #[serde(default, deserialize_with = "list_or_empty")]
    pub genres: Vec<String>,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub cast: Vec<String>,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub directors: Vec<String>,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub writers: Vec<String>,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub languages: Vec<String>,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub countries: Vec<String>,

    /// Release year; non-numeric store values coerce to `None`
    #[serde(default, deserialize_with = "lenient_int")]
    pub year: Option<i64>,
    /// Runtime in minutes; non-numeric store values coerce to `None`
    #[serde(default, deserialize_with = "lenient_int")]
    pub runtime: Option<i64>,

    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub released: Option<String>,
    #[serde(default, deserialize_with = "map_or_none")]
    pub awards: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "map_or_none")]
    pub imdb: Option<Map<String, Value>>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub lastupdated: Option<String>,
}

/// Accept `"..."` or `{"$oid": "..."}` for the identifier field.
fn object_id<'de, D>(deserializer: D) -> Result<MovieId, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) => Ok(s),
        Value::Object(map) => match map.get("$oid") {
            Some(Value::String(s)) => Ok(s.clone()),
            _ => Err(serde::de::Error::custom("expected an object id")),
        },
        _ => Err(serde::de::Error::custom("expected an object id")),
    }
}

/// `null` and non-string values become the empty string.
fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        _ => String::new(),
    })
}

/// `null` becomes the empty list; list entries are kept verbatim.
fn list_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Vec<String>>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Coerce numeric store values to `i64`; everything else becomes `None`.
///
/// Collection exports are inconsistent here: years appear as integers,
/// floats, and occasionally free text such as `"2008è"`.
fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_int))
}

fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Keep only JSON objects; anything else becomes `None`.
fn map_or_none<'de, D>(deserializer: D) -> Result<Option<Map<String, Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Object(map)) => Some(map),
        _ => None,
    })
}

/// An immutable, ordered snapshot of the whole catalog.
///
/// Row position is the only coordinate shared with the derived feature
/// matrices, so the record order is fixed at construction and never
/// changes afterwards. The id index is built once alongside it.
#[derive(Debug)]
pub struct CatalogSnapshot {
    records: Vec<MovieRecord>,
    index: HashMap<MovieId, usize>,
}

impl CatalogSnapshot {
    /// Build a snapshot from the records a store returned.
    ///
    /// Duplicate identifiers keep their first occurrence in the id index;
    /// the duplicate rows themselves stay in the snapshot so row indices
    /// keep matching the store's ordering.
    pub fn new(records: Vec<MovieRecord>) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        for (row, record) in records.iter().enumerate() {
            if index.contains_key(&record.id) {
                tracing::warn!(id = %record.id, row, "duplicate movie id in snapshot");
            } else {
                index.insert(record.id.clone(), row);
            }
        }
        Self { records, index }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the record at a row index
    pub fn get(&self, row: usize) -> Option<&MovieRecord> {
        self.records.get(row)
    }

    /// Row index for a movie id, if the id is in this snapshot
    pub fn row_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// All records in row order
    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_normalize_to_defaults() {
        let record: MovieRecord =
            serde_json::from_str(r#"{"_id": "a", "title": "Bare"}"#).unwrap();

        assert_eq!(record.id, "a");
        assert_eq!(record.plot, "");
        assert_eq!(record.fullplot, "");
        assert!(record.genres.is_empty());
        assert!(record.cast.is_empty());
        assert_eq!(record.year, None);
        assert_eq!(record.runtime, None);
        assert!(record.awards.is_none());
    }

    #[test]
    fn null_list_becomes_empty_list() {
        let record: MovieRecord =
            serde_json::from_str(r#"{"_id": "a", "genres": null, "plot": null}"#).unwrap();
        assert!(record.genres.is_empty());
        assert_eq!(record.plot, "");
    }

    #[test]
    fn non_numeric_year_becomes_none() {
        let record: MovieRecord =
            serde_json::from_str(r#"{"_id": "a", "year": "2008è", "runtime": 120.0}"#).unwrap();
        assert_eq!(record.year, None);
        assert_eq!(record.runtime, Some(120));
    }

    #[test]
    fn extended_json_object_id_is_accepted() {
        let record: MovieRecord =
            serde_json::from_str(r#"{"_id": {"$oid": "573a1390f29313caabcd42e8"}}"#).unwrap();
        assert_eq!(record.id, "573a1390f29313caabcd42e8");
    }

    #[test]
    fn snapshot_indexes_ids_by_row() {
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

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.row_of("b"), Some(1));
        assert_eq!(snapshot.row_of("missing"), None);
    }

    #[test]
    fn duplicate_id_keeps_first_row() {
        let snapshot = CatalogSnapshot::new(vec![
            MovieRecord {
                id: "a".into(),
                title: "first".into(),
                ..Default::default()
            },
            MovieRecord {
                id: "a".into(),
                title: "second".into(),
                ..Default::default()
            },
        ]);

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.row_of("a"), Some(0));
    }
}
