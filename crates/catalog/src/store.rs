//! Catalog store boundary.
//!
//! The pipeline only needs one capability from the outside world: read the
//! whole movie collection with the projected field set. [`CatalogStore`]
//! is that boundary; [`JsonFileStore`] reads a collection export from disk
//! and [`StaticStore`] serves in-memory records for tests and embedders.

use crate::error::{CatalogError, Result};
use crate::types::{CatalogSnapshot, MovieRecord};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// Environment variable naming the catalog export location.
pub const CATALOG_PATH_VAR: &str = "CATALOG_PATH";

/// Read-all-with-projection capability over the movie collection.
///
/// Implementations must acquire whatever handle they need for the duration
/// of `fetch_all` only and release it on every path; in practice that is
/// RAII, so a failed read cannot leak the handle.
pub trait CatalogStore {
    /// Human-readable store location, used in logs
    fn location(&self) -> String;

    /// Fetch every movie record the store holds
    fn fetch_all(&self) -> Result<Vec<MovieRecord>>;
}

/// Store backed by a JSON export of the movie collection.
///
/// Accepts either a single JSON array of records or newline-delimited JSON
/// (one record per line), which are the two shapes collection export tools
/// produce.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Build the store from the `CATALOG_PATH` environment variable.
    pub fn from_env() -> Result<Self> {
        match std::env::var(CATALOG_PATH_VAR) {
            Ok(path) if !path.trim().is_empty() => Ok(Self::new(path)),
            _ => Err(CatalogError::ConfigurationMissing {
                var: CATALOG_PATH_VAR.to_string(),
            }),
        }
    }

    fn read_contents(&self) -> Result<String> {
        // File handle lives only for this scope
        let mut file = File::open(&self.path).map_err(|source| CatalogError::Unreachable {
            path: self.path.display().to_string(),
            source,
        })?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|source| CatalogError::Unreachable {
                path: self.path.display().to_string(),
                source,
            })?;
        Ok(contents)
    }

    fn parse(&self, contents: &str) -> Result<Vec<MovieRecord>> {
        let malformed = |reason: String| CatalogError::Malformed {
            path: self.path.display().to_string(),
            reason,
        };

        let trimmed = contents.trim_start();
        if trimmed.starts_with('[') {
            serde_json::from_str(trimmed).map_err(|e| malformed(e.to_string()))
        } else {
            // Newline-delimited export: one record per non-empty line
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .enumerate()
                .map(|(idx, line)| {
                    serde_json::from_str(line)
                        .map_err(|e| malformed(format!("line {}: {}", idx + 1, e)))
                })
                .collect()
        }
    }
}

impl CatalogStore for JsonFileStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch_all(&self) -> Result<Vec<MovieRecord>> {
        let contents = self.read_contents()?;
        self.parse(&contents)
    }
}

/// In-memory store for tests and embedding callers.
pub struct StaticStore {
    records: Vec<MovieRecord>,
}

impl StaticStore {
    pub fn new(records: Vec<MovieRecord>) -> Self {
        Self { records }
    }
}

impl CatalogStore for StaticStore {
    fn location(&self) -> String {
        format!("static ({} records)", self.records.len())
    }

    fn fetch_all(&self) -> Result<Vec<MovieRecord>> {
        Ok(self.records.clone())
    }
}

/// Load one snapshot from a store.
///
/// This is the loader contract: an empty result set is an error, and the
/// normalization policy has already been applied record by record during
/// deserialization.
pub fn load(store: &dyn CatalogStore) -> Result<CatalogSnapshot> {
    let records = store.fetch_all()?;
    if records.is_empty() {
        return Err(CatalogError::Empty);
    }
    tracing::info!(
        records = records.len(),
        store = %store.location(),
        "loaded catalog snapshot"
    );
    Ok(CatalogSnapshot::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("catalog-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_json_array_export() {
        let path = write_temp(
            "array.json",
            r#"[{"_id": "a", "title": "One"}, {"_id": "b", "title": "Two"}]"#,
        );
        let store = JsonFileStore::new(&path);

        let snapshot = load(&store).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get(0).unwrap().title, "One");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn loads_newline_delimited_export() {
        let path = write_temp(
            "lines.ndjson",
            "{\"_id\": \"a\", \"title\": \"One\"}\n\n{\"_id\": \"b\", \"title\": \"Two\"}\n",
        );
        let store = JsonFileStore::new(&path);

        let snapshot = load(&store).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.row_of("b"), Some(1));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn empty_result_set_is_an_error() {
        let path = write_temp("empty.json", "[]");
        let store = JsonFileStore::new(&path);

        let err = load(&store).unwrap_err();
        assert!(matches!(err, CatalogError::Empty));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn unreachable_store_is_an_error() {
        let store = JsonFileStore::new("/nonexistent/catalog.json");
        let err = load(&store).unwrap_err();
        assert!(matches!(err, CatalogError::Unreachable { .. }));
    }

    #[test]
    fn missing_configuration_is_reported() {
        // The variable is not set in the test environment
        unsafe { std::env::remove_var(CATALOG_PATH_VAR) };
        let err = JsonFileStore::from_env().unwrap_err();
        assert!(matches!(err, CatalogError::ConfigurationMissing { .. }));
    }

    #[test]
    fn static_store_round_trips_records() {
        let store = StaticStore::new(vec![MovieRecord {
            id: "a".into(),
            title: "Only".into(),
            ..Default::default()
        }]);
        let snapshot = load(&store).unwrap();
        assert_eq!(snapshot.len(), 1);
    }
}
