//! The request shape supplied by the calling process.
//!
//! One serialized-JSON object with exactly one primary query selector.
//! When a request carries more than one selector, the fixed priority is
//! keyword search > preference profile > movie id, so a request is never
//! ambiguous.

use features::PreferenceProfile;
use serde::{Deserialize, Deserializer};

fn default_num_recommendations() -> usize {
    10
}

/// A single recommendation request.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub movie_id: Option<String>,

    #[serde(default)]
    pub search_keywords: Option<String>,

    #[serde(default)]
    pub user_preferences: Option<PreferenceInput>,

    #[serde(default = "default_num_recommendations")]
    pub num_recommendations: usize,
}

/// The resolved query mode for one request.
#[derive(Debug, Clone)]
pub enum QueryMode {
    Keywords(String),
    Preferences(PreferenceProfile),
    MovieId(String),
}

impl RecommendationRequest {
    /// Resolve which query mode this request selects, if any.
    ///
    /// Blank selectors count as absent: an empty keyword string, an empty
    /// preferences object or a whitespace id fall through to the next
    /// selector in priority order.
    pub fn mode(&self) -> Option<QueryMode> {
        if let Some(keywords) = self.search_keywords.as_deref() {
            if !keywords.trim().is_empty() {
                return Some(QueryMode::Keywords(keywords.to_string()));
            }
        }
        if let Some(preferences) = &self.user_preferences {
            if !preferences.is_blank() {
                return Some(QueryMode::Preferences(preferences.clone().into_profile()));
            }
        }
        if let Some(id) = self.movie_id.as_deref() {
            if !id.trim().is_empty() {
                return Some(QueryMode::MovieId(id.trim().to_string()));
            }
        }
        None
    }
}

/// Preference fields as the wire accepts them: each categorical field may
/// be a JSON list of labels or one comma-separated string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreferenceInput {
    #[serde(default, deserialize_with = "labels")]
    pub genres: Vec<String>,
    #[serde(default, deserialize_with = "labels")]
    pub cast: Vec<String>,
    #[serde(default, deserialize_with = "labels")]
    pub directors: Vec<String>,
    #[serde(default, deserialize_with = "labels")]
    pub writers: Vec<String>,
    #[serde(default, deserialize_with = "labels")]
    pub languages: Vec<String>,
    #[serde(default, deserialize_with = "labels")]
    pub countries: Vec<String>,
    #[serde(default)]
    pub min_year: Option<i64>,
    #[serde(default)]
    pub max_year: Option<i64>,
    #[serde(default)]
    pub min_runtime: Option<i64>,
    #[serde(default)]
    pub max_runtime: Option<i64>,
}

impl PreferenceInput {
    /// True when the object carries nothing at all — no labels and no
    /// bounds. A blank preferences object does not select preference
    /// mode; it falls through like an absent field.
    pub fn is_blank(&self) -> bool {
        self.genres.is_empty()
            && self.cast.is_empty()
            && self.directors.is_empty()
            && self.writers.is_empty()
            && self.languages.is_empty()
            && self.countries.is_empty()
            && self.min_year.is_none()
            && self.max_year.is_none()
            && self.min_runtime.is_none()
            && self.max_runtime.is_none()
    }

    pub fn into_profile(self) -> PreferenceProfile {
        PreferenceProfile {
            genres: self.genres,
            cast: self.cast,
            directors: self.directors,
            writers: self.writers,
            languages: self.languages,
            countries: self.countries,
            min_year: self.min_year,
            max_year: self.max_year,
            min_runtime: self.min_runtime,
            max_runtime: self.max_runtime,
        }
    }
}

/// Accept a JSON list of label strings or one comma-separated string;
/// entries are trimmed and empties dropped either way.
fn labels<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Csv(String),
    }

    let raw = Option::<Raw>::deserialize(deserializer)?;
    let items = match raw {
        None => Vec::new(),
        Some(Raw::List(items)) => items,
        Some(Raw::Csv(csv)) => csv.split(',').map(str::to_string).collect(),
    };

    Ok(items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect())
}
