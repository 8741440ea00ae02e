//! # Recommendation Engine
//!
//! This module coordinates one recommendation request end to end:
//! 1. Load a catalog snapshot through the store boundary
//! 2. Fit the feature space and encode the catalog matrix
//! 3. Resolve the query mode and build its query vector (or take the
//!    pairwise similarity row for by-id queries)
//! 4. Rank: stable descending sort, mode-specific post-filters, truncate
//! 5. Project the survivors onto the response schema
//!
//! Every taxonomy error is translated to the `{"error": ...}` shape in
//! [`RecommendationEngine::respond`]; nothing below this module decides
//! response shapes.

use std::time::Instant;

use tracing::{info, warn};

use catalog::{CatalogSnapshot, CatalogStore};
use features::{CsrMatrix, FeatureSpace, PreferenceProfile};
use ranking::filters::{
    PositiveScoreFilter, RuntimeRangeFilter, SelfExclusionFilter, YearRangeFilter,
};
use ranking::{FilterPipeline, project};

use crate::error::EngineError;
use crate::request::{QueryMode, RecommendationRequest};
use crate::response::Response;

/// User-visible messages for the non-error empty outcomes.
pub mod messages {
    pub const PROVIDE_SELECTOR: &str =
        "Provide movie_id, search_keywords or user_preferences to get recommendations.";
    pub const EMPTY_PREFERENCES: &str =
        "Enter at least one preference criterion to get recommendations.";
    pub const NO_KEYWORD_MATCHES: &str = "No recommendations found for these keywords.";
    pub const NO_PREFERENCE_MATCHES: &str = "No recommendations matched your preferences.";
    pub const NO_SIMILAR_MOVIES: &str = "No similar movies found for this id.";
}

/// A successful outcome: either a ranked list or a user-visible message.
enum Outcome {
    Ranked(Vec<ranking::Recommendation>),
    Message(String),
}

impl From<Outcome> for Response {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Ranked(items) => Response::recommendations(items),
            Outcome::Message(message) => Response::message(message),
        }
    }
}

/// Answers recommendation requests over one catalog store.
///
/// The engine is stateless between calls: each request loads a fresh
/// snapshot and fits a fresh feature space, so a changed catalog is
/// picked up on the next call without any cache invalidation protocol.
pub struct RecommendationEngine<S: CatalogStore> {
    store: S,
}

impl<S: CatalogStore> RecommendationEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Answer one request, translating every failure into the error
    /// response shape. This is the only place errors become responses.
    pub fn respond(&self, request: &RecommendationRequest) -> Response {
        match self.run(request) {
            Ok(outcome) => outcome.into(),
            Err(err) => {
                warn!(error = %err, "request failed");
                Response::error(err)
            }
        }
    }

    fn run(&self, request: &RecommendationRequest) -> Result<Outcome, EngineError> {
        let start = Instant::now();

        let snapshot = catalog::load(&self.store)?;
        let (space, matrix) = FeatureSpace::fit(&snapshot);
        info!(
            records = snapshot.len(),
            columns = space.column_count(),
            "fitted feature space"
        );

        let limit = request.num_recommendations;
        let outcome = match request.mode() {
            Some(QueryMode::Keywords(keywords)) => {
                self.by_keywords(&snapshot, &space, &matrix, &keywords, limit)?
            }
            Some(QueryMode::Preferences(profile)) => {
                self.by_preferences(&snapshot, &space, &matrix, &profile, limit)?
            }
            Some(QueryMode::MovieId(id)) => self.by_movie_id(&snapshot, &matrix, &id, limit)?,
            None => Outcome::Message(messages::PROVIDE_SELECTOR.to_string()),
        };

        info!(elapsed = ?start.elapsed(), "request answered");
        Ok(outcome)
    }

    /// Free-text keyword search over the whole feature space.
    fn by_keywords(
        &self,
        snapshot: &CatalogSnapshot,
        space: &FeatureSpace,
        matrix: &CsrMatrix,
        keywords: &str,
        limit: usize,
    ) -> Result<Outcome, EngineError> {
        info!(keywords, "ranking by keywords");
        let query = features::keyword_vector(space, keywords)?;
        let scored = ranking::score_catalog(&query, matrix)?;

        let pipeline = FilterPipeline::new().add_filter(PositiveScoreFilter);
        let top = ranking::rank(scored, snapshot, &pipeline, limit)?;

        if top.is_empty() {
            return Ok(Outcome::Message(messages::NO_KEYWORD_MATCHES.to_string()));
        }
        Ok(Outcome::Ranked(project(&top, snapshot)))
    }

    /// Structured preference profile with numeric post-filters.
    fn by_preferences(
        &self,
        snapshot: &CatalogSnapshot,
        space: &FeatureSpace,
        matrix: &CsrMatrix,
        profile: &PreferenceProfile,
        limit: usize,
    ) -> Result<Outcome, EngineError> {
        info!("ranking by preference profile");
        let query = features::preference_vector(space, profile)?;
        if query.is_zero() {
            // No supplied criterion matched anything the space knows about
            return Ok(Outcome::Message(messages::EMPTY_PREFERENCES.to_string()));
        }

        let scored = ranking::score_catalog(&query, matrix)?;
        let pipeline = FilterPipeline::new()
            .add_filter(PositiveScoreFilter)
            .add_filter(YearRangeFilter::new(profile.min_year, profile.max_year))
            .add_filter(RuntimeRangeFilter::new(
                profile.min_runtime,
                profile.max_runtime,
            ));
        let top = ranking::rank(scored, snapshot, &pipeline, limit)?;

        if top.is_empty() {
            return Ok(Outcome::Message(messages::NO_PREFERENCE_MATCHES.to_string()));
        }
        Ok(Outcome::Ranked(project(&top, snapshot)))
    }

    /// Similarity to an existing catalog record.
    fn by_movie_id(
        &self,
        snapshot: &CatalogSnapshot,
        matrix: &CsrMatrix,
        id: &str,
        limit: usize,
    ) -> Result<Outcome, EngineError> {
        info!(id, "ranking by movie id");
        if !is_well_formed_id(id) {
            return Err(EngineError::InvalidIdentifier(id.to_string()));
        }
        let row = snapshot
            .row_of(id)
            .ok_or_else(|| EngineError::NotFound(id.to_string()))?;

        let scored = ranking::pairwise_row(matrix, row);
        let pipeline = FilterPipeline::new()
            .add_filter(SelfExclusionFilter::new(row))
            .add_filter(PositiveScoreFilter);
        let top = ranking::rank(scored, snapshot, &pipeline, limit)?;

        if top.is_empty() {
            return Ok(Outcome::Message(messages::NO_SIMILAR_MOVIES.to_string()));
        }
        Ok(Outcome::Ranked(project(&top, snapshot)))
    }
}

/// Object ids are 24 hexadecimal characters.
fn is_well_formed_id(id: &str) -> bool {
    id.len() == 24 && id.bytes().all(|b| b.is_ascii_hexdigit())
}
