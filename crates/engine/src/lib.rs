//! # Engine Crate
//!
//! This crate answers one recommendation request end to end: it owns the
//! request/response wire types, the error taxonomy and the orchestration
//! of catalog loading, feature fitting, ranking and projection.
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::JsonFileStore;
//! use engine::{RecommendationEngine, RecommendationRequest};
//!
//! let store = JsonFileStore::from_env()?;
//! let engine = RecommendationEngine::new(store);
//!
//! let request: RecommendationRequest =
//!     serde_json::from_str(r#"{"search_keywords": "space pirates"}"#)?;
//! let response = engine.respond(&request);
//! println!("{}", serde_json::to_string(&response)?);
//! ```

pub mod error;
pub mod recommender;
pub mod request;
pub mod response;

pub use recommender::{RecommendationEngine, messages};
pub use error::EngineError;
pub use request::{PreferenceInput, QueryMode, RecommendationRequest};
pub use response::Response;
