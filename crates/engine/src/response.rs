//! The three response shapes returned to the calling process.

use ranking::Recommendation;
use serde::Serialize;

/// Exactly one of these is serialized per request.
///
/// The untagged representation produces the documented wire shapes:
/// `{"recommendations": [...]}`, `{"message": "..."}`, `{"error": "..."}`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Response {
    Recommendations { recommendations: Vec<Recommendation> },
    Message { message: String },
    Error { error: String },
}

impl Response {
    pub fn recommendations(recommendations: Vec<Recommendation>) -> Self {
        Self::Recommendations { recommendations }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }

    pub fn error(error: impl std::fmt::Display) -> Self {
        Self::Error {
            error: error.to_string(),
        }
    }
}
