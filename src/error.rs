//! Error types for fetching and trend assembly.

use std::time::Duration;

/// Failure of a single backend request.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

/// Failure of a whole trend computation.
///
/// Per-period failures never show up here; they become gaps.
#[derive(Debug, thiserror::Error)]
pub enum TrendError {
    #[error("pet '{pet_id}' not found")]
    PetNotFound { pet_id: String },

    #[error("request for pet '{pet_id}' was superseded by a newer one")]
    Superseded { pet_id: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
