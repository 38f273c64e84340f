//! # error
//!
//! Errors raised while querying the OpenFLIS API.
//!
//! None of these are fatal to the interactive loop. They are reported and the
//! user is prompted again.

use thiserror::Error;

/// Name of the environment variable holding the API key.
pub const API_KEY_VAR: &str = "OPENFLIS_API_KEY";

#[derive(Debug, Error)]
pub enum QueryError {
    /// No API key was configured. Raised before any request is made.
    #[error("OPENFLIS_API_KEY environment variable not set")]
    MissingApiKey,

    #[error("invalid base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Transport failure. The URL is stripped since it carries the key.
    #[error("{0}")]
    Request(reqwest::Error),

    #[error("HTTP status {0}")]
    Status(reqwest::StatusCode),
}

impl From<reqwest::Error> for QueryError {
    fn from(e: reqwest::Error) -> Self {
        QueryError::Request(e.without_url())
    }
}
