//! Error types for the model API call.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by the upstream model API call.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UpstreamError {
    /// Connection, timeout or body decoding failure.
    #[error("Model API request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Model API error ({status}): {body}")]
    Status {
        /// HTTP status returned by the API.
        status: StatusCode,
        /// Response body, usually a JSON error object.
        body: String,
    },
}
