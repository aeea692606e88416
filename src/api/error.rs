//! Error types for the Jules API client.

use reqwest::StatusCode;

/// Failure of a single API request.
///
/// Requests are single-shot: nothing in this crate retries on any of these.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or the response could not be read.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("{status_text} - {body}")]
    Http {
        status: StatusCode,
        status_text: String,
        body: String,
    },

    /// A 2xx body that is not the JSON we expected.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Build an HTTP error from a status and the raw response body.
    pub fn http(status: StatusCode, body: impl Into<String>) -> Self {
        let status_text = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_str().to_string());
        ApiError::Http {
            status,
            status_text,
            body: body.into(),
        }
    }

    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Network(err) => err.status(),
            ApiError::Decode(_) => None,
        }
    }
}
