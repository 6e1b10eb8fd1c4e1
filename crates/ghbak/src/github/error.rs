//! GitHub API error types.

use thiserror::Error;

/// Errors that can occur when listing repositories or gists.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// The server answered with a non-2xx status.
    #[error("GET {url} returned HTTP {status}")]
    Status { status: u16, url: String },

    #[error(transparent)]
    Transport(#[from] crate::http::HttpError),

    /// The response body was not the expected JSON array.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}
