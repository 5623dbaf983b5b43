//! Errors returned by the client's `parse_*` and `build_*` methods.

/// `NotFound` is split out because callers routinely branch on "that todo
/// does not exist". Every other unexpected status is an `Http` error carrying
/// the server's `detail` message when it sent one.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server returned 404.
    #[error("todo not found: {detail}")]
    NotFound { detail: String },

    #[error("HTTP {status}: {detail}")]
    Http { status: u16, detail: String },

    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),
}
