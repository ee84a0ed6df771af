use std::path::PathBuf;

/// Failures from any data source. The loaders catch every variant and move
/// on to the next tier, so none of these reach the user.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The HTTP request itself failed (network, DNS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The source answered successfully but had nothing in it.
    #[error("Source returned no records")]
    Empty,

    #[error("Invalid configuration: {0}")]
    Config(String),
}
