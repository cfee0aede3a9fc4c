use thiserror::Error;

/// Errors returned by the internal catalogue client.
#[derive(Debug, Error)]
pub enum CatalogueError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL cannot be parsed.
    #[error("invalid catalogue base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
