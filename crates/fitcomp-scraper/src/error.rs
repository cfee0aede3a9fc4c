use thiserror::Error;

/// Errors returned by the ScraperAPI client.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// ScraperAPI answered with a non-2xx status (bad key, blocked target,
    /// upstream 5xx passed through).
    #[error("unexpected HTTP status {status} for {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The target URL could not be composed into a valid request.
    #[error("invalid target URL \"{url}\": {reason}")]
    InvalidTargetUrl { url: String, reason: String },
}
