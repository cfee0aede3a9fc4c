use thiserror::Error;

/// Errors surfaced by the aggregation pipelines.
///
/// Provider-level failures never appear here — they are recovered locally
/// and logged. Only a total absence of usable data crosses the boundary.
#[derive(Debug, Error)]
pub enum AggregatorError {
    /// Every search source failed or returned nothing, and at least one
    /// actually errored. Carries the first upstream message for the 502
    /// body.
    #[error("search unavailable: {message}")]
    Unavailable { message: String },
}
