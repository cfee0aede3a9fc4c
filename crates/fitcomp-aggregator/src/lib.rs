pub mod aggregator;
pub mod error;
pub mod merge;
pub mod summary;

pub use aggregator::{Aggregator, CompareRequest, Comparison, ProviderStatus};
pub use error::AggregatorError;
pub use merge::{dedupe_offers, merge_products, sort_offers};
pub use summary::{summarize, synthetic_history};
