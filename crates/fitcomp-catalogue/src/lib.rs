pub mod client;
pub mod error;
pub mod record;

pub use client::{CatalogueClient, Vendor};
pub use error::CatalogueError;
pub use record::{filter_by_query, normalize_record, records_from_payload};
