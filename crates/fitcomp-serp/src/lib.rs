pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::SerpClient;
pub use error::SerpError;
pub use normalize::{fallback_image, offer_from_result, product_from_result};
pub use types::{ShoppingResult, ShoppingSearchResponse};
