pub mod app_config;
pub mod config;
pub mod offer;
pub mod price;

pub use app_config::{AppConfig, Environment, ProviderSettings};
pub use config::{load_app_config, load_app_config_from_env};
pub use offer::{CatalogueProduct, HistoryPoint, Offer, PriceSummary};
pub use price::{hostname_of, merchant_logo_url, parse_price, parse_price_value, round2};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
