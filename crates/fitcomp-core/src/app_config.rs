use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub user_agent: String,
    pub serpapi_key: Option<String>,
    pub scraperapi_key: Option<String>,
    pub catalogue_url: Option<String>,
    pub serp_timeout_secs: u64,
    pub scraper_timeout_secs: u64,
    pub catalogue_timeout_secs: u64,
}

impl AppConfig {
    /// Resolves provider enablement once, at startup. A provider is enabled
    /// iff its credential (or base URL, for the internal catalogue) is
    /// configured; request handling never consults the environment again.
    #[must_use]
    pub fn provider_settings(&self) -> ProviderSettings {
        ProviderSettings {
            serpapi_key: self.serpapi_key.clone(),
            scraperapi_key: self.scraperapi_key.clone(),
            catalogue_url: self.catalogue_url.clone(),
            serp_timeout_secs: self.serp_timeout_secs,
            scraper_timeout_secs: self.scraper_timeout_secs,
            catalogue_timeout_secs: self.catalogue_timeout_secs,
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Explicit provider configuration injected into the aggregator.
///
/// `None` for a credential means that provider is disabled and silently
/// contributes zero offers.
#[derive(Clone, Default)]
pub struct ProviderSettings {
    pub serpapi_key: Option<String>,
    pub scraperapi_key: Option<String>,
    pub catalogue_url: Option<String>,
    pub serp_timeout_secs: u64,
    pub scraper_timeout_secs: u64,
    pub catalogue_timeout_secs: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("user_agent", &self.user_agent)
            .field("serpapi_key", &self.serpapi_key.as_ref().map(|_| "[redacted]"))
            .field(
                "scraperapi_key",
                &self.scraperapi_key.as_ref().map(|_| "[redacted]"),
            )
            .field("catalogue_url", &self.catalogue_url)
            .field("serp_timeout_secs", &self.serp_timeout_secs)
            .field("scraper_timeout_secs", &self.scraper_timeout_secs)
            .field("catalogue_timeout_secs", &self.catalogue_timeout_secs)
            .finish()
    }
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("serpapi_key", &self.serpapi_key.as_ref().map(|_| "[redacted]"))
            .field(
                "scraperapi_key",
                &self.scraperapi_key.as_ref().map(|_| "[redacted]"),
            )
            .field("catalogue_url", &self.catalogue_url)
            .field("serp_timeout_secs", &self.serp_timeout_secs)
            .field("scraper_timeout_secs", &self.scraper_timeout_secs)
            .field("catalogue_timeout_secs", &self.catalogue_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
