//! Provider fan-out orchestration.
//!
//! The aggregator owns at most one client per provider; enablement is
//! decided once at construction from the injected [`ProviderSettings`]
//! (credential present ⇒ client built). Request handling never consults
//! the process environment.

mod compare;
mod search;

pub use compare::{CompareRequest, Comparison};

use fitcomp_catalogue::CatalogueClient;
use fitcomp_core::ProviderSettings;
use fitcomp_scraper::ScraperClient;
use fitcomp_serp::SerpClient;

/// Multi-provider offer aggregator.
///
/// Every pipeline on this type isolates provider failures: a provider that
/// errors contributes zero offers and a `warn` log line, never an abort of
/// its siblings.
pub struct Aggregator {
    serp: Option<SerpClient>,
    scraper: Option<ScraperClient>,
    catalogue: Option<CatalogueClient>,
}

impl Aggregator {
    /// Builds the aggregator from explicit provider settings.
    ///
    /// A provider whose credential fails client construction (bad base URL,
    /// TLS setup failure) is logged and disabled rather than failing the
    /// whole aggregator — the remaining providers still serve.
    #[must_use]
    pub fn from_settings(settings: &ProviderSettings) -> Self {
        let serp = settings.serpapi_key.as_deref().and_then(|key| {
            SerpClient::new(key, settings.serp_timeout_secs, &settings.user_agent)
                .map_err(|e| tracing::warn!(error = %e, "serp client disabled"))
                .ok()
        });

        let scraper = settings.scraperapi_key.as_deref().and_then(|key| {
            ScraperClient::new(key, settings.scraper_timeout_secs, &settings.user_agent)
                .map_err(|e| tracing::warn!(error = %e, "scraper client disabled"))
                .ok()
        });

        let catalogue = settings.catalogue_url.as_deref().and_then(|url| {
            CatalogueClient::new(url, settings.catalogue_timeout_secs, &settings.user_agent)
                .map_err(|e| tracing::warn!(error = %e, "catalogue client disabled"))
                .ok()
        });

        Self::new(serp, scraper, catalogue)
    }

    /// Assembles an aggregator from pre-built clients (tests point these at
    /// wiremock servers).
    #[must_use]
    pub fn new(
        serp: Option<SerpClient>,
        scraper: Option<ScraperClient>,
        catalogue: Option<CatalogueClient>,
    ) -> Self {
        Self {
            serp,
            scraper,
            catalogue,
        }
    }

    /// True when at least one provider is enabled.
    #[must_use]
    pub fn has_providers(&self) -> bool {
        self.serp.is_some() || self.scraper.is_some() || self.catalogue.is_some()
    }

    /// Per-provider enablement, surfaced by the health endpoint.
    #[must_use]
    pub fn provider_status(&self) -> ProviderStatus {
        ProviderStatus {
            serp: self.serp.is_some(),
            scraper: self.scraper.is_some(),
            catalogue: self.catalogue.is_some(),
        }
    }

    pub(crate) fn serp(&self) -> Option<&SerpClient> {
        self.serp.as_ref()
    }

    pub(crate) fn scraper(&self) -> Option<&ScraperClient> {
        self.scraper.as_ref()
    }

    pub(crate) fn catalogue(&self) -> Option<&CatalogueClient> {
        self.catalogue.as_ref()
    }
}

/// Which providers this deployment has enabled.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct ProviderStatus {
    pub serp: bool,
    pub scraper: bool,
    pub catalogue: bool,
}
