//! The search pipeline: internal catalogue first, SerpAPI as augmentation
//! or fallback, merged into one ranked product list.

use futures::future::join_all;

use fitcomp_catalogue::Vendor;
use fitcomp_core::CatalogueProduct;
use fitcomp_serp::product_from_result;

use crate::error::AggregatorError;
use crate::merge::merge_products;

use super::Aggregator;

impl Aggregator {
    /// Searches every enabled source for `query` and returns at most
    /// `limit` merged products.
    ///
    /// The internal catalogue vendors run concurrently and independently;
    /// SerpAPI results are appended when the catalogue produced something,
    /// or stand alone when it did not. Provider failures are recovered and
    /// logged.
    ///
    /// # Errors
    ///
    /// Returns [`AggregatorError::Unavailable`] only when the merged list
    /// is empty AND at least one provider actually errored — an empty
    /// result from healthy providers is an empty success.
    pub async fn search_products(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<CatalogueProduct>, AggregatorError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let mut errors: Vec<String> = Vec::new();
        let mut combined: Vec<CatalogueProduct> = Vec::new();

        if let Some(client) = self.catalogue() {
            let vendor_results = join_all(
                Vendor::ALL
                    .iter()
                    .map(|vendor| async move { (*vendor, client.search(*vendor, query).await) }),
            )
            .await;

            for (vendor, result) in vendor_results {
                match result {
                    Ok(products) => combined.extend(products),
                    Err(e) => {
                        tracing::warn!(vendor = vendor.label(), error = %e, "catalogue vendor failed");
                        errors.push(e.to_string());
                    }
                }
            }
        }

        if let Some(client) = self.serp() {
            // Over-fetch so merging still fills the page after dedup.
            let count = u32::try_from(limit.saturating_mul(2).min(100)).unwrap_or(100);
            match client.shopping_search(query, count).await {
                Ok(response) => {
                    combined.extend(
                        response
                            .shopping_results
                            .iter()
                            .enumerate()
                            .map(|(index, row)| product_from_result(row, index)),
                    );
                }
                Err(e) => {
                    tracing::warn!(error = %e, query, "serp search failed");
                    errors.push(e.to_string());
                }
            }
        }

        let mut merged = merge_products(combined);
        merged.truncate(limit);

        if merged.is_empty() {
            if let Some(message) = errors.into_iter().next() {
                return Err(AggregatorError::Unavailable { message });
            }
        }

        Ok(merged)
    }
}
