//! Flattening of per-platform crawl results into one product collection.

use serde::Serialize;

use pricelens_core::ProductRecord;

use crate::types::{PlatformCrawlResult, STATUS_SUCCESS};

/// A platform that did not return usable results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformFailure {
    pub platform: String,
    pub reason: String,
}

/// Products from every successful platform of one crawl.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CrawlOutcome {
    /// Every product, tagged with the platform key it was reported under.
    pub products: Vec<ProductRecord>,
    /// Successful platforms in the order the backend reported them.
    pub platforms: Vec<String>,
    pub successful_platforms: usize,
    /// Sum of the `total_products` counts the backend reported.
    pub total_reported: u64,
    pub failures: Vec<PlatformFailure>,
}

/// Flattens the `results` object of a crawl response.
///
/// Only entries whose `status` is `"success"` contribute products. Entries
/// that do not have the expected shape are recorded as failures instead of
/// failing the whole crawl.
#[must_use]
pub fn flatten_crawl_results(
    results: serde_json::Map<String, serde_json::Value>,
) -> CrawlOutcome {
    let mut outcome = CrawlOutcome::default();

    for (platform, value) in results {
        let entry: PlatformCrawlResult = match serde_json::from_value(value) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(platform = %platform, error = %e, "malformed platform result");
                outcome.failures.push(PlatformFailure {
                    platform,
                    reason: format!("malformed result: {e}"),
                });
                continue;
            }
        };

        if entry.status != STATUS_SUCCESS {
            outcome.failures.push(PlatformFailure {
                reason: entry.error.unwrap_or_else(|| format!("status {}", entry.status)),
                platform,
            });
            continue;
        }

        outcome.successful_platforms += 1;
        outcome.total_reported += entry.total_products.unwrap_or(0);
        outcome
            .products
            .extend(entry.products.into_iter().map(|mut product| {
                product.platform.clone_from(&platform);
                product
            }));
        if !outcome.platforms.contains(&platform) {
            outcome.platforms.push(platform);
        }
    }

    tracing::debug!(
        products = outcome.products.len(),
        successful = outcome.successful_platforms,
        failed = outcome.failures.len(),
        "crawl results flattened"
    );
    outcome
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
