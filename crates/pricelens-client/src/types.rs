//! Wire types for the price-comparison backend.
//!
//! Every endpoint wraps its payload in an envelope with a `status` string;
//! anything other than `"success"` carries an optional `error` message.
//! Fields are defaulted generously since crawlers for different platforms
//! populate them unevenly.

use serde::{Deserialize, Serialize};

use pricelens_core::{ProductRecord, RawPrice, SimilarProduct};

pub(crate) const STATUS_SUCCESS: &str = "success";

/// `GET /api/crawlers`
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlersResponse {
    pub status: String,
    #[serde(default)]
    pub crawlers: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `POST /api/crawl`
///
/// `results` is keyed by platform id in the order the backend produced them.
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlResponse {
    pub status: String,
    #[serde(default)]
    pub results: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One platform's entry inside [`CrawlResponse::results`].
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformCrawlResult {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub products: Vec<ProductRecord>,
    #[serde(default)]
    pub total_products: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `GET /api/result/:id`
#[derive(Debug, Clone, Deserialize)]
pub struct ResultResponse {
    pub status: String,
    #[serde(default)]
    pub data: Option<ResultData>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultData {
    #[serde(default)]
    pub session: Option<ResultSessionInfo>,
    #[serde(default)]
    pub products: Vec<ProductRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultSessionInfo {
    #[serde(default)]
    pub keyword: Option<String>,
}

/// `POST /api/products/compare` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest<'a> {
    pub product_name: &'a str,
    pub platform: &'a str,
    pub price: Option<&'a RawPrice>,
    pub url: Option<&'a str>,
}

impl<'a> From<&'a ProductRecord> for CompareRequest<'a> {
    fn from(product: &'a ProductRecord) -> Self {
        Self {
            product_name: product.title_or_empty(),
            platform: &product.platform,
            price: product.price.as_ref(),
            url: product.url.as_deref(),
        }
    }
}

/// `POST /api/products/compare` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    #[serde(default)]
    pub similar_products: Vec<SimilarProduct>,
    #[serde(default)]
    pub total_candidates: Option<u64>,
    #[serde(default)]
    pub total_matches: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
