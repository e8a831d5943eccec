//! HTTP client for the price-comparison backend.
//!
//! Wraps `reqwest` with status mapping, envelope checks, and retries for
//! idempotent requests. Every endpoint answers with a JSON envelope whose
//! `status` must be `"success"`; any other status surfaces as
//! [`ClientError::Api`].

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use pricelens_core::{
    AppConfig, ProductRecord, ResultSource, SimilarProducts, StoredResult, ValidCrawlRequest,
    DEFAULT_CRAWLERS,
};

use crate::error::ClientError;
use crate::normalize::{flatten_crawl_results, CrawlOutcome};
use crate::retry::retry_with_backoff;
use crate::types::{
    CompareRequest, CompareResponse, CrawlResponse, CrawlersResponse, ResultResponse,
    STATUS_SUCCESS,
};

/// A finished crawl: the flattened products plus the raw response body,
/// kept verbatim for export.
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub outcome: CrawlOutcome,
    pub raw: serde_json::Value,
}

/// Client for the backend's `/api/*` endpoints.
///
/// Use [`PriceApiClient::from_config`] in the binary or
/// [`PriceApiClient::with_base_url`] to point at a mock server in tests.
pub struct PriceApiClient {
    client: Client,
    base_url: Url,
    /// Additional attempts after the first failure for idempotent requests.
    max_retries: u32,
    backoff_base_ms: u64,
}

impl PriceApiClient {
    /// Builds a client from the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be built
    /// or [`ClientError::InvalidBaseUrl`] if the base URL does not parse.
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::with_base_url(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_ms,
        )
    }

    /// Creates a client with an explicit base URL and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be built
    /// or [`ClientError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // A single trailing slash makes `Url::join` append to the base path
        // instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: parsed,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Lists the crawler ids the backend can run.
    ///
    /// Falls back to [`DEFAULT_CRAWLERS`] when the backend is unreachable or
    /// answers with something other than a JSON envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] if the backend answers with a
    /// non-success envelope.
    pub async fn list_crawlers(&self) -> Result<Vec<String>, ClientError> {
        match self.fetch_crawlers().await {
            Ok(crawlers) => Ok(crawlers),
            Err(ClientError::Api(message)) => Err(ClientError::Api(message)),
            Err(e) => {
                tracing::warn!(error = %e, "crawler list unavailable, using defaults");
                Ok(DEFAULT_CRAWLERS.iter().map(|s| (*s).to_owned()).collect())
            }
        }
    }

    async fn fetch_crawlers(&self) -> Result<Vec<String>, ClientError> {
        let url = self.endpoint("api/crawlers")?;
        let body = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move { self.get_json(&url).await }
        })
        .await?;

        let response: CrawlersResponse = Self::decode(body, "crawler list")?;
        if response.status != STATUS_SUCCESS {
            return Err(Self::api_error(&response.status, response.error));
        }
        Ok(response.crawlers)
    }

    /// Runs a crawl across the requested platforms and waits for it to finish.
    ///
    /// Not retried: a crawl is expensive and not idempotent on the backend.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] if the crawl as a whole did not succeed.
    /// - [`ClientError::Http`], [`ClientError::NotFound`], or
    ///   [`ClientError::UnexpectedStatus`] on transport failure.
    /// - [`ClientError::Deserialize`] if the body is not the expected shape.
    pub async fn start_crawl(&self, request: &ValidCrawlRequest) -> Result<CrawlReport, ClientError> {
        let url = self.endpoint("api/crawl")?;
        tracing::info!(
            keyword = %request.keyword,
            platforms = ?request.platforms,
            max_products = request.max_products,
            "starting crawl"
        );
        let raw = self.post_json(&url, request).await?;

        let response: CrawlResponse = Self::decode(raw.clone(), "crawl response")?;
        if response.status != STATUS_SUCCESS {
            return Err(Self::api_error(&response.status, response.error));
        }

        Ok(CrawlReport {
            outcome: flatten_crawl_results(response.results),
            raw,
        })
    }

    /// Loads a stored crawl result by id.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] with the backend's `error` text for a
    ///   non-success envelope.
    /// - Transport and decoding errors as for [`Self::start_crawl`].
    pub async fn fetch_result(&self, result_id: u64) -> Result<StoredResult, ClientError> {
        let url = self.endpoint(&format!("api/result/{result_id}"))?;
        let body = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move { self.get_json(&url).await }
        })
        .await?;

        let response: ResultResponse = Self::decode(body, &format!("result {result_id}"))?;
        if response.status != STATUS_SUCCESS {
            return Err(Self::api_error(&response.status, response.error));
        }

        let data = response.data.ok_or_else(|| {
            ClientError::Api(format!("result {result_id} has no data"))
        })?;
        tracing::debug!(result_id, products = data.products.len(), "stored result loaded");

        Ok(StoredResult {
            keyword: data.session.and_then(|s| s.keyword),
            products: data.products,
        })
    }

    /// Asks the backend for products similar to `product`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] if the response carries an `error` field.
    /// - Transport and decoding errors as for [`Self::start_crawl`].
    pub async fn compare_products(
        &self,
        product: &ProductRecord,
    ) -> Result<SimilarProducts, ClientError> {
        let url = self.endpoint("api/products/compare")?;
        let request = CompareRequest::from(product);
        let body = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            let request = request.clone();
            async move { self.post_json(&url, &request).await }
        })
        .await?;

        let response: CompareResponse = Self::decode(body, "product comparison")?;
        if let Some(error) = response.error {
            return Err(ClientError::Api(error));
        }
        if let Some(message) = &response.message {
            tracing::info!(%message, "comparison note from backend");
        }

        Ok(SimilarProducts {
            products: response.similar_products,
            total_candidates: response.total_candidates.unwrap_or(0),
            total_matches: response.total_matches.unwrap_or(0),
            message: response.message,
        })
    }

    /// Resolves `path` (no leading slash) against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    async fn get_json(&self, url: &Url) -> Result<serde_json::Value, ClientError> {
        let response = self.client.get(url.clone()).send().await?;
        Self::read_json(url, response).await
    }

    async fn post_json<B>(&self, url: &Url, body: &B) -> Result<serde_json::Value, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let response = self.client.post(url.clone()).json(body).send().await?;
        Self::read_json(url, response).await
    }

    /// Maps the HTTP status to a typed error and parses the body as JSON.
    async fn read_json(
        url: &Url,
        response: reqwest::Response,
    ) -> Result<serde_json::Value, ClientError> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    fn decode<T: DeserializeOwned>(
        body: serde_json::Value,
        context: &str,
    ) -> Result<T, ClientError> {
        serde_json::from_value(body).map_err(|e| ClientError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    fn api_error(status: &str, error: Option<String>) -> ClientError {
        ClientError::Api(error.unwrap_or_else(|| format!("backend returned status \"{status}\"")))
    }
}

impl ResultSource for PriceApiClient {
    type Error = ClientError;

    fn fetch_crawl_result(
        &self,
        result_id: u64,
    ) -> impl Future<Output = Result<StoredResult, ClientError>> + Send {
        self.fetch_result(result_id)
    }

    fn fetch_similar_products(
        &self,
        product: &ProductRecord,
    ) -> impl Future<Output = Result<SimilarProducts, ClientError>> + Send {
        self.compare_products(product)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
