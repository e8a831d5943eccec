//! Parameters for launching a multi-platform crawl.

use serde::Serialize;

use crate::error::CoreError;

pub const DEFAULT_MAX_PRODUCTS: u32 = 100;
pub const MAX_PRODUCTS_LIMIT: u32 = 1000;
pub const DEFAULT_MIN_PRICE: u64 = 0;
pub const DEFAULT_MAX_PRICE: u64 = 999_999;

/// A crawl request as entered by the user, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    pub keyword: String,
    pub platforms: Vec<String>,
    pub max_products: Option<u32>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
}

/// A validated request, serialized as the `/api/crawl` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidCrawlRequest {
    pub keyword: String,
    pub platforms: Vec<String>,
    pub max_products: u32,
    pub min_price: u64,
    pub max_price: u64,
}

impl CrawlRequest {
    #[must_use]
    pub fn new(keyword: impl Into<String>, platforms: Vec<String>) -> Self {
        Self {
            keyword: keyword.into(),
            platforms,
            max_products: None,
            min_price: None,
            max_price: None,
        }
    }

    /// Applies defaults and checks the request.
    ///
    /// `max_products` is clamped into `1..=1000` rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCrawlRequest`] when the keyword is blank,
    /// no platform is selected, or the minimum price exceeds the maximum.
    pub fn validate(self) -> Result<ValidCrawlRequest, CoreError> {
        let keyword = self.keyword.trim().to_owned();
        if keyword.is_empty() {
            return Err(CoreError::InvalidCrawlRequest(
                "keyword must be non-empty".to_string(),
            ));
        }

        let mut platforms: Vec<String> = Vec::with_capacity(self.platforms.len());
        for platform in self.platforms {
            let platform = platform.trim().to_owned();
            if !platform.is_empty() && !platforms.contains(&platform) {
                platforms.push(platform);
            }
        }
        if platforms.is_empty() {
            return Err(CoreError::InvalidCrawlRequest(
                "at least one platform must be selected".to_string(),
            ));
        }

        let min_price = self.min_price.unwrap_or(DEFAULT_MIN_PRICE);
        let max_price = self.max_price.unwrap_or(DEFAULT_MAX_PRICE);
        if min_price > max_price {
            return Err(CoreError::InvalidCrawlRequest(format!(
                "min_price ({min_price}) must not exceed max_price ({max_price})"
            )));
        }

        let max_products = self
            .max_products
            .unwrap_or(DEFAULT_MAX_PRODUCTS)
            .clamp(1, MAX_PRODUCTS_LIMIT);

        Ok(ValidCrawlRequest {
            keyword,
            platforms,
            max_products,
            min_price,
            max_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platforms(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn validate_applies_defaults() {
        let valid = CrawlRequest::new("  口罩 ", platforms(&["pchome"]))
            .validate()
            .unwrap();
        assert_eq!(valid.keyword, "口罩");
        assert_eq!(valid.max_products, 100);
        assert_eq!(valid.min_price, 0);
        assert_eq!(valid.max_price, 999_999);
    }

    #[test]
    fn validate_rejects_blank_keyword() {
        let err = CrawlRequest::new("   ", platforms(&["pchome"]))
            .validate()
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidCrawlRequest(ref m) if m.contains("keyword")));
    }

    #[test]
    fn validate_rejects_empty_platforms() {
        let err = CrawlRequest::new("mask", platforms(&["", " "]))
            .validate()
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidCrawlRequest(ref m) if m.contains("platform")));
    }

    #[test]
    fn validate_rejects_inverted_price_range() {
        let mut request = CrawlRequest::new("mask", platforms(&["yahoo"]));
        request.min_price = Some(500);
        request.max_price = Some(100);
        assert!(request.validate().is_err());
    }

    #[test]
    fn validate_accepts_equal_price_bounds() {
        let mut request = CrawlRequest::new("mask", platforms(&["yahoo"]));
        request.min_price = Some(500);
        request.max_price = Some(500);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn validate_clamps_max_products() {
        let mut request = CrawlRequest::new("mask", platforms(&["yahoo"]));
        request.max_products = Some(0);
        assert_eq!(request.clone().validate().unwrap().max_products, 1);

        request.max_products = Some(5000);
        assert_eq!(request.validate().unwrap().max_products, 1000);
    }

    #[test]
    fn validate_dedups_platforms() {
        let valid = CrawlRequest::new("mask", platforms(&["pchome", "yahoo", "pchome"]))
            .validate()
            .unwrap();
        assert_eq!(valid.platforms, ["pchome", "yahoo"]);
    }

    #[test]
    fn valid_request_serializes_as_api_body() {
        let valid = CrawlRequest::new("mask", platforms(&["routn"]))
            .validate()
            .unwrap();
        let body = serde_json::to_value(&valid).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "keyword": "mask",
                "platforms": ["routn"],
                "max_products": 100,
                "min_price": 0,
                "max_price": 999_999,
            })
        );
    }
}
