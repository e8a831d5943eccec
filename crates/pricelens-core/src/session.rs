//! Result loading with stale-response protection.
//!
//! A [`ResultSession`] is the single owner of one product view. Every load
//! takes a [`RequestToken`]; a result that arrives after a newer request was
//! started is dropped without touching the view.

use std::future::Future;

use crate::error::CoreError;
use crate::listing::{ProductListProcessor, SortKey};
use crate::product::ProductRecord;
use crate::related::SimilarProducts;

/// A stored crawl result, fully materialized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredResult {
    pub keyword: Option<String>,
    pub products: Vec<ProductRecord>,
}

/// Asynchronous source of results and similarity data.
///
/// The presentation core never performs I/O; the HTTP client implements this.
pub trait ResultSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn fetch_crawl_result(
        &self,
        result_id: u64,
    ) -> impl Future<Output = Result<StoredResult, Self::Error>> + Send;

    fn fetch_similar_products(
        &self,
        product: &ProductRecord,
    ) -> impl Future<Output = Result<SimilarProducts, Self::Error>> + Send;
}

/// Identifies one load request; later requests compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

#[derive(Debug, Clone)]
pub struct ResultSession {
    processor: ProductListProcessor,
    keyword: Option<String>,
    latest: u64,
}

impl ResultSession {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPageSize`] when `page_size` is `0`.
    pub fn new(page_size: usize) -> Result<Self, CoreError> {
        Ok(Self {
            processor: ProductListProcessor::new(page_size)?,
            keyword: None,
            latest: 0,
        })
    }

    /// Starts a new request, superseding every earlier one.
    pub fn begin_request(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    #[must_use]
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }

    /// Installs `result` if `token` is still the latest request.
    ///
    /// Returns `false` (and leaves the view untouched) for a stale token.
    pub fn accept(&mut self, token: RequestToken, result: StoredResult) -> bool {
        if !self.is_current(token) {
            tracing::debug!(
                token = token.0,
                latest = self.latest,
                "discarding stale result"
            );
            return false;
        }
        self.keyword = result.keyword;
        self.processor.set_source(result.products);
        true
    }

    /// Fetches a stored result and installs it, applying `sort_key`.
    ///
    /// Returns `Ok(false)` when a newer request superseded this one while the
    /// fetch was in flight.
    ///
    /// # Errors
    ///
    /// Propagates the source's error; the view is left unchanged.
    pub async fn load_result<S: ResultSource>(
        &mut self,
        source: &S,
        result_id: u64,
        sort_key: SortKey,
    ) -> Result<bool, S::Error> {
        let token = self.begin_request();
        let result = source.fetch_crawl_result(result_id).await?;
        let accepted = self.accept(token, result);
        if accepted {
            self.processor.reset_filters(sort_key);
        }
        Ok(accepted)
    }

    #[must_use]
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    #[must_use]
    pub fn processor(&self) -> &ProductListProcessor {
        &self.processor
    }

    pub fn processor_mut(&mut self) -> &mut ProductListProcessor {
        &mut self.processor
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::product::RawPrice;

    #[derive(Debug, thiserror::Error)]
    #[error("result {0} not found")]
    struct NotFound(u64);

    struct FakeSource {
        results: HashMap<u64, StoredResult>,
    }

    impl ResultSource for FakeSource {
        type Error = NotFound;

        async fn fetch_crawl_result(&self, result_id: u64) -> Result<StoredResult, NotFound> {
            self.results.get(&result_id).cloned().ok_or(NotFound(result_id))
        }

        async fn fetch_similar_products(
            &self,
            _product: &ProductRecord,
        ) -> Result<SimilarProducts, NotFound> {
            Ok(SimilarProducts::default())
        }
    }

    fn stored(keyword: &str, prices: &[&str]) -> StoredResult {
        StoredResult {
            keyword: Some(keyword.to_owned()),
            products: prices
                .iter()
                .map(|p| ProductRecord::new(Some(*p), Some(RawPrice::from(*p)), "pchome"))
                .collect(),
        }
    }

    #[test]
    fn stale_token_is_discarded() {
        let mut session = ResultSession::new(12).unwrap();
        let first = session.begin_request();
        let second = session.begin_request();
        assert!(first < second);

        assert!(session.accept(second, stored("new", &["NT$10"])));
        assert!(!session.accept(first, stored("old", &["NT$1", "NT$2"])));

        assert_eq!(session.keyword(), Some("new"));
        assert_eq!(session.processor().source().len(), 1);
    }

    #[test]
    fn stale_result_before_current_arrives_is_also_discarded() {
        let mut session = ResultSession::new(12).unwrap();
        let first = session.begin_request();
        let _second = session.begin_request();

        assert!(!session.accept(first, stored("old", &["NT$1"])));
        assert!(session.keyword().is_none());
        assert!(session.processor().source().is_empty());
    }

    #[tokio::test]
    async fn load_result_installs_and_sorts() {
        let source = FakeSource {
            results: HashMap::from([(7, stored("mask", &["NT$300", "NT$100", "NT$200"]))]),
        };
        let mut session = ResultSession::new(12).unwrap();

        let accepted = session
            .load_result(&source, 7, SortKey::PriceAsc)
            .await
            .unwrap();

        assert!(accepted);
        assert_eq!(session.keyword(), Some("mask"));
        let prices: Vec<f64> = session
            .processor()
            .filtered()
            .map(|p| p.price_numeric)
            .collect();
        assert_eq!(prices, vec![100.0, 200.0, 300.0]);
    }

    #[tokio::test]
    async fn load_result_error_leaves_view_unchanged() {
        let source = FakeSource {
            results: HashMap::new(),
        };
        let mut session = ResultSession::new(12).unwrap();
        let token = session.begin_request();
        session.accept(token, stored("kept", &["NT$5"]));

        let err = session
            .load_result(&source, 99, SortKey::None)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "result 99 not found");
        assert_eq!(session.keyword(), Some("kept"));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(matches!(
            ResultSession::new(0),
            Err(CoreError::InvalidPageSize(0))
        ));
    }
}
