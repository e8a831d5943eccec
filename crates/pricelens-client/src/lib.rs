pub mod client;
pub mod error;
pub mod normalize;
mod retry;
pub mod types;

pub use client::{CrawlReport, PriceApiClient};
pub use error::ClientError;
pub use normalize::{flatten_crawl_results, CrawlOutcome, PlatformFailure};
