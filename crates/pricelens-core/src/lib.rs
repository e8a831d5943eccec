mod app_config;
mod config;
pub mod crawl;
mod error;
pub mod listing;
pub mod platform;
pub mod price;
pub mod product;
pub mod related;
pub mod session;
pub mod summary;
pub mod text;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use crawl::{CrawlRequest, ValidCrawlRequest};
pub use error::{ConfigError, CoreError};
pub use listing::{
    FilterSpec, PageView, PaginationMeta, PlatformFilter, ProductListProcessor, SortKey,
    DEFAULT_PAGE_SIZE,
};
pub use platform::{display_name, DEFAULT_CRAWLERS};
pub use price::{
    format_display, parse_numeric, price_difference, split_currency_and_value, PriceClassification,
    PriceDifference, PriceInput, PriceParts, PRICE_UNKNOWN_LABEL,
};
pub use product::{PricedProduct, ProductRecord, RawPrice};
pub use related::{RelatedEntry, RelatedProducts, SimilarProduct, SimilarProducts};
pub use session::{RequestToken, ResultSession, ResultSource, StoredResult};
pub use summary::PriceSummary;
pub use text::truncate_title;
