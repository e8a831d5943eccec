use thiserror::Error;

/// Caller-contract violations in the presentation core.
///
/// Malformed product data never produces one of these; it degrades to the
/// price sentinels instead.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid page size: {0} (must be at least 1)")]
    InvalidPageSize(usize),

    #[error("invalid crawl request: {0}")]
    InvalidCrawlRequest(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
