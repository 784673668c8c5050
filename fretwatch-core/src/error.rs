use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Scrape error: {0}")]
    Scrape(#[from] ScrapeError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while fetching or extracting a site's listing index. Covers both
/// network failures and markup-drift parse failures: either way the adapter
/// contributes nothing this pass and the next scheduled run retries.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request timed out after {seconds} seconds: {url}")]
    Timeout { url: String, seconds: u64 },

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("invalid selector: {selector}")]
    Selector { selector: String },

    #[error("page structure changed: {details}")]
    Structure { details: String },

    #[error("invalid listing URL {url}: {source}")]
    Url {
        url: String,
        source: url::ParseError,
    },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to open listing store at {path}: {source}")]
    Open { path: String, source: sqlx::Error },

    // Marking a URL twice means the check-then-mark invariant was violated
    // somewhere; surfaced rather than swallowed.
    #[error("URL already recorded as seen: {url}")]
    DuplicateUrl { url: String },

    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("failed to deliver notification: {reason}")]
    DeliveryFailed { reason: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "no search terms provided: pass a comma-delimited list of items to watch for, \
         e.g. \"Martin D-18, Gibson J-45\""
    )]
    NoSearchTerms,

    #[error("invalid store path: {path}")]
    InvalidStorePath { path: String },
}
