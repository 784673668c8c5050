use std::time::Duration;

use fretwatch_core::ScrapeError;
use reqwest::Client;
use tracing::debug;

// Browser-identifying User-Agent; the default reqwest UA trips the
// bot-blocking on at least one of the forums.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Shared HTTP client for all source adapters: browser User-Agent and a
/// bounded per-request timeout so a hung site cannot stall the whole pass.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    timeout: Duration,
}

impl PageFetcher {
    pub fn new() -> Result<Self, ScrapeError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, timeout })
    }

    /// Downloads one listing index page as HTML text.
    pub async fn fetch_html(&self, url: &str) -> Result<String, ScrapeError> {
        debug!(url, "fetching index page");
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ScrapeError::Timeout {
                    url: url.to_string(),
                    seconds: self.timeout.as_secs(),
                }
            } else {
                ScrapeError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}
