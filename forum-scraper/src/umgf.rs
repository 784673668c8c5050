use async_trait::async_trait;
use fretwatch_core::{normalize::strip_query, Listing, ScrapeError, SourceAdapter};
use scraper::Html;
use url::Url;

use crate::client::PageFetcher;
use crate::selector;

const INDEX_URL: &str = "https://umgf.com/buy-and-sell-f23/";
const BASE_URL: &str = "https://umgf.com/";

// Titles containing any of these are not active sale posts.
const SKIP_TERMS: [&str; 7] = ["wtb", "want", "wtt", "sold", "delete", "close", "pending"];

/// The Unofficial Martin Guitar Forum buy-and-sell board (phpBB). The board
/// has no sale-only filter, so wanted/trade/closed posts are dropped by a
/// title denylist. Topic links carry a per-request session id in the query
/// string, which is stripped so the same topic dedups across passes.
pub struct Umgf {
    fetcher: PageFetcher,
}

impl Umgf {
    pub fn new(fetcher: PageFetcher) -> Self {
        Self { fetcher }
    }

    fn extract(html: &str) -> Result<Vec<Listing>, ScrapeError> {
        let document = Html::parse_document(html);
        let link_selector =
            selector("div.normal dl.topic_read_hot div.responsive-hide a.topictitle")?;
        let base = Url::parse(BASE_URL).map_err(|e| ScrapeError::Url {
            url: BASE_URL.to_string(),
            source: e,
        })?;

        let mut listings = Vec::new();
        for link in document.select(&link_selector) {
            let title = link.text().collect::<String>().trim().to_string();
            let lowered = title.to_lowercase();
            if SKIP_TERMS.iter().any(|term| lowered.contains(term)) {
                continue;
            }
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            let url = base.join(href).map_err(|e| ScrapeError::Url {
                url: href.to_string(),
                source: e,
            })?;
            listings.push(Listing::new(title, strip_query(url.as_str())));
        }
        Ok(listings)
    }
}

#[async_trait]
impl SourceAdapter for Umgf {
    fn name(&self) -> &str {
        "umgf"
    }

    async fn fetch(&self) -> Result<Vec<Listing>, ScrapeError> {
        let html = self.fetcher.fetch_html(INDEX_URL).await?;
        Self::extract(&html)
    }
}
