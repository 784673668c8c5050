use async_trait::async_trait;
use fretwatch_core::{Listing, ScrapeError, SourceAdapter};
use scraper::Html;
use tracing::warn;
use url::Url;

use crate::client::PageFetcher;
use crate::selector;

// The board filters by For Sale (prefix 1) or For Sale Or Trade (prefix 3)
// but not both at once, so both filtered views are fetched and concatenated.
const INDEX_URLS: [&str; 2] = [
    "https://www.thegearpage.net/board/index.php?forums/guitar-emporium.22/&prefix_id=1&last_days=7&order=post_date&direction=desc",
    "https://www.thegearpage.net/board/index.php?forums/guitar-emporium.22/&prefix_id=3&last_days=7&order=post_date&direction=desc",
];
const BASE_URL: &str = "https://www.thegearpage.net";

/// The Gear Page guitar emporium (XenForo). Thread rows carry a prefix link
/// followed by the title link, hence the second anchor in each title block.
pub struct GearPage {
    fetcher: PageFetcher,
}

impl GearPage {
    pub fn new(fetcher: PageFetcher) -> Self {
        Self { fetcher }
    }

    fn extract(html: &str) -> Result<Vec<Listing>, ScrapeError> {
        let document = Html::parse_document(html);
        let link_selector = selector("div.structItem-title a:nth-of-type(2)")?;
        let base = Url::parse(BASE_URL).map_err(|e| ScrapeError::Url {
            url: BASE_URL.to_string(),
            source: e,
        })?;

        let mut listings = Vec::new();
        for link in document.select(&link_selector) {
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            let url = base.join(href).map_err(|e| ScrapeError::Url {
                url: href.to_string(),
                source: e,
            })?;
            let title = link.text().collect::<String>().trim().to_string();
            listings.push(Listing::new(title, url.to_string()));
        }
        Ok(listings)
    }
}

#[async_trait]
impl SourceAdapter for GearPage {
    fn name(&self) -> &str {
        "thegearpage"
    }

    async fn fetch(&self) -> Result<Vec<Listing>, ScrapeError> {
        // One filtered view failing should not cost the other's results.
        let mut listings = Vec::new();
        let mut last_error = None;
        for url in INDEX_URLS {
            match self.fetcher.fetch_html(url).await {
                Ok(html) => listings.extend(Self::extract(&html)?),
                Err(e) => {
                    warn!(url, error = %e, "gear page index fetch failed");
                    last_error = Some(e);
                }
            }
        }
        match last_error {
            Some(e) if listings.is_empty() => Err(e),
            _ => Ok(listings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
        <div class="structItem">
          <div class="structItem-title">
            <a href="/board/index.php?forums/guitar-emporium.22/&prefix_id=1">For Sale</a>
            <a href="/board/index.php?threads/collings-om2h.2500001/">Collings OM2H, 2018</a>
          </div>
        </div>
        <div class="structItem">
          <div class="structItem-title">
            <a href="/board/index.php?forums/guitar-emporium.22/&prefix_id=3">For Sale Or Trade</a>
            <a href="/board/index.php?threads/fender-telecaster.2500002/">Fender Telecaster, 1972</a>
          </div>
        </div>
    "#;

    #[test]
    fn test_extract_takes_title_link_not_prefix_link() {
        let listings = GearPage::extract(FIXTURE).unwrap();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].title, "Collings OM2H, 2018");
        assert_eq!(listings[1].title, "Fender Telecaster, 1972");
    }

    #[test]
    fn test_extract_resolves_against_site_root() {
        let listings = GearPage::extract(FIXTURE).unwrap();
        assert_eq!(
            listings[0].url,
            "https://www.thegearpage.net/board/index.php?threads/collings-om2h.2500001/"
        );
    }

    #[test]
    fn test_extract_empty_page() {
        assert!(GearPage::extract("<html></html>").unwrap().is_empty());
    }
}
