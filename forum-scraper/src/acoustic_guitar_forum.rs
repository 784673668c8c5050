use async_trait::async_trait;
use fretwatch_core::{Listing, ScrapeError, SourceAdapter};
use scraper::Html;
use url::Url;

use crate::client::PageFetcher;
use crate::selector;

const INDEX_URL: &str = "https://www.acousticguitarforum.com/forums/forumdisplay.php?f=17&daysprune=1&order=desc&sort=lastpost";
const BASE_URL: &str = "https://www.acousticguitarforum.com/forums/";

/// The Acoustic Guitar Forum classifieds board (vBulletin). The board mixes
/// sale, trade, and wanted threads; only rows whose title cell starts with
/// "for sale" are emitted. Thread links are relative to the forums root.
pub struct AcousticGuitarForum {
    fetcher: PageFetcher,
}

impl AcousticGuitarForum {
    pub fn new(fetcher: PageFetcher) -> Self {
        Self { fetcher }
    }

    fn extract(html: &str) -> Result<Vec<Listing>, ScrapeError> {
        let document = Html::parse_document(html);
        let row_selector = selector("td[id*='td_threadtitle'] > div:nth-of-type(1)")?;
        let link_selector = selector("a[id*='thread_title']")?;
        let base = Url::parse(BASE_URL).map_err(|e| ScrapeError::Url {
            url: BASE_URL.to_string(),
            source: e,
        })?;

        let mut listings = Vec::new();
        for row in document.select(&row_selector) {
            let row_text = row.text().collect::<String>();
            if !row_text.trim().to_lowercase().starts_with("for sale") {
                continue;
            }
            let Some(link) = row.select(&link_selector).next() else {
                continue;
            };
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
impl SourceAdapter for AcousticGuitarForum {
    fn name(&self) -> &str {
        "acousticguitarforum"
    }

    async fn fetch(&self) -> Result<Vec<Listing>, ScrapeError> {
        let html = self.fetcher.fetch_html(INDEX_URL).await?;
        Self::extract(&html)
    }
}
