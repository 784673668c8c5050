pub mod acoustic_guitar_forum;
pub mod client;
pub mod gear_page;
pub mod umgf;

pub use acoustic_guitar_forum::AcousticGuitarForum;
pub use client::PageFetcher;
pub use gear_page::GearPage;
pub use umgf::Umgf;

use fretwatch_core::{ScrapeError, SourceAdapter};
use scraper::Selector;

/// All supported sites, in the fixed order their results are concatenated.
pub fn default_adapters(fetcher: PageFetcher) -> Vec<Box<dyn SourceAdapter>> {
    vec![
        Box::new(AcousticGuitarForum::new(fetcher.clone())),
        Box::new(Umgf::new(fetcher.clone())),
        Box::new(GearPage::new(fetcher)),
    ]
}

pub(crate) fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|_| ScrapeError::Selector {
        selector: css.to_string(),
    })
}
