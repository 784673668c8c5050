use url::Url;

use crate::types::Listing;

/// Canonicalizes a listing so equivalent listings compare equal: surrounding
/// whitespace is trimmed from the title. Query stripping is applied by the
/// adapters whose sites append volatile parameters, before listings reach
/// this point. Idempotent.
pub fn normalize(listing: Listing) -> Listing {
    Listing {
        title: listing.title.trim().to_string(),
        url: listing.url,
    }
}

/// Drops the query string from a URL. Some forums attach a per-request
/// session id, which would defeat URL-keyed deduplication.
pub fn strip_query(url: &str) -> String {
    match url.split_once('?') {
        Some((base, _)) => base.to_string(),
        None => url.to_string(),
    }
}

/// Site name for notification bodies: the registrable label of the host,
/// e.g. "thegearpage" for https://www.thegearpage.net/board/... Falls back
/// to the raw input when the URL does not parse.
pub fn domain_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed.host_str().map(|host| {
                host.to_lowercase()
                    .trim_start_matches("www.")
                    .split('.')
                    .next()
                    .unwrap_or(host)
                    .to_string()
            })
        })
        .unwrap_or_else(|| url.to_string())
}
