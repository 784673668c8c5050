use crate::types::{Listing, MatchEvent};

/// Pairs every listing with every search term whose lowercased form appears
/// as a substring of the lowercased title. A listing matching several terms
/// yields one event per term; the notify step's seen check collapses those
/// to a single alert per URL.
pub fn match_listings(listings: &[Listing], terms: &[String]) -> Vec<MatchEvent> {
    let mut events = Vec::new();
    for listing in listings {
        let title = listing.title.to_lowercase();
        for term in terms {
            if title.contains(&term.to_lowercase()) {
                events.push(MatchEvent {
                    term: term.clone(),
                    listing: listing.clone(),
                });
            }
        }
    }
    events
}
