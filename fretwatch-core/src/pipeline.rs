use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{debug, error, info, warn};

use crate::error::{CoreError, NotifyError, ScrapeError, StoreError};
use crate::matcher::match_listings;
use crate::normalize::normalize;
use crate::types::{Listing, MatchEvent};

/// One site's listing source. Implementations own their index URLs,
/// structural selectors, and inclusion/exclusion rules; adding a site means
/// adding an implementation, never branching in shared logic.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch(&self) -> Result<Vec<Listing>, ScrapeError>;
}

/// Durable set of URLs already alerted on. Callers must check-then-mark;
/// `mark_seen` on an already-present URL is an error, not a no-op.
#[async_trait]
pub trait SeenStore: Send + Sync {
    async fn has_seen(&self, url: &str) -> Result<bool, StoreError>;

    async fn mark_seen(&self, url: &str) -> Result<(), StoreError>;
}

/// User-visible alert sink. Injected so tests can substitute a recording
/// fake for the desktop notification backend.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, event: &MatchEvent) -> Result<(), NotifyError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub listings_found: usize,
    pub matches: usize,
    pub notifications_sent: usize,
}

/// Fetches every source concurrently and concatenates the normalized
/// results in registration order. A failed source is logged and contributes
/// nothing; all sources failing just yields an empty pass.
pub async fn collect(adapters: &[Box<dyn SourceAdapter>]) -> Vec<Listing> {
    let fetches = adapters.iter().map(|adapter| adapter.fetch());
    let results = join_all(fetches).await;

    let mut listings = Vec::new();
    for (adapter, result) in adapters.iter().zip(results) {
        match result {
            Ok(found) => {
                debug!(source = adapter.name(), count = found.len(), "source fetch complete");
                listings.extend(found.into_iter().map(normalize));
            }
            Err(e) => {
                warn!(source = adapter.name(), error = %e, "source fetch failed, skipping this pass");
            }
        }
    }
    listings
}

/// The dedup-and-notify step. Events are processed sequentially in match
/// order: a URL already in the store is skipped, otherwise notify then mark
/// seen. Marking only after a successful delivery means a failed
/// notification is retried on the next scheduled run.
pub async fn dispatch_matches(
    events: &[MatchEvent],
    store: &dyn SeenStore,
    notifier: &dyn Notifier,
) -> Result<usize, StoreError> {
    let mut sent = 0;
    for event in events {
        if store.has_seen(&event.listing.url).await? {
            continue;
        }
        info!(
            term = %event.term,
            title = %event.listing.title,
            url = %event.listing.url,
            "new listing match"
        );
        if let Err(e) = notifier.notify(event).await {
            error!(url = %event.listing.url, error = %e, "notification delivery failed");
            continue;
        }
        store.mark_seen(&event.listing.url).await?;
        sent += 1;
    }
    Ok(sent)
}

/// One complete discovery pass: fetch, match, dedup, notify.
pub async fn run_pass(
    adapters: &[Box<dyn SourceAdapter>],
    terms: &[String],
    store: &dyn SeenStore,
    notifier: &dyn Notifier,
) -> Result<PassSummary, CoreError> {
    let listings = collect(adapters).await;
    let events = match_listings(&listings, terms);
    let sent = dispatch_matches(&events, store, notifier).await?;

    Ok(PassSummary {
        listings_found: listings.len(),
        matches: events.len(),
        notifications_sent: sent,
    })
}

/// Non-durable `SeenStore` over a `HashSet`. Enforces the same
/// duplicate-mark contract as the SQLite store.
#[derive(Debug, Default)]
pub struct MemorySeenStore {
    seen: Mutex<HashSet<String>>,
}

impl MemorySeenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SeenStore for MemorySeenStore {
    async fn has_seen(&self, url: &str) -> Result<bool, StoreError> {
        let seen = self.seen.lock().expect("seen set lock poisoned");
        Ok(seen.contains(url))
    }

    async fn mark_seen(&self, url: &str) -> Result<(), StoreError> {
        let mut seen = self.seen.lock().expect("seen set lock poisoned");
        if !seen.insert(url.to_string()) {
            return Err(StoreError::DuplicateUrl {
                url: url.to_string(),
            });
        }
        Ok(())
    }
}

/// `Notifier` that records every event it is handed, for tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<MatchEvent>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<MatchEvent> {
        self.sent.lock().expect("sent list lock poisoned").clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, event: &MatchEvent) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .expect("sent list lock poisoned")
            .push(event.clone());
        Ok(())
    }
}
