use std::sync::Mutex;

use async_trait::async_trait;
use fretwatch_core::{
    run_pass, Listing, MatchEvent, MemorySeenStore, Notifier, NotifyError, RecordingNotifier,
    ScrapeError, SeenStore, SourceAdapter,
};

struct StaticAdapter {
    name: &'static str,
    listings: Vec<Listing>,
}

#[async_trait]
impl SourceAdapter for StaticAdapter {
    fn name(&self) -> &str {
        self.name
    }

    async fn fetch(&self) -> Result<Vec<Listing>, ScrapeError> {
        Ok(self.listings.clone())
    }
}

struct OutageAdapter;

#[async_trait]
impl SourceAdapter for OutageAdapter {
    fn name(&self) -> &str {
        "down"
    }

    async fn fetch(&self) -> Result<Vec<Listing>, ScrapeError> {
        Err(ScrapeError::Status {
            status: 503,
            url: "http://down/index".to_string(),
        })
    }
}

/// Fails the first delivery, records the rest.
#[derive(Default)]
struct FlakyNotifier {
    failed_once: Mutex<bool>,
    sent: Mutex<Vec<MatchEvent>>,
}

#[async_trait]
impl Notifier for FlakyNotifier {
    async fn notify(&self, event: &MatchEvent) -> Result<(), NotifyError> {
        let mut failed = self.failed_once.lock().unwrap();
        if !*failed {
            *failed = true;
            return Err(NotifyError::DeliveryFailed {
                reason: "notification daemon unavailable".to_string(),
            });
        }
        self.sent.lock().unwrap().push(event.clone());
        Ok(())
    }
}

fn forum_candidates() -> Vec<Box<dyn SourceAdapter>> {
    vec![Box::new(StaticAdapter {
        name: "forum",
        listings: vec![
            Listing::new("FS: Martin D-18", "http://site/1"),
            Listing::new("WTB Gibson", "http://site/2"),
        ],
    })]
}

#[tokio::test]
async fn test_end_to_end_two_pass_scenario() {
    let adapters = forum_candidates();
    let terms = vec!["Martin".to_string()];
    let store = MemorySeenStore::new();
    let notifier = RecordingNotifier::new();

    let first = run_pass(&adapters, &terms, &store, &notifier).await.unwrap();
    assert_eq!(first.listings_found, 2);
    assert_eq!(first.matches, 1);
    assert_eq!(first.notifications_sent, 1);

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].term, "Martin");
    assert_eq!(sent[0].listing.url, "http://site/1");
    assert!(store.has_seen("http://site/1").await.unwrap());
    assert!(!store.has_seen("http://site/2").await.unwrap());

    // Same candidates again: everything already alerted on, nothing sent.
    let second = run_pass(&adapters, &terms, &store, &notifier).await.unwrap();
    assert_eq!(second.matches, 1);
    assert_eq!(second.notifications_sent, 0);
    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test]
async fn test_within_pass_suppression_across_terms() {
    // One listing matching two terms produces two events but one alert;
    // whichever event is processed first wins.
    let adapters: Vec<Box<dyn SourceAdapter>> = vec![Box::new(StaticAdapter {
        name: "forum",
        listings: vec![Listing::new(
            "FS: Martin D-18 and Gibson J-45",
            "http://site/1",
        )],
    })];
    let terms = vec!["Martin".to_string(), "Gibson".to_string()];
    let store = MemorySeenStore::new();
    let notifier = RecordingNotifier::new();

    let summary = run_pass(&adapters, &terms, &store, &notifier).await.unwrap();
    assert_eq!(summary.matches, 2);
    assert_eq!(summary.notifications_sent, 1);

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].term, "Martin");
}

#[tokio::test]
async fn test_adapter_outage_does_not_block_other_sources() {
    let adapters: Vec<Box<dyn SourceAdapter>> = vec![
        Box::new(OutageAdapter),
        Box::new(StaticAdapter {
            name: "healthy",
            listings: vec![Listing::new("FS: Martin 000-28", "http://site/9")],
        }),
    ];
    let terms = vec!["Martin".to_string()];
    let store = MemorySeenStore::new();
    let notifier = RecordingNotifier::new();

    let summary = run_pass(&adapters, &terms, &store, &notifier).await.unwrap();
    assert_eq!(summary.listings_found, 1);
    assert_eq!(summary.notifications_sent, 1);
}

#[tokio::test]
async fn test_all_sources_failing_is_a_no_op_pass() {
    let adapters: Vec<Box<dyn SourceAdapter>> = vec![Box::new(OutageAdapter)];
    let terms = vec!["Martin".to_string()];
    let store = MemorySeenStore::new();
    let notifier = RecordingNotifier::new();

    let summary = run_pass(&adapters, &terms, &store, &notifier).await.unwrap();
    assert_eq!(summary, fretwatch_core::PassSummary::default());
}

#[tokio::test]
async fn test_failed_delivery_is_retried_next_pass() {
    let adapters = forum_candidates();
    let terms = vec!["Martin".to_string()];
    let store = MemorySeenStore::new();
    let notifier = FlakyNotifier::default();

    // First delivery attempt fails; the URL must not be marked seen.
    let first = run_pass(&adapters, &terms, &store, &notifier).await.unwrap();
    assert_eq!(first.notifications_sent, 0);
    assert!(!store.has_seen("http://site/1").await.unwrap());

    // Next pass retries and succeeds.
    let second = run_pass(&adapters, &terms, &store, &notifier).await.unwrap();
    assert_eq!(second.notifications_sent, 1);
    assert!(store.has_seen("http://site/1").await.unwrap());
    assert_eq!(notifier.sent.lock().unwrap().len(), 1);
}
