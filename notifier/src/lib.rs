use std::path::PathBuf;

use async_trait::async_trait;
use fretwatch_core::{domain_of, MatchEvent, Notifier, NotifyError};
use notify_rust::Notification;
use tracing::info;

/// Desktop alert for a new listing match. The summary names the matched
/// term, the body names the site and title and carries the listing URL.
pub struct DesktopNotifier {
    icon_path: Option<PathBuf>,
}

impl DesktopNotifier {
    pub fn new(icon_path: Option<PathBuf>) -> Self {
        Self { icon_path }
    }
}

#[async_trait]
impl Notifier for DesktopNotifier {
    async fn notify(&self, event: &MatchEvent) -> Result<(), NotifyError> {
        let summary = format!("New Guitar Listing: {}", event.term);
        let body = format!(
            "At {}: {}\n{}",
            domain_of(&event.listing.url),
            event.listing.title,
            event.listing.url
        );

        let mut notification = Notification::new();
        notification.summary(&summary).body(&body);
        if let Some(icon) = &self.icon_path {
            notification.icon(&icon.display().to_string());
        }

        notification
            .show()
            .map_err(|e| NotifyError::DeliveryFailed {
                reason: e.to_string(),
            })?;

        info!(term = %event.term, url = %event.listing.url, "desktop notification sent");
        Ok(())
    }
}
