//! End-to-end publishing: markdown in, tracker write out.
//!
//! The publisher owns the seen-event cache so redelivered webhook events do
//! not post the same comment twice.

use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use ticketdoc_markdown::{ConvertOptions, convert};
use ticketdoc_shared::Result;

use crate::dedup::SeenEvents;
use crate::tracker::{CommentRef, TrackerClient};

/// Result of a comment publish request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// A new comment was created.
    Posted(CommentRef),
    /// The event id was already handled; nothing was sent.
    Duplicate,
}

/// Converts markdown and writes it to the tracker.
pub struct Publisher {
    tracker: TrackerClient,
    options: ConvertOptions,
    seen: Mutex<SeenEvents>,
}

impl Publisher {
    pub fn new(tracker: TrackerClient, options: ConvertOptions, dedup_capacity: usize) -> Self {
        Self {
            tracker,
            options,
            seen: Mutex::new(SeenEvents::new(dedup_capacity)),
        }
    }

    /// Post `markdown` as a comment on `issue_key`.
    ///
    /// When `event_id` is given and was already handled, returns
    /// [`PublishOutcome::Duplicate`] without contacting the tracker. The id is
    /// claimed before the request and released again if the request fails,
    /// so a retry of a failed event is not mistaken for a duplicate.
    ///
    /// A redelivery that arrives while the first request is still in flight
    /// is reported as [`PublishOutcome::Duplicate`] even if that request
    /// later fails. Only deliveries made after the failure are posted again.
    #[instrument(skip(self, markdown), fields(input_len = markdown.len()))]
    pub async fn publish_comment(
        &self,
        event_id: Option<&str>,
        issue_key: &str,
        markdown: &str,
    ) -> Result<PublishOutcome> {
        if let Some(id) = event_id {
            if !self.seen.lock().await.insert(id) {
                info!(event_id = id, "duplicate event, skipping");
                return Ok(PublishOutcome::Duplicate);
            }
        }

        let doc = convert(markdown, &self.options);
        debug!(blocks = doc.len(), "markdown converted");

        match self.tracker.add_comment(issue_key, &doc).await {
            Ok(comment) => Ok(PublishOutcome::Posted(comment)),
            Err(e) => {
                if let Some(id) = event_id {
                    self.seen.lock().await.remove(id);
                }
                Err(e)
            }
        }
    }

    /// Replace the description of `issue_key` with `markdown`.
    #[instrument(skip(self, markdown), fields(input_len = markdown.len()))]
    pub async fn publish_description(&self, issue_key: &str, markdown: &str) -> Result<()> {
        let doc = convert(markdown, &self.options);
        debug!(blocks = doc.len(), "markdown converted");
        self.tracker.update_description(issue_key, &doc).await
    }
}
