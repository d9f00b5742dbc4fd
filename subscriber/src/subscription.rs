//! Channel lifecycle and the stream-pump task.

use crate::error::Error;
use events::{error::ErrorKind as ParseErrorKind, EventPublisher, StreamEvent};
use eventsource_client::{self as es, Client};
use futures_util::stream::StreamExt;
use log::*;
use tokio::task::JoinHandle;

/// A live subscription to one document's update stream.
///
/// Activation spawns a single pump task that reads the SSE stream and
/// publishes parsed events in arrival order; each event is fully handled
/// before the next is read, so handlers never overlap for one
/// subscription. Reconnection after a dropped connection is handled by
/// `eventsource-client`'s built-in retry and does not surface here.
///
/// The subscription is a scoped resource: [`Subscription::deactivate`]
/// releases the channel deterministically and is idempotent, and dropping
/// the handle deactivates as well, covering abrupt view teardown.
pub struct Subscription {
    document_id: String,
    pump: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Opens the update channel for `document_id` and starts pumping
    /// events into `publisher`.
    ///
    /// Preconditions: `document_id` is non-empty (callers normally obtain
    /// it from [`crate::resolve_document_id`]).
    pub fn activate(
        base_url: &str,
        document_id: &str,
        publisher: EventPublisher,
    ) -> Result<Self, Error> {
        if document_id.is_empty() {
            return Err(Error::resolution());
        }

        let url = format!(
            "{}/document/{}/updates",
            base_url.trim_end_matches('/'),
            document_id
        );
        let client = es::ClientBuilder::for_url(&url)?.build();

        let id = document_id.to_string();
        let pump = tokio::spawn(async move {
            let mut stream = client.stream();

            loop {
                match stream.next().await {
                    Some(Ok(es::SSE::Event(event))) => {
                        Self::dispatch(&publisher, &event.event_type, &event.data).await;
                    }
                    Some(Ok(es::SSE::Comment(_))) => {
                        // Ignore comments (keep-alive)
                    }
                    Some(Err(e)) => {
                        warn!("update stream error for document {id}: {e}");
                    }
                    None => {
                        debug!("update stream ended for document {id}");
                        break;
                    }
                }
            }
        });

        info!("subscribed to updates for document {document_id}");

        Ok(Self {
            document_id: document_id.to_string(),
            pump: Some(pump),
        })
    }

    /// Dispatches one named wire event.
    ///
    /// Recognized events are parsed and published; `open` is a diagnostic
    /// lifecycle signal; everything else is ignored at debug level. A
    /// malformed payload discards that event only - the stream continues.
    async fn dispatch(publisher: &EventPublisher, event_type: &str, data: &str) {
        if event_type == events::OPEN {
            info!("update channel opened");
            return;
        }

        match StreamEvent::parse(event_type, data) {
            Ok(event) => publisher.publish(event).await,
            Err(e) if e.kind == ParseErrorKind::UnrecognizedEvent => {
                debug!("ignoring {e}");
            }
            Err(e) => {
                warn!("discarding malformed {event_type} event: {e}");
            }
        }
    }

    /// Closes the channel. Idempotent: deactivating an already-inactive
    /// subscription is a no-op.
    pub fn deactivate(&mut self) {
        if let Some(pump) = self.pump.take() {
            pump.abort();
            info!("unsubscribed from updates for document {}", self.document_id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.pump.is_some()
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.deactivate();
    }
}
