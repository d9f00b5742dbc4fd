//! Event infrastructure for the livemarkdown preview client.
//!
//! This crate defines the typed events delivered on a document's update
//! stream and the handler seam that decouples the transport (`subscriber`)
//! from the reconciliation logic (`reconciler`).
//!
//! # Architecture
//!
//! - **StreamEvent**: Enum of the named events the server pushes for a
//!   single document (`position`, `file_changed`)
//! - **EventHandler**: Trait for components that react to stream events
//! - **EventPublisher**: Publishes each event to registered handlers in
//!   registration order
//!
//! The wire format carries the event name out-of-band (the SSE event type)
//! and the payload as a JSON object in the event data. [`StreamEvent::parse`]
//! is the single place that mapping lives, so the subscriber stays a thin
//! transport adapter and handlers can be driven with synthetic events in
//! tests without any channel at all.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

pub mod error;

pub use error::{Error, ErrorKind};

/// Wire name of the position update event.
pub const POSITION: &str = "position";
/// Wire name of the full content replacement event.
pub const FILE_CHANGED: &str = "file_changed";
/// Wire name of the diagnostic connection-opened event.
pub const OPEN: &str = "open";

/// Trait for getting the wire event type name.
pub trait EventType {
    fn event_type(&self) -> &'static str;
}

/// Events delivered on a single document's update stream.
///
/// Events are handled strictly in arrival order; there is no versioning or
/// coalescing. `Position` carries an opaque anchor token (a comrak-style
/// `data-sourcepos` value such as `"3:1-5:12"`); `FileChanged` carries the
/// full rendered HTML fragment that replaces the displayed content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// The user's position in the source document moved.
    Position { sourcepos: String },
    /// The source document was re-rendered; the payload is the complete
    /// new content, delivered wholesale.
    FileChanged { html: String },
}

#[derive(Deserialize)]
struct PositionPayload {
    sourcepos: String,
}

#[derive(Deserialize)]
struct FileChangedPayload {
    html: String,
}

impl StreamEvent {
    /// Parses a named wire event into a typed `StreamEvent`.
    ///
    /// Returns [`ErrorKind::UnrecognizedEvent`] for names this client does
    /// not handle and [`ErrorKind::Payload`] for malformed event data. Both
    /// are recoverable per-event failures: the caller logs and discards the
    /// event, and the stream continues.
    pub fn parse(event_type: &str, data: &str) -> Result<Self, Error> {
        match event_type {
            POSITION => {
                let payload: PositionPayload = serde_json::from_str(data)?;
                Ok(StreamEvent::Position {
                    sourcepos: payload.sourcepos,
                })
            }
            FILE_CHANGED => {
                let payload: FileChangedPayload = serde_json::from_str(data)?;
                Ok(StreamEvent::FileChanged { html: payload.html })
            }
            other => Err(Error::unrecognized(other)),
        }
    }
}

impl EventType for StreamEvent {
    fn event_type(&self) -> &'static str {
        match self {
            StreamEvent::Position { .. } => POSITION,
            StreamEvent::FileChanged { .. } => FILE_CHANGED,
        }
    }
}

/// Trait for handling stream events.
/// Implementations perform side effects like mutating the rendered surface
/// or printing status output.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: &StreamEvent);
}

/// Publishes stream events to registered handlers.
/// Handlers are called sequentially in registration order, and one event is
/// fully handled before the next is published - this is what preserves the
/// stream's FIFO contract across multiple observers.
#[derive(Clone)]
pub struct EventPublisher {
    handlers: Arc<Vec<Arc<dyn EventHandler>>>,
}

impl EventPublisher {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Vec::new()),
        }
    }

    /// Register a new event handler.
    /// Note: This creates a new publisher instance with the additional handler.
    pub fn with_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        let mut handlers = (*self.handlers).clone();
        handlers.push(handler);
        self.handlers = Arc::new(handlers);
        self
    }

    /// Publish an event to all registered handlers, sequentially.
    pub async fn publish(&self, event: StreamEvent) {
        for handler in self.handlers.iter() {
            handler.handle(&event).await;
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}
