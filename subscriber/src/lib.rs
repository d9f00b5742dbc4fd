//! Stream Subscriber: the one-way update channel for a single document.
//!
//! This crate owns the transport side of the live preview: resolving the
//! document identifier from the current navigation path, opening the SSE
//! subscription at `{base_url}/document/{id}/updates`, and translating
//! named wire events into [`events::StreamEvent`]s published through an
//! [`events::EventPublisher`].
//!
//! # Lifecycle
//!
//! `Inactive -> Active` on a successful [`Subscription::activate`],
//! `-> Inactive` on [`Subscription::deactivate`] or drop. Transport-level
//! reconnection happens inside `eventsource-client` and never surfaces as
//! a state transition here.
//!
//! # Modules
//!
//! - `document`: document-id resolution from a navigation path
//! - `subscription`: channel lifecycle and the stream-pump task
//! - `error`: subscriber error kinds

pub mod document;
pub mod error;
pub mod subscription;

pub use document::resolve_document_id;
pub use error::{Error, ErrorKind};
pub use subscription::Subscription;
