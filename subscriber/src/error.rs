//! Error types for the `subscriber` layer.
use std::error::Error as StdError;
use std::fmt;

/// Subscriber error.
/// The `kind` tells callers whether activation failed because no document
/// identifier could be resolved (a normal condition for non-document
/// views) or because the transport could not be set up. Per-event parse
/// failures never reach this type; they are logged and discarded inside
/// the stream pump.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub kind: ErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No resolvable document identifier for the current view.
    Resolution,
    /// The underlying SSE channel could not be constructed.
    Transport,
}

impl Error {
    pub(crate) fn resolution() -> Self {
        Self {
            source: None,
            kind: ErrorKind::Resolution,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "subscriber error ({:?}): {source}", self.kind),
            None => write!(f, "subscriber error ({:?})", self.kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<eventsource_client::Error> for Error {
    fn from(err: eventsource_client::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            kind: ErrorKind::Transport,
        }
    }
}
