//! Error types for wire-event parsing.
use std::error::Error as StdError;
use std::fmt;

/// Per-event parse error.
/// Modeled as a kind enum with an optional boxed `source` so callers can
/// decide severity from the kind alone: an unrecognized event name is a
/// normal condition for a forward-compatible client, while a malformed
/// payload on a recognized event is worth a warning. Neither terminates
/// the stream.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub kind: ErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The event name is not one this client handles.
    UnrecognizedEvent,
    /// The event data could not be parsed into the expected payload shape.
    Payload,
}

impl Error {
    pub(crate) fn unrecognized(event_type: &str) -> Self {
        Self {
            source: Some(format!("unrecognized event type: {event_type}").into()),
            kind: ErrorKind::UnrecognizedEvent,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{:?}: {source}", self.kind),
            None => write!(f, "{:?}", self.kind),
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

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            kind: ErrorKind::Payload,
        }
    }
}
