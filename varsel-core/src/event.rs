//! Event types and payload handling.

use std::fmt;

use bytes::Bytes;

/// Classifies an event for filtering and dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Data,
    Connect,
    Disconnect,
    Error,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Data => "DATA",
            EventKind::Connect => "CONNECT",
            EventKind::Disconnect => "DISCONNECT",
            EventKind::Error => "ERROR",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of work: a kind, an optional source label, an optional
/// binary payload.
///
/// Construction deep-copies the caller's buffers, so the caller is free
/// to reuse or drop them as soon as the constructor returns. The payload
/// is present exactly when it is non-empty.
#[derive(Clone, Debug)]
pub struct Event {
    kind: EventKind,
    source: Option<String>,
    payload: Option<Bytes>,
}

impl Event {
    /// Builds an event from borrowed data. An empty payload slice is
    /// normalized to no payload at all.
    pub fn new(kind: EventKind, source: Option<&str>, payload: Option<&[u8]>) -> Self {
        let payload = payload
            .filter(|bytes| !bytes.is_empty())
            .map(Bytes::copy_from_slice);
        Self {
            kind,
            source: source.map(str::to_owned),
            payload,
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    /// Exact payload byte count, 0 when no payload is present.
    pub fn payload_len(&self) -> usize {
        self.payload.as_ref().map_or(0, Bytes::len)
    }
}
