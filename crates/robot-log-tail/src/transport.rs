//! Transport seam between the session state machine and the network
//!
//! Implementations open one connection per [`SessionId`] and report what
//! happens on it as [`SessionEvent`]s, delivered back to
//! [`StreamSession::handle_event`](crate::StreamSession::handle_event)
//! on the owning thread.

use crate::error::TailError;
use std::fmt;
use url::Url;

/// Identifies one connection attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SessionId(pub u64);

impl SessionId {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What happened on a connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Opened,
    Text(String),
    Binary(Vec<u8>),
    /// Transport-level failure; a `Closed` usually follows
    Error(String),
    Closed { code: Option<u16>, clean: bool },
}

/// A transport event tagged with the connection it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEvent {
    pub session: SessionId,
    pub event: TransportEvent,
}

impl SessionEvent {
    pub fn new(session: SessionId, event: TransportEvent) -> Self {
        Self { session, event }
    }
}

/// Opens and closes tail connections
pub trait Transport {
    /// Start connecting; progress is reported through events for `session`
    fn open(&mut self, session: SessionId, url: &Url) -> Result<(), TailError>;

    /// Release the connection for `session`. Unknown or already closed
    /// sessions are ignored.
    fn close(&mut self, session: SessionId);
}
