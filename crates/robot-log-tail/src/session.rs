//! Stream session: connection state machine over an injectable transport
//!
//! A [`StreamSession`] exclusively owns the active connection and the log
//! buffer. Every inbound [`SessionEvent`] is checked against the session id
//! of the current connection, so late events from a closed connection can
//! never touch the state of its successor.

use crate::buffer::LogBuffer;
use crate::connection::{messages, ConnectionState, ConnectionStatus, NORMAL_CLOSURE};
use crate::frame::{decode_frame, Frame};
use crate::stream_url::{StreamEndpoint, TailRequest};
use crate::transport::{SessionEvent, SessionId, Transport, TransportEvent};
use bitflags::bitflags;
use log::{debug, info, warn};

bitflags! {
    /// What a call changed, so callers only republish what is dirty
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SessionChanges: u8 {
        const STATUS = 1 << 0;
        const BUFFER = 1 << 1;
    }
}

/// Counters kept for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    pub frames_received: u64,
    pub entries_received: u64,
    /// Text frames that were not valid JSON or matched no known shape,
    /// plus binary frames
    pub frames_ignored: u64,
    /// Events that arrived for a connection that was already released
    pub stale_events: u64,
    /// Entries the backend itself reported as dropped
    pub backend_dropped: u64,
}

pub struct StreamSession<T: Transport> {
    transport: T,
    endpoint: StreamEndpoint,
    active: Option<SessionId>,
    next_id: SessionId,
    status: ConnectionStatus,
    buffer: LogBuffer,
    stats: SessionStats,
}

impl<T: Transport> StreamSession<T> {
    pub fn new(transport: T, endpoint: StreamEndpoint) -> Self {
        Self {
            transport,
            endpoint,
            active: None,
            next_id: SessionId::default(),
            status: ConnectionStatus::default(),
            buffer: LogBuffer::default(),
            stats: SessionStats::default(),
        }
    }

    /// Start tailing `request`
    ///
    /// Any open connection is released first. An empty selector moves to
    /// `Error` without opening anything and leaves the buffer untouched.
    pub fn connect(&mut self, request: &TailRequest) -> SessionChanges {
        self.release();

        if request.selector.trim().is_empty() {
            return self.transition(ConnectionState::Error, messages::SELECTOR_REQUIRED);
        }

        let url = match self.endpoint.tail_url(request) {
            Ok(url) => url,
            Err(e) => return self.transition(ConnectionState::Error, e.to_string()),
        };

        self.buffer.clear();
        let mut changes = SessionChanges::BUFFER;

        self.next_id = self.next_id.next();
        let session = self.next_id;

        changes |= self.transition(ConnectionState::Connecting, messages::CONNECTING);

        info!("Opening log stream {} to {}", session, url);
        match self.transport.open(session, &url) {
            Ok(()) => {
                self.active = Some(session);
            }
            Err(e) => {
                warn!("Failed to open log stream {}: {}", session, e);
                changes |= self.transition(ConnectionState::Error, e.to_string());
            }
        }

        changes
    }

    /// Close the connection and return to `Idle`; no-op when already idle
    pub fn stop(&mut self) -> SessionChanges {
        if self.active.is_none() && self.status.state == ConnectionState::Idle {
            return SessionChanges::empty();
        }

        self.release();
        self.transition(ConnectionState::Idle, messages::STOPPED)
    }

    /// Apply one transport event
    pub fn handle_event(&mut self, event: SessionEvent) -> SessionChanges {
        if self.active != Some(event.session) {
            self.stats.stale_events += 1;
            debug!(
                "Ignoring {:?} from retired log stream {}",
                event.event, event.session
            );
            return SessionChanges::empty();
        }

        match event.event {
            TransportEvent::Opened => {
                if self.status.state == ConnectionState::Connecting {
                    self.transition(ConnectionState::Streaming, messages::CONNECTED)
                } else {
                    SessionChanges::empty()
                }
            }
            TransportEvent::Text(text) => self.handle_frame(&text),
            TransportEvent::Binary(_) => {
                self.stats.frames_ignored += 1;
                SessionChanges::empty()
            }
            TransportEvent::Error(reason) => {
                warn!("Log stream {} transport error: {}", event.session, reason);
                self.release();
                self.transition(ConnectionState::Error, messages::TRANSPORT_ERROR)
            }
            TransportEvent::Closed { code, clean } => {
                self.active = None;
                self.transport.close(event.session);

                if clean && code == Some(NORMAL_CLOSURE) {
                    self.transition(ConnectionState::Idle, messages::CLOSED)
                } else {
                    debug!(
                        "Log stream {} closed abnormally (code {:?}, clean {})",
                        event.session, code, clean
                    );
                    self.transition(ConnectionState::Error, messages::DISCONNECTED)
                }
            }
        }
    }

    fn handle_frame(&mut self, text: &str) -> SessionChanges {
        self.stats.frames_received += 1;

        match decode_frame(text) {
            None => {
                self.stats.frames_ignored += 1;
                debug!("Ignoring unrecognised log stream frame ({} bytes)", text.len());
                SessionChanges::empty()
            }
            Some(Frame::Error { message }) => {
                warn!("Log provider reported an error: {}", message);
                self.release();
                self.transition(ConnectionState::Error, message)
            }
            Some(Frame::Batch(batch)) => {
                self.stats.backend_dropped += batch.dropped_entries as u64;
                if batch.entries.is_empty() {
                    return SessionChanges::empty();
                }
                self.stats.entries_received += batch.entries.len() as u64;
                self.buffer.append(batch.entries);
                SessionChanges::BUFFER
            }
        }
    }

    fn release(&mut self) {
        if let Some(session) = self.active.take() {
            debug!("Closing log stream {}", session);
            self.transport.close(session);
        }
    }

    fn transition(&mut self, state: ConnectionState, message: impl Into<String>) -> SessionChanges {
        let next = ConnectionStatus::new(state, message);
        if next == self.status {
            return SessionChanges::empty();
        }

        info!(
            "Log stream {} -> {}: {}",
            self.status.state.label(),
            state.label(),
            next.message.as_deref().unwrap_or_default()
        );
        self.status = next;
        SessionChanges::STATUS
    }

    pub fn status(&self) -> &ConnectionStatus {
        &self.status
    }

    pub fn state(&self) -> ConnectionState {
        self.status.state
    }

    pub fn buffer(&self) -> &LogBuffer {
        &self.buffer
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Id of the connection currently owned, if any
    pub fn active_session(&self) -> Option<SessionId> {
        self.active
    }

    pub fn endpoint(&self) -> &StreamEndpoint {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}

impl<T: Transport> Drop for StreamSession<T> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TailError;
    use pretty_assertions::assert_eq;
    use url::Url;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Open(SessionId, String),
        Close(SessionId),
    }

    #[derive(Default)]
    struct MockTransport {
        calls: Vec<Call>,
        fail_open: bool,
    }

    impl MockTransport {
        fn opens(&self) -> usize {
            self.calls
                .iter()
                .filter(|c| matches!(c, Call::Open(..)))
                .count()
        }
    }

    impl Transport for MockTransport {
        fn open(&mut self, session: SessionId, url: &Url) -> Result<(), TailError> {
            if self.fail_open {
                return Err(TailError::Transport("refused".to_string()));
            }
            self.calls.push(Call::Open(session, url.to_string()));
            Ok(())
        }

        fn close(&mut self, session: SessionId) {
            self.calls.push(Call::Close(session));
        }
    }

    fn session() -> StreamSession<MockTransport> {
        let endpoint = StreamEndpoint::resolve("http://robot.local", "/api").unwrap();
        StreamSession::new(MockTransport::default(), endpoint)
    }

    fn request() -> TailRequest {
        TailRequest::new(r#"{service="x"}"#)
    }

    fn event(session: &StreamSession<MockTransport>, event: TransportEvent) -> SessionEvent {
        SessionEvent::new(session.active_session().unwrap(), event)
    }

    fn batch_frame(values: &[(&str, &str)]) -> TransportEvent {
        let values: Vec<_> = values.iter().map(|(ts, line)| vec![*ts, *line]).collect();
        let frame = serde_json::json!({
            "streams": [{"stream": {"service": "x"}, "values": values}]
        });
        TransportEvent::Text(frame.to_string())
    }

    fn lines(session: &StreamSession<MockTransport>) -> Vec<String> {
        session.buffer().iter().map(|e| e.line.clone()).collect()
    }

    #[test]
    fn test_empty_selector_goes_to_error_without_opening() {
        let mut s = session();
        let changes = s.connect(&TailRequest::new("   "));

        assert_eq!(changes, SessionChanges::STATUS);
        assert_eq!(s.state(), ConnectionState::Error);
        assert_eq!(s.status().message.as_deref(), Some(messages::SELECTOR_REQUIRED));
        assert_eq!(s.transport().opens(), 0);
        assert_eq!(s.active_session(), None);
    }

    #[test]
    fn test_connect_opens_ws_url() {
        let mut s = session();
        s.connect(&request().with_limit(Some(50)));

        assert_eq!(s.state(), ConnectionState::Connecting);
        match &s.transport().calls[..] {
            [Call::Open(_, url)] => {
                assert!(url.starts_with("ws://robot.local/api/logs/tail?query="));
                assert!(url.ends_with("&limit=50"));
            }
            other => panic!("unexpected calls {:?}", other),
        }
    }

    #[test]
    fn test_open_then_batch_streams_entries() {
        let mut s = session();
        s.connect(&request());

        let opened = s.handle_event(event(&s, TransportEvent::Opened));
        assert_eq!(opened, SessionChanges::STATUS);
        assert_eq!(s.state(), ConnectionState::Streaming);
        assert_eq!(s.status().message.as_deref(), Some(messages::CONNECTED));

        let changes = s.handle_event(event(&s, batch_frame(&[("1", "a"), ("2", "b")])));
        assert_eq!(changes, SessionChanges::BUFFER);
        assert_eq!(lines(&s), vec!["a", "b"]);
        assert_eq!(s.stats().entries_received, 2);
    }

    #[test]
    fn test_error_frame_stops_buffer_mutation() {
        let mut s = session();
        s.connect(&request());
        let id = s.active_session().unwrap();

        s.handle_event(SessionEvent::new(id, TransportEvent::Opened));
        s.handle_event(SessionEvent::new(id, batch_frame(&[("1", "a")])));
        s.handle_event(SessionEvent::new(
            id,
            TransportEvent::Text(r#"{"type":"error","message":"loki down"}"#.to_string()),
        ));

        assert_eq!(s.state(), ConnectionState::Error);
        assert_eq!(s.status().message.as_deref(), Some("loki down"));
        assert!(s.transport().calls.contains(&Call::Close(id)));

        let revision = s.buffer().revision();
        let changes = s.handle_event(SessionEvent::new(id, batch_frame(&[("2", "late")])));
        assert_eq!(changes, SessionChanges::empty());
        assert_eq!(s.buffer().revision(), revision);
        assert_eq!(lines(&s), vec!["a"]);

        // The close that follows the error must not override the backend message
        s.handle_event(SessionEvent::new(
            id,
            TransportEvent::Closed {
                code: Some(1006),
                clean: false,
            },
        ));
        assert_eq!(s.status().message.as_deref(), Some("loki down"));
        assert_eq!(s.stats().stale_events, 2);
    }

    #[test]
    fn test_clean_close_goes_idle() {
        let mut s = session();
        s.connect(&request());
        s.handle_event(event(&s, TransportEvent::Opened));
        s.handle_event(event(
            &s,
            TransportEvent::Closed {
                code: Some(NORMAL_CLOSURE),
                clean: true,
            },
        ));

        assert_eq!(s.state(), ConnectionState::Idle);
        assert_eq!(s.status().message.as_deref(), Some(messages::CLOSED));
        assert_eq!(s.active_session(), None);
    }

    #[test]
    fn test_unclean_close_goes_error() {
        for (code, clean) in [(Some(1006), false), (None, false), (Some(1011), true)] {
            let mut s = session();
            s.connect(&request());
            s.handle_event(event(&s, TransportEvent::Opened));
            s.handle_event(event(&s, TransportEvent::Closed { code, clean }));

            assert_eq!(s.state(), ConnectionState::Error);
            assert_eq!(s.status().message.as_deref(), Some(messages::DISCONNECTED));
        }
    }

    #[test]
    fn test_transport_error_goes_error_and_releases() {
        let mut s = session();
        s.connect(&request());
        let id = s.active_session().unwrap();
        s.handle_event(SessionEvent::new(id, TransportEvent::Error("reset".to_string())));

        assert_eq!(s.state(), ConnectionState::Error);
        assert_eq!(s.status().message.as_deref(), Some(messages::TRANSPORT_ERROR));
        assert_eq!(s.active_session(), None);
        assert!(s.transport().calls.contains(&Call::Close(id)));
    }

    #[test]
    fn test_reconnect_closes_prior_before_opening_and_clears_buffer() {
        let mut s = session();
        s.connect(&request());
        let first = s.active_session().unwrap();
        s.handle_event(SessionEvent::new(first, TransportEvent::Opened));
        s.handle_event(SessionEvent::new(first, batch_frame(&[("1", "old")])));

        s.connect(&request());
        let second = s.active_session().unwrap();
        assert_ne!(first, second);
        assert!(s.buffer().is_empty());

        let calls = &s.transport().calls;
        let close_first = calls.iter().position(|c| *c == Call::Close(first));
        let open_second = calls
            .iter()
            .position(|c| matches!(c, Call::Open(id, _) if *id == second));
        assert!(close_first.unwrap() < open_second.unwrap());

        // A late frame from the first connection is ignored
        s.handle_event(SessionEvent::new(first, batch_frame(&[("2", "stale")])));
        s.handle_event(SessionEvent::new(second, TransportEvent::Opened));
        s.handle_event(SessionEvent::new(second, batch_frame(&[("3", "new")])));

        assert_eq!(lines(&s), vec!["new"]);
        assert_eq!(s.stats().stale_events, 1);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut s = session();
        assert_eq!(s.stop(), SessionChanges::empty());

        s.connect(&request());
        let id = s.active_session().unwrap();
        assert_eq!(s.stop(), SessionChanges::STATUS);
        assert_eq!(s.state(), ConnectionState::Idle);
        assert_eq!(s.status().message.as_deref(), Some(messages::STOPPED));

        assert_eq!(s.stop(), SessionChanges::empty());
        let closes = s
            .transport()
            .calls
            .iter()
            .filter(|c| **c == Call::Close(id))
            .count();
        assert_eq!(closes, 1);
    }

    #[test]
    fn test_stop_from_error_goes_idle() {
        let mut s = session();
        s.connect(&TailRequest::new(""));
        assert_eq!(s.state(), ConnectionState::Error);

        s.stop();
        assert_eq!(s.state(), ConnectionState::Idle);
    }

    #[test]
    fn test_invalid_selector_keeps_buffer_and_closes_prior() {
        let mut s = session();
        s.connect(&request());
        let id = s.active_session().unwrap();
        s.handle_event(SessionEvent::new(id, batch_frame(&[("1", "kept")])));

        s.connect(&TailRequest::new(""));
        assert_eq!(s.state(), ConnectionState::Error);
        assert_eq!(lines(&s), vec!["kept"]);
        assert!(s.transport().calls.contains(&Call::Close(id)));
    }

    #[test]
    fn test_unrecognised_frames_are_counted_not_fatal() {
        let mut s = session();
        s.connect(&request());
        s.handle_event(event(&s, TransportEvent::Opened));

        for frame in ["not json", r#"{"hello":1}"#] {
            let changes = s.handle_event(event(&s, TransportEvent::Text(frame.to_string())));
            assert_eq!(changes, SessionChanges::empty());
        }
        s.handle_event(event(&s, TransportEvent::Binary(vec![1, 2, 3])));

        assert_eq!(s.state(), ConnectionState::Streaming);
        assert_eq!(s.stats().frames_ignored, 3);
        assert_eq!(s.stats().frames_received, 2);
    }

    #[test]
    fn test_open_failure_goes_error() {
        let endpoint = StreamEndpoint::resolve("http://robot.local", "/api").unwrap();
        let transport = MockTransport {
            fail_open: true,
            ..MockTransport::default()
        };
        let mut s = StreamSession::new(transport, endpoint);
        s.connect(&request());

        assert_eq!(s.state(), ConnectionState::Error);
        assert_eq!(s.active_session(), None);
    }

    #[test]
    fn test_unsupported_scheme_goes_error() {
        let endpoint = StreamEndpoint::resolve("ftp://robot.local", "/api").unwrap();
        let mut s = StreamSession::new(MockTransport::default(), endpoint);
        s.connect(&request());

        assert_eq!(s.state(), ConnectionState::Error);
        assert_eq!(s.transport().opens(), 0);
    }

    #[test]
    fn test_overflow_across_frames_keeps_newest() {
        let mut s = session();
        s.connect(&request());
        let id = s.active_session().unwrap();

        let values: Vec<(String, String)> =
            (0..600).map(|i| (i.to_string(), format!("l{}", i))).collect();
        for chunk in values.chunks(150) {
            let pairs: Vec<(&str, &str)> =
                chunk.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
            s.handle_event(SessionEvent::new(id, batch_frame(&pairs)));
        }

        let expected: Vec<String> = (100..600).map(|i| format!("l{}", i)).collect();
        assert_eq!(lines(&s), expected);
    }
}
