//! WebSocket implementation of the log stream [`Transport`]
//!
//! Each opened session runs as a task on a tokio runtime. Everything the
//! socket produces is forwarded to the event sink tagged with the session id;
//! the owner of the [`StreamSession`](robot_log_tail::StreamSession) feeds
//! those events back into `handle_event` on its own thread.

use futures_util::{SinkExt, StreamExt};
use log::{debug, warn};
use robot_log_tail::{SessionEvent, SessionId, TailError, Transport, TransportEvent};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

/// How long a server-initiated close may take to complete
const CLOSE_GRACE: Duration = Duration::from_secs(2);

/// Receives the events of every connection
pub type EventSink = Arc<dyn Fn(SessionEvent) + Send + Sync>;

pub struct WebSocketTransport {
    runtime: Handle,
    sink: EventSink,
    /// Cancel handles of the connections still running
    connections: HashMap<SessionId, oneshot::Sender<()>>,
}

impl WebSocketTransport {
    pub fn new(runtime: Handle, sink: EventSink) -> Self {
        Self {
            runtime,
            sink,
            connections: HashMap::new(),
        }
    }

    /// Number of connections not yet closed
    pub fn open_connections(&self) -> usize {
        self.connections.len()
    }
}

impl Transport for WebSocketTransport {
    fn open(&mut self, session: SessionId, url: &Url) -> Result<(), TailError> {
        match url.scheme() {
            "ws" | "wss" => {}
            other => return Err(TailError::UnsupportedScheme(other.to_string())),
        }

        let (cancel_tx, cancel_rx) = oneshot::channel();
        self.runtime.spawn(run_connection(
            session,
            url.to_string(),
            cancel_rx,
            Arc::clone(&self.sink),
        ));
        self.connections.insert(session, cancel_tx);
        Ok(())
    }

    fn close(&mut self, session: SessionId) {
        if let Some(cancel) = self.connections.remove(&session) {
            // The task may already have finished on its own
            let _ = cancel.send(());
        }
    }
}

impl Drop for WebSocketTransport {
    fn drop(&mut self) {
        for (_, cancel) in self.connections.drain() {
            let _ = cancel.send(());
        }
    }
}

async fn run_connection(
    session: SessionId,
    url: String,
    mut cancel: oneshot::Receiver<()>,
    sink: EventSink,
) {
    let emit = |event: TransportEvent| sink(SessionEvent::new(session, event));

    debug!("Log stream {} connecting to {}", session, url);
    let connected = tokio::select! {
        _ = &mut cancel => {
            debug!("Log stream {} cancelled while connecting", session);
            return;
        }
        result = connect_async(url.as_str()) => result,
    };

    let mut ws = match connected {
        Ok((ws, _response)) => ws,
        Err(e) => {
            warn!("Log stream {} failed to connect: {}", session, e);
            emit(TransportEvent::Error(e.to_string()));
            emit(TransportEvent::Closed {
                code: None,
                clean: false,
            });
            return;
        }
    };

    emit(TransportEvent::Opened);

    loop {
        tokio::select! {
            _ = &mut cancel => {
                debug!("Log stream {} closing", session);
                let frame = CloseFrame {
                    code: CloseCode::Normal,
                    reason: "".into(),
                };
                let _ = ws.close(Some(frame)).await;
                return;
            }
            message = ws.next() => match message {
                Some(Ok(Message::Text(text))) => emit(TransportEvent::Text(text)),
                Some(Ok(Message::Binary(data))) => emit(TransportEvent::Binary(data)),
                Some(Ok(Message::Close(frame))) => {
                    let code = frame.as_ref().map(|f| u16::from(f.code));
                    debug!("Log stream {} closed by server (code {:?})", session, code);
                    emit(TransportEvent::Closed { code, clean: true });

                    // Send the queued close reply, then wait for the server to hang up
                    let handshake = tokio::time::timeout(CLOSE_GRACE, async {
                        let _ = ws.flush().await;
                        while let Some(Ok(_)) = ws.next().await {}
                    });
                    if handshake.await.is_err() {
                        debug!("Log stream {} close handshake timed out", session);
                    }
                    return;
                }
                // Ping/pong are answered by tungstenite
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!("Log stream {} error: {}", session, e);
                    emit(TransportEvent::Error(e.to_string()));
                    emit(TransportEvent::Closed {
                        code: None,
                        clean: false,
                    });
                    return;
                }
                None => {
                    emit(TransportEvent::Closed {
                        code: None,
                        clean: false,
                    });
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn recording_transport(runtime: &tokio::runtime::Runtime) -> (WebSocketTransport, mpsc::Receiver<SessionEvent>) {
        let (tx, rx) = mpsc::channel();
        let tx = std::sync::Mutex::new(tx);
        let sink: EventSink = Arc::new(move |event| {
            if let Ok(tx) = tx.lock() {
                let _ = tx.send(event);
            }
        });
        (WebSocketTransport::new(runtime.handle().clone(), sink), rx)
    }

    #[test]
    fn test_refused_connection_reports_error_then_unclean_close() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (mut transport, events) = recording_transport(&runtime);
        let session = SessionId(7);

        let url = Url::parse("ws://127.0.0.1:9/api/logs/tail?query=%7Ba%3D%22b%22%7D").unwrap();
        transport.open(session, &url).unwrap();

        let first = events.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(first.session, session);
        assert!(matches!(first.event, TransportEvent::Error(_)));

        let second = events.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(
            second.event,
            TransportEvent::Closed {
                code: None,
                clean: false
            }
        );
    }

    #[test]
    fn test_server_close_is_acknowledged() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (mut transport, events) = recording_transport(&runtime);
        let listener = runtime
            .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
            .unwrap();
        let port = listener.local_addr().unwrap().port();

        let (reply_tx, reply_rx) = mpsc::channel();
        runtime.spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            let frame = CloseFrame {
                code: CloseCode::Normal,
                reason: "done".into(),
            };
            ws.close(Some(frame)).await.unwrap();
            let reply = ws.next().await;
            let _ = reply_tx.send(matches!(reply, Some(Ok(Message::Close(_)))));
        });

        let url = Url::parse(&format!("ws://127.0.0.1:{}/api/logs/tail", port)).unwrap();
        transport.open(SessionId(3), &url).unwrap();

        let opened = events.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(opened.event, TransportEvent::Opened);
        let closed = events.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(
            closed.event,
            TransportEvent::Closed {
                code: Some(1000),
                clean: true
            }
        );

        // The server sees a close reply, not a dropped connection
        assert!(reply_rx.recv_timeout(Duration::from_secs(10)).unwrap());
    }

    #[test]
    fn test_rejects_http_urls_and_ignores_unknown_close() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (mut transport, _events) = recording_transport(&runtime);

        let url = Url::parse("http://127.0.0.1:9/api/logs/tail").unwrap();
        assert!(transport.open(SessionId(1), &url).is_err());
        assert_eq!(transport.open_connections(), 0);

        transport.close(SessionId(42));
        assert_eq!(transport.open_connections(), 0);
    }
}
