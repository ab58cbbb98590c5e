//! Log Tail Middleware
//!
//! Owns the single [`StreamSession`] of the console. Start/Stop requests and
//! raw transport events are applied to the session here, on the background
//! thread, and every change is republished as a [`LogsSnapshot`] for the
//! reducer. Leaving the Logs page stops the stream.

use crate::actions::{Action, GlobalAction, LogsAction, StatusBarAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::{AppState, LogsSnapshot, Page};
use robot_api_client::{EventSink, WebSocketTransport};
use robot_log_tail::{
    ConnectionState, LogEntry, SessionChanges, StreamEndpoint, StreamSession, TailRequest,
    Transport,
};
use std::sync::Arc;
use tokio::runtime::Runtime;

const SOURCE: &str = "Logs";

/// Builds the transport once the dispatcher for its events is known
type TransportFactory<T> = Box<dyn Fn(&Dispatcher) -> T + Send>;

pub struct LogTailMiddleware<T: Transport = WebSocketTransport> {
    endpoint: StreamEndpoint,
    make_transport: TransportFactory<T>,
    session: Option<StreamSession<T>>,
    /// Entries of the last published snapshot
    entries: Arc<Vec<LogEntry>>,
    /// Declared last so open connections are closed before the runtime goes
    _runtime: Option<Runtime>,
}

impl LogTailMiddleware<WebSocketTransport> {
    /// Tail over WebSockets on a dedicated runtime
    pub fn new(endpoint: StreamEndpoint) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("log-tail")
            .enable_all()
            .build()?;
        let handle = runtime.handle().clone();

        let make_transport: TransportFactory<WebSocketTransport> =
            Box::new(move |dispatcher: &Dispatcher| {
                let dispatcher = dispatcher.clone();
                let sink: EventSink = Arc::new(move |event| {
                    dispatcher.dispatch(Action::Logs(LogsAction::TransportEvent(event)));
                });
                WebSocketTransport::new(handle.clone(), sink)
            });

        let mut middleware = Self::with_transport(endpoint, make_transport);
        middleware._runtime = Some(runtime);
        Ok(middleware)
    }
}

impl<T: Transport> LogTailMiddleware<T> {
    pub fn with_transport(endpoint: StreamEndpoint, make_transport: TransportFactory<T>) -> Self {
        Self {
            endpoint,
            make_transport,
            session: None,
            entries: Arc::default(),
            _runtime: None,
        }
    }

    fn session(&mut self, dispatcher: &Dispatcher) -> &mut StreamSession<T> {
        let endpoint = &self.endpoint;
        let make_transport = &self.make_transport;
        self.session.get_or_insert_with(|| {
            log::debug!("Creating log stream session for {}", endpoint.base_url());
            StreamSession::new(make_transport(dispatcher), endpoint.clone())
        })
    }

    /// Republish whatever `changes` marks as dirty
    fn publish(&mut self, changes: SessionChanges, dispatcher: &Dispatcher) {
        if changes.is_empty() {
            return;
        }
        let Some(session) = self.session.as_ref() else {
            return;
        };

        if changes.contains(SessionChanges::BUFFER) {
            self.entries = Arc::new(session.buffer().to_vec());
        }

        let status = session.status().clone();
        if changes.contains(SessionChanges::STATUS) {
            let message = status
                .message
                .clone()
                .unwrap_or_else(|| status.state.label().to_string());
            let push = match status.state {
                ConnectionState::Connecting => StatusBarAction::running(message, SOURCE),
                ConnectionState::Streaming => StatusBarAction::success(message, SOURCE),
                ConnectionState::Idle => StatusBarAction::info(message, SOURCE),
                ConnectionState::Error => StatusBarAction::error(message, SOURCE),
            };
            dispatcher.dispatch(Action::StatusBar(push));
        }

        dispatcher.dispatch(Action::Logs(LogsAction::SessionUpdated(LogsSnapshot {
            status,
            entries: Arc::clone(&self.entries),
            stats: session.stats(),
        })));
    }
}

impl<T: Transport + Send> Middleware for LogTailMiddleware<T> {
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool {
        if let Action::Global(GlobalAction::SelectPage(page)) = action {
            if state.page == Page::Logs && *page != Page::Logs {
                if let Some(session) = self.session.as_mut().filter(|s| s.state().can_stop()) {
                    log::info!("Leaving Logs page, stopping log tail");
                    let changes = session.stop();
                    self.publish(changes, dispatcher);
                }
            }
            return true;
        }

        let Action::Logs(logs_action) = action else {
            return true;
        };

        let changes = match logs_action {
            LogsAction::Start => {
                let session = self.session(dispatcher);
                if !session.state().can_start() {
                    log::debug!("Ignoring start while {}", session.state().label());
                    return false;
                }
                let request = TailRequest::from_input(
                    state.logs.selector(),
                    &state.logs.limit,
                    &state.logs.delay_for,
                );
                log::info!("Starting log tail for {}", request.selector);
                session.connect(&request)
            }
            LogsAction::Stop => match self.session.as_mut() {
                Some(session) if session.state().can_stop() => session.stop(),
                _ => return false,
            },
            LogsAction::TransportEvent(event) => match self.session.as_mut() {
                Some(session) => session.handle_event(event.clone()),
                None => return false,
            },
            _ => return true,
        };

        self.publish(changes, dispatcher);
        false
    }
}
