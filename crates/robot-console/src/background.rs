//! Background worker thread that processes actions through middleware
//!
//! - Main thread handles rendering, key polling and reducing for display
//! - Background thread runs the middleware chain (API calls, log stream session)
//! - Communication happens via channels
//!
//! Actions dispatched by middleware via Dispatcher re-enter the middleware
//! chain, e.g. `Save` -> `Saving` -> `Saved`. Transport events of the log
//! stream arrive on the same channel, so they are serialized with user input.
//!
//! The worker keeps its own copy of the state and reduces every action it
//! forwards, so middleware always sees the effect of all earlier actions.
//! The main thread runs the same reducers on the same actions in the same
//! order.

use crate::actions::{Action, GlobalAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::reducers;
use crate::state::AppState;
use std::io;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

/// Spawn the background worker thread
///
/// - `action_rx`: receives actions from main thread and from Dispatcher (re-entry)
/// - `action_tx`: used to create the Dispatcher handed to middleware
/// - `result_tx`: sends non-consumed actions to the main thread for reducers
/// - `state`: initial state, reduced in step with the forwarded actions
/// - `middleware`: the middleware chain, run in order
pub fn spawn_background_worker(
    action_rx: Receiver<Action>,
    action_tx: Sender<Action>,
    result_tx: Sender<Action>,
    state: AppState,
    middleware: Vec<Box<dyn Middleware + Send>>,
) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("middleware".to_string())
        .spawn(move || background_loop(action_rx, action_tx, result_tx, state, middleware))
}

fn background_loop(
    action_rx: Receiver<Action>,
    action_tx: Sender<Action>,
    result_tx: Sender<Action>,
    mut state: AppState,
    mut middleware: Vec<Box<dyn Middleware + Send>>,
) {
    log::info!("Background worker started");

    let dispatcher = Dispatcher::new(action_tx);

    loop {
        let action = match action_rx.recv_timeout(Duration::from_millis(10)) {
            Ok(action) => action,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                log::info!("Action channel disconnected, shutting down");
                break;
            }
        };

        let is_quit = matches!(action, Action::Global(GlobalAction::Quit));

        let mut should_forward = true;
        for mw in &mut middleware {
            if !mw.handle(&action, &state, &dispatcher) {
                should_forward = false;
                break;
            }
        }

        if should_forward {
            state = reducers::reduce(state, &action);
            if result_tx.send(action).is_err() {
                log::error!("Result channel disconnected, shutting down");
                break;
            }
        }

        if is_quit {
            log::info!("Background worker received shutdown signal");
            break;
        }
    }

    // Dropping the chain closes the log stream and stops runtimes
    drop(middleware);
    log::info!("Background worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::GeneralAction;
    use crate::middleware::keyboard::KeyboardMiddleware;
    use crate::middleware::log_tail::LogTailMiddleware;
    use crate::state::Page;
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use robot_api_client::url::Url;
    use robot_log_tail::{SessionId, StreamEndpoint, TailError, Transport};
    use std::sync::mpsc;
    use std::sync::{Arc, Mutex};

    /// Consumes every refresh request
    struct SwallowRefresh;

    impl Middleware for SwallowRefresh {
        fn handle(&mut self, action: &Action, _state: &AppState, _d: &Dispatcher) -> bool {
            !matches!(action, Action::General(GeneralAction::Refresh))
        }
    }

    #[test]
    fn test_forwards_unconsumed_and_stops_on_quit() {
        let (action_tx, action_rx) = mpsc::channel();
        let (result_tx, result_rx) = mpsc::channel();
        let worker = spawn_background_worker(
            action_rx,
            action_tx.clone(),
            result_tx,
            AppState::default(),
            vec![Box::new(SwallowRefresh)],
        )
        .unwrap();

        action_tx
            .send(Action::General(GeneralAction::Refresh))
            .unwrap();
        action_tx
            .send(Action::Global(GlobalAction::Bootstrap))
            .unwrap();
        action_tx.send(Action::Global(GlobalAction::Quit)).unwrap();
        worker.join().unwrap();

        let forwarded: Vec<Action> = result_rx.try_iter().collect();
        assert_eq!(forwarded.len(), 2);
        assert!(matches!(
            forwarded[0],
            Action::Global(GlobalAction::Bootstrap)
        ));
        assert!(matches!(forwarded[1], Action::Global(GlobalAction::Quit)));
    }

    type Opened = Arc<Mutex<Vec<Url>>>;

    struct RecordingTransport {
        opened: Opened,
    }

    impl Transport for RecordingTransport {
        fn open(&mut self, _session: SessionId, url: &Url) -> Result<(), TailError> {
            self.opened.lock().unwrap().push(url.clone());
            Ok(())
        }

        fn close(&mut self, _session: SessionId) {}
    }

    fn press(action_tx: &Sender<Action>, code: KeyCode) {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        action_tx
            .send(Action::Global(GlobalAction::KeyPressed(key)))
            .unwrap();
    }

    #[test]
    fn test_start_sees_characters_typed_just_before() {
        let (action_tx, action_rx) = mpsc::channel();
        let (result_tx, _result_rx) = mpsc::channel();
        let opened = Opened::default();
        let recorded = Arc::clone(&opened);
        let endpoint = StreamEndpoint::resolve("http://robot.local:8082", "/api").unwrap();
        let log_tail = LogTailMiddleware::with_transport(
            endpoint,
            Box::new(move |_: &Dispatcher| RecordingTransport {
                opened: Arc::clone(&recorded),
            }),
        );
        let state = AppState {
            page: Page::Logs,
            ..AppState::default()
        };

        let worker = spawn_background_worker(
            action_rx,
            action_tx.clone(),
            result_tx,
            state,
            vec![Box::new(KeyboardMiddleware::new()), Box::new(log_tail)],
        )
        .unwrap();

        // Nothing reduces on the main thread in between
        for c in ['s', 'v', 'c'] {
            press(&action_tx, KeyCode::Char(c));
        }
        press(&action_tx, KeyCode::Enter);

        let deadline = std::time::Instant::now() + Duration::from_secs(2);
        while opened.lock().unwrap().is_empty() && std::time::Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        action_tx.send(Action::Global(GlobalAction::Quit)).unwrap();
        worker.join().unwrap();

        let opened = opened.lock().unwrap();
        assert_eq!(opened.len(), 1);
        let query: Vec<(String, String)> = opened[0]
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(query.contains(&("query".to_string(), r#"{service="svc"}"#.to_string())));
    }
}
