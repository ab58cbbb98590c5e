//! Dispatcher for middleware action dispatch
//!
//! Actions dispatched here go back through the full middleware chain (via
//! the action channel of the background worker). Tasks running on the tokio
//! runtime and the WebSocket transport hold clones to report results.

use crate::actions::Action;
use std::sync::mpsc::Sender;

#[derive(Clone)]
pub struct Dispatcher {
    action_tx: Sender<Action>,
}

impl Dispatcher {
    /// `action_tx` must feed the background worker so dispatched actions
    /// re-enter the middleware chain
    pub fn new(action_tx: Sender<Action>) -> Self {
        Self { action_tx }
    }

    pub fn dispatch(&self, action: Action) {
        if let Err(e) = self.action_tx.send(action) {
            log::error!("Dispatcher: failed to send action: {}", e);
        }
    }
}
