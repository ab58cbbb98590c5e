//! Robot API Middleware
//!
//! Owns every HTTP interaction with the robot:
//! - Health check on Bootstrap
//! - Wi-Fi configuration (load, save, clear) for the Connection page
//! - Periodic stats polling while the General page is shown
//!
//! Requests run on a tokio runtime owned by the middleware and report back
//! through the dispatcher.

use crate::actions::{Action, ConnectionAction, GeneralAction, GlobalAction, StatusBarAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::{AppState, Page};
use robot_api_client::{RobotApi, WifiRequest};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

const SOURCE_GENERAL: &str = "General";
const SOURCE_CONNECTION: &str = "Connection";
const SOURCE_API: &str = "API";

pub struct RobotApiMiddleware {
    runtime: Runtime,
    api: Arc<dyn RobotApi>,
    stats_interval: Duration,
    /// Stats polling task, alive only while the General page is shown
    poller: Option<JoinHandle<()>>,
}

impl RobotApiMiddleware {
    pub fn new(api: Arc<dyn RobotApi>, stats_interval: Duration) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("robot-api")
            .enable_all()
            .build()?;

        Ok(Self {
            runtime,
            api,
            stats_interval,
            poller: None,
        })
    }

    fn check_health(&self, dispatcher: &Dispatcher) {
        let api = Arc::clone(&self.api);
        let dispatcher = dispatcher.clone();

        self.runtime.spawn(async move {
            match api.health().await {
                Ok(health) if health.is_ok() => {
                    log::info!("Robot API healthy");
                    dispatcher.dispatch(Action::StatusBar(StatusBarAction::success(
                        "Robot API reachable",
                        SOURCE_API,
                    )));
                }
                Ok(health) => {
                    log::warn!("Robot API reports status {:?}", health.status);
                    dispatcher.dispatch(Action::StatusBar(StatusBarAction::warning(
                        format!("Robot API status: {}", health.status),
                        SOURCE_API,
                    )));
                }
                Err(e) => {
                    log::warn!("Health check failed: {:#}", e);
                    dispatcher.dispatch(Action::StatusBar(StatusBarAction::warning(
                        format!("Robot API unreachable: {}", e),
                        SOURCE_API,
                    )));
                }
            }
        });
    }

    /// Start polling stats; the first fetch happens immediately
    fn start_poller(&mut self, dispatcher: &Dispatcher) {
        if self.poller.as_ref().is_some_and(|task| !task.is_finished()) {
            return;
        }

        let api = Arc::clone(&self.api);
        let dispatcher = dispatcher.clone();
        let period = self.stats_interval;

        log::debug!("Starting stats poller every {:?}", period);
        self.poller = Some(self.runtime.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                fetch_stats(api.as_ref(), &dispatcher).await;
            }
        }));
    }

    fn stop_poller(&mut self) {
        if let Some(task) = self.poller.take() {
            log::debug!("Stopping stats poller");
            task.abort();
        }
    }

    fn refresh_stats(&self, dispatcher: &Dispatcher) {
        let api = Arc::clone(&self.api);
        let dispatcher = dispatcher.clone();
        self.runtime.spawn(async move {
            fetch_stats(api.as_ref(), &dispatcher).await;
        });
    }

    fn load_wifi(&self, dispatcher: &Dispatcher) {
        let api = Arc::clone(&self.api);
        let dispatcher = dispatcher.clone();

        self.runtime.spawn(async move {
            match api.fetch_wifi().await {
                Ok(status) => {
                    log::info!(
                        "Loaded Wi-Fi status (configured: {}, connected: {})",
                        status.configured,
                        status.connected
                    );
                    dispatcher.dispatch(Action::Connection(ConnectionAction::Loaded(status)));
                }
                Err(e) => {
                    log::error!("Failed to load Wi-Fi status: {:#}", e);
                    dispatcher.dispatch(Action::Connection(ConnectionAction::LoadFailed(
                        e.to_string(),
                    )));
                    dispatcher.dispatch(Action::StatusBar(StatusBarAction::warning(
                        e.to_string(),
                        SOURCE_CONNECTION,
                    )));
                }
            }
        });
    }

    fn save_wifi(&self, request: WifiRequest, dispatcher: &Dispatcher) {
        let api = Arc::clone(&self.api);
        let dispatcher = dispatcher.clone();

        dispatcher.dispatch(Action::Connection(ConnectionAction::Saving));
        dispatcher.dispatch(Action::StatusBar(StatusBarAction::running(
            format!("Saving Wi-Fi network {}", request.ssid),
            SOURCE_CONNECTION,
        )));

        self.runtime.spawn(async move {
            match api.save_wifi(&request).await {
                Ok(()) => {
                    log::info!("Saved Wi-Fi network {}", request.ssid);
                    dispatcher.dispatch(Action::Connection(ConnectionAction::Saved));
                    dispatcher.dispatch(Action::StatusBar(StatusBarAction::success(
                        "Wi-Fi saved, robot is switching modes",
                        SOURCE_CONNECTION,
                    )));
                }
                Err(e) => {
                    log::error!("Failed to save Wi-Fi: {:#}", e);
                    dispatcher.dispatch(Action::Connection(ConnectionAction::SaveFailed(
                        e.to_string(),
                    )));
                    dispatcher.dispatch(Action::StatusBar(StatusBarAction::error(
                        e.to_string(),
                        SOURCE_CONNECTION,
                    )));
                }
            }
        });
    }

    fn clear_wifi(&self, dispatcher: &Dispatcher) {
        let api = Arc::clone(&self.api);
        let dispatcher = dispatcher.clone();

        self.runtime.spawn(async move {
            match api.clear_wifi().await {
                Ok(()) => {
                    log::info!("Cleared Wi-Fi configuration");
                    dispatcher.dispatch(Action::Connection(ConnectionAction::Cleared));
                    dispatcher.dispatch(Action::StatusBar(StatusBarAction::info(
                        "Wi-Fi configuration cleared",
                        SOURCE_CONNECTION,
                    )));
                }
                Err(e) => {
                    log::error!("Failed to clear Wi-Fi: {:#}", e);
                    dispatcher.dispatch(Action::Connection(ConnectionAction::SaveFailed(
                        e.to_string(),
                    )));
                    dispatcher.dispatch(Action::StatusBar(StatusBarAction::error(
                        e.to_string(),
                        SOURCE_CONNECTION,
                    )));
                }
            }
        });
    }

    /// Side effects of showing `page`
    fn enter_page(&mut self, page: Page, dispatcher: &Dispatcher) {
        match page {
            Page::General => self.start_poller(dispatcher),
            Page::Connection => {
                self.stop_poller();
                dispatcher.dispatch(Action::Connection(ConnectionAction::Load));
            }
            Page::Logs => self.stop_poller(),
        }
    }
}

async fn fetch_stats(api: &dyn RobotApi, dispatcher: &Dispatcher) {
    dispatcher.dispatch(Action::General(GeneralAction::Loading));
    match api.fetch_stats().await {
        Ok(stats) => {
            log::debug!("Stats for {}: cpu {:.1}%", stats.robot_name, stats.cpu_usage);
            dispatcher.dispatch(Action::General(GeneralAction::StatsLoaded(stats)));
        }
        Err(e) => {
            log::warn!("Failed to load stats: {:#}", e);
            dispatcher.dispatch(Action::General(GeneralAction::StatsFailed(e.to_string())));
            dispatcher.dispatch(Action::StatusBar(StatusBarAction::warning(
                e.to_string(),
                SOURCE_GENERAL,
            )));
        }
    }
}

impl Drop for RobotApiMiddleware {
    fn drop(&mut self) {
        self.stop_poller();
    }
}

impl Middleware for RobotApiMiddleware {
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool {
        match action {
            Action::Global(GlobalAction::Bootstrap) => {
                self.check_health(dispatcher);
                self.enter_page(state.page, dispatcher);
                true
            }
            Action::Global(GlobalAction::SelectPage(page)) => {
                if *page != state.page {
                    self.enter_page(*page, dispatcher);
                }
                true
            }
            Action::Global(GlobalAction::Quit) => {
                self.stop_poller();
                true
            }

            Action::General(GeneralAction::Refresh) => {
                self.refresh_stats(dispatcher);
                false
            }

            Action::Connection(ConnectionAction::Load) => {
                self.load_wifi(dispatcher);
                true // reducer marks the form as loading
            }
            Action::Connection(ConnectionAction::Save) => {
                if state.connection.is_saving() {
                    log::debug!("Save already in flight");
                    return false;
                }
                match state.connection.wifi_request() {
                    Ok(request) => self.save_wifi(request, dispatcher),
                    Err(message) => {
                        dispatcher.dispatch(Action::Connection(ConnectionAction::SaveFailed(
                            message.to_string(),
                        )));
                    }
                }
                false
            }
            Action::Connection(ConnectionAction::Clear) => {
                if state.connection.is_saving() {
                    return false;
                }
                dispatcher.dispatch(Action::Connection(ConnectionAction::Saving));
                self.clear_wifi(dispatcher);
                false
            }

            _ => true,
        }
    }
}
