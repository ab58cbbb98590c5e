use chrono::{DateTime, Local};
use robot_api_client::SystemStats;

/// General page state
#[derive(Debug, Clone, Default)]
pub struct GeneralState {
    pub stats: Option<SystemStats>,
    /// Error of the latest fetch; cleared by the next successful one
    pub error: Option<String>,
    pub loading: bool,
    pub last_updated: Option<DateTime<Local>>,
}
