use robot_api_client::SystemStats;

/// General page actions
#[derive(Debug, Clone)]
pub enum GeneralAction {
    /// Fetch stats now (handled by the robot API middleware)
    Refresh,
    Loading,
    StatsLoaded(SystemStats),
    StatsFailed(String),
}
