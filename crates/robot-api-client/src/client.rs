//! Robot API client trait
//!
//! The console talks to the robot only through [`RobotApi`], so pages can be
//! exercised against an in-memory implementation.

use crate::types::{HealthStatus, SystemStats, WifiRequest, WifiStatus};
use async_trait::async_trait;

/// Robot HTTP API
///
/// Implementations must be `Send + Sync` so one client can be shared by the
/// tasks spawned from the middleware.
///
/// # Example
///
/// ```rust,ignore
/// use robot_api_client::RobotApi;
///
/// async fn robot_name(api: &dyn RobotApi) -> anyhow::Result<String> {
///     Ok(api.fetch_stats().await?.robot_name)
/// }
/// ```
#[async_trait]
pub trait RobotApi: Send + Sync {
    /// `GET /health`
    async fn health(&self) -> anyhow::Result<HealthStatus>;

    /// `GET /wifi`
    async fn fetch_wifi(&self) -> anyhow::Result<WifiStatus>;

    /// `POST /wifi`
    ///
    /// The robot switches its network mode after a successful save, so the
    /// connection may drop shortly afterwards.
    async fn save_wifi(&self, request: &WifiRequest) -> anyhow::Result<()>;

    /// `POST /wifi/clear`
    async fn clear_wifi(&self) -> anyhow::Result<()>;

    /// `GET /stats`
    async fn fetch_stats(&self) -> anyhow::Result<SystemStats>;
}
