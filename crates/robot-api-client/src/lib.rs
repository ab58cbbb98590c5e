//! Robot API client
//!
//! Talks to the robot's HTTP API (health, Wi-Fi configuration, system stats)
//! and provides the WebSocket [`Transport`](robot_log_tail::Transport) used
//! to tail logs.
//!
//! ```text
//! ┌──────────────────────┐      ┌──────────────────────────────┐
//! │   RobotApi trait      │      │  robot_log_tail::Transport    │
//! └──────────┬───────────┘      └──────────────┬───────────────┘
//!            ▼                                 ▼
//!  ┌──────────────────┐            ┌─────────────────────────┐
//!  │  HttpRobotApi    │            │  WebSocketTransport     │
//!  │  (reqwest)       │            │  (tokio-tungstenite)    │
//!  └──────────────────┘            └─────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use robot_api_client::{HttpRobotApi, RobotApi};
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let base = url::Url::parse("http://robot.local:8082/api")?;
//! let api = HttpRobotApi::new(base, Duration::from_secs(5))?;
//! let stats = api.fetch_stats().await?;
//! println!("{}: {:.1}% CPU", stats.robot_name, stats.cpu_usage);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod http_client;
pub mod types;
pub mod websocket;

pub use client::RobotApi;
pub use http_client::HttpRobotApi;
pub use types::{HealthStatus, SystemStats, WifiRequest, WifiStatus};
pub use websocket::{EventSink, WebSocketTransport};

// Re-export url so consumers share the same version
pub use url;
