//! Application configuration
//!
//! Configuration loaded from `.robot-console.toml`, with environment
//! overrides applied on top.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Robot origin used when nothing is configured
pub const DEFAULT_ORIGIN: &str = "http://127.0.0.1:8082";

/// API base used when nothing (or only slashes) is configured
pub const DEFAULT_API_BASE: &str = "/api";

const ORIGIN_ENV: &str = "ROBOT_CONSOLE_ORIGIN";
const API_BASE_ENV: &str = "ROBOT_CONSOLE_API_BASE";

/// Application configuration loaded from .robot-console.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Scheme, host and port of the robot (e.g. "http://rover.local:8082")
    #[serde(default = "default_origin")]
    pub origin: String,

    /// API base path resolved against the origin, or an absolute URL
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Seconds between stats refreshes on the General page
    #[serde(default = "default_stats_interval_secs")]
    pub stats_interval_secs: u64,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_stats_interval_secs() -> u64 {
    15
}

fn default_request_timeout_secs() -> u64 {
    5
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            api_base: default_api_base(),
            stats_interval_secs: default_stats_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Load config from the first config file found, then apply environment overrides
    pub fn load() -> Self {
        let mut config = Self::from_file_content(crate::load_config_file().as_deref());
        config.apply_overrides(|key| env::var(key).ok());
        config.normalize();
        config
    }

    fn from_file_content(content: Option<&str>) -> Self {
        if let Some(content) = content {
            match toml::from_str(content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Apply `ROBOT_CONSOLE_ORIGIN` / `ROBOT_CONSOLE_API_BASE` from `lookup`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(origin) = lookup(ORIGIN_ENV).filter(|v| !v.trim().is_empty()) {
            log::debug!("{} overrides origin", ORIGIN_ENV);
            self.origin = origin.trim().to_string();
        }
        if let Some(api_base) = lookup(API_BASE_ENV) {
            log::debug!("{} overrides api_base", API_BASE_ENV);
            self.api_base = api_base;
        }
    }

    fn normalize(&mut self) {
        self.api_base = normalize_api_base(&self.api_base);
        if self.stats_interval_secs == 0 {
            self.stats_interval_secs = default_stats_interval_secs();
        }
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = default_request_timeout_secs();
        }
    }

    pub fn stats_interval(&self) -> Duration {
        Duration::from_secs(self.stats_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Trim the API base and drop trailing slashes; blank input means `/api`
pub fn normalize_api_base(raw: &str) -> String {
    let normalized = raw.trim().trim_end_matches('/');
    if normalized.is_empty() {
        DEFAULT_API_BASE.to_string()
    } else {
        normalized.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.origin, "http://127.0.0.1:8082");
        assert_eq!(config.api_base, "/api");
        assert_eq!(config.stats_interval(), Duration::from_secs(15));
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml = r#"
            origin = "http://rover.local:8082"
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.origin, "http://rover.local:8082");
        // Other fields should use defaults
        assert_eq!(config.api_base, "/api");
        assert_eq!(config.stats_interval_secs, 15);
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let config = AppConfig::from_file_content(Some("origin = [not toml"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("ROBOT_CONSOLE_ORIGIN", " https://robot.example.com "),
            ("ROBOT_CONSOLE_API_BASE", "/proxy/api//"),
        ]);
        let mut config = AppConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));
        config.normalize();

        assert_eq!(config.origin, "https://robot.example.com");
        assert_eq!(config.api_base, "/proxy/api");
    }

    #[test]
    fn test_zero_intervals_use_defaults() {
        let mut config: AppConfig =
            toml::from_str("stats_interval_secs = 0\nrequest_timeout_secs = 0").unwrap();
        config.normalize();
        assert_eq!(config.stats_interval_secs, 15);
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn test_normalize_api_base() {
        assert_eq!(normalize_api_base("/api"), "/api");
        assert_eq!(normalize_api_base(" /api/// "), "/api");
        assert_eq!(normalize_api_base("https://robot/api/"), "https://robot/api");
        assert_eq!(normalize_api_base(""), "/api");
        assert_eq!(normalize_api_base("///"), "/api");
    }
}
