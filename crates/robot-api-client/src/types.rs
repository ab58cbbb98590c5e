//! Wire types of the robot HTTP API

use serde::{Deserialize, Serialize};

/// Stored Wi-Fi client configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WifiStatus {
    pub configured: bool,
    #[serde(default)]
    pub ssid: Option<String>,
    /// Whether a passphrase is stored (the passphrase itself is never sent)
    #[serde(default)]
    pub psk_set: bool,
    #[serde(default)]
    pub connected: bool,
}

/// Body of a Wi-Fi save request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WifiRequest {
    pub ssid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psk: Option<String>,
}

impl WifiRequest {
    /// Build a request; an empty passphrase is omitted
    pub fn new(ssid: impl Into<String>, psk: &str) -> Self {
        Self {
            ssid: ssid.into(),
            psk: (!psk.is_empty()).then(|| psk.to_string()),
        }
    }
}

/// Robot health snapshot
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStats {
    pub robot_name: String,
    /// CPU usage in percent
    pub cpu_usage: f64,
    /// RAM usage in percent
    pub ram_usage: f64,
    #[serde(default)]
    pub temperature_c: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wifi_status_defaults() {
        let status: WifiStatus = serde_json::from_str(r#"{"configured":false}"#).unwrap();
        assert_eq!(status, WifiStatus::default());

        let status: WifiStatus = serde_json::from_str(
            r#"{"configured":true,"ssid":"shop","pskSet":true,"connected":true}"#,
        )
        .unwrap();
        assert_eq!(status.ssid.as_deref(), Some("shop"));
        assert!(status.psk_set);
        assert!(status.connected);
    }

    #[test]
    fn test_wifi_request_omits_empty_psk() {
        let open = serde_json::to_value(WifiRequest::new("guest", "")).unwrap();
        assert_eq!(open, serde_json::json!({"ssid": "guest"}));

        let secured = serde_json::to_value(WifiRequest::new("shop", "hunter22")).unwrap();
        assert_eq!(secured, serde_json::json!({"ssid": "shop", "psk": "hunter22"}));
    }

    #[test]
    fn test_system_stats_null_temperature() {
        let stats: SystemStats = serde_json::from_str(
            r#"{"robotName":"rover-1","cpuUsage":12.5,"ramUsage":40.0,"temperatureC":null}"#,
        )
        .unwrap();
        assert_eq!(stats.robot_name, "rover-1");
        assert_eq!(stats.temperature_c, None);
    }
}
