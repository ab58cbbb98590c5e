//! General Page View Model

use crate::state::AppState;

const MISSING: &str = "—";

#[derive(Debug, Clone, PartialEq)]
pub struct GeneralViewModel {
    pub robot_name: String,
    pub cpu: String,
    pub ram: String,
    pub temperature: String,
    /// "Updated 14:32:05", "Loading..." or empty
    pub updated: String,
    pub error: Option<String>,
}

impl GeneralViewModel {
    pub fn from_state(state: &AppState) -> Self {
        let general = &state.general;

        let updated = if general.loading {
            "Loading...".to_string()
        } else {
            general
                .last_updated
                .map(|ts| format!("Updated {}", ts.format("%H:%M:%S")))
                .unwrap_or_default()
        };

        let Some(stats) = general.stats.as_ref() else {
            return Self {
                robot_name: MISSING.to_string(),
                cpu: MISSING.to_string(),
                ram: MISSING.to_string(),
                temperature: MISSING.to_string(),
                updated,
                error: general.error.clone(),
            };
        };

        Self {
            robot_name: stats.robot_name.clone(),
            cpu: format!("{:.1}%", stats.cpu_usage),
            ram: format!("{:.1}%", stats.ram_usage),
            temperature: format_temperature(stats.temperature_c),
            updated,
            error: general.error.clone(),
        }
    }
}

fn format_temperature(celsius: Option<f64>) -> String {
    match celsius {
        Some(value) => format!("{:.1} °C", value),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use robot_api_client::SystemStats;

    #[test]
    fn test_formats_stats() {
        let mut state = AppState::default();
        state.general.stats = Some(SystemStats {
            robot_name: "rover-1".to_string(),
            cpu_usage: 12.345,
            ram_usage: 40.0,
            temperature_c: Some(48.26),
        });

        let vm = GeneralViewModel::from_state(&state);
        assert_eq!(
            vm,
            GeneralViewModel {
                robot_name: "rover-1".to_string(),
                cpu: "12.3%".to_string(),
                ram: "40.0%".to_string(),
                temperature: "48.3 °C".to_string(),
                updated: String::new(),
                error: None,
            }
        );
    }

    #[test]
    fn test_missing_temperature() {
        assert_eq!(format_temperature(None), "N/A");
    }

    #[test]
    fn test_no_stats_yet() {
        let mut state = AppState::default();
        state.general.loading = true;
        state.general.error = Some("Failed to load stats".to_string());

        let vm = GeneralViewModel::from_state(&state);
        assert_eq!(vm.cpu, "—");
        assert_eq!(vm.updated, "Loading...");
        assert_eq!(vm.error.as_deref(), Some("Failed to load stats"));
    }
}
