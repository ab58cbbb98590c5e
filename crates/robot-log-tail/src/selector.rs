//! Label selector construction from the user's filter criteria

/// Selector shown in the custom field until the user edits it
pub const DEFAULT_CUSTOM_SELECTOR: &str = r#"{service="polyflow"}"#;

/// Which kind of log source the user is filtering on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// systemd unit, matched on the `service` label
    #[default]
    Service,
    /// ROS 2 node, matched on the `ros_node` label
    RosNode,
    /// Raw selector text typed by the user
    Custom,
}

impl FilterMode {
    /// All modes in display order
    pub const ALL: [FilterMode; 3] = [FilterMode::Service, FilterMode::RosNode, FilterMode::Custom];

    /// Label key bound by the synthesized selector (`None` for custom)
    pub fn label_key(&self) -> Option<&'static str> {
        match self {
            Self::Service => Some("service"),
            Self::RosNode => Some("ros_node"),
            Self::Custom => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Service => "Service",
            Self::RosNode => "ROS Node",
            Self::Custom => "Custom",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Service => "systemd service",
            Self::RosNode => "ROS 2 node",
            Self::Custom => "Raw Loki selector",
        }
    }

    /// Example value for the target field
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Service => "polyflow-webrtc.service",
            Self::RosNode => "rtabmap",
            Self::Custom => DEFAULT_CUSTOM_SELECTOR,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Service => Self::RosNode,
            Self::RosNode => Self::Custom,
            Self::Custom => Self::Service,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Self::Service => Self::Custom,
            Self::RosNode => Self::Service,
            Self::Custom => Self::RosNode,
        }
    }
}

/// Filter criteria as entered by the user
///
/// `target` feeds the service/ROS node modes, `custom` the custom mode.
/// Both are kept so switching modes does not lose input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub mode: FilterMode,
    pub target: String,
    pub custom: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            mode: FilterMode::default(),
            target: String::new(),
            custom: DEFAULT_CUSTOM_SELECTOR.to_string(),
        }
    }
}

impl FilterCriteria {
    /// Selector for the current criteria (empty when invalid)
    pub fn selector(&self) -> String {
        build_selector(self.mode, &self.target, &self.custom)
    }
}

/// Build the backend selector for a filter mode
///
/// Custom mode returns the trimmed text verbatim. The other modes bind their
/// label key to the trimmed target, e.g. `{service="polyflow-webrtc.service"}`,
/// and return an empty string when the target is blank.
pub fn build_selector(mode: FilterMode, target: &str, custom: &str) -> String {
    let Some(label_key) = mode.label_key() else {
        return custom.trim().to_string();
    };

    let value = target.trim();
    if value.is_empty() {
        return String::new();
    }

    format!("{{{}=\"{}\"}}", label_key, value)
}
