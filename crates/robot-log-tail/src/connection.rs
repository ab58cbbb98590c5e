//! Connection state shown to the operator

/// WebSocket close code for a normal closure
pub const NORMAL_CLOSURE: u16 = 1000;

/// Status texts reported alongside state transitions
pub mod messages {
    pub const SELECTOR_REQUIRED: &str = "selector required";
    pub const CONNECTING: &str = "Connecting...";
    pub const CONNECTED: &str = "Connected to log stream";
    pub const CLOSED: &str = "Log stream closed";
    pub const DISCONNECTED: &str = "Log stream disconnected unexpectedly";
    pub const TRANSPORT_ERROR: &str = "Log stream connection error";
    pub const STOPPED: &str = "Log stream stopped";
    pub const BACKEND_ERROR: &str = "Log provider reported an error";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Idle,
    Connecting,
    Streaming,
    Error,
}

impl ConnectionState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Connecting => "connecting",
            Self::Streaming => "streaming",
            Self::Error => "error",
        }
    }

    /// Whether a new stream may be started from this state
    pub fn can_start(&self) -> bool {
        matches!(self, Self::Idle | Self::Error)
    }

    /// Whether stop does anything from this state
    pub fn can_stop(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Connecting | Self::Streaming)
    }
}

/// Current state plus an optional human-readable message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectionStatus {
    pub state: ConnectionState,
    pub message: Option<String>,
}

impl ConnectionStatus {
    pub fn new(state: ConnectionState, message: impl Into<String>) -> Self {
        Self {
            state,
            message: Some(message.into()),
        }
    }
}
