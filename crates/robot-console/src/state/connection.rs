//! Connection (Wi-Fi) Form State

use robot_api_client::{WifiRequest, WifiStatus};

/// Placeholder shown when a passphrase is stored on the robot
pub const PASSWORD_MASK: &str = "********";

pub const SSID_REQUIRED: &str = "SSID is required";
pub const REENTER_PASSWORD: &str = "Re-enter the password before saving";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionField {
    #[default]
    Ssid,
    Password,
}

impl ConnectionField {
    pub fn next(self) -> Self {
        match self {
            Self::Ssid => Self::Password,
            Self::Password => Self::Ssid,
        }
    }

    pub fn prev(self) -> Self {
        self.next()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveStatus {
    #[default]
    Idle,
    Saving,
    Success,
    Error,
}

/// State for the Wi-Fi form
#[derive(Debug, Clone, Default)]
pub struct ConnectionFormState {
    pub ssid: String,
    pub password: String,
    /// The password field still holds [`PASSWORD_MASK`] from the last load
    pub password_masked: bool,
    pub focused_field: ConnectionField,
    pub configured: bool,
    pub connected: bool,
    pub loading: bool,
    pub load_error: Option<String>,
    pub save_status: SaveStatus,
    pub status_message: String,
}

impl ConnectionFormState {
    /// Fill the form from the robot's stored configuration
    pub fn apply_status(&mut self, status: &WifiStatus) {
        self.configured = status.configured;
        if status.configured {
            self.ssid = status.ssid.clone().unwrap_or_default();
            self.password_masked = status.psk_set;
            self.password = if status.psk_set {
                PASSWORD_MASK.to_string()
            } else {
                String::new()
            };
            self.connected = status.connected;
        }
    }

    pub fn push_char(&mut self, c: char) {
        match self.focused_field {
            ConnectionField::Ssid => self.ssid.push(c),
            ConnectionField::Password => {
                // First keystroke replaces the mask
                if self.password_masked {
                    self.password.clear();
                    self.password_masked = false;
                }
                self.password.push(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        match self.focused_field {
            ConnectionField::Ssid => {
                self.ssid.pop();
            }
            ConnectionField::Password => {
                if self.password_masked {
                    self.password.clear();
                    self.password_masked = false;
                } else {
                    self.password.pop();
                }
            }
        }
    }

    pub fn clear_field(&mut self) {
        match self.focused_field {
            ConnectionField::Ssid => self.ssid.clear(),
            ConnectionField::Password => {
                self.password.clear();
                self.password_masked = false;
            }
        }
    }

    pub fn is_saving(&self) -> bool {
        self.save_status == SaveStatus::Saving
    }

    /// Validate the form and build the save request
    pub fn wifi_request(&self) -> Result<WifiRequest, &'static str> {
        if self.ssid.is_empty() {
            return Err(SSID_REQUIRED);
        }
        if self.password_masked {
            return Err(REENTER_PASSWORD);
        }
        Ok(WifiRequest::new(self.ssid.clone(), &self.password))
    }

    /// Forget everything after the stored configuration was cleared
    pub fn reset(&mut self) {
        self.ssid.clear();
        self.password.clear();
        self.password_masked = false;
        self.configured = false;
        self.connected = false;
        self.focused_field = ConnectionField::default();
    }
}
