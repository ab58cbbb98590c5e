use robot_api_client::WifiStatus;

/// Connection page (Wi-Fi form) actions
#[derive(Debug, Clone)]
pub enum ConnectionAction {
    NextField,
    PrevField,
    Char(char),
    Backspace,
    ClearField,

    /// Fetch the stored configuration
    Load,
    Loaded(WifiStatus),
    LoadFailed(String),

    /// Validate and submit the form
    Save,
    Saving,
    Saved,
    SaveFailed(String),

    /// Remove the stored configuration
    Clear,
    Cleared,
}
