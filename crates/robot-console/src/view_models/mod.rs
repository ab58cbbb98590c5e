//! View models - presentation data computed from state before rendering

pub mod general;
pub mod logs;
pub mod status_bar;
pub mod tabs;

pub use general::GeneralViewModel;
pub use logs::LogsViewModel;
pub use status_bar::StatusBarViewModel;
pub use tabs::PageTabsViewModel;
