//! Configuration for robot-console
//!
//! This crate provides:
//! - Config and cache directory paths
//! - Configuration file lookup (TOML)
//! - Application configuration ([`AppConfig`])

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::{normalize_api_base, AppConfig, DEFAULT_API_BASE, DEFAULT_ORIGIN};
pub use config_file::load_config_file;
