//! Path utilities for setflow configuration files

use std::path::PathBuf;

/// Get the setflow config directory
///
/// Returns: `~/.config/setflow` (platform config dir, falling back to home)
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join("setflow")
}

/// Get the default config file path
///
/// Returns: `~/.config/setflow/config.yaml`
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.yaml")
}
