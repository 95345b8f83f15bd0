//! Default configuration values.
//!
//! Used by `serde`'s `default` attribute in the configuration structures.

use crate::config::{LoggingConfig, ThemeConfig, WorkspacesConfig};
use crate::types::Color;
use std::path::PathBuf;

pub(crate) fn default_logging_config() -> LoggingConfig {
    LoggingConfig {
        level: default_log_level(),
        file_path: default_log_file_path(),
        format: default_log_format(),
    }
}

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}

/// No log file by default.
pub(crate) fn default_log_file_path() -> Option<PathBuf> {
    None
}

pub(crate) fn default_log_format() -> String {
    "text".to_string()
}

pub(crate) fn default_theme_config() -> ThemeConfig {
    ThemeConfig::default()
}

/// The lock curtain is opaque black.
pub(crate) fn default_curtain_color() -> Color {
    Color::BLACK
}

pub(crate) fn default_workspaces_config() -> WorkspacesConfig {
    WorkspacesConfig {
        names: default_workspace_names(),
    }
}

pub(crate) fn default_workspace_names() -> Vec<String> {
    ["Main", "Other"].iter().map(|s| s.to_string()).collect()
}
