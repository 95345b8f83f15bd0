//! Configuration data structures.
//!
//! Populated by deserializing `config.toml`. Missing fields take their values
//! from [`super::defaults`]; unknown fields are rejected.

use super::defaults;
use crate::types::{Color, MenuStyle};
use serde::Deserialize;
use std::path::PathBuf;

/// Configuration settings for the logging subsystem.
///
/// ```
/// use novawm_core::config::LoggingConfig;
/// use std::path::PathBuf;
///
/// let log_config: LoggingConfig = toml::from_str(r#"
/// level = "debug"
/// file_path = "/var/log/novawm.log"
/// format = "json"
/// "#).unwrap();
/// assert_eq!(log_config.level, "debug");
/// assert_eq!(log_config.file_path, Some(PathBuf::from("/var/log/novawm.log")));
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// One of "trace", "debug", "info", "warn", "error" (case-insensitive).
    #[serde(default = "defaults::default_log_level")]
    pub level: String,
    /// Optional log file. Relative paths are resolved against the
    /// application's state directory.
    #[serde(default = "defaults::default_log_file_path")]
    pub file_path: Option<PathBuf>,
    /// "text" or "json".
    #[serde(default = "defaults::default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        defaults::default_logging_config()
    }
}

/// Look of the toolkit elements built by the compositor.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    #[serde(default)]
    pub menu: MenuStyle,
    /// Color of the curtain shown while the session is locked.
    #[serde(default = "defaults::default_curtain_color")]
    pub curtain_color: Color,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            menu: MenuStyle::default(),
            curtain_color: defaults::default_curtain_color(),
        }
    }
}

/// Workspaces created at startup, in cycling order.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkspacesConfig {
    #[serde(default = "defaults::default_workspace_names")]
    pub names: Vec<String>,
}

impl Default for WorkspacesConfig {
    fn default() -> Self {
        defaults::default_workspaces_config()
    }
}

/// Root configuration structure.
///
/// ```
/// use novawm_core::config::CoreConfig;
///
/// let loaded: CoreConfig = toml::from_str(r#"
/// [logging]
/// level = "warn"
///
/// [workspaces]
/// names = ["Web", "Mail", "Code"]
/// "#).unwrap();
/// assert_eq!(loaded.logging.level, "warn");
/// assert_eq!(loaded.workspaces.names.len(), 3);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoreConfig {
    #[serde(default = "defaults::default_logging_config")]
    pub logging: LoggingConfig,
    #[serde(default = "defaults::default_theme_config")]
    pub theme: ThemeConfig,
    #[serde(default = "defaults::default_workspaces_config")]
    pub workspaces: WorkspacesConfig,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            logging: defaults::default_logging_config(),
            theme: defaults::default_theme_config(),
            workspaces: defaults::default_workspaces_config(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn test_logging_config_deserialize_empty() {
        let config: LoggingConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.level, defaults::default_log_level());
        assert_eq!(config.file_path, defaults::default_log_file_path());
        assert_eq!(config.format, defaults::default_log_format());
    }

    #[test]
    fn test_theme_config_curtain_color_from_hex() {
        let theme: ThemeConfig = toml::from_str("curtain_color = \"#101010\"").unwrap();
        assert_eq!(theme.curtain_color, Color::rgb(0x10, 0x10, 0x10));
        assert_eq!(theme.menu.item.height, 22);
    }

    #[test]
    #[should_panic]
    fn test_core_config_deserialize_unknown_field() {
        let json = r#"{"logging": {}, "unknown_field": "value"}"#;
        let _config: CoreConfig = serde_json::from_str(json).unwrap();
    }
}
