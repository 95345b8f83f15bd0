//! Configuration loading.
//!
//! [`ConfigLoader`] locates `config.toml`, deserializes it and validates the
//! result. A missing file is not an error: the defaults are used instead.

use crate::config::CoreConfig;
use crate::error::{ConfigError, CoreError};
use crate::types::{MarginStyle, MenuStyle};
use crate::utils::fs as nova_fs;
use crate::utils::paths::{get_app_config_dir, get_app_state_dir, CONFIG_FILE_NAME};

use std::fs;
use std::path::Path;

/// Namespace for loading and validating [`CoreConfig`].
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads `config.toml` from the application config directory.
    ///
    /// # Errors
    ///
    /// Directory resolution, read, parse and validation failures, each
    /// wrapped in [`CoreError::Config`] or [`CoreError::Filesystem`].
    pub fn load() -> Result<CoreConfig, CoreError> {
        let path = get_app_config_dir()?.join(CONFIG_FILE_NAME);
        Self::load_from_path(&path)
    }

    /// Loads the configuration from an explicit path, falling back to the
    /// defaults when the file does not exist or is empty.
    pub fn load_from_path(path: &Path) -> Result<CoreConfig, CoreError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No configuration at {:?}, using defaults", path);
                String::new()
            }
            Err(e) => {
                return Err(ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source: e,
                }
                .into())
            }
        };
        Self::load_from_str(&content)
    }

    /// Parses and validates configuration text.
    pub fn load_from_str(content: &str) -> Result<CoreConfig, CoreError> {
        let mut config = if content.trim().is_empty() {
            CoreConfig::default()
        } else {
            toml::from_str(content).map_err(ConfigError::ParseError)?
        };
        Self::validate_config(&mut config)?;
        Ok(config)
    }

    /// Validates the loaded configuration and normalizes it in place.
    fn validate_config(config: &mut CoreConfig) -> Result<(), CoreError> {
        let level = config.logging.level.to_lowercase();
        match level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => config.logging.level = level,
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: '{}'. Must be one of trace, debug, info, warn, error.",
                    config.logging.level
                ))
                .into())
            }
        }

        let format = config.logging.format.to_lowercase();
        match format.as_str() {
            "text" | "json" => config.logging.format = format,
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log format: '{}'. Must be one of text, json.",
                    config.logging.format
                ))
                .into())
            }
        }

        if let Some(file_path) = &config.logging.file_path {
            let absolute = if file_path.is_absolute() {
                file_path.clone()
            } else {
                get_app_state_dir()?.join(file_path)
            };
            if let Some(parent) = absolute.parent() {
                if !parent.exists() {
                    nova_fs::ensure_dir_exists(parent)?;
                }
            }
            config.logging.file_path = Some(absolute);
        }

        Self::validate_menu_style(&config.theme.menu)?;

        config.workspaces.names.retain(|name| !name.trim().is_empty());
        if config.workspaces.names.is_empty() {
            return Err(ConfigError::ValidationError(
                "At least one workspace must be configured.".to_string(),
            )
            .into());
        }
        Ok(())
    }

    fn validate_menu_style(style: &MenuStyle) -> Result<(), CoreError> {
        if style.item.width <= 0 || style.item.height <= 0 {
            return Err(ConfigError::ValidationError(format!(
                "Menu item size must be positive, got {}x{}.",
                style.item.width, style.item.height
            ))
            .into());
        }
        if style.item.font.size == 0 {
            return Err(ConfigError::ValidationError("Menu font size must be positive.".to_string()).into());
        }
        for (name, margin) in [("border", &style.border), ("margin", &style.margin)] {
            Self::validate_margin(name, margin)?;
        }
        Ok(())
    }

    fn validate_margin(name: &str, margin: &MarginStyle) -> Result<(), CoreError> {
        if margin.width < 0 {
            return Err(ConfigError::ValidationError(format!(
                "Menu {} width must not be negative, got {}.",
                name, margin.width
            ))
            .into());
        }
        Ok(())
    }
}
