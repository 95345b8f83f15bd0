//! Configuration management for NovaWM.
//!
//! - [`types`]: the configuration schema ([`CoreConfig`], [`LoggingConfig`],
//!   [`ThemeConfig`], [`WorkspacesConfig`]).
//! - [`defaults`]: default values referenced by `#[serde(default = ...)]`.
//! - [`loader`]: the [`ConfigLoader`] that locates, parses and validates
//!   `config.toml`.
//!
//! ## Loading process
//!
//! 1. `ConfigLoader::load()` looks for `config.toml` in the application config
//!    directory (`utils::paths::get_app_config_dir`).
//! 2. A missing file yields `CoreConfig::default()`.
//! 3. Parsing errors map to [`crate::error::ConfigError::ParseError`].
//! 4. The result is validated: log level and format are normalized, relative
//!    log paths are resolved against the state directory, style sizes must be
//!    positive and at least one workspace must be configured.

pub mod defaults;
pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{CoreConfig, LoggingConfig, ThemeConfig, WorkspacesConfig};
