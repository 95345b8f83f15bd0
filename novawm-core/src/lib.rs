//! # NovaWM Core Library (`novawm-core`)
//!
//! `novawm-core` is the foundational library of the NovaWM compositor. It holds
//! everything the toolkit layer consumes but does not itself implement:
//!
//! - **Error Handling**: A unified error system through the `CoreError` enum and its
//!   associated specific error types like `ConfigError` and `LoggingError`.
//! - **Core Data Types**: Geometry (`Point`, `Size`, `Rect`), colours (`Color`),
//!   orientation, and the style descriptors (`FillStyle`, `FontStyle`,
//!   `MarginStyle`, `MenuItemStyle`, `MenuStyle`) handed to toolkit elements.
//! - **Configuration Management**: TOML configuration loaded through
//!   [`ConfigLoader`] into [`CoreConfig`].
//! - **Logging**: A `tracing` based logging setup with console and optional
//!   rolling file output.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use novawm_core::config::ConfigLoader;
//! use novawm_core::logging::init_logging;
//! use novawm_core::error::CoreError;
//!
//! fn main() -> Result<(), CoreError> {
//!     let core_config = ConfigLoader::load()?;
//!     init_logging(&core_config.logging, false)?;
//!     tracing::info!("NovaWM core initialized.");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

pub use config::{ConfigLoader, CoreConfig, LoggingConfig, ThemeConfig, WorkspacesConfig};
pub use error::{ConfigError, CoreError, LoggingError};
pub use logging::{init_logging, init_minimal_logging};
pub use types::{
    Color, ColorParseError, FillStyle, FontStyle, FontWeight, MarginStyle, MenuItemStyle,
    MenuStyle, Orientation, Point, Rect, Size,
};
