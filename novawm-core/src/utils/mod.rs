//! General utilities for NovaWM core.
//!
//! - [`fs`]: filesystem helpers mapping I/O errors to [`crate::CoreError`].
//! - [`paths`]: XDG and application-specific directory resolution.

pub mod fs;
pub mod paths;

pub use fs::{ensure_dir_exists, read_to_string};
