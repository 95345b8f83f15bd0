//! XDG base directory and application-specific path resolution.
//!
//! Relies on `directories-next`. Application directories are derived from
//! the qualifier/organization/application triple `org`/`NovaWM`/`NovaWM`,
//! e.g. `~/.config/novawm` on Linux.

use crate::error::{ConfigError, CoreError};
use directories_next::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "NovaWM";
const APPLICATION: &str = "NovaWM";

/// Name of the configuration file inside [`get_app_config_dir`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

fn project_dirs(dir_type: &str) -> Result<ProjectDirs, CoreError> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or_else(|| {
        CoreError::Config(ConfigError::DirectoryUnavailable {
            dir_type: dir_type.to_string(),
        })
    })
}

/// Returns the application configuration directory.
///
/// # Errors
/// [`ConfigError::DirectoryUnavailable`] when no home directory is known.
pub fn get_app_config_dir() -> Result<PathBuf, CoreError> {
    project_dirs("App Config").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Returns the base directory for user state files.
///
/// On Linux this honours `XDG_STATE_HOME` and defaults to
/// `~/.local/state`. Other platforms use the local data directory.
pub fn get_state_base_dir() -> Result<PathBuf, CoreError> {
    BaseDirs::new()
        .map(|dirs| {
            #[cfg(target_os = "linux")]
            {
                match std::env::var("XDG_STATE_HOME") {
                    Ok(state_home) if !state_home.is_empty() => PathBuf::from(state_home),
                    _ => dirs.home_dir().join(".local/state"),
                }
            }
            #[cfg(not(target_os = "linux"))]
            {
                dirs.data_local_dir().to_path_buf()
            }
        })
        .ok_or_else(|| {
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "State Base".to_string(),
            })
        })
}

/// Returns the application state directory, used for relative log paths.
///
/// `ProjectDirs` has no state directory, so this is
/// [`get_state_base_dir`] joined with the organization and application.
pub fn get_app_state_dir() -> Result<PathBuf, CoreError> {
    get_state_base_dir().map(|base| base.join(ORGANIZATION).join(APPLICATION))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_dirs_are_application_specific() {
        // HOME may be unset in minimal build sandboxes.
        if let (Ok(config), Ok(state)) = (get_app_config_dir(), get_app_state_dir()) {
            assert!(config.to_string_lossy().to_lowercase().contains("novawm"));
            assert!(state.to_string_lossy().to_lowercase().contains("novawm"));
        }
    }

    #[test]
    fn test_app_state_dir_is_under_state_base() {
        if let (Ok(base), Ok(state)) = (get_state_base_dir(), get_app_state_dir()) {
            assert_eq!(state, base.join(ORGANIZATION).join(APPLICATION));
        }
    }
}
