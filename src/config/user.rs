//! User configuration loading for styled-inject.
//!
//! User config location: $XDG_CONFIG_HOME/styled-inject/styled-inject.toml
//! Fallback: the platform config directory (~/.config on Linux)

use std::path::{Path, PathBuf};

use super::{CONFIG_FILE_NAME, InjectionSettings, load_settings_file};
use crate::error::InjectResult;

const APP_DIR: &str = "styled-inject";

/// Returns the path to the user configuration file.
///
/// The path is determined by:
/// 1. If $XDG_CONFIG_HOME is set: $XDG_CONFIG_HOME/styled-inject/styled-inject.toml
/// 2. Otherwise: `dirs::config_dir()`/styled-inject/styled-inject.toml
///
/// Returns None if no config directory can be determined.
pub fn user_config_path() -> Option<PathBuf> {
    user_config_path_from(std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from))
}

fn user_config_path_from(xdg_config_home: Option<PathBuf>) -> Option<PathBuf> {
    let base = xdg_config_home
        .filter(|path| !path.as_os_str().is_empty())
        .or_else(dirs::config_dir)?;
    Some(base.join(APP_DIR).join(CONFIG_FILE_NAME))
}

/// Load the user configuration, `Ok(None)` if there is none.
pub fn load_user_config() -> InjectResult<Option<InjectionSettings>> {
    match user_config_path() {
        Some(path) => load_settings_file(&path),
        None => Ok(None),
    }
}

/// Path of the project configuration file under `root`.
pub fn project_config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}
