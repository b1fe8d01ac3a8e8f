pub mod defaults;
pub mod settings;
pub mod store;
pub mod user;

pub use settings::{InjectionSettings, RuleConfig, Wrap};
pub use store::{RuleSnapshot, RuleStore};
pub use user::{load_user_config, project_config_path, user_config_path};

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{InjectError, InjectResult};

/// File name of both the user and the project configuration.
pub const CONFIG_FILE_NAME: &str = "styled-inject.toml";

/// Read and parse a settings file. A missing file is `Ok(None)`.
pub fn load_settings_file(path: &Path) -> InjectResult<Option<InjectionSettings>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    toml::from_str::<InjectionSettings>(&contents)
        .map(Some)
        .map_err(|err| InjectError::config(path, err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let loaded = load_settings_file(&dir.path().join(CONFIG_FILE_NAME)).expect("no error");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_valid_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[[injections]]\ntag = \"myCss\"\n").expect("write config");

        let settings = load_settings_file(&path)
            .expect("no error")
            .expect("settings");
        assert_eq!(settings.injections.len(), 1);
        assert_eq!(settings.injections[0].tag.as_deref(), Some("myCss"));
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[[injections]\n").expect("write config");

        let err = load_settings_file(&path).expect_err("invalid toml");
        assert!(matches!(err, InjectError::Config { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }
}
