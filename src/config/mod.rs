//! Configuration management module.
//!
//! This module handles loading, saving, and managing application configuration,
//! including the theme, identifier numbering, log level and keymap.

mod error;
pub mod hotkeys;

pub use error::ConfigError;

use crate::error::AppError;
use crate::store::IdentifierStrategy;
use hotkeys::Keymap;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    str::FromStr,
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/issues-tui";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub theme_name: String,
    pub identifier_strategy: IdentifierStrategy,
    pub log_level: String,
    pub keymap: Keymap,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
    #[serde(default)]
    pub identifier_strategy: IdentifierStrategy,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub keymap: Keymap,
}

fn default_theme_name() -> String {
    "tokyo-night".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance holding the defaults.
    ///
    pub fn new() -> Config {
        Config {
            file_path: None,
            theme_name: default_theme_name(),
            identifier_strategy: IdentifierStrategy::default(),
            log_level: default_log_level(),
            keymap: Keymap::default(),
        }
    }

    /// Try to load an existing configuration from the disk using the custom
    /// directory if provided. If no file exists yet, write the current
    /// defaults there.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        // Use default path unless custom path provided
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        self.file_path = Some(dir_path.join(Path::new(FILE_NAME)));
        let file_path = self.file_path.clone().ok_or(ConfigError::FilePathNotSet)?;

        if !file_path.exists() {
            log::info!("Writing default configuration to {}...", file_path.display());
            return self.save();
        }

        let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::LoadFailed {
            path: file_path.clone(),
            message: format!("IO error: {}", e),
        })?;
        self.apply(&contents)?;
        log::info!("Loaded configuration from {}.", file_path.display());
        Ok(())
    }

    /// Replace the settings with those parsed from YAML contents. Actions
    /// missing from the keymap keep their default bindings; a key bound to
    /// two actions is rejected.
    ///
    fn apply(&mut self, contents: &str) -> Result<(), ConfigError> {
        let data: FileSpec = serde_yaml::from_str(contents)
            .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
        parse_log_level(&data.log_level)?;
        let keymap = data.keymap.with_defaults();
        if let Some(hotkey) = keymap.conflicting_hotkey() {
            return Err(ConfigError::DuplicateHotkey(
                hotkeys::format_hotkey_display(hotkey),
            ));
        }
        self.theme_name = data.theme_name;
        self.identifier_strategy = data.identifier_strategy;
        self.log_level = data.log_level;
        self.keymap = keymap;
        Ok(())
    }

    /// Serialize the configuration data and write it to the disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            theme_name: self.theme_name.clone(),
            identifier_strategy: self.identifier_strategy,
            log_level: self.log_level.clone(),
            keymap: self.keymap.clone(),
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Return the configured log level as a filter.
    ///
    pub fn log_level_filter(&self) -> Result<LevelFilter, ConfigError> {
        parse_log_level(&self.log_level)
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Returns the path buffer for the default path to the configuration file
    /// or an error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => {
                let home_path = Path::new(&home);
                let default_config_path = Path::new(DEFAULT_DIRECTORY_PATH);
                Ok(home_path.join(default_config_path))
            }
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}

/// Parse a log level name such as `debug` or `WARN`.
///
pub fn parse_log_level(name: &str) -> Result<LevelFilter, ConfigError> {
    LevelFilter::from_str(name).map_err(|_| ConfigError::InvalidLogLevel(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotkeys::{Hotkey, HotkeyAction};
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("issues-tui-test-{}", Uuid::new_v4()))
    }

    #[test]
    fn test_new_holds_defaults() {
        let config = Config::new();
        assert_eq!(config.theme_name, "tokyo-night");
        assert_eq!(config.identifier_strategy, IdentifierStrategy::CollectionLength);
        assert_eq!(config.log_level_filter().unwrap(), LevelFilter::Info);
        assert!(config.file_path().is_none());
    }

    #[test]
    fn test_load_writes_defaults_when_missing() {
        let dir = temp_dir();
        let mut config = Config::new();
        config.load(dir.to_str()).unwrap();

        let file_path = dir.join(FILE_NAME);
        assert!(file_path.exists());
        let contents = fs::read_to_string(&file_path).unwrap();
        assert!(contents.contains("theme_name: tokyo-night"));
        assert!(contents.contains("select_next"));

        let mut reloaded = Config::new();
        reloaded.load(dir.to_str()).unwrap();
        assert_eq!(reloaded.keymap, config.keymap);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_apply_partial_file_uses_defaults() {
        let mut config = Config::new();
        config
            .apply("identifier_strategy: sequential\nlog_level: debug\n")
            .unwrap();
        assert_eq!(config.theme_name, "tokyo-night");
        assert_eq!(config.identifier_strategy, IdentifierStrategy::Sequential);
        assert_eq!(config.log_level_filter().unwrap(), LevelFilter::Debug);
        assert_eq!(config.keymap, Keymap::default());
    }

    #[test]
    fn test_apply_keymap_override_keeps_other_defaults() {
        let yaml = "keymap:\n  new_issue:\n    - code: Char\n      char: c\n";
        let mut config = Config::new();
        config.apply(yaml).unwrap();
        assert_eq!(
            config.keymap.bindings(HotkeyAction::NewIssue),
            &[Hotkey::char('c')]
        );
        assert_eq!(
            config.keymap.bindings(HotkeyAction::Quit),
            Keymap::default().bindings(HotkeyAction::Quit)
        );
    }

    #[test]
    fn test_apply_user_key_takes_precedence_over_default() {
        let yaml = "keymap:\n  new_issue:\n    - code: Char\n      char: j\n";
        let mut config = Config::new();
        config.apply(yaml).unwrap();
        let j = crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Char('j'),
            crossterm::event::KeyModifiers::empty(),
        );
        assert_eq!(config.keymap.action_for(&j), Some(HotkeyAction::NewIssue));
        assert!(!config
            .keymap
            .bindings(HotkeyAction::SelectNext)
            .contains(&Hotkey::char('j')));
    }

    #[test]
    fn test_apply_rejects_key_bound_twice() {
        let yaml = "keymap:\n  new_issue:\n    - code: Char\n      char: x\n  delete_issue:\n    - code: Char\n      char: x\n";
        let mut config = Config::new();
        let result = config.apply(yaml);
        assert!(matches!(result, Err(ConfigError::DuplicateHotkey(ref key)) if key == "x"));
        assert_eq!(config.keymap, Keymap::default());
    }

    #[test]
    fn test_apply_rejects_invalid_log_level() {
        let mut config = Config::new();
        let result = config.apply("log_level: loud\n");
        assert!(matches!(result, Err(ConfigError::InvalidLogLevel(_))));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_apply_rejects_malformed_yaml() {
        let mut config = Config::new();
        let result = config.apply("theme_name: [unterminated");
        assert!(matches!(result, Err(ConfigError::DeserializationFailed(_))));
    }

    #[test]
    fn test_save_without_path_fails() {
        let config = Config::new();
        assert!(matches!(
            config.save(),
            Err(AppError::Config(ConfigError::FilePathNotSet))
        ));
    }

    #[test]
    fn test_parse_log_level_is_case_insensitive() {
        assert_eq!(parse_log_level("WARN").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_log_level("off").unwrap(), LevelFilter::Off);
    }
}
