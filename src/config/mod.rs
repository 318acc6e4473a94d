//! Configuration management module
//!
//! Handles loading, saving, and validation of user preferences.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::{Result, VocabError, APP_NAME, CONFIG_FILE, DEFAULT_SPEECH_LANGUAGE, EXPORT_FILE};

pub mod persistence;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// User preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory with extra or replacement `<category>.json` word lists
    pub data_dir: Option<PathBuf>,
    /// Whether cards are read aloud
    pub speech_enabled: bool,
    /// Language tag passed to the speech backend
    pub speech_language: String,
    /// Shuffle card order in the quiz modes
    pub shuffle_quizzes: bool,
    /// Where saved words are exported to and imported from
    pub export_path: PathBuf,
    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            speech_enabled: true,
            speech_language: DEFAULT_SPEECH_LANGUAGE.to_string(),
            shuffle_quizzes: false,
            export_path: PathBuf::from(EXPORT_FILE),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.speech_language.trim().is_empty() {
            return Err(VocabError::ConfigError(
                "Speech language must not be empty".to_string(),
            ));
        }

        if self.export_path.as_os_str().is_empty() {
            return Err(VocabError::ConfigError(
                "Export path must not be empty".to_string(),
            ));
        }

        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(VocabError::ConfigError(format!(
                "Unknown log level: {} (expected one of {})",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        if let Some(dir) = &self.data_dir {
            if dir.exists() && !dir.is_dir() {
                return Err(VocabError::ConfigError(format!(
                    "Data path is not a directory: {}",
                    dir.display()
                )));
            }
        }

        Ok(())
    }

    /// Set the word list override directory
    pub fn with_data_dir(mut self, dir: PathBuf) -> Self {
        self.data_dir = Some(dir);
        self
    }

    /// Enable or disable speech
    pub fn with_speech_enabled(mut self, enabled: bool) -> Self {
        self.speech_enabled = enabled;
        self
    }

    /// Set the speech language tag
    pub fn with_speech_language(mut self, language: impl Into<String>) -> Self {
        self.speech_language = language.into();
        self
    }

    /// Enable or disable quiz shuffling
    pub fn with_shuffle_quizzes(mut self, shuffle: bool) -> Self {
        self.shuffle_quizzes = shuffle;
        self
    }

    /// Set the export/import file
    pub fn with_export_path(mut self, path: PathBuf) -> Self {
        self.export_path = path;
        self
    }

    /// Set the default log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from an explicit path
    pub fn load_from(config_path: &std::path::Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            VocabError::ConfigError(format!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            VocabError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &std::path::Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                VocabError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content).map_err(|e| {
            VocabError::ConfigError(format!(
                "Failed to write config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/vocabmaster/vocabmaster.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            VocabError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for the log file and default saved-words storage
    pub fn data_home() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            VocabError::ConfigError("Unable to determine data directory".to_string())
        })?;

        Ok(data_dir.join(APP_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.speech_language, "de-DE");
        assert_eq!(config.export_path, PathBuf::from("saved-words.json"));
    }

    #[test]
    fn test_toml_serialization() {
        let config = AppConfig::new()
            .with_shuffle_quizzes(true)
            .with_speech_language("de-AT")
            .with_data_dir(PathBuf::from("/tmp/words"));
        let toml_str = toml::to_string(&config).expect("Failed to serialize to TOML");
        let deserialized: AppConfig =
            toml::from_str(&toml_str).expect("Failed to deserialize from TOML");
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: AppConfig = toml::from_str("shuffle_quizzes = true\n").unwrap();
        assert!(config.shuffle_quizzes);
        assert!(config.speech_enabled);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_validation_errors() {
        assert!(AppConfig::new().with_speech_language("  ").validate().is_err());
        assert!(AppConfig::new().with_log_level("loud").validate().is_err());
        assert!(AppConfig::new().with_log_level("DEBUG").validate().is_ok());
        assert!(AppConfig::new()
            .with_export_path(PathBuf::new())
            .validate()
            .is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("vocabmaster").join("vocabmaster.toml");

        assert_eq!(AppConfig::load_from(&path).unwrap(), AppConfig::default());

        let config = AppConfig::new().with_speech_enabled(false);
        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("vocabmaster.toml");
        fs::write(&path, "log_level = \"shout\"\n").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(VocabError::ConfigError(_))
        ));
    }

    #[test]
    fn test_config_file_path() {
        let path = AppConfig::config_file_path();
        assert!(path.is_ok());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("vocabmaster"));
        assert!(path.to_string_lossy().contains("vocabmaster.toml"));
    }
}
