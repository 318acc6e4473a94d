//! vocabmaster - vocabulary flashcard trainer
//!
//! Loads per-category word lists into a deduplicated catalogue, drives
//! navigation between learning modes, tracks per-session card progress and
//! keeps a persistent set of bookmarked words.

use std::fmt;

pub mod app;
pub mod catalogue;
pub mod config;
pub mod models;
pub mod saved;
pub mod speech;

// Common error types
#[derive(Debug)]
pub enum VocabError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// No word-list source registered under the requested name
    SourceNotFound(String),
    /// Malformed word-list, import or storage document
    ParseFailure(String),
    /// Imported word is not part of the loaded catalogue
    ReferentialMismatch(String),
    /// Navigation event not valid in the current state
    InvalidTransition(String),
    /// Saved words could not be written or read
    PersistenceError(String),
    /// TUI rendering or interaction error
    TuiError(String),
    /// No speech backend available on this system
    SpeechUnavailable(String),
}

impl fmt::Display for VocabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VocabError::IoError(err) => write!(f, "I/O error: {}", err),
            VocabError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            VocabError::SourceNotFound(name) => write!(f, "Word list not found: {}", name),
            VocabError::ParseFailure(msg) => write!(f, "Parse failure: {}", msg),
            VocabError::ReferentialMismatch(id) => {
                write!(f, "Word {} is not part of the catalogue", id)
            }
            VocabError::InvalidTransition(msg) => write!(f, "Invalid transition: {}", msg),
            VocabError::PersistenceError(msg) => write!(f, "Saved words persistence error: {}", msg),
            VocabError::TuiError(msg) => write!(f, "TUI error: {}", msg),
            VocabError::SpeechUnavailable(msg) => write!(f, "Speech unavailable: {}", msg),
        }
    }
}

impl std::error::Error for VocabError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VocabError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VocabError {
    fn from(err: std::io::Error) -> Self {
        VocabError::IoError(err)
    }
}

impl From<serde_json::Error> for VocabError {
    fn from(err: serde_json::Error) -> Self {
        VocabError::ParseFailure(format!("JSON error: {}", err))
    }
}

impl From<toml::de::Error> for VocabError {
    fn from(err: toml::de::Error) -> Self {
        VocabError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for VocabError {
    fn from(err: toml::ser::Error) -> Self {
        VocabError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for vocabmaster operations
pub type Result<T> = std::result::Result<T, VocabError>;

/// Error handling utilities
pub mod error {
    use super::VocabError;

    /// Whether the error only affects the single operation that raised it.
    ///
    /// Everything except a broken terminal is recoverable; the worst case for
    /// the core is an empty data set.
    pub fn is_recoverable(error: &VocabError) -> bool {
        !matches!(error, VocabError::TuiError(_))
    }

    /// Convert error to a short message for the status line
    pub fn user_friendly_message(error: &VocabError) -> String {
        match error {
            VocabError::SourceNotFound(name) => {
                format!("No word list named {}. The category stays empty.", name)
            }
            VocabError::ParseFailure(_) => {
                "Failed to import file. Please check the file format.".to_string()
            }
            VocabError::PersistenceError(_) => {
                "Failed to store saved words. Check disk space and permissions.".to_string()
            }
            VocabError::ConfigError(msg) => {
                format!("Configuration error: {}. Check your settings.", msg)
            }
            VocabError::SpeechUnavailable(_) => {
                "Speech synthesis is not available on this system.".to_string()
            }
            VocabError::IoError(err) if err.kind() == std::io::ErrorKind::NotFound => {
                "File not found.".to_string()
            }
            _ => error.to_string(),
        }
    }
}

// Common types and constants
pub const APP_NAME: &str = "vocabmaster";
pub const CONFIG_FILE: &str = "vocabmaster.toml";
pub const SAVED_WORDS_FILE: &str = "saved_words.json";
pub const LOG_FILE: &str = "vocabmaster.log";
pub const EXPORT_FILE: &str = "saved-words.json";
pub const DEFAULT_SPEECH_LANGUAGE: &str = "de-DE";
