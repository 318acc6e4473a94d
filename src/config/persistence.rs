//! Saved words persistence module
//!
//! Stores the saved-word set as a JSON array in the platform data
//! directory. Writes go through a temporary file that replaces the previous
//! one, so a failed write never leaves a truncated file behind.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::models::Word;
use crate::saved::SavedWordsPort;
use crate::{Result, VocabError, APP_NAME, SAVED_WORDS_FILE};

/// Saved words storage backed by a single JSON file
#[derive(Debug, Clone)]
pub struct SavedWordsFile {
    path: PathBuf,
}

impl SavedWordsFile {
    /// Storage at the standard location
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: Self::saved_words_file_path()?,
        })
    }

    /// Storage at an explicit path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the standard saved words file path
    /// Uses $DATA_HOME/vocabmaster/saved_words.json
    pub fn saved_words_file_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            VocabError::ConfigError("Unable to determine data directory".to_string())
        })?;

        Ok(data_dir.join(APP_NAME).join(SAVED_WORDS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomically(&self, content: &str) -> Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|e| {
            VocabError::PersistenceError(format!(
                "Failed to create data directory {}: {}",
                parent.display(),
                e
            ))
        })?;

        let temp_file = NamedTempFile::new_in(&parent)?;
        {
            let mut writer = BufWriter::new(temp_file.as_file());
            writer.write_all(content.as_bytes())?;
            writer.flush()?;
        }
        temp_file.persist(&self.path).map_err(|e| {
            VocabError::PersistenceError(format!(
                "Failed to write saved words file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(())
    }
}

impl SavedWordsPort for SavedWordsFile {
    fn load(&self) -> Result<Vec<Word>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            VocabError::PersistenceError(format!(
                "Failed to read saved words file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            VocabError::ParseFailure(format!(
                "Failed to parse saved words file {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn persist(&self, words: &[Word]) -> Result<()> {
        let content = serde_json::to_string_pretty(words).map_err(|e| {
            VocabError::PersistenceError(format!("Failed to serialize saved words: {}", e))
        })?;
        self.write_atomically(&content)
    }
}
