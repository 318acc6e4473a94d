//! Saved words
//!
//! `SavedWords` is a plain value: its transitions return the next set, or
//! `None` when nothing would change. `SavedWordsStore` owns the current set
//! and writes every accepted transition through a `SavedWordsPort` before
//! committing it, so no caller can observe a word that is not yet stored.

use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::catalogue::Catalogue;
use crate::models::Word;
use crate::{Result, VocabError};

/// Durable storage for the saved-word set
pub trait SavedWordsPort {
    /// Read the stored set
    fn load(&self) -> Result<Vec<Word>>;
    /// Overwrite the stored set
    fn persist(&self, words: &[Word]) -> Result<()>;
}

/// Ordered set of bookmarked words, unique by id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedWords {
    words: Vec<Word>,
}

impl SavedWords {
    /// Build a set from stored words; later duplicates of an id are dropped
    pub fn new(words: Vec<Word>) -> Self {
        let mut set = Self::default();
        for word in words {
            if !set.contains(&word.id) {
                set.words.push(word);
            }
        }
        set
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.words.iter().any(|w| w.id == id)
    }

    /// Set with `word` appended, or `None` if it is already saved
    pub fn saving(&self, word: &Word) -> Option<SavedWords> {
        if self.contains(&word.id) {
            return None;
        }
        let mut words = self.words.clone();
        words.push(word.clone());
        Some(SavedWords { words })
    }

    /// Set without `word`, or `None` if it was not saved
    pub fn unsaving(&self, word: &Word) -> Option<SavedWords> {
        if !self.contains(&word.id) {
            return None;
        }
        let words = self
            .words
            .iter()
            .filter(|w| w.id != word.id)
            .cloned()
            .collect();
        Some(SavedWords { words })
    }
}

/// Outcome of an import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Newly saved words
    pub admitted: usize,
    /// Catalogue words that were saved already
    pub already_saved: usize,
    /// Ids of records not found in the catalogue
    pub rejected: Vec<String>,
}

impl ImportReport {
    pub fn summary(&self) -> String {
        format!(
            "Imported {} words ({} already saved, {} unknown)",
            self.admitted,
            self.already_saved,
            self.rejected.len()
        )
    }
}

/// Saved-word set bound to its storage
pub struct SavedWordsStore {
    words: SavedWords,
    port: Box<dyn SavedWordsPort + Send>,
}

impl SavedWordsStore {
    /// Load the stored set. Unreadable storage yields an empty set.
    pub fn load(port: Box<dyn SavedWordsPort + Send>) -> Self {
        let words = match port.load() {
            Ok(words) => {
                info!(count = words.len(), "Saved words loaded");
                SavedWords::new(words)
            }
            Err(e) => {
                warn!(error = %e, "Failed to read saved words, starting empty");
                SavedWords::default()
            }
        };
        Self { words, port }
    }

    pub fn words(&self) -> &[Word] {
        self.words.words()
    }

    pub fn saved(&self) -> &SavedWords {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn is_saved(&self, word: &Word) -> bool {
        self.words.contains(&word.id)
    }

    /// Bookmark a word. Returns whether the set changed.
    pub fn save(&mut self, word: &Word) -> Result<bool> {
        match self.words.saving(word) {
            Some(next) => {
                self.commit(next)?;
                debug!(id = %word.id, "Word saved");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a bookmark. Returns whether the set changed.
    pub fn unsave(&mut self, word: &Word) -> Result<bool> {
        match self.words.unsaving(word) {
            Some(next) => {
                self.commit(next)?;
                debug!(id = %word.id, "Word unsaved");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Flip the bookmark state. Returns whether the word is now saved.
    pub fn toggle(&mut self, word: &Word) -> Result<bool> {
        if self.is_saved(word) {
            self.unsave(word)?;
            Ok(false)
        } else {
            self.save(word)?;
            Ok(true)
        }
    }

    /// Serialize the whole set in the import format
    pub fn export_all(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self.words.words())?)
    }

    /// Write the export document to `path`, returning the number of words
    pub fn export_to(&self, path: &Path) -> Result<usize> {
        let content = self.export_all()?;
        fs::write(path, content)?;
        info!(path = %path.display(), count = self.len(), "Saved words exported");
        Ok(self.len())
    }

    /// Merge an import document into the set.
    ///
    /// The document must be a JSON array. Records whose id is not in the
    /// catalogue are dropped; the rest are saved as the catalogue's copy.
    pub fn import_merge(&mut self, document: &str, catalogue: &Catalogue) -> Result<ImportReport> {
        let value: serde_json::Value = serde_json::from_str(document)
            .map_err(|e| VocabError::ParseFailure(format!("Import is not valid JSON: {}", e)))?;
        let records = value.as_array().ok_or_else(|| {
            VocabError::ParseFailure("Import document must be a JSON array".to_string())
        })?;

        let ids = records
            .iter()
            .map(|record| {
                record
                    .get("id")
                    .and_then(|id| id.as_str())
                    .unwrap_or_default()
                    .to_string()
            })
            .collect();
        self.import_ids(ids, catalogue)
    }

    /// Read and merge an import file
    pub fn import_from(&mut self, path: &Path, catalogue: &Catalogue) -> Result<ImportReport> {
        let document = fs::read_to_string(path)?;
        let report = self.import_merge(&document, catalogue)?;
        info!(path = %path.display(), admitted = report.admitted, rejected = report.rejected.len(), "Saved words imported");
        Ok(report)
    }

    /// Merge already-parsed candidate words
    pub fn import_words(&mut self, candidates: &[Word], catalogue: &Catalogue) -> Result<ImportReport> {
        let ids = candidates.iter().map(|w| w.id.clone()).collect();
        self.import_ids(ids, catalogue)
    }

    fn import_ids(&mut self, ids: Vec<String>, catalogue: &Catalogue) -> Result<ImportReport> {
        let mut report = ImportReport::default();
        for id in ids {
            match validate_reference(&id, catalogue) {
                Ok(word) => {
                    let word = word.clone();
                    if self.save(&word)? {
                        report.admitted += 1;
                    } else {
                        report.already_saved += 1;
                    }
                }
                Err(e) => {
                    debug!(error = %e, "Dropping imported record");
                    report.rejected.push(id);
                }
            }
        }
        Ok(report)
    }

    fn commit(&mut self, next: SavedWords) -> Result<()> {
        self.port.persist(next.words())?;
        self.words = next;
        Ok(())
    }
}

fn validate_reference<'a>(id: &str, catalogue: &'a Catalogue) -> Result<&'a Word> {
    catalogue
        .get(id)
        .ok_or_else(|| VocabError::ReferentialMismatch(id.to_string()))
}
