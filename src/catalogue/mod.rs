//! Word catalogue
//!
//! The deduplicated, read-only set of every loaded word plus the lookups the
//! rest of the application runs against it.

use std::collections::HashSet;

use crate::models::Word;
use crate::error::user_friendly_message;
use crate::VocabError;

pub mod loader;
pub mod source;

pub use loader::{load_all, load_category};
pub use source::{SourceLoader, SourceRegistry};

/// A category that contributed no words, and why
#[derive(Debug)]
pub struct LoadDiagnostic {
    pub category: String,
    pub error: VocabError,
}

impl LoadDiagnostic {
    pub fn new(category: impl Into<String>, error: VocabError) -> Self {
        Self {
            category: category.into(),
            error,
        }
    }

    /// Status-line text for a category that failed to load
    pub fn user_message(&self) -> String {
        match &self.error {
            VocabError::SourceNotFound(_) => user_friendly_message(&self.error),
            VocabError::ParseFailure(_) => format!(
                "The {} word list is malformed. The category stays empty.",
                self.category
            ),
            _ => format!(
                "The {} word list could not be read. The category stays empty.",
                self.category
            ),
        }
    }
}

/// Deduplicated catalogue of all loaded words
#[derive(Debug, Default)]
pub struct Catalogue {
    words: Vec<Word>,
    diagnostics: Vec<LoadDiagnostic>,
}

impl Catalogue {
    /// An empty catalogue
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalogue, keeping only the first word seen for each id
    pub fn from_words(words: Vec<Word>, diagnostics: Vec<LoadDiagnostic>) -> Self {
        let mut seen = HashSet::with_capacity(words.len());
        let words = words
            .into_iter()
            .filter(|word| seen.insert(word.id.clone()))
            .collect();
        Self { words, diagnostics }
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

    /// Categories that failed to load
    pub fn diagnostics(&self) -> &[LoadDiagnostic] {
        &self.diagnostics
    }

    /// Look up a word by id
    pub fn get(&self, id: &str) -> Option<&Word> {
        self.words.iter().find(|w| w.id == id)
    }

    /// Words of one category, in catalogue order
    pub fn words_in(&self, category: &str) -> Vec<Word> {
        self.words
            .iter()
            .filter(|w| w.category == category)
            .cloned()
            .collect()
    }

    /// Words of one category that carry a gender marker
    pub fn gendered_words_in(&self, category: &str) -> Vec<Word> {
        self.words
            .iter()
            .filter(|w| w.category == category && w.has_gender())
            .cloned()
            .collect()
    }

    /// Find the word whose composed label equals `label` exactly
    pub fn find_by_label(&self, label: &str) -> Option<&Word> {
        self.words.iter().find(|w| w.label() == label)
    }

    /// Words whose label contains `query`, ignoring case.
    ///
    /// A blank query matches nothing.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Word> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.words
            .iter()
            .filter(|w| w.label().to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }
}

/// Catalogue as seen by consumers while the startup load is in flight
#[derive(Debug, Default)]
pub enum CatalogueState {
    #[default]
    Loading,
    Ready(Catalogue),
}

impl CatalogueState {
    pub fn is_loading(&self) -> bool {
        matches!(self, CatalogueState::Loading)
    }

    /// The catalogue, once loaded
    pub fn catalogue(&self) -> Option<&Catalogue> {
        match self {
            CatalogueState::Loading => None,
            CatalogueState::Ready(catalogue) => Some(catalogue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn sample() -> Catalogue {
        Catalogue::from_words(
            vec![
                Word::new("a1", "Katze", Some(Gender::Die), "cat", "animals"),
                Word::new("a2", "Hund", Some(Gender::Der), "dog", "animals"),
                Word::new("c1", "rot", None, "red", "colors"),
                Word::new("a1", "Katze", Some(Gender::Die), "kitten", "family"),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn test_dedup_by_id_keeps_first() {
        let catalogue = sample();
        assert_eq!(catalogue.len(), 3);
        assert_eq!(catalogue.get("a1").unwrap().translation, "cat");
    }

    #[test]
    fn test_category_subsets() {
        let catalogue = sample();
        assert_eq!(catalogue.words_in("animals").len(), 2);
        assert_eq!(catalogue.words_in("colors").len(), 1);
        assert!(catalogue.gendered_words_in("colors").is_empty());
        assert!(catalogue.words_in("family").is_empty());
    }

    #[test]
    fn test_find_by_label() {
        let catalogue = sample();
        assert_eq!(catalogue.find_by_label("der Hund - dog").unwrap().id, "a2");
        assert_eq!(catalogue.find_by_label("rot - red").unwrap().id, "c1");
        assert!(catalogue.find_by_label("Hund - dog").is_none());
    }

    #[test]
    fn test_search_is_case_insensitive_and_limited() {
        let catalogue = sample();
        let hits = catalogue.search("  DIE k ", 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a1");

        assert_eq!(catalogue.search("d", 1).len(), 1);
        assert!(catalogue.search("   ", 10).is_empty());
    }

    #[test]
    fn test_catalogue_state() {
        let state = CatalogueState::default();
        assert!(state.is_loading());
        assert!(state.catalogue().is_none());

        let state = CatalogueState::Ready(Catalogue::empty());
        assert!(state.catalogue().unwrap().is_empty());
    }

    #[test]
    fn test_load_diagnostic_messages_name_the_word_list() {
        let malformed = LoadDiagnostic::new("food", VocabError::ParseFailure("eof".to_string()));
        assert_eq!(
            malformed.user_message(),
            "The food word list is malformed. The category stays empty."
        );

        let missing = LoadDiagnostic::new("ghosts", VocabError::SourceNotFound("ghosts.json".to_string()));
        assert!(missing.user_message().contains("ghosts.json"));

        let unreadable = LoadDiagnostic::new(
            "travel",
            VocabError::IoError(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied")),
        );
        assert!(unreadable.user_message().starts_with("The travel word list could not be read"));
    }
}
