//! Word-list sources
//!
//! A static, explicit mapping from source name (`<key>.json`) to the loader
//! that produces its records. Built-in lists are compiled into the binary;
//! a data directory can add or override lists by file name.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::models::Word;
use crate::{Result, VocabError};

/// Word lists shipped with the binary
const EMBEDDED_SOURCES: &[(&str, &str)] = &[
    ("family.json", include_str!("../../data/family.json")),
    ("food.json", include_str!("../../data/food.json")),
    ("animals.json", include_str!("../../data/animals.json")),
    ("colors.json", include_str!("../../data/colors.json")),
    ("household.json", include_str!("../../data/household.json")),
    ("travel.json", include_str!("../../data/travel.json")),
];

/// How a single word list is obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLoader {
    /// JSON document compiled into the binary
    Embedded(&'static str),
    /// JSON document on disk
    File(PathBuf),
    /// JSON document held in memory, mostly useful for tests
    Inline(String),
}

impl SourceLoader {
    /// Fetch and parse the word records. Records carry no category yet.
    pub async fn fetch(&self) -> Result<Vec<Word>> {
        let content = match self {
            SourceLoader::Embedded(content) => return parse_word_list(content),
            SourceLoader::Inline(content) => return parse_word_list(content),
            SourceLoader::File(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
                VocabError::IoError(std::io::Error::new(
                    e.kind(),
                    format!("Failed to read word list {}: {}", path.display(), e),
                ))
            })?,
        };
        parse_word_list(&content)
    }
}

/// Parse a word-list document: a JSON array of word records
pub fn parse_word_list(content: &str) -> Result<Vec<Word>> {
    serde_json::from_str(content)
        .map_err(|e| VocabError::ParseFailure(format!("Malformed word list: {}", e)))
}

/// Registry of available word-list sources keyed by file name
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    sources: HashMap<String, SourceLoader>,
}

impl SourceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the word lists compiled into the binary
    pub fn embedded() -> Self {
        let mut registry = Self::new();
        for &(name, content) in EMBEDDED_SOURCES {
            registry.register(name, SourceLoader::Embedded(content));
        }
        registry
    }

    /// Register every `*.json` file in `dir`, replacing same-named sources
    pub fn with_directory(mut self, dir: &Path) -> Result<Self> {
        let entries = fs::read_dir(dir).map_err(|e| {
            VocabError::ConfigError(format!(
                "Failed to read word list directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        let mut added = 0usize;
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                debug!(source = name, path = %path.display(), "Registered word list file");
                self.register(name.to_string(), SourceLoader::File(path.clone()));
                added += 1;
            }
        }
        info!(dir = %dir.display(), added, "Word list directory registered");
        Ok(self)
    }

    /// Add or replace a source
    pub fn register(&mut self, name: impl Into<String>, loader: SourceLoader) {
        self.sources.insert(name.into(), loader);
    }

    /// Resolve a source by exact, case-sensitive name; `.json` is implied
    pub fn resolve(&self, file_name: &str) -> Result<&SourceLoader> {
        let wanted = if file_name.ends_with(".json") {
            file_name.to_string()
        } else {
            format!("{}.json", file_name)
        };
        self.sources
            .get(&wanted)
            .ok_or(VocabError::SourceNotFound(wanted))
    }

    /// Names of all registered sources, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sources.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CATEGORIES;
    use tempfile::TempDir;

    #[test]
    fn test_embedded_covers_every_category() {
        let registry = SourceRegistry::embedded();
        for category in CATEGORIES {
            assert!(
                registry.resolve(category.file_name).is_ok(),
                "missing source for {}",
                category.file_name
            );
        }
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let registry = SourceRegistry::embedded();
        assert!(registry.resolve("food").is_ok());
        assert!(registry.resolve("food.json").is_ok());
        match registry.resolve("Food") {
            Err(VocabError::SourceNotFound(name)) => assert_eq!(name, "Food.json"),
            other => panic!("expected SourceNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_directory_overrides_embedded() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("food.json");
        fs::write(&path, "[]").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        let registry = SourceRegistry::embedded()
            .with_directory(temp_dir.path())
            .unwrap();
        assert_eq!(registry.resolve("food").unwrap(), &SourceLoader::File(path));
        assert!(registry.resolve("notes.txt").is_err());
        assert_eq!(registry.len(), EMBEDDED_SOURCES.len());
    }

    #[test]
    fn test_missing_directory_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = SourceRegistry::new().with_directory(&temp_dir.path().join("absent"));
        assert!(matches!(result, Err(VocabError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_embedded_lists_parse() {
        let registry = SourceRegistry::embedded();
        for name in registry.names() {
            let words = registry.resolve(name).unwrap().fetch().await.unwrap();
            assert!(!words.is_empty(), "{} is empty", name);
        }
    }

    #[tokio::test]
    async fn test_malformed_inline_source() {
        let loader = SourceLoader::Inline("{\"not\": \"a list\"}".to_string());
        assert!(matches!(loader.fetch().await, Err(VocabError::ParseFailure(_))));
    }
}
