//! Catalogue loading
//!
//! Fans out one task per category, joins them in registry order and merges
//! the results. A category whose source is missing or broken contributes no
//! words and leaves a diagnostic behind; the load itself never fails.

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::source::SourceRegistry;
use super::{Catalogue, LoadDiagnostic};
use crate::models::{Category, Word};
use crate::{Result, VocabError};

/// Load every category into a deduplicated catalogue
pub async fn load_all(registry: &SourceRegistry, categories: &[Category]) -> Catalogue {
    let mut diagnostics = Vec::new();
    let mut pending: Vec<(&'static str, JoinHandle<Result<Vec<Word>>>)> = Vec::new();

    for category in categories {
        let key = category.key();
        match registry.resolve(category.file_name) {
            Ok(loader) => {
                let loader = loader.clone();
                let handle = tokio::spawn(async move {
                    let words = loader.fetch().await?;
                    Ok::<_, VocabError>(stamp_category(words, key))
                });
                pending.push((key, handle));
            }
            Err(e) => {
                error!(category = key, available = ?registry.names(), "Word list not found");
                diagnostics.push(LoadDiagnostic::new(key, e));
            }
        }
    }

    let mut merged = Vec::new();
    for (key, handle) in pending {
        match handle.await {
            Ok(Ok(words)) => {
                info!(category = key, count = words.len(), "Category loaded");
                merged.extend(words);
            }
            Ok(Err(e)) => {
                error!(category = key, error = %e, "Failed to load words for category");
                diagnostics.push(LoadDiagnostic::new(key, e));
            }
            Err(e) => {
                error!(category = key, error = %e, "Category load task failed");
                diagnostics.push(LoadDiagnostic::new(
                    key,
                    VocabError::IoError(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        format!("Load task join failed: {}", e),
                    )),
                ));
            }
        }
    }

    let loaded = merged.len();
    let catalogue = Catalogue::from_words(merged, diagnostics);
    if catalogue.len() < loaded {
        warn!(
            dropped = loaded - catalogue.len(),
            "Duplicate word ids dropped from catalogue"
        );
    }
    info!(
        words = catalogue.len(),
        failed_categories = catalogue.diagnostics().len(),
        "Catalogue ready"
    );
    catalogue
}

/// Load a single category's words, stamped with its key
pub async fn load_category(registry: &SourceRegistry, category: &Category) -> Result<Vec<Word>> {
    let words = registry.resolve(category.file_name)?.fetch().await?;
    Ok(stamp_category(words, category.key()))
}

fn stamp_category(words: Vec<Word>, key: &str) -> Vec<Word> {
    words
        .into_iter()
        .map(|mut word| {
            word.category = key.to_string();
            word
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::source::SourceLoader;

    fn inline(json: &str) -> SourceLoader {
        SourceLoader::Inline(json.to_string())
    }

    const FOOD: Category = Category { name: "Food", emoji: "", file_name: "food" };
    const FAMILY: Category = Category { name: "Family", emoji: "", file_name: "family.json" };
    const SPACE: Category = Category { name: "Space", emoji: "", file_name: "space" };

    fn registry() -> SourceRegistry {
        let mut registry = SourceRegistry::new();
        registry.register(
            "food.json",
            inline(r#"[{"id":"f1","german":"Apfel","article":"der","english":"apple"},
                      {"id":"f2","german":"Brot","article":"das","english":"bread"}]"#),
        );
        registry.register(
            "family.json",
            inline(r#"[{"id":"m1","german":"Mutter","article":"die","english":"mother"}]"#),
        );
        registry
    }

    #[tokio::test]
    async fn test_words_are_stamped_with_category() {
        let catalogue = load_all(&registry(), &[FOOD, FAMILY]).await;
        assert_eq!(catalogue.len(), 3);
        assert!(catalogue.words()[..2].iter().all(|w| w.category == "food"));
        assert_eq!(catalogue.words()[2].category, "family");
        assert!(catalogue.diagnostics().is_empty());
    }

    #[tokio::test]
    async fn test_missing_source_is_isolated() {
        let catalogue = load_all(&registry(), &[FOOD, SPACE, FAMILY]).await;
        assert_eq!(catalogue.len(), 3);
        assert_eq!(catalogue.diagnostics().len(), 1);
        assert_eq!(catalogue.diagnostics()[0].category, "space");
        assert!(matches!(
            catalogue.diagnostics()[0].error,
            VocabError::SourceNotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_malformed_source_is_isolated() {
        let mut registry = registry();
        registry.register("family.json", inline("not json"));
        let catalogue = load_all(&registry, &[FOOD, FAMILY]).await;
        assert_eq!(catalogue.len(), 2);
        assert!(matches!(
            catalogue.diagnostics()[0].error,
            VocabError::ParseFailure(_)
        ));
    }

    #[tokio::test]
    async fn test_first_occurrence_wins_across_categories() {
        let mut registry = registry();
        registry.register(
            "family.json",
            inline(r#"[{"id":"f1","german":"Apfel","article":"der","english":"apple (dup)"},
                      {"id":"m1","german":"Mutter","article":"die","english":"mother"}]"#),
        );
        let catalogue = load_all(&registry, &[FOOD, FAMILY]).await;
        assert_eq!(catalogue.len(), 3);
        let apple = catalogue.get("f1").unwrap();
        assert_eq!(apple.category, "food");
        assert_eq!(apple.translation, "apple");
    }

    #[tokio::test]
    async fn test_same_spelling_different_ids_both_survive() {
        let mut registry = registry();
        registry.register(
            "family.json",
            inline(r#"[{"id":"x9","german":"Apfel","article":"der","english":"apple"}]"#),
        );
        let catalogue = load_all(&registry, &[FOOD, FAMILY]).await;
        assert_eq!(catalogue.len(), 3);
    }

    #[tokio::test]
    async fn test_load_category() {
        let words = load_category(&registry(), &FAMILY).await.unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].category, "family");
        assert!(load_category(&registry(), &SPACE).await.is_err());
    }
}
