//! Category registry
//!
//! Categories are fixed at compile time. Each one names the word-list
//! source it is loaded from.

/// Static category descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// Display label
    pub name: &'static str,
    pub emoji: &'static str,
    /// Word-list source name, `.json` suffix optional
    pub file_name: &'static str,
}

/// Every category the trainer knows about, in display order
pub const CATEGORIES: &[Category] = &[
    Category { name: "Family", emoji: "👪", file_name: "family" },
    Category { name: "Food", emoji: "🍎", file_name: "food" },
    Category { name: "Animals", emoji: "🐾", file_name: "animals" },
    Category { name: "Colors", emoji: "🎨", file_name: "colors" },
    Category { name: "Household", emoji: "🏠", file_name: "household" },
    Category { name: "Travel", emoji: "🧳", file_name: "travel" },
];

impl Category {
    /// Key stamped onto every word of this category
    pub fn key(&self) -> &'static str {
        self.file_name.strip_suffix(".json").unwrap_or(self.file_name)
    }

    /// Look up a registered category by key
    pub fn by_key(key: &str) -> Option<&'static Category> {
        CATEGORIES.iter().find(|c| c.key() == key)
    }

    /// Display text, e.g. `🍎 Food`
    pub fn title(&self) -> String {
        format!("{} {}", self.emoji, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_drops_json_suffix() {
        let plain = Category { name: "Food", emoji: "", file_name: "food" };
        let suffixed = Category { name: "Food", emoji: "", file_name: "food.json" };
        assert_eq!(plain.key(), "food");
        assert_eq!(suffixed.key(), "food");
    }

    #[test]
    fn test_registry_keys_are_unique() {
        for (i, a) in CATEGORIES.iter().enumerate() {
            for b in &CATEGORIES[i + 1..] {
                assert_ne!(a.key(), b.key());
            }
        }
    }

    #[test]
    fn test_by_key() {
        assert_eq!(Category::by_key("food").map(|c| c.name), Some("Food"));
        assert!(Category::by_key("Food").is_none());
        assert!(Category::by_key("planets").is_none());
    }
}
