//! Word data model
//!
//! A catalogue entry pairing a German term (with its optional article) and
//! an English translation. Field names on disk follow the word-list files:
//! `german`, `article`, `english`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::VocabError;

/// Grammatical gender marker, serialized as its definite article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Der,
    Die,
    Das,
}

impl Gender {
    /// All markers in the order quiz buttons present them
    pub const ALL: [Gender; 3] = [Gender::Der, Gender::Die, Gender::Das];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Der => "der",
            Gender::Die => "die",
            Gender::Das => "das",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = VocabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "der" => Ok(Gender::Der),
            "die" => Ok(Gender::Die),
            "das" => Ok(Gender::Das),
            other => Err(VocabError::ParseFailure(format!(
                "Unknown gender marker: {}",
                other
            ))),
        }
    }
}

/// Immutable catalogue entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// Stable identifier, unique within its category
    pub id: String,
    /// Target-language spelling
    #[serde(rename = "german")]
    pub term: String,
    /// Article, absent for words without grammatical gender
    #[serde(rename = "article", default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(rename = "english")]
    pub translation: String,
    /// Key of the category the word was loaded from
    #[serde(default)]
    pub category: String,
}

impl Word {
    pub fn new(
        id: impl Into<String>,
        term: impl Into<String>,
        gender: Option<Gender>,
        translation: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            term: term.into(),
            gender,
            translation: translation.into(),
            category: category.into(),
        }
    }

    /// The term with its article in front, e.g. `die Katze`
    pub fn full_term(&self) -> String {
        match self.gender {
            Some(gender) => format!("{} {}", gender, self.term),
            None => self.term.clone(),
        }
    }

    /// Composed search label, e.g. `die Katze - cat`
    pub fn label(&self) -> String {
        format!("{} - {}", self.full_term(), self.translation)
    }

    pub fn has_gender(&self) -> bool {
        self.gender.is_some()
    }
}
