//! Data models module
//!
//! Contains the word entry, gender marker and the static category registry.

pub mod category;
pub mod word;

// Re-export commonly used types
pub use category::{Category, CATEGORIES};
pub use word::{Gender, Word};
