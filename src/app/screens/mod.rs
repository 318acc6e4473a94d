//! TUI screen components
//!
//! Contains individual screen implementations for different application states.

pub mod card;
pub mod categories;
pub mod home;
pub mod saved;
pub mod search;

pub use card::{CardScreen, CardView};
pub use categories::CategoryScreen;
pub use home::HomeScreen;
pub use saved::SavedScreen;
pub use search::SearchOverlay;
