//! TUI application module
//!
//! Contains the terminal user interface components, screen management,
//! navigation and per-session card state.

pub mod app;
pub mod screens;
pub mod session;
pub mod state;
pub mod tui;

pub use app::App;
pub use session::{AnswerState, Guess, SessionMode, SessionProgress, SessionState, Tally};
pub use state::{LearningMode, NavigationAction, NavigationState, Screen, StateManager};
pub use tui::Tui;
