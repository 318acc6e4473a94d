//! Application state management
//!
//! Handles screen transitions, navigation logic, and keyboard event processing
//! for the TUI application.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::models::{Category, Gender, Word};
use crate::{Result, VocabError};

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Mode menu
    #[default]
    Home,
    /// Category grid for the selected mode
    CategorySelect,
    /// Flip through cards
    Learn,
    /// Guess the article
    QuizGender,
    /// Type the word with its article
    QuizTyping,
    /// Bookmarked words
    SavedWordsReview,
}

impl Screen {
    /// Screens that show cards and therefore need a category
    pub fn is_word_bearing(&self) -> bool {
        matches!(self, Screen::Learn | Screen::QuizGender | Screen::QuizTyping)
    }
}

/// Learning mode chosen on the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearningMode {
    Learn,
    PracticeGender,
    PracticeTyping,
    SavedWords,
}

impl LearningMode {
    /// Home menu order
    pub const ALL: [LearningMode; 4] = [
        LearningMode::Learn,
        LearningMode::PracticeGender,
        LearningMode::PracticeTyping,
        LearningMode::SavedWords,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            LearningMode::Learn => "Start Learning",
            LearningMode::PracticeGender => "Practice Gender",
            LearningMode::PracticeTyping => "Practice Typing",
            LearningMode::SavedWords => "Saved Words",
        }
    }

    /// Screen entered once a category is chosen, if the mode uses categories
    pub fn card_screen(&self) -> Option<Screen> {
        match self {
            LearningMode::Learn => Some(Screen::Learn),
            LearningMode::PracticeGender => Some(Screen::QuizGender),
            LearningMode::PracticeTyping => Some(Screen::QuizTyping),
            LearningMode::SavedWords => None,
        }
    }
}

/// Navigation state shared with the view layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub current_screen: Screen,
    pub active_mode: Option<LearningMode>,
    pub active_category: Option<String>,
    /// Card to open first when entering Learn
    pub jump_to_word_id: Option<String>,
}

/// Navigation actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    /// Move selection up (arrow up, k)
    Up,
    /// Move selection down (arrow down, j)
    Down,
    /// Previous card (arrow left, h)
    Left,
    /// Next card (arrow right, l)
    Right,
    /// Confirm selection (Enter)
    Select,
    /// Flip the card (Space)
    Flip,
    /// Answer the gender quiz (1, 2, 3)
    Guess(Gender),
    /// Toggle bookmark (b)
    Bookmark,
    /// Pronounce the card (p)
    Speak,
    /// Open word search (/)
    Search,
    /// Export saved words (e)
    Export,
    /// Import saved words (i)
    Import,
    /// Go back (Esc, Backspace)
    Back,
    /// Jump to the home screen (Home, g)
    Home,
    /// Quit application (q, Q, Ctrl+C)
    Quit,
    /// No action
    None,
}

/// Application state manager
#[derive(Debug, Default)]
pub struct StateManager {
    state: NavigationState,
    should_quit: bool,
}

impl StateManager {
    /// Create a new state manager starting at the home screen
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn current_screen(&self) -> Screen {
        self.state.current_screen
    }

    pub fn active_mode(&self) -> Option<LearningMode> {
        self.state.active_mode
    }

    pub fn active_category(&self) -> Option<&str> {
        self.state.active_category.as_deref()
    }

    pub fn jump_to_word_id(&self) -> Option<&str> {
        self.state.jump_to_word_id.as_deref()
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Set the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Choose a learning mode on the home screen
    pub fn select_mode(&mut self, mode: LearningMode) -> Result<()> {
        if self.state.current_screen != Screen::Home {
            return self.reject(format!("mode selection on {:?}", self.state.current_screen));
        }
        self.state.active_mode = Some(mode);
        self.state.current_screen = match mode {
            LearningMode::SavedWords => Screen::SavedWordsReview,
            _ => Screen::CategorySelect,
        };
        debug!(?mode, screen = ?self.state.current_screen, "Mode selected");
        Ok(())
    }

    /// Choose a category; the active mode decides which card screen opens
    pub fn select_category(&mut self, category: &Category) -> Result<()> {
        if self.state.current_screen != Screen::CategorySelect {
            return self.reject(format!("category selection on {:?}", self.state.current_screen));
        }
        let Some(screen) = self.state.active_mode.and_then(|mode| mode.card_screen()) else {
            return self.reject("category selection without a card mode".to_string());
        };
        self.enter_card_screen(screen, category.key())
    }

    /// Open a word picked from search in Learn mode
    pub fn search_select(&mut self, word: &Word) -> Result<()> {
        if Category::by_key(&word.category).is_none() {
            return self.reject(format!("word {} has no known category", word.id));
        }
        self.state.active_mode = Some(LearningMode::Learn);
        self.state.jump_to_word_id = Some(word.id.clone());
        self.enter_card_screen(Screen::Learn, &word.category)
    }

    /// Open a saved word in Learn mode
    pub fn saved_word_select(&mut self, word: &Word) -> Result<()> {
        self.search_select(word)
    }

    /// Go back one level. Returns `false` when already on the home screen.
    pub fn go_back(&mut self) -> bool {
        self.state.jump_to_word_id = None;
        match self.state.current_screen {
            Screen::Learn | Screen::QuizGender | Screen::QuizTyping => {
                self.state.current_screen = Screen::CategorySelect;
                true
            }
            Screen::CategorySelect | Screen::SavedWordsReview => {
                self.reset_to_home();
                true
            }
            Screen::Home => false,
        }
    }

    /// Return to the home screen from anywhere
    pub fn go_home(&mut self) {
        self.state.jump_to_word_id = None;
        self.reset_to_home();
    }

    fn reset_to_home(&mut self) {
        self.state.current_screen = Screen::Home;
        self.state.active_mode = None;
        self.state.active_category = None;
    }

    fn enter_card_screen(&mut self, screen: Screen, category_key: &str) -> Result<()> {
        if Category::by_key(category_key).is_none() {
            return self.reject(format!("unknown category {}", category_key));
        }
        self.state.active_category = Some(category_key.to_string());
        self.state.current_screen = screen;
        debug!(?screen, category = category_key, "Card screen entered");
        Ok(())
    }

    fn reject(&self, reason: String) -> Result<()> {
        debug!(%reason, "Navigation rejected");
        Err(VocabError::InvalidTransition(reason))
    }

    /// Convert keyboard event to navigation action
    pub fn key_to_navigation(key: KeyEvent) -> NavigationAction {
        match key.code {
            // Quit keys
            KeyCode::Char('q') | KeyCode::Char('Q') => NavigationAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                NavigationAction::Quit
            }

            // Navigation keys
            KeyCode::Up | KeyCode::Char('k') => NavigationAction::Up,
            KeyCode::Down | KeyCode::Char('j') => NavigationAction::Down,
            KeyCode::Left | KeyCode::Char('h') => NavigationAction::Left,
            KeyCode::Right | KeyCode::Char('l') => NavigationAction::Right,
            KeyCode::Home | KeyCode::Char('g') => NavigationAction::Home,

            // Selection and card actions
            KeyCode::Enter => NavigationAction::Select,
            KeyCode::Char(' ') => NavigationAction::Flip,
            KeyCode::Char('1') => NavigationAction::Guess(Gender::Der),
            KeyCode::Char('2') => NavigationAction::Guess(Gender::Die),
            KeyCode::Char('3') => NavigationAction::Guess(Gender::Das),
            KeyCode::Char('b') => NavigationAction::Bookmark,
            KeyCode::Char('p') => NavigationAction::Speak,
            KeyCode::Char('/') => NavigationAction::Search,
            KeyCode::Char('e') => NavigationAction::Export,
            KeyCode::Char('i') => NavigationAction::Import,

            // Back/cancel
            KeyCode::Esc | KeyCode::Backspace => NavigationAction::Back,

            _ => NavigationAction::None,
        }
    }
}
