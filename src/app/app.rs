//! Main application controller
//!
//! Owns all UI state, routes key presses to the navigation state machine
//! and the active session, and renders the current screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use tokio::sync::mpsc::{self, error::TryRecvError};
use tracing::{debug, error, info, warn};

use crate::{
    app::{
        screens::{CardScreen, CardView, CategoryScreen, HomeScreen, SavedScreen, SearchOverlay},
        session::SessionState,
        state::{LearningMode, NavigationAction, NavigationState, Screen, StateManager},
        tui::Tui,
    },
    catalogue::{Catalogue, CatalogueState},
    config::AppConfig,
    error::user_friendly_message,
    models::{Category, Word, CATEGORIES},
    saved::SavedWordsStore,
    speech::Speaker,
    Result, VocabError,
};

/// TUI application controller
pub struct App {
    /// Application state manager
    state_manager: StateManager,
    config: AppConfig,
    catalogue: CatalogueState,
    /// Delivers the catalogue once the startup load finishes
    catalogue_rx: Option<mpsc::Receiver<Catalogue>>,
    saved: SavedWordsStore,
    /// Session for the current card screen
    session: Option<SessionState>,
    /// Navigation state `session` was resolved for
    session_key: Option<NavigationState>,
    /// Typing quiz input
    typed: String,
    speaker: Box<dyn Speaker>,
    rng: SmallRng,
    /// One-line message shown under every screen
    status: Option<String>,
    /// Screen components
    home_screen: HomeScreen,
    category_screen: CategoryScreen,
    card_screen: CardScreen,
    saved_screen: SavedScreen,
    search: SearchOverlay,
}

impl App {
    /// Create a new application instance
    pub fn new(
        config: AppConfig,
        saved: SavedWordsStore,
        speaker: Box<dyn Speaker>,
        catalogue_rx: mpsc::Receiver<Catalogue>,
    ) -> Self {
        Self {
            state_manager: StateManager::new(),
            config,
            catalogue: CatalogueState::Loading,
            catalogue_rx: Some(catalogue_rx),
            saved,
            session: None,
            session_key: None,
            typed: String::new(),
            speaker,
            rng: SmallRng::from_entropy(),
            status: None,
            home_screen: HomeScreen::new(),
            category_screen: CategoryScreen::new(),
            card_screen: CardScreen::new(),
            saved_screen: SavedScreen::new(),
            search: SearchOverlay::new(),
        }
    }

    pub fn state_manager(&self) -> &StateManager {
        &self.state_manager
    }

    pub fn catalogue(&self) -> &CatalogueState {
        &self.catalogue
    }

    pub fn saved(&self) -> &SavedWordsStore {
        &self.saved
    }

    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn search_open(&self) -> bool {
        self.search.is_open()
    }

    /// Run the main application loop
    pub fn run(&mut self, tui: &mut Tui) -> Result<()> {
        while !self.state_manager.should_quit() {
            self.poll_catalogue();
            tui.draw(|f| self.render(f))?;
            if let Some(key) = tui.handle_events()? {
                self.handle_key(key);
            }
        }
        info!("Application exiting");
        Ok(())
    }

    /// Pick up the catalogue if the load has finished
    pub fn poll_catalogue(&mut self) {
        let Some(rx) = &mut self.catalogue_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(catalogue) => {
                self.catalogue_rx = None;
                self.set_catalogue(catalogue);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                error!("Catalogue loader stopped without a result");
                self.catalogue_rx = None;
                self.set_catalogue(Catalogue::empty());
            }
        }
    }

    /// Install the loaded catalogue
    pub fn set_catalogue(&mut self, catalogue: Catalogue) {
        info!(
            words = catalogue.len(),
            failed = catalogue.diagnostics().len(),
            "Catalogue received"
        );
        if let Some(diagnostic) = catalogue.diagnostics().first() {
            self.status = Some(diagnostic.user_message());
        }
        self.catalogue = CatalogueState::Ready(catalogue);
        self.sync_session();
    }

    /// Handle one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.search.is_open() {
            self.handle_search_key(key);
        } else if !(self.accepts_typing() && self.handle_typing_key(key)) {
            let action = StateManager::key_to_navigation(key);
            self.handle_action(action);
        }
        self.sync_session();
    }

    fn handle_action(&mut self, action: NavigationAction) {
        match action {
            NavigationAction::Quit => self.state_manager.quit(),
            NavigationAction::Home => self.state_manager.go_home(),
            NavigationAction::Back => {
                if !self.state_manager.go_back() {
                    self.state_manager.quit();
                }
            }
            NavigationAction::Search => {
                if self.catalogue.is_loading() {
                    self.status = Some("Words are still loading".to_string());
                } else {
                    self.search.open();
                }
            }
            NavigationAction::Export => self.export_saved(),
            NavigationAction::Import => self.import_saved(),
            _ => match self.state_manager.current_screen() {
                Screen::Home => self.handle_home(action),
                Screen::CategorySelect => self.handle_categories(action),
                Screen::Learn | Screen::QuizGender | Screen::QuizTyping => self.handle_card(action),
                Screen::SavedWordsReview => self.handle_saved(action),
            },
        }
    }

    fn handle_home(&mut self, action: NavigationAction) {
        match action {
            NavigationAction::Up => self.home_screen.select_previous(),
            NavigationAction::Down => self.home_screen.select_next(),
            NavigationAction::Select => {
                let mode = self.home_screen.selected_mode();
                if let Err(e) = self.state_manager.select_mode(mode) {
                    self.report_error(&e);
                }
            }
            _ => {}
        }
    }

    fn handle_categories(&mut self, action: NavigationAction) {
        match action {
            NavigationAction::Up => self.category_screen.select_previous(),
            NavigationAction::Down => self.category_screen.select_next(),
            NavigationAction::Select => {
                let category = self.category_screen.selected_category();
                if let Err(e) = self.state_manager.select_category(category) {
                    self.report_error(&e);
                }
            }
            _ => {}
        }
    }

    fn handle_card(&mut self, action: NavigationAction) {
        let Some(progress) = self.session.as_mut().and_then(SessionState::progress_mut) else {
            return;
        };
        match action {
            NavigationAction::Right => {
                progress.advance();
            }
            NavigationAction::Left => {
                progress.retreat();
            }
            NavigationAction::Flip => {
                progress.flip();
            }
            NavigationAction::Select => {
                if progress.mode().is_quiz() {
                    progress.advance();
                } else {
                    progress.flip();
                }
            }
            NavigationAction::Guess(gender) => {
                progress.submit_gender_guess(gender);
            }
            NavigationAction::Bookmark => {
                let word = progress.current_word().clone();
                self.toggle_bookmark(&word);
            }
            NavigationAction::Speak => {
                if let Some(text) = progress.pronunciation() {
                    self.speaker.pronounce(&text, &self.config.speech_language);
                }
            }
            _ => {}
        }
    }

    fn handle_saved(&mut self, action: NavigationAction) {
        let len = self.saved.len();
        match action {
            NavigationAction::Up => self.saved_screen.select_previous(len),
            NavigationAction::Down => self.saved_screen.select_next(len),
            NavigationAction::Select => {
                if let Some(word) = self.saved_screen.selected_word(self.saved.words()).cloned() {
                    let opened = self.state_manager.saved_word_select(&word);
                    self.after_word_select(opened);
                }
            }
            NavigationAction::Bookmark => {
                if let Some(word) = self.saved_screen.selected_word(self.saved.words()).cloned() {
                    self.toggle_bookmark(&word);
                    self.saved_screen.clamp(self.saved.len());
                }
            }
            _ => {}
        }
    }

    fn accepts_typing(&self) -> bool {
        self.state_manager.current_screen() == Screen::QuizTyping
            && self
                .session
                .as_ref()
                .and_then(SessionState::progress)
                .is_some_and(|p| !p.is_answered())
    }

    /// Route a key to the typing quiz input. Returns whether it was consumed.
    fn handle_typing_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => self.typed.push(c),
            KeyCode::Backspace => {
                self.typed.pop();
            }
            KeyCode::Enter => {
                if self.typed.trim().is_empty() {
                    return true;
                }
                if let Some(progress) = self.session.as_mut().and_then(SessionState::progress_mut) {
                    progress.submit_typed_answer(&self.typed);
                }
                self.typed.clear();
            }
            _ => return false,
        }
        true
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let Some(catalogue) = self.catalogue.catalogue() else {
            self.search.close();
            return;
        };
        let len = self.search.matches(catalogue).len();
        match key.code {
            KeyCode::Esc => self.search.close(),
            KeyCode::Up => self.search.select_previous(len),
            KeyCode::Down => self.search.select_next(len),
            KeyCode::Backspace => self.search.pop(),
            KeyCode::Enter => {
                if let Some(word) = self.search.selected(catalogue).cloned() {
                    self.search.close();
                    let opened = self.state_manager.search_select(&word);
                    self.after_word_select(opened);
                }
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state_manager.quit()
            }
            KeyCode::Char(c) => self.search.push(c),
            _ => {}
        }
    }

    /// A picked word always reopens Learn at that word, even when the
    /// navigation state is unchanged
    fn after_word_select(&mut self, opened: Result<()>) {
        match opened {
            Ok(()) => self.session_key = None,
            Err(e) => self.report_error(&e),
        }
    }

    /// Re-resolve the session whenever navigation moved or the catalogue
    /// arrived under a loading session
    fn sync_session(&mut self) {
        let navigation = self.state_manager.state();
        let waiting = self.session.as_ref().is_some_and(SessionState::is_loading)
            && !self.catalogue.is_loading();
        if !waiting && self.session_key.as_ref() == Some(navigation) {
            return;
        }

        self.session_key = Some(navigation.clone());
        self.typed.clear();
        let session = SessionState::resolve(&self.catalogue, navigation);
        self.session = match session {
            Some(session) if self.config.shuffle_quizzes => Some(session.shuffled(&mut self.rng)),
            session => session,
        };
        debug!(screen = ?navigation.current_screen, "Session synced");
    }

    fn toggle_bookmark(&mut self, word: &Word) {
        match self.saved.toggle(word) {
            Ok(true) => self.status = Some(format!("Saved {}", word.full_term())),
            Ok(false) => self.status = Some(format!("Removed {}", word.full_term())),
            Err(e) => self.report_error(&e),
        }
    }

    fn export_saved(&mut self) {
        let path = self.config.export_path.clone();
        match self.saved.export_to(&path) {
            Ok(count) => {
                self.status = Some(format!("Exported {} words to {}", count, path.display()))
            }
            Err(e) => self.report_error(&e),
        }
    }

    fn import_saved(&mut self) {
        let Some(catalogue) = self.catalogue.catalogue() else {
            self.status = Some("Words are still loading".to_string());
            return;
        };
        match self.saved.import_from(&self.config.export_path, catalogue) {
            Ok(report) => self.status = Some(report.summary()),
            Err(e) => self.report_error(&e),
        }
    }

    fn report_error(&mut self, e: &VocabError) {
        warn!(error = %e, "Action failed");
        if !matches!(e, VocabError::InvalidTransition(_)) {
            self.status = Some(user_friendly_message(e));
        }
    }

    /// Words per category for the active mode, `None` while loading
    fn category_counts(&self) -> Vec<Option<usize>> {
        let gendered = self.state_manager.active_mode() == Some(LearningMode::PracticeGender);
        CATEGORIES
            .iter()
            .map(|category| {
                self.catalogue.catalogue().map(|catalogue| {
                    if gendered {
                        catalogue.gendered_words_in(category.key()).len()
                    } else {
                        catalogue.words_in(category.key()).len()
                    }
                })
            })
            .collect()
    }

    fn catalogue_summary(&self) -> String {
        match self.catalogue.catalogue() {
            None => "loading words…".to_string(),
            Some(catalogue) => format!("{} words", catalogue.len()),
        }
    }

    /// Draw the current screen
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.size());
        let area = chunks[0];

        match self.state_manager.current_screen() {
            Screen::Home => {
                let summary = self.catalogue_summary();
                self.home_screen.render(f, area, &summary, self.saved.len());
            }
            Screen::CategorySelect => {
                let counts = self.category_counts();
                let mode = self.state_manager.active_mode();
                self.category_screen.render(f, area, mode, &counts);
            }
            Screen::Learn | Screen::QuizGender | Screen::QuizTyping => {
                let saved = self
                    .session
                    .as_ref()
                    .and_then(SessionState::progress)
                    .is_some_and(|p| self.saved.is_saved(p.current_word()));
                let view = CardView {
                    category: self.state_manager.active_category().and_then(Category::by_key),
                    session: self.session.as_ref(),
                    saved,
                    typed: &self.typed,
                };
                self.card_screen.render(f, area, view);
            }
            Screen::SavedWordsReview => {
                self.saved_screen.render(f, area, self.saved.words());
            }
        }

        if self.search.is_open() {
            if let Some(catalogue) = self.catalogue.catalogue() {
                self.search.render(f, area, catalogue);
            }
        }

        let status = Paragraph::new(self.status.clone().unwrap_or_default())
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(status, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::session::AnswerState;
    use crate::catalogue::LoadDiagnostic;
    use crate::models::Gender;
    use crate::saved::SavedWordsPort;
    use crate::speech::NullSpeaker;
    use std::sync::{Arc, Mutex};

    #[derive(Default, Clone)]
    struct SharedPort {
        stored: Arc<Mutex<Vec<Word>>>,
    }

    impl SavedWordsPort for SharedPort {
        fn load(&self) -> Result<Vec<Word>> {
            Ok(self.stored.lock().unwrap().clone())
        }

        fn persist(&self, words: &[Word]) -> Result<()> {
            *self.stored.lock().unwrap() = words.to_vec();
            Ok(())
        }
    }

    fn words() -> Vec<Word> {
        vec![
            Word::new("animals-001", "Hund", Some(Gender::Der), "dog", "animals"),
            Word::new("animals-002", "Katze", Some(Gender::Die), "cat", "animals"),
            Word::new("colors-001", "rot", None, "red", "colors"),
        ]
    }

    fn app_with(port: SharedPort) -> (App, mpsc::Sender<Catalogue>) {
        let (tx, rx) = mpsc::channel(1);
        let app = App::new(
            AppConfig::default(),
            SavedWordsStore::load(Box::new(port)),
            Box::new(NullSpeaker),
            rx,
        );
        (app, tx)
    }

    fn ready_app() -> App {
        let (mut app, tx) = app_with(SharedPort::default());
        tx.try_send(Catalogue::from_words(words(), Vec::new())).unwrap();
        app.poll_catalogue();
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    /// Home -> mode at `mode_index` -> Animals
    fn open_animals(app: &mut App, mode_index: usize) {
        for _ in 0..mode_index {
            press(app, KeyCode::Down);
        }
        press(app, KeyCode::Enter);
        press(app, KeyCode::Down);
        press(app, KeyCode::Down);
        press(app, KeyCode::Enter);
    }

    #[test]
    fn test_catalogue_arrives_over_channel() {
        let (mut app, tx) = app_with(SharedPort::default());
        assert!(app.catalogue().is_loading());
        app.poll_catalogue();
        assert!(app.catalogue().is_loading());

        tx.try_send(Catalogue::from_words(words(), Vec::new())).unwrap();
        app.poll_catalogue();
        assert_eq!(app.catalogue().catalogue().unwrap().len(), 3);
    }

    #[test]
    fn test_dropped_loader_yields_empty_catalogue() {
        let (mut app, tx) = app_with(SharedPort::default());
        drop(tx);
        app.poll_catalogue();
        assert!(app.catalogue().catalogue().unwrap().is_empty());
    }

    #[test]
    fn test_session_waits_for_catalogue() {
        let (mut app, tx) = app_with(SharedPort::default());
        open_animals(&mut app, 0);
        assert_eq!(app.state_manager().current_screen(), Screen::Learn);
        assert!(app.session().unwrap().is_loading());

        tx.try_send(Catalogue::from_words(words(), Vec::new())).unwrap();
        app.poll_catalogue();
        let progress = app.session().unwrap().progress().unwrap();
        assert_eq!(progress.words().len(), 2);
    }

    #[test]
    fn test_gender_quiz_flow() {
        let mut app = ready_app();
        open_animals(&mut app, 1);
        assert_eq!(app.state_manager().current_screen(), Screen::QuizGender);

        // Blocked until answered
        press(&mut app, KeyCode::Right);
        assert_eq!(app.session().unwrap().progress().unwrap().cursor(), 0);

        press(&mut app, KeyCode::Char('1'));
        let progress = app.session().unwrap().progress().unwrap();
        assert_eq!(progress.answer_state(), AnswerState::Correct);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session().unwrap().progress().unwrap().cursor(), 1);
    }

    #[test]
    fn test_typing_quiz_captures_letters() {
        let mut app = ready_app();
        open_animals(&mut app, 2);
        assert_eq!(app.state_manager().current_screen(), Screen::QuizTyping);

        // 'q' and 'h' are text here, not quit or previous
        type_text(&mut app, "der hqx");
        assert!(!app.state_manager().should_quit());
        assert_eq!(app.typed(), "der hqx");
        for _ in 0..3 {
            press(&mut app, KeyCode::Backspace);
        }
        assert_eq!(app.typed(), "der ");
        type_text(&mut app, "hund");
        press(&mut app, KeyCode::Enter);

        let progress = app.session().unwrap().progress().unwrap();
        assert_eq!(progress.answer_state(), AnswerState::Correct);
        assert!(app.typed().is_empty());
    }

    #[test]
    fn test_bookmark_persists_through_port() {
        let port = SharedPort::default();
        let (mut app, tx) = app_with(port.clone());
        tx.try_send(Catalogue::from_words(words(), Vec::new())).unwrap();
        app.poll_catalogue();

        open_animals(&mut app, 0);
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.saved().len(), 1);
        assert_eq!(port.stored.lock().unwrap()[0].id, "animals-001");
        assert_eq!(app.status(), Some("Saved der Hund"));

        press(&mut app, KeyCode::Char('b'));
        assert!(app.saved().is_empty());
    }

    #[test]
    fn test_saved_word_opens_in_learn() {
        let port = SharedPort::default();
        port.stored.lock().unwrap().push(words()[1].clone());
        let (mut app, tx) = app_with(port);
        tx.try_send(Catalogue::from_words(words(), Vec::new())).unwrap();
        app.poll_catalogue();

        press(&mut app, KeyCode::Up); // wraps to Saved Words
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state_manager().current_screen(), Screen::SavedWordsReview);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state_manager().current_screen(), Screen::Learn);
        let progress = app.session().unwrap().progress().unwrap();
        assert_eq!(progress.current_word().id, "animals-002");
    }

    #[test]
    fn test_search_jumps_to_word() {
        let mut app = ready_app();
        press(&mut app, KeyCode::Char('/'));
        assert!(app.search_open());

        type_text(&mut app, "katze");
        press(&mut app, KeyCode::Enter);
        assert!(!app.search_open());
        assert_eq!(app.state_manager().current_screen(), Screen::Learn);
        assert_eq!(app.state_manager().active_category(), Some("animals"));
        let progress = app.session().unwrap().progress().unwrap();
        assert_eq!(progress.cursor(), 1);
    }

    #[test]
    fn test_back_from_home_quits() {
        let mut app = ready_app();
        open_animals(&mut app, 0);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state_manager().current_screen(), Screen::CategorySelect);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state_manager().current_screen(), Screen::Home);
        assert!(app.session().is_none());
        press(&mut app, KeyCode::Esc);
        assert!(app.state_manager().should_quit());
    }

    #[test]
    fn test_search_needs_catalogue() {
        let (mut app, _tx) = app_with(SharedPort::default());
        press(&mut app, KeyCode::Char('/'));
        assert!(!app.search_open());
        assert_eq!(app.status(), Some("Words are still loading"));
    }

    fn search_for(app: &mut App, query: &str) {
        press(app, KeyCode::Char('/'));
        type_text(app, query);
        press(app, KeyCode::Enter);
    }

    fn current_id(app: &App) -> String {
        let progress = app.session().unwrap().progress().unwrap();
        progress.current_word().id.clone()
    }

    #[test]
    fn test_search_same_word_again_returns_to_it() {
        let mut app = ready_app();
        search_for(&mut app, "katze");
        assert_eq!(current_id(&app), "animals-002");

        press(&mut app, KeyCode::Left);
        assert_eq!(current_id(&app), "animals-001");

        search_for(&mut app, "katze");
        assert_eq!(app.state_manager().current_screen(), Screen::Learn);
        assert_eq!(current_id(&app), "animals-002");
    }

    #[test]
    fn test_saved_word_again_returns_to_it() {
        let port = SharedPort::default();
        port.stored.lock().unwrap().push(words()[1].clone());
        let (mut app, tx) = app_with(port);
        tx.try_send(Catalogue::from_words(words(), Vec::new())).unwrap();
        app.poll_catalogue();

        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Left);
        assert_eq!(current_id(&app), "animals-001");

        // Home, then into Saved Words again
        press(&mut app, KeyCode::Char('g'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state_manager().current_screen(), Screen::SavedWordsReview);
        press(&mut app, KeyCode::Enter);
        assert_eq!(current_id(&app), "animals-002");
    }

    #[test]
    fn test_broken_word_list_is_not_reported_as_import() {
        let (mut app, tx) = app_with(SharedPort::default());
        let diagnostic = LoadDiagnostic::new(
            "food",
            VocabError::ParseFailure("Malformed word list".to_string()),
        );
        tx.try_send(Catalogue::from_words(words(), vec![diagnostic]))
            .unwrap();
        app.poll_catalogue();

        let status = app.status().unwrap();
        assert!(status.contains("food word list"));
        assert!(!status.contains("import"));
    }
}
