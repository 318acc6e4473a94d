//! Card session progress
//!
//! One `SessionProgress` exists per active Learn or quiz screen. The
//! `AnswerState` alone decides whether the learner may flip or move on in
//! the quiz modes.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::app::state::{NavigationState, Screen};
use crate::catalogue::CatalogueState;
use crate::models::{Gender, Word};

/// Activity a session drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Learn,
    QuizGender,
    QuizTyping,
}

impl SessionMode {
    pub fn from_screen(screen: Screen) -> Option<Self> {
        match screen {
            Screen::Learn => Some(SessionMode::Learn),
            Screen::QuizGender => Some(SessionMode::QuizGender),
            Screen::QuizTyping => Some(SessionMode::QuizTyping),
            _ => None,
        }
    }

    pub fn is_quiz(&self) -> bool {
        !matches!(self, SessionMode::Learn)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerState {
    #[default]
    Unanswered,
    Correct,
    Incorrect,
}

/// What the learner answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guess {
    Gender(Gender),
    Typed(String),
}

/// Running quiz score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub correct: usize,
    pub incorrect: usize,
}

impl Tally {
    pub fn answered(&self) -> usize {
        self.correct + self.incorrect
    }
}

/// Cursor, flip and answer state over a fixed word sequence
#[derive(Debug, Clone)]
pub struct SessionProgress {
    mode: SessionMode,
    words: Vec<Word>,
    cursor: usize,
    is_flipped: bool,
    answer_state: AnswerState,
    last_guess: Option<Guess>,
    tally: Tally,
}

impl SessionProgress {
    /// Start a session, seeking to `target_id` when it is in `words`.
    ///
    /// An empty sequence yields `SessionState::Empty`.
    pub fn start(mode: SessionMode, words: Vec<Word>, target_id: Option<&str>) -> SessionState {
        if words.is_empty() {
            return SessionState::Empty;
        }
        let cursor = target_id
            .and_then(|id| words.iter().position(|w| w.id == id))
            .unwrap_or(0);
        SessionState::Active(Self {
            mode,
            words,
            cursor,
            is_flipped: false,
            answer_state: AnswerState::Unanswered,
            last_guess: None,
            tally: Tally::default(),
        })
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    pub fn answer_state(&self) -> AnswerState {
        self.answer_state
    }

    pub fn last_guess(&self) -> Option<&Guess> {
        self.last_guess.as_ref()
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn current_word(&self) -> &Word {
        &self.words[self.cursor]
    }

    /// 1-based position and total, for a `3 / 12` counter
    pub fn position(&self) -> (usize, usize) {
        (self.cursor + 1, self.words.len())
    }

    pub fn is_answered(&self) -> bool {
        self.answer_state != AnswerState::Unanswered
    }

    pub fn is_last(&self) -> bool {
        self.cursor + 1 == self.words.len()
    }

    /// Quiz reached its last card and it has been answered
    pub fn is_finished(&self) -> bool {
        self.mode.is_quiz() && self.is_last() && self.is_answered()
    }

    /// Whether the learner controls the flip right now
    pub fn can_flip(&self) -> bool {
        !self.mode.is_quiz() || self.is_answered()
    }

    /// Whether `advance` would move the cursor
    pub fn can_advance(&self) -> bool {
        !self.is_last() && (!self.mode.is_quiz() || self.is_answered())
    }

    pub fn can_retreat(&self) -> bool {
        self.mode == SessionMode::Learn && self.cursor > 0
    }

    /// Toggle the card. Returns whether anything changed.
    pub fn flip(&mut self) -> bool {
        if !self.can_flip() {
            return false;
        }
        self.is_flipped = !self.is_flipped;
        true
    }

    /// Move to the next card. Returns whether the cursor moved.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        self.cursor += 1;
        self.is_flipped = false;
        self.answer_state = AnswerState::Unanswered;
        self.last_guess = None;
        true
    }

    /// Move to the previous card (Learn only). Returns whether the cursor moved.
    pub fn retreat(&mut self) -> bool {
        if !self.can_retreat() {
            return false;
        }
        self.cursor -= 1;
        self.is_flipped = false;
        true
    }

    /// Answer the gender quiz. `None` when the guess was not accepted.
    pub fn submit_gender_guess(&mut self, gender: Gender) -> Option<AnswerState> {
        if self.mode != SessionMode::QuizGender || self.is_answered() {
            return None;
        }
        let correct = self.current_word().gender == Some(gender);
        Some(self.record(correct, Guess::Gender(gender)))
    }

    /// Answer the typing quiz. `None` when the answer was not accepted.
    ///
    /// The expected answer is the term with its article, compared
    /// case-insensitively after trimming.
    pub fn submit_typed_answer(&mut self, text: &str) -> Option<AnswerState> {
        if self.mode != SessionMode::QuizTyping || self.is_answered() {
            return None;
        }
        let expected = self.current_word().full_term();
        let correct = text.trim().to_lowercase() == expected.trim().to_lowercase();
        Some(self.record(correct, Guess::Typed(text.to_string())))
    }

    fn record(&mut self, correct: bool, guess: Guess) -> AnswerState {
        self.answer_state = if correct {
            self.tally.correct += 1;
            AnswerState::Correct
        } else {
            self.tally.incorrect += 1;
            AnswerState::Incorrect
        };
        self.last_guess = Some(guess);
        self.is_flipped = true;
        debug!(id = %self.current_word().id, answer = ?self.answer_state, "Answer recorded");
        self.answer_state
    }

    /// Text to read aloud for the current card, if any.
    ///
    /// Quizzes do not give the answer away before it is submitted.
    pub fn pronunciation(&self) -> Option<String> {
        let word = self.current_word();
        match (self.mode, self.is_answered()) {
            (SessionMode::Learn, _) | (_, true) => Some(word.full_term()),
            (SessionMode::QuizGender, false) => Some(word.term.clone()),
            (SessionMode::QuizTyping, false) => None,
        }
    }

    fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.words.shuffle(rng);
        self.cursor = 0;
    }
}

/// Session as seen by a card screen
#[derive(Debug, Clone)]
pub enum SessionState {
    /// Catalogue still loading
    Loading,
    /// Category has no words for this mode
    Empty,
    Active(SessionProgress),
}

impl SessionState {
    /// Resolve the session for the current screen, or `None` when the
    /// screen shows no cards.
    pub fn resolve(catalogue: &CatalogueState, navigation: &NavigationState) -> Option<Self> {
        let mode = SessionMode::from_screen(navigation.current_screen)?;
        let category = navigation.active_category.as_deref()?;
        let Some(catalogue) = catalogue.catalogue() else {
            return Some(SessionState::Loading);
        };

        let words = match mode {
            SessionMode::QuizGender => catalogue.gendered_words_in(category),
            SessionMode::Learn | SessionMode::QuizTyping => catalogue.words_in(category),
        };
        let target = match mode {
            SessionMode::Learn => navigation.jump_to_word_id.as_deref(),
            _ => None,
        };
        debug!(?mode, category, words = words.len(), "Session resolved");
        Some(SessionProgress::start(mode, words, target))
    }

    /// Shuffle quiz order; Learn sessions keep catalogue order
    pub fn shuffled<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        if let SessionState::Active(progress) = &mut self {
            if progress.mode.is_quiz() {
                progress.shuffle(rng);
            }
        }
        self
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    pub fn progress(&self) -> Option<&SessionProgress> {
        match self {
            SessionState::Active(progress) => Some(progress),
            _ => None,
        }
    }

    pub fn progress_mut(&mut self) -> Option<&mut SessionProgress> {
        match self {
            SessionState::Active(progress) => Some(progress),
            _ => None,
        }
    }
}
