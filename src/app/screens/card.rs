//! Card screen implementation
//!
//! Renders a Learn or quiz session: the visible face of the current card,
//! position, score and the answer prompt.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::app::session::{AnswerState, Guess, SessionMode, SessionProgress, SessionState};
use crate::models::Category;

/// Everything the card screen reads
#[derive(Debug, Clone, Copy)]
pub struct CardView<'a> {
    pub category: Option<&'static Category>,
    pub session: Option<&'a SessionState>,
    /// Current word is bookmarked
    pub saved: bool,
    /// Pending typing quiz input
    pub typed: &'a str,
}

/// Front and back text of the current card
pub fn card_faces(progress: &SessionProgress) -> (String, String) {
    let word = progress.current_word();
    match progress.mode() {
        SessionMode::Learn => (word.full_term(), word.translation.clone()),
        SessionMode::QuizGender => (
            word.term.clone(),
            format!("{} - {}", word.full_term(), word.translation),
        ),
        SessionMode::QuizTyping => (word.translation.clone(), word.full_term()),
    }
}

/// Feedback line after a quiz answer
pub fn verdict(progress: &SessionProgress) -> Option<String> {
    let expected = progress.current_word().full_term();
    match (progress.answer_state(), progress.last_guess()) {
        (AnswerState::Unanswered, _) => None,
        (AnswerState::Correct, _) => Some("Correct!".to_string()),
        (AnswerState::Incorrect, Some(Guess::Gender(gender))) => {
            Some(format!("Not {}. It is {}", gender, expected))
        }
        (AnswerState::Incorrect, Some(Guess::Typed(text))) => {
            Some(format!("You typed \"{}\". The answer is {}", text.trim(), expected))
        }
        (AnswerState::Incorrect, None) => Some(format!("The answer is {}", expected)),
    }
}

/// Card screen component
#[derive(Debug, Default)]
pub struct CardScreen;

impl CardScreen {
    pub fn new() -> Self {
        Self
    }

    /// Render the card screen
    pub fn render(&self, f: &mut Frame, area: Rect, view: CardView<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Position gauge
                Constraint::Min(5),    // Card
                Constraint::Length(3), // Prompt
                Constraint::Length(3), // Help
            ])
            .split(area);

        let progress = match view.session {
            Some(SessionState::Active(progress)) => progress,
            Some(SessionState::Empty) => {
                self.render_title(f, chunks[0], &view, None);
                self.render_message(f, chunks[2], "No words in this category for this mode.");
                self.render_help(f, chunks[4], None);
                return;
            }
            Some(SessionState::Loading) | None => {
                self.render_title(f, chunks[0], &view, None);
                self.render_message(f, chunks[2], "Loading words…");
                self.render_help(f, chunks[4], None);
                return;
            }
        };

        self.render_title(f, chunks[0], &view, Some(progress));
        self.render_position(f, chunks[1], progress);
        self.render_card(f, chunks[2], progress);
        self.render_prompt(f, chunks[3], progress, view.typed);
        self.render_help(f, chunks[4], Some(progress));
    }

    fn render_title(
        &self,
        f: &mut Frame,
        area: Rect,
        view: &CardView<'_>,
        progress: Option<&SessionProgress>,
    ) {
        let mut spans = vec![Span::styled(
            view.category.map(|c| c.title()).unwrap_or_default(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )];
        if let Some(progress) = progress {
            if progress.mode().is_quiz() {
                let tally = progress.tally();
                spans.push(Span::raw(format!(
                    "   Score {}/{}",
                    tally.correct,
                    tally.answered()
                )));
            }
        }
        if view.saved {
            spans.push(Span::styled("   ★ saved", Style::default().fg(Color::Yellow)));
        }

        let title = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_position(&self, f: &mut Frame, area: Rect, progress: &SessionProgress) {
        let (position, total) = progress.position();
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .gauge_style(Style::default().fg(Color::Green))
            .percent(((position * 100) / total.max(1)) as u16)
            .label(format!("{} / {}", position, total));
        f.render_widget(gauge, area);
    }

    fn render_card(&self, f: &mut Frame, area: Rect, progress: &SessionProgress) {
        let (front, back) = card_faces(progress);
        let (text, side) = if progress.is_flipped() {
            (back, "back")
        } else {
            (front, "front")
        };

        let border = match progress.answer_state() {
            AnswerState::Unanswered => Color::White,
            AnswerState::Correct => Color::Green,
            AnswerState::Incorrect => Color::Red,
        };

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                text,
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];
        if let Some(verdict) = verdict(progress) {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(verdict, Style::default().fg(border))));
        }

        let card = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(side)
                    .border_style(Style::default().fg(border)),
            );
        f.render_widget(card, area);
    }

    fn render_prompt(&self, f: &mut Frame, area: Rect, progress: &SessionProgress, typed: &str) {
        let text = match (progress.mode(), progress.is_answered()) {
            (SessionMode::Learn, _) => String::new(),
            (SessionMode::QuizGender, false) => "der, die or das?".to_string(),
            (SessionMode::QuizTyping, false) => format!("> {}_", typed),
            (_, true) if progress.is_finished() => "Quiz finished.".to_string(),
            (_, true) => "Press Enter for the next word.".to_string(),
        };
        let prompt = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(prompt, area);
    }

    fn render_message(&self, f: &mut Frame, area: Rect, message: &str) {
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect, progress: Option<&SessionProgress>) {
        let text = match progress.map(|p| (p.mode(), p.is_answered())) {
            Some((SessionMode::Learn, _)) => {
                "←→: Previous/Next  Space: Flip  B: Save  P: Speak  Esc: Back"
            }
            Some((SessionMode::QuizGender, false)) => "1: der  2: die  3: das  P: Speak  Esc: Back",
            Some((SessionMode::QuizTyping, false)) => "Type the word with its article  Enter: Check  Esc: Back",
            Some((_, true)) => "Enter/→: Next  Space: Flip  B: Save  P: Speak  Esc: Back",
            None => "Esc: Back",
        };
        let help = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(help, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Word};

    fn session(mode: SessionMode) -> SessionProgress {
        let katze = Word::new("animals-002", "Katze", Some(Gender::Die), "cat", "animals");
        match SessionProgress::start(mode, vec![katze], None) {
            SessionState::Active(progress) => progress,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_learn_faces() {
        let (front, back) = card_faces(&session(SessionMode::Learn));
        assert_eq!(front, "die Katze");
        assert_eq!(back, "cat");
    }

    #[test]
    fn test_gender_quiz_front_hides_article() {
        let (front, back) = card_faces(&session(SessionMode::QuizGender));
        assert_eq!(front, "Katze");
        assert_eq!(back, "die Katze - cat");
    }

    #[test]
    fn test_typing_quiz_shows_translation_first() {
        let (front, back) = card_faces(&session(SessionMode::QuizTyping));
        assert_eq!(front, "cat");
        assert_eq!(back, "die Katze");
    }

    #[test]
    fn test_verdict() {
        let mut progress = session(SessionMode::QuizGender);
        assert!(verdict(&progress).is_none());
        progress.submit_gender_guess(Gender::Der);
        assert_eq!(verdict(&progress).unwrap(), "Not der. It is die Katze");

        let mut progress = session(SessionMode::QuizTyping);
        progress.submit_typed_answer("die katze");
        assert_eq!(verdict(&progress).unwrap(), "Correct!");
    }
}
