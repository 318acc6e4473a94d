//! Saved words screen implementation
//!
//! Displays the bookmarked words and opens the selected one in Learn mode.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::models::Word;

/// Saved words screen component
#[derive(Debug)]
pub struct SavedScreen {
    selected_index: usize,
    list_state: ListState,
}

impl SavedScreen {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            selected_index: 0,
            list_state,
        }
    }

    /// Get the currently selected word
    pub fn selected_word<'a>(&self, words: &'a [Word]) -> Option<&'a Word> {
        words.get(self.selected_index)
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Keep the selection inside a list that may have shrunk
    pub fn clamp(&mut self, len: usize) {
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Move selection up
    pub fn select_previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        if self.selected_index > 0 {
            self.selected_index -= 1;
        } else {
            self.selected_index = len - 1;
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Move selection down
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        if self.selected_index < len - 1 {
            self.selected_index += 1;
        } else {
            self.selected_index = 0;
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Render the saved words screen
    pub fn render(&mut self, f: &mut Frame, area: Rect, words: &[Word]) {
        self.clamp(words.len());
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new(format!("Saved Words ({})", words.len()))
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        let items: Vec<ListItem> = if words.is_empty() {
            vec![ListItem::new("No saved words yet. Press B on a card to save it.")]
        } else {
            words.iter().map(|w| ListItem::new(w.label())).collect()
        };

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black))
            .highlight_symbol(">> ");
        f.render_stateful_widget(list, chunks[1], &mut self.list_state);

        let help = Paragraph::new("↑↓: Navigate  Enter: Open  B: Remove  E/I: Export/Import  Esc: Back")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(help, chunks[2]);
    }
}

impl Default for SavedScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn words() -> Vec<Word> {
        vec![
            Word::new("animals-001", "Hund", Some(Gender::Der), "dog", "animals"),
            Word::new("animals-002", "Katze", Some(Gender::Die), "cat", "animals"),
        ]
    }

    #[test]
    fn test_saved_navigation() {
        let words = words();
        let mut screen = SavedScreen::new();
        screen.select_next(words.len());
        assert_eq!(screen.selected_word(&words).unwrap().id, "animals-002");
        screen.select_next(words.len());
        assert_eq!(screen.selected_index(), 0); // wrap
        screen.select_previous(words.len());
        assert_eq!(screen.selected_index(), 1); // wrap
    }

    #[test]
    fn test_clamp_after_removal() {
        let mut words = words();
        let mut screen = SavedScreen::new();
        screen.select_next(words.len());
        words.pop();
        screen.clamp(words.len());
        assert_eq!(screen.selected_word(&words).unwrap().id, "animals-001");

        screen.clamp(0);
        assert!(screen.selected_word(&[]).is_none());
        screen.select_next(0);
        assert_eq!(screen.selected_index(), 0);
    }
}
