//! Home screen implementation
//!
//! Mode menu with Start Learning, Practice Gender, Practice Typing and
//! Saved Words entries, plus the catalogue load status.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::state::LearningMode;

/// Home screen component with mode selection
#[derive(Debug)]
pub struct HomeScreen {
    selected_index: usize,
    list_state: ListState,
}

impl HomeScreen {
    /// Create a new home screen
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            selected_index: 0,
            list_state,
        }
    }

    /// Get the currently highlighted mode
    pub fn selected_mode(&self) -> LearningMode {
        LearningMode::ALL[self.selected_index]
    }

    /// Move selection up
    pub fn select_previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        } else {
            self.selected_index = LearningMode::ALL.len() - 1;
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        if self.selected_index < LearningMode::ALL.len() - 1 {
            self.selected_index += 1;
        } else {
            self.selected_index = 0;
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Render the home screen. `status` describes the catalogue.
    pub fn render(&mut self, f: &mut Frame, area: Rect, status: &str, saved_count: usize) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Title and subtitle
                Constraint::Min(8),    // Mode list
                Constraint::Length(3), // Help text
            ])
            .split(area);

        self.render_title(f, chunks[0], status);
        self.render_menu(f, chunks[1], saved_count);
        self.render_help(f, chunks[2]);
    }

    fn render_title(&self, f: &mut Frame, area: Rect, status: &str) {
        let title_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(2)])
            .split(area);

        let title = Paragraph::new("VOCABMASTER")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        f.render_widget(title, title_chunks[0]);

        let subtitle = Paragraph::new(format!("German vocabulary trainer · {}", status))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(subtitle, title_chunks[1]);
    }

    fn render_menu(&mut self, f: &mut Frame, area: Rect, saved_count: usize) {
        let items: Vec<ListItem> = LearningMode::ALL
            .iter()
            .map(|mode| match mode {
                LearningMode::SavedWords => {
                    ListItem::new(format!("{} ({})", mode.title(), saved_count))
                }
                _ => ListItem::new(mode.title()),
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Choose a Mode"))
            .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let key = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let help_text = vec![Line::from(vec![
            Span::styled("↑↓", key),
            Span::raw(" Navigate  "),
            Span::styled("Enter", key),
            Span::raw(" Select  "),
            Span::styled("/", key),
            Span::raw(" Search  "),
            Span::styled("E/I", key),
            Span::raw(" Export/Import  "),
            Span::styled("Q", key),
            Span::raw(" Quit"),
        ])];

        let help = Paragraph::new(help_text)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );

        f.render_widget(help, area);
    }
}

impl Default for HomeScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_screen_creation() {
        let screen = HomeScreen::new();
        assert_eq!(screen.selected_mode(), LearningMode::Learn);
    }

    #[test]
    fn test_menu_navigation() {
        let mut screen = HomeScreen::new();
        screen.select_next();
        assert_eq!(screen.selected_mode(), LearningMode::PracticeGender);

        // Wraps past the last entry
        screen.select_next();
        screen.select_next();
        screen.select_next();
        assert_eq!(screen.selected_mode(), LearningMode::Learn);
    }

    #[test]
    fn test_menu_navigation_up() {
        let mut screen = HomeScreen::new();
        screen.select_previous();
        assert_eq!(screen.selected_mode(), LearningMode::SavedWords);
        screen.select_previous();
        assert_eq!(screen.selected_mode(), LearningMode::PracticeTyping);
    }
}
