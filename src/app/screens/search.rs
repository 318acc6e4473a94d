//! Word search popup
//!
//! Filters the catalogue by label as the learner types; Enter opens the
//! highlighted word in Learn mode.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::catalogue::Catalogue;
use crate::models::Word;

/// Maximum number of matches listed
pub const SEARCH_LIMIT: usize = 10;

#[derive(Debug, Default)]
pub struct SearchOverlay {
    open: bool,
    query: String,
    selected_index: usize,
    list_state: ListState,
}

impl SearchOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn open(&mut self) {
        self.open = true;
        self.query.clear();
        self.selected_index = 0;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn push(&mut self, c: char) {
        self.query.push(c);
        self.selected_index = 0;
    }

    pub fn pop(&mut self) {
        self.query.pop();
        self.selected_index = 0;
    }

    pub fn select_previous(&mut self, len: usize) {
        if len > 0 {
            self.selected_index = (self.selected_index + len - 1) % len;
        }
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected_index = (self.selected_index + 1) % len;
        }
    }

    /// Current matches for the query
    pub fn matches<'a>(&self, catalogue: &'a Catalogue) -> Vec<&'a Word> {
        catalogue.search(&self.query, SEARCH_LIMIT)
    }

    /// Highlighted match, if any
    pub fn selected<'a>(&self, catalogue: &'a Catalogue) -> Option<&'a Word> {
        self.matches(catalogue).get(self.selected_index).copied()
    }

    /// Render the popup over `area`
    pub fn render(&mut self, f: &mut Frame, area: Rect, catalogue: &Catalogue) {
        let matches = self.matches(catalogue);
        let popup = centered_rect(60, SEARCH_LIMIT as u16 + 5, area);
        f.render_widget(Clear, popup);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(popup);

        let input = Paragraph::new(format!("{}_", self.query)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Search")
                .border_style(Style::default().fg(Color::Yellow)),
        );
        f.render_widget(input, chunks[0]);

        let items: Vec<ListItem> = if matches.is_empty() {
            vec![ListItem::new("No matches")]
        } else {
            matches.iter().map(|w| ListItem::new(w.label())).collect()
        };
        self.list_state
            .select((!matches.is_empty()).then_some(self.selected_index));

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black))
            .highlight_symbol(">> ");
        f.render_stateful_widget(list, chunks[1], &mut self.list_state);
    }
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
