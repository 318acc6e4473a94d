//! Category selection screen
//!
//! Lists every registered category with the number of cards the chosen
//! mode would show for it.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::state::LearningMode;
use crate::models::{Category, CATEGORIES};

#[derive(Debug)]
pub struct CategoryScreen {
    selected_index: usize,
    list_state: ListState,
}

impl CategoryScreen {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            selected_index: 0,
            list_state,
        }
    }

    pub fn selected_category(&self) -> &'static Category {
        &CATEGORIES[self.selected_index]
    }

    pub fn select_previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        } else {
            self.selected_index = CATEGORIES.len() - 1;
        }
        self.list_state.select(Some(self.selected_index));
    }

    pub fn select_next(&mut self) {
        if self.selected_index < CATEGORIES.len() - 1 {
            self.selected_index += 1;
        } else {
            self.selected_index = 0;
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Render the grid. `counts` follows `CATEGORIES`; `None` while loading.
    pub fn render(
        &mut self,
        f: &mut Frame,
        area: Rect,
        mode: Option<LearningMode>,
        counts: &[Option<usize>],
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);

        let heading = mode.map(|m| m.title()).unwrap_or("Categories");
        let title = Paragraph::new(heading)
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        let items: Vec<ListItem> = CATEGORIES
            .iter()
            .enumerate()
            .map(|(i, category)| {
                let count = match counts.get(i).copied().flatten() {
                    Some(n) => format!("{} words", n),
                    None => "loading…".to_string(),
                };
                ListItem::new(format!("{:<16} {}", category.title(), count))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Choose a Category"))
            .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black))
            .highlight_symbol(">> ");
        f.render_stateful_widget(list, chunks[1], &mut self.list_state);

        let help = Paragraph::new("↑↓: Navigate  Enter: Select  Esc: Back")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(help, chunks[2]);
    }
}

impl Default for CategoryScreen {
    fn default() -> Self {
        Self::new()
    }
}
