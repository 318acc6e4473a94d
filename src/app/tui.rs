//! Terminal management system
//!
//! Handles crossterm backend initialization, screen management,
//! and keyboard event processing for the TUI application.

use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};

use crate::{Result, VocabError};

/// UI refresh interval; also bounds how long a catalogue update waits
pub const TICK_RATE: Duration = Duration::from_millis(250);

fn tui_error(context: &str, e: io::Error) -> VocabError {
    VocabError::TuiError(format!("{}: {}", context, e))
}

/// Terminal wrapper that manages crossterm backend and screen state
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    last_tick: Instant,
    tick_rate: Duration,
}

impl Tui {
    /// Create a new TUI instance with crossterm backend
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend).map_err(|e| tui_error("terminal setup", e))?;

        Ok(Self {
            terminal,
            last_tick: Instant::now(),
            tick_rate: TICK_RATE,
        })
    }

    /// Initialize terminal with proper setup
    pub fn init(&mut self) -> Result<()> {
        enable_raw_mode().map_err(|e| tui_error("raw mode", e))?;
        execute!(io::stdout(), EnterAlternateScreen).map_err(|e| tui_error("alternate screen", e))?;
        self.terminal.hide_cursor().map_err(|e| tui_error("cursor", e))?;
        self.terminal.clear().map_err(|e| tui_error("clear", e))?;
        Ok(())
    }

    /// Restore terminal to original state
    pub fn restore(&mut self) -> Result<()> {
        disable_raw_mode().map_err(|e| tui_error("raw mode", e))?;
        execute!(io::stdout(), LeaveAlternateScreen).map_err(|e| tui_error("alternate screen", e))?;
        self.terminal.show_cursor().map_err(|e| tui_error("cursor", e))?;
        Ok(())
    }

    /// Draw the UI using the provided render function
    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f).map_err(|e| tui_error("draw", e))?;
        Ok(())
    }

    /// Wait up to one tick for a key press
    pub fn handle_events(&mut self) -> Result<Option<KeyEvent>> {
        let timeout = self
            .tick_rate
            .checked_sub(self.last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout).map_err(|e| tui_error("event poll", e))? {
            if let Event::Key(key) = event::read().map_err(|e| tui_error("event read", e))? {
                // Windows reports releases too
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(key));
                }
            }
        }

        if self.last_tick.elapsed() >= self.tick_rate {
            self.last_tick = Instant::now();
        }

        Ok(None)
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        // Ensure terminal is restored even if restore() wasn't called
        let _ = self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_failures_are_fatal() {
        let e = tui_error("draw", io::Error::new(io::ErrorKind::Other, "gone"));
        assert!(matches!(e, VocabError::TuiError(ref msg) if msg == "draw: gone"));
        assert!(!crate::error::is_recoverable(&e));
    }

    #[test]
    fn test_tick_rate() {
        assert_eq!(TICK_RATE, Duration::from_millis(250));
    }
}
