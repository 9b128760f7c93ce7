//! Event handling infrastructure
//!
//! Polls the terminal for keyboard and resize events, producing a tick when
//! nothing happens within the tick rate.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

use crate::app::Action;

/// Terminal events fed to the event loop
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// Keyboard input
    Key(KeyEvent),

    /// Terminal resize
    Resize(u16, u16),

    /// Periodic tick for the elapsed counter
    Tick,
}

impl From<TuiEvent> for Action {
    fn from(event: TuiEvent) -> Self {
        match event {
            TuiEvent::Key(key) => Action::Key(key),
            TuiEvent::Resize(w, h) => Action::Resize(w, h),
            TuiEvent::Tick => Action::Tick,
        }
    }
}

/// Event handler that polls for terminal events
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Poll for the next event, blocking up to the tick rate
    pub fn next(&self) -> std::io::Result<TuiEvent> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                // Windows reports releases too; act on presses only
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    Ok(TuiEvent::Key(key))
                }
                CrosstermEvent::Resize(w, h) => Ok(TuiEvent::Resize(w, h)),
                _ => Ok(TuiEvent::Tick),
            }
        } else {
            Ok(TuiEvent::Tick)
        }
    }
}
