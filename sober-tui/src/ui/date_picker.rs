//! Sober-since date field backed by tui-textarea
//!
//! Single line, digits and dashes only, at most `YYYY-MM-DD` long.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};
use tui_textarea::TextArea;

use crate::app::AppState;

const PLACEHOLDER: &str = "YYYY-MM-DD";
const MAX_LEN: usize = 10;

pub struct DatePicker<'a> {
    textarea: TextArea<'a>,
}

impl<'a> DatePicker<'a> {
    pub fn new() -> Self {
        let mut textarea = TextArea::default();
        textarea.set_placeholder_text(PLACEHOLDER);
        textarea.set_cursor_line_style(Style::default());
        Self { textarea }
    }

    /// Current field content
    pub fn content(&self) -> String {
        self.textarea.lines().join("")
    }

    pub fn is_empty(&self) -> bool {
        self.textarea.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Feed a key to the field
    ///
    /// Returns false for keys the field does not handle; those go to the
    /// keymap instead.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return false;
        }

        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
                if self.content().chars().count() < MAX_LEN {
                    self.textarea.input(key);
                }
                true
            }
            KeyCode::Backspace
            | KeyCode::Delete
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Home
            | KeyCode::End => {
                self.textarea.input(key);
                true
            }
            _ => false,
        }
    }

    /// Restyle for the current focus and validity
    pub fn sync_style(&mut self, state: &AppState) {
        let focused = state.editing_date();
        let border = if !state.config.colors_enabled {
            Style::default()
        } else if !focused {
            Style::default().fg(Color::DarkGray)
        } else if state.date_input.valid {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Yellow)
        };

        self.textarea.set_block(
            Block::default()
                .title(" Sober since ")
                .borders(Borders::ALL)
                .border_style(border),
        );

        let cursor = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        self.textarea.set_cursor_style(cursor);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(&self.textarea, area);
    }
}

impl Default for DatePicker<'_> {
    fn default() -> Self {
        Self::new()
    }
}
