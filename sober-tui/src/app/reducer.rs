//! Pure reducer for UI state transitions
//!
//! `(AppState, Action) -> AppState`, with no side effects. Recording a
//! relapse or changing the sober date is requested here but carried out by
//! [`crate::effects`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::actions::{Action, Focus};
use super::state::{AppState, DateInputState, StatusBarState};
use crate::tracker::parse_sober_date;

/// Pure reducer function
///
/// Takes current state and an action, returns new state.
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        // === UI Events ===
        Action::Key(key) => match action_for_key(&state, key) {
            Some(action) => reduce(state, action),
            None => state,
        },
        Action::Tick => state,
        Action::Resize(_, _) => state, // Terminal auto-handles resize

        // === Navigation ===
        Action::Quit => AppState {
            should_quit: true,
            ..state
        },

        Action::ShowHelp => AppState {
            help_visible: true,
            ..state
        },

        Action::HideHelp => AppState {
            help_visible: false,
            ..state
        },

        Action::FocusOn(focus) => AppState { focus, ..state },

        // === Tracker ===
        Action::DateInputChanged(content) => {
            let valid = parse_sober_date(&content).is_ok();
            AppState {
                date_input: DateInputState { content, valid },
                ..state
            }
        }

        // Carried out by the effects layer
        Action::DateSubmitRequested => state,
        Action::RelapseRequested => state,

        Action::TrackerUpdated(revision) => AppState { revision, ..state },

        // === Error Handling ===
        Action::ShowError(error) => AppState {
            error: Some(error),
            ..state
        },

        Action::DismissError => AppState {
            error: None,
            ..state
        },

        // === Status Bar ===
        Action::SetStatus(message) => AppState {
            status: StatusBarState {
                message: Some(message),
            },
            ..state
        },

        Action::ClearStatus => AppState {
            status: StatusBarState { message: None },
            ..state
        },
    }
}

/// Map a key press to the action it triggers in the current state
///
/// This is where keybindings are defined. Characters typed into the date
/// field never reach here; the event loop hands them to the text widget.
pub fn action_for_key(state: &AppState, key: KeyEvent) -> Option<Action> {
    // Global keybindings (work everywhere)
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return Some(Action::Quit),
        (KeyCode::Char('q'), KeyModifiers::NONE) => return Some(Action::Quit),

        (KeyCode::F(1), _) => {
            return Some(if state.help_visible {
                Action::HideHelp
            } else {
                Action::ShowHelp
            });
        }

        // Esc peels one layer at a time
        (KeyCode::Esc, _) if state.error.is_some() => return Some(Action::DismissError),
        (KeyCode::Esc, _) if state.help_visible => return Some(Action::HideHelp),
        (KeyCode::Esc, _) if state.focus == Focus::DatePicker => {
            return Some(Action::FocusOn(Focus::Relapses));
        }

        _ => {}
    }

    if state.overlay_visible() {
        return None;
    }

    match state.focus {
        Focus::Relapses => match (key.code, key.modifiers) {
            (KeyCode::Char('r'), KeyModifiers::NONE) => Some(Action::RelapseRequested),
            (KeyCode::Char('d'), KeyModifiers::NONE) | (KeyCode::Tab, _) => {
                Some(Action::FocusOn(Focus::DatePicker))
            }
            _ => None,
        },
        Focus::DatePicker => match (key.code, key.modifiers) {
            (KeyCode::Enter, _) if state.date_input.valid => Some(Action::DateSubmitRequested),
            (KeyCode::Enter, _) => Some(Action::ShowError(format!(
                "'{}' is not a date. Use YYYY-MM-DD.",
                state.date_input.content
            ))),
            (KeyCode::Tab, _) | (KeyCode::BackTab, _) => Some(Action::FocusOn(Focus::Relapses)),
            _ => None,
        },
    }
}
