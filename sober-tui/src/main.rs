//! sober-tui - Terminal UI for the sobriety tracker
//!
//! Set a sober-since date, watch the streak counter, and log relapses.

use anyhow::Context;
use crossterm::event::{KeyCode, KeyEvent};
use libsobriety::{logging::LoggingConfig, Config};
use sober_tui::{
    app::{action_for_key, event::EventHandler, event::TuiEvent, reduce, Action, AppState, UiConfig},
    effects,
    terminal::{install_panic_hook, restore_terminal, setup_terminal, Tui},
    tracker::TrackerHandle,
    ui::{self, date_picker::DatePicker},
};

fn main() -> anyhow::Result<()> {
    // The terminal is ours, so logs only go to a file when asked for
    if let Ok(path) = std::env::var("SOBRIETY_LOG_FILE") {
        LoggingConfig::from_env()
            .init_with_file(std::path::Path::new(&path))
            .with_context(|| format!("Failed to open log file {}", path))?;
    }

    let config = Config::load_or_default().context("Failed to load configuration")?;
    tracing::debug!(?config, "sober-tui starting");

    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, &config);

    restore_terminal(terminal)?;

    result.map_err(Into::into)
}

fn run_app(terminal: &mut Tui, config: &Config) -> sober_tui::Result<()> {
    let mut state = AppState::with_config(UiConfig::from_config(config));
    let mut tracker = TrackerHandle::new(config);
    let mut picker = DatePicker::new();

    let event_handler = EventHandler::new(state.config.tick_rate_ms);

    loop {
        picker.sync_style(&state);

        let tracked = tracker.snapshot();
        let now = tracker.now();
        terminal.draw(|frame| {
            ui::render(frame, &state, &tracked, &picker, now);
        })?;

        let action = match event_handler.next()? {
            TuiEvent::Key(key) => route_key(&state, &mut picker, key),
            other => other.into(),
        };

        // Typing a date or recording a relapse retires the previous status message
        if matches!(action, Action::DateInputChanged(_) | Action::RelapseRequested) {
            state = reduce(state, Action::ClearStatus);
        }

        state = reduce(state, action.clone());
        state = effects::apply(state, &action, &mut tracker);

        // Field is reset after a successful save
        if state.date_input.content.is_empty() && !picker.is_empty() {
            picker.clear();
        }

        if state.should_quit {
            break;
        }
    }

    tracing::debug!(revision = state.revision, "sober-tui exiting");
    Ok(())
}

/// Send typing to the date field, everything else through the keymap
fn route_key(state: &AppState, picker: &mut DatePicker, key: KeyEvent) -> Action {
    let is_navigation = matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Tab | KeyCode::F(_));

    if state.editing_date() && !is_navigation && picker.input(key) {
        return Action::DateInputChanged(picker.content());
    }

    action_for_key(state, key).unwrap_or(Action::Key(key))
}
