//! Actions for the UI reducer
//!
//! These describe what happened in the terminal UI. They are distinct from
//! [`libsobriety::Action`], which describes changes to tracked data; the
//! event loop turns `RelapseRequested` and `DateSubmitRequested` into
//! tracker calls.

use crossterm::event::KeyEvent;

/// Actions that trigger UI state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // === UI Events ===
    /// Keyboard input event
    Key(KeyEvent),

    /// Periodic tick, redraws the elapsed counter
    Tick,

    /// Terminal resize event
    Resize(u16, u16),

    // === Navigation ===
    /// Quit the application
    Quit,

    /// Show help overlay
    ShowHelp,

    /// Hide help overlay
    HideHelp,

    /// Move keyboard focus
    FocusOn(Focus),

    // === Tracker ===
    /// Date field content changed
    DateInputChanged(String),

    /// User pressed Enter in the date field
    DateSubmitRequested,

    /// User pressed the relapse button
    RelapseRequested,

    /// Store notified a new state (revision counter)
    TrackerUpdated(u64),

    // === Error Handling ===
    /// Show error overlay
    ShowError(String),

    /// Dismiss error overlay
    DismissError,

    // === Status Bar ===
    /// Update status message
    SetStatus(String),

    /// Clear status message
    ClearStatus,
}

/// Which panel receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Relapse list and button
    Relapses,

    /// Sober-since date field
    DatePicker,
}
