//! Application module
//!
//! - Actions: What can happen in the UI
//! - State: What the UI shows right now
//! - Reducer: Pure function (State, Action) -> State
//! - Event: Terminal polling

pub mod actions;
pub mod event;
pub mod reducer;
pub mod state;

// Re-export commonly used types
pub use actions::{Action, Focus};
pub use reducer::{action_for_key, reduce};
pub use state::{AppState, DateInputState, StatusBarState, UiConfig};
