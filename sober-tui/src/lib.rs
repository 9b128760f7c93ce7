//! sober-tui library
//!
//! Exports types and modules for testing and potential reuse.

pub mod app;
pub mod effects;
pub mod elapsed;
pub mod error;
pub mod terminal;
pub mod tracker;
pub mod ui;

// Re-export commonly used types
pub use app::{reduce, Action, AppState, Focus};
pub use error::{Result, TuiError};
pub use tracker::TrackerHandle;
