//! Sobriety tracker state core
//!
//! A "sober since" anchor and an append-only relapse log, updated only by
//! dispatching [`Action`]s to a [`Store`]. The [`reduce`] function that does
//! the work is pure and total.

pub mod actions;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod reducer;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use actions::{add_relapse, update_time_sober, Action};
pub use clock::{Clock, SystemClock};
pub use config::Config;
pub use error::{ConfigError, Result, SobrietyError};
pub use reducer::{reduce, reduce_with_clock};
pub use store::{Store, Subscription};
pub use types::{RelapseRecord, SobrietyState};
