//! Side effects requested by UI actions
//!
//! The UI reducer only records intent. After it runs, the event loop passes
//! the same action here; requests that touch tracked data are executed
//! against the tracker and their outcome is fed back through the reducer.

use crate::app::{reduce, Action, AppState, Focus};
use crate::tracker::TrackerHandle;

/// Execute the side effect for `action`, if it has one, and fold the
/// resulting store notifications into the UI state
pub fn apply(state: AppState, action: &Action, tracker: &mut TrackerHandle) -> AppState {
    let state = match action {
        Action::RelapseRequested => {
            let record = tracker.record_relapse();
            reduce(state, Action::SetStatus(format!("Relapse recorded ({})", record.time)))
        }

        Action::DateSubmitRequested => {
            match tracker.set_sober_since(&state.date_input.content) {
                Ok(anchor) => {
                    let state = reduce(state, Action::DateInputChanged(String::new()));
                    let state = reduce(state, Action::FocusOn(Focus::Relapses));
                    reduce(
                        state,
                        Action::SetStatus(format!("Sober since {}", anchor.format("%Y-%m-%d"))),
                    )
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Rejected sober date");
                    reduce(state, Action::ShowError(e.to_string()))
                }
            }
        }

        _ => state,
    };

    drain_updates(state, tracker)
}

/// Fold pending store revisions into the UI state
pub fn drain_updates(state: AppState, tracker: &TrackerHandle) -> AppState {
    tracker
        .updates()
        .try_iter()
        .fold(state, |state, revision| reduce(state, Action::TrackerUpdated(revision)))
}
