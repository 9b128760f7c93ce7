//! Pure reducer: `(State, Action) -> State`
//!
//! The reducer has no side effects. It performs no I/O and no logging, and
//! it never modifies its input. The only outside input is the clock read
//! when a relapse restarts the streak.

use crate::actions::Action;
use crate::clock::{Clock, SystemClock};
use crate::types::SobrietyState;

/// Compute the next state using the system clock
pub fn reduce(state: &SobrietyState, action: Action) -> SobrietyState {
    reduce_with_clock(state, action, &SystemClock)
}

/// Compute the next state, reading "now" from `clock`
///
/// - `UpdateTimeSober`: anchor replaced, relapses untouched
/// - `AddRelapse`: record appended, anchor reset to `clock.now()`
/// - `Unknown`: identity
pub fn reduce_with_clock(
    state: &SobrietyState,
    action: Action,
    clock: &dyn Clock,
) -> SobrietyState {
    match action {
        Action::UpdateTimeSober { payload } => SobrietyState {
            time_sober: Some(payload),
            ..state.clone()
        },

        Action::AddRelapse { payload } => {
            let mut relapses = Vec::with_capacity(state.relapses.len() + 1);
            relapses.extend_from_slice(&state.relapses);
            relapses.push(payload);

            SobrietyState {
                time_sober: Some(clock.now()),
                relapses,
            }
        }

        Action::Unknown => state.clone(),
    }
}
