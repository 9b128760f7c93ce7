//! End-to-end flows: UI action -> reducer -> effects -> store -> UI state

use std::rc::Rc;

use chrono::{Local, TimeZone, Utc};
use libsobriety::{clock::FixedClock, Config, RelapseRecord};
use sober_tui::{
    app::{reduce, Action, AppState, Focus},
    effects,
    tracker::TrackerHandle,
};

fn step(state: AppState, action: Action, tracker: &mut TrackerHandle) -> AppState {
    let state = reduce(state, action.clone());
    effects::apply(state, &action, tracker)
}

#[test]
fn test_relapse_button_records_today_and_restarts_streak() {
    let now = Utc.with_ymd_and_hms(2020, 1, 1, 12, 0, 0).unwrap();
    let mut tracker = TrackerHandle::with_clock(&Config::default(), Rc::new(FixedClock::new(now)));

    let state = step(AppState::new(), Action::RelapseRequested, &mut tracker);

    let expected = RelapseRecord::on_date(
        now.with_timezone(&Local).date_naive(),
        libsobriety::types::DEFAULT_DATE_FORMAT,
    );
    let tracked = tracker.snapshot();
    assert_eq!(tracked.relapses, vec![expected.clone()]);
    assert_eq!(tracked.time_sober, Some(now));
    assert_eq!(state.revision, 1);
    assert_eq!(
        state.status.message,
        Some(format!("Relapse recorded ({})", expected.time))
    );
}

#[test]
fn test_two_relapses_make_two_entries() {
    let mut tracker = TrackerHandle::new(&Config::default());

    let state = step(AppState::new(), Action::RelapseRequested, &mut tracker);
    let state = step(state, Action::RelapseRequested, &mut tracker);

    assert_eq!(tracker.snapshot().relapses.len(), 2);
    assert_eq!(state.revision, 2);
}

#[test]
fn test_saving_sober_date() {
    let mut tracker = TrackerHandle::new(&Config::default());

    let state = step(AppState::new(), Action::RelapseRequested, &mut tracker);
    let state = step(state, Action::FocusOn(Focus::DatePicker), &mut tracker);
    let state = step(state, Action::DateInputChanged("2020-01-02".to_string()), &mut tracker);
    let state = step(state, Action::DateSubmitRequested, &mut tracker);

    let tracked = tracker.snapshot();
    assert_eq!(
        tracked.time_sober,
        Some(Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap())
    );
    assert_eq!(tracked.relapses.len(), 1);

    // Field cleared, focus back on the list
    assert_eq!(state.date_input.content, "");
    assert_eq!(state.focus, Focus::Relapses);
    assert_eq!(state.status.message, Some("Sober since 2020-01-02".to_string()));
    assert_eq!(state.revision, 2);
}

#[test]
fn test_bad_date_shows_error_and_leaves_store_alone() {
    let mut tracker = TrackerHandle::new(&Config::default());

    let mut state = AppState::new();
    state.date_input.content = "2020-13-45".to_string();
    let state = step(state, Action::DateSubmitRequested, &mut tracker);

    assert!(state.error.as_deref().unwrap_or("").contains("2020-13-45"));
    assert_eq!(state.revision, 0);
    assert!(tracker.snapshot().time_sober.is_none());
}

#[test]
fn test_ui_only_actions_do_not_touch_store() {
    let mut tracker = TrackerHandle::new(&Config::default());

    let state = step(AppState::new(), Action::ShowHelp, &mut tracker);
    let state = step(state, Action::Tick, &mut tracker);
    let state = step(state, Action::SetStatus("hello".to_string()), &mut tracker);

    assert_eq!(state.revision, 0);
    assert!(tracker.snapshot().relapses.is_empty());
}
