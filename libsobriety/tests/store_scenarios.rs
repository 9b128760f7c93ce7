//! End-to-end behaviour of the store: dispatch, snapshots, subscribers

use std::cell::Cell;
use std::rc::Rc;

use chrono::{TimeZone, Utc};
use libsobriety::{
    add_relapse, reduce, update_time_sober, Action, RelapseRecord, SobrietyState, Store,
};

fn sample_states() -> Vec<SobrietyState> {
    vec![
        SobrietyState::initial(),
        SobrietyState {
            time_sober: Some(Utc.with_ymd_and_hms(2019, 12, 31, 23, 0, 0).unwrap()),
            relapses: Vec::new(),
        },
        SobrietyState {
            time_sober: None,
            relapses: vec![RelapseRecord::new("garbage"), RelapseRecord::new("")],
        },
        SobrietyState {
            time_sober: Some(Utc.with_ymd_and_hms(2023, 3, 14, 15, 9, 26).unwrap()),
            relapses: (1..=12).map(|m| RelapseRecord::new(format!("{}/1/2022", m))).collect(),
        },
    ]
}

#[test]
fn test_unknown_message_is_identity_for_all_states() {
    for state in sample_states() {
        assert_eq!(reduce(&state, Action::Unknown), state);
    }
}

#[test]
fn test_update_time_sober_for_all_states() {
    let anchor = Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap();
    for state in sample_states() {
        let next = reduce(&state, update_time_sober(anchor));
        assert_eq!(next.time_sober, Some(anchor));
        assert_eq!(next.relapses, state.relapses);
    }
}

#[test]
fn test_add_relapse_appends_for_all_states() {
    let record = RelapseRecord::new("7/4/2021");
    for state in sample_states() {
        let next = reduce(&state, add_relapse(record.clone()));

        let mut expected = state.relapses.clone();
        expected.push(record.clone());
        assert_eq!(next.relapses, expected);
        assert!(next.time_sober.is_some());
    }
}

#[test]
fn test_relapse_then_update_scenario() {
    let mut store = Store::new();
    assert_eq!(*store.get_state(), SobrietyState::initial());

    let before = Utc::now();
    store.dispatch(add_relapse(RelapseRecord::new("1/1/2020")));
    let after = Utc::now();

    let state = store.get_state();
    assert_eq!(state.relapses, vec![RelapseRecord::new("1/1/2020")]);
    let anchor = state.time_sober.expect("relapse resets the anchor");
    assert!(anchor >= before && anchor <= after);

    let anchor: chrono::DateTime<Utc> = "2020-01-02T00:00:00Z".parse().unwrap();
    store.dispatch(update_time_sober(anchor));

    let state = store.get_state();
    assert_eq!(state.time_sober, Some(anchor));
    assert_eq!(state.relapses.len(), 1);
}

#[test]
fn test_noop_message_from_json_keeps_state() {
    let mut store = Store::new();
    store.dispatch(add_relapse(RelapseRecord::new("1/1/2020")));
    let populated = store.get_state();

    let noop: Action = serde_json::from_str(r#"{"type":"NOOP"}"#).unwrap();
    store.dispatch(noop);

    assert_eq!(*store.get_state(), *populated);
    assert_ne!(*store.get_state(), SobrietyState::initial());
}

#[test]
fn test_identical_relapses_are_kept_separately() {
    let mut store = Store::new();
    let record = RelapseRecord::new("1/1/2020");

    store.dispatch(add_relapse(record.clone()));
    store.dispatch(add_relapse(record.clone()));

    assert_eq!(store.get_state().relapses, vec![record.clone(), record]);
}

#[test]
fn test_subscriber_rereads_state_after_notification() {
    let mut store = Store::new();
    let dirty = Rc::new(Cell::new(false));

    let flag = Rc::clone(&dirty);
    store.subscribe(move || flag.set(true));

    let mut observed = Vec::new();
    for time in ["a", "b"] {
        store.dispatch(add_relapse(RelapseRecord::new(time)));
        if dirty.replace(false) {
            observed.push(store.get_state().relapses.len());
        }
    }

    assert_eq!(observed, vec![1, 2]);
}

#[test]
fn test_relapse_log_never_shrinks() {
    let mut store = Store::new();
    let mut last_len = 0;

    let script = vec![
        add_relapse(RelapseRecord::new("1/1/2020")),
        Action::Unknown,
        update_time_sober(Utc.with_ymd_and_hms(2020, 2, 1, 0, 0, 0).unwrap()),
        add_relapse(RelapseRecord::new("3/1/2020")),
        Action::Unknown,
        add_relapse(RelapseRecord::new("4/1/2020")),
    ];

    for action in script {
        store.dispatch(action);
        let len = store.get_state().relapses.len();
        assert!(len >= last_len);
        last_len = len;
    }

    assert_eq!(last_len, 3);
}

#[test]
fn test_notifications_count_every_dispatch() {
    let mut store = Store::new();
    let count = Rc::new(Cell::new(0));

    let counter = Rc::clone(&count);
    let subscription = store.subscribe(move || counter.set(counter.get() + 1));

    store.dispatch(Action::Unknown);
    store.dispatch(add_relapse(RelapseRecord::new("x")));
    assert_eq!(count.get(), 2);

    subscription.unsubscribe();
    store.dispatch(Action::Unknown);
    assert_eq!(count.get(), 2);
}
