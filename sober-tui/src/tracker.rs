//! Adapter between the event loop and the state store
//!
//! `TrackerHandle` owns the [`Store`], turns UI requests into store
//! messages, and forwards store notifications to the loop over a
//! crossbeam channel so the loop can drain them between frames.
//!
//! # Example
//!
//! ```
//! use libsobriety::Config;
//! use sober_tui::tracker::TrackerHandle;
//!
//! let mut tracker = TrackerHandle::new(&Config::default());
//! tracker.record_relapse();
//! tracker.set_sober_since("2020-01-02").unwrap();
//!
//! assert_eq!(tracker.updates().try_iter().count(), 2);
//! assert_eq!(tracker.snapshot().relapses.len(), 1);
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, Utc};
use crossbeam_channel::{unbounded, Receiver};
use libsobriety::{
    add_relapse, update_time_sober, Clock, Config, RelapseRecord, Result, SobrietyError,
    SobrietyState, Store, Subscription, SystemClock,
};

/// Parse the date field: `YYYY-MM-DD`, taken as midnight UTC
pub fn parse_sober_date(input: &str) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| {
            SobrietyError::InvalidInput(format!("'{}' is not a date. Use YYYY-MM-DD.", trimmed))
        })
}

/// Owns the store and the clock it reads
pub struct TrackerHandle {
    store: Store,
    clock: Rc<dyn Clock>,
    date_format: String,
    updates: Receiver<u64>,
    _subscription: Subscription,
}

impl TrackerHandle {
    /// Tracker on the system clock
    pub fn new(config: &Config) -> Self {
        Self::with_clock(config, Rc::new(SystemClock))
    }

    /// Tracker on a caller-supplied clock, shared with the store
    pub fn with_clock(config: &Config, clock: Rc<dyn Clock>) -> Self {
        let mut store = Store::new().with_clock(Rc::clone(&clock));

        let (tx, rx) = unbounded();
        let revision = Cell::new(0u64);
        let subscription = store.subscribe(move || {
            revision.set(revision.get() + 1);
            // Receiver gone means the loop is shutting down
            let _ = tx.send(revision.get());
        });

        Self {
            store,
            clock,
            date_format: config.display.date_format.clone(),
            updates: rx,
            _subscription: subscription,
        }
    }

    /// Current tracked state
    pub fn snapshot(&self) -> Arc<SobrietyState> {
        self.store.get_state()
    }

    /// Current time from the tracker's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Store revisions published since the last drain
    pub fn updates(&self) -> &Receiver<u64> {
        &self.updates
    }

    /// Log a relapse dated today (local calendar) and restart the streak
    pub fn record_relapse(&mut self) -> RelapseRecord {
        let today = self.clock.now().with_timezone(&Local).date_naive();
        let record = RelapseRecord::on_date(today, &self.date_format);

        tracing::info!(time = %record.time, "Recording relapse");
        self.store.dispatch(add_relapse(record.clone()));
        record
    }

    /// Move the sober-since anchor to the date typed by the user
    pub fn set_sober_since(&mut self, input: &str) -> Result<DateTime<Utc>> {
        let anchor = parse_sober_date(input)?;

        tracing::info!(anchor = %anchor, "Updating sober date");
        self.store.dispatch(update_time_sober(anchor));
        Ok(anchor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use libsobriety::clock::FixedClock;

    #[test]
    fn test_parse_sober_date() {
        let parsed = parse_sober_date("2020-01-02").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap());

        assert_eq!(parse_sober_date(" 2020-01-02 ").unwrap(), parsed);
    }

    #[test]
    fn test_parse_sober_date_rejects_garbage() {
        for input in ["", "2020-02-30", "01/02/2020", "tomorrow", "2020-1"] {
            let err = parse_sober_date(input).unwrap_err();
            assert_eq!(err.exit_code(), 3, "input {:?}", input);
        }
    }

    #[test]
    fn test_record_relapse_uses_clock_and_format() {
        let now = Utc.with_ymd_and_hms(2021, 7, 4, 12, 0, 0).unwrap();
        let mut config = Config::default();
        config.display.date_format = "%Y/%m/%d".to_string();
        let mut tracker = TrackerHandle::with_clock(&config, Rc::new(FixedClock::new(now)));

        let record = tracker.record_relapse();

        let local_day = now.with_timezone(&Local).date_naive();
        assert_eq!(record.time, local_day.format("%Y/%m/%d").to_string());
        assert_eq!(tracker.snapshot().time_sober, Some(now));
        assert_eq!(tracker.snapshot().relapses, vec![record]);
    }

    #[test]
    fn test_invalid_date_dispatches_nothing() {
        let mut tracker = TrackerHandle::new(&Config::default());

        assert!(tracker.set_sober_since("not a date").is_err());

        assert!(tracker.updates().try_recv().is_err());
        assert_eq!(*tracker.snapshot(), SobrietyState::initial());
    }

    #[test]
    fn test_updates_carry_increasing_revisions() {
        let mut tracker = TrackerHandle::new(&Config::default());
        tracker.record_relapse();
        tracker.record_relapse();
        tracker.set_sober_since("2022-02-02").unwrap();

        let revisions: Vec<u64> = tracker.updates().try_iter().collect();
        assert_eq!(revisions, vec![1, 2, 3]);
    }
}
