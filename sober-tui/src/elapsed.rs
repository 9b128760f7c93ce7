//! Human-readable time since the sober anchor

use chrono::{DateTime, Utc};

/// Describe how long ago `since` was, relative to `now`
///
/// Rounded down to whole minutes: `"12days 3h 4m ago"`. Under a minute reads
/// `"just now"`; an anchor in the future reads `"in ..."`.
pub fn format_elapsed(since: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(since);
    let future = delta < chrono::Duration::zero();
    let minutes = delta.num_minutes().unsigned_abs();

    if minutes == 0 {
        return "just now".to_string();
    }

    let span = humantime::format_duration(std::time::Duration::from_secs(minutes * 60));
    if future {
        format!("in {}", span)
    } else {
        format!("{} ago", span)
    }
}

/// Whole days in the current streak, or None without an anchor
pub fn streak_days(since: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<i64> {
    since.map(|anchor| now.signed_duration_since(anchor).num_days().max(0))
}
