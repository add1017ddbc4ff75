//! Reporting zone and regular-session calendar helpers.
//!
//! All session-window and day-boundary logic runs on the US Eastern clock.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeZone, Weekday};
use chrono_tz::Tz;

/// Canonical clock for session and day-boundary decisions.
pub const REPORTING_ZONE: Tz = chrono_tz::America::New_York;

pub const SESSION_OPEN: NaiveTime = match NaiveTime::from_hms_opt(9, 30, 0) {
    Some(t) => t,
    None => panic!("invalid session open"),
};

pub const SESSION_CLOSE: NaiveTime = match NaiveTime::from_hms_opt(16, 0, 0) {
    Some(t) => t,
    None => panic!("invalid session close"),
};

pub fn is_weekday(weekday: Weekday) -> bool {
    !matches!(weekday, Weekday::Sat | Weekday::Sun)
}

/// Monday and Friday are the only days an overnight hold is considered.
pub fn is_overnight_day(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Mon | Weekday::Fri)
}

/// Weekday with wall-clock time inside [09:30, 16:00], both ends inclusive.
pub fn in_session(ts: &DateTime<Tz>) -> bool {
    let time = ts.time();
    is_weekday(ts.weekday()) && time >= SESSION_OPEN && time <= SESSION_CLOSE
}

/// Session open and close instants for `day` in the reporting zone.
pub fn session_bounds(day: NaiveDate) -> Option<(DateTime<Tz>, DateTime<Tz>)> {
    let open = REPORTING_ZONE
        .from_local_datetime(&day.and_time(SESSION_OPEN))
        .earliest()?;
    let close = REPORTING_ZONE
        .from_local_datetime(&day.and_time(SESSION_CLOSE))
        .earliest()?;
    Some((open, close))
}

/// Closest weekday strictly before `day`. Exchange holidays are not modelled.
pub fn previous_session_day(day: NaiveDate) -> NaiveDate {
    let mut prev = day.checked_sub_days(Days::new(1)).unwrap_or(day);
    while !is_weekday(prev.weekday()) {
        prev = match prev.checked_sub_days(Days::new(1)) {
            Some(d) => d,
            None => break,
        };
    }
    prev
}
