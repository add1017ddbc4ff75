//! Recent-headline filter.

use crate::domain::datetime_parse::parse_flexible;
use crate::domain::extract::first_non_empty_str;
use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use serde::Serialize;
use serde_json::Value;

/// Keys that may hold a news item's publication time, in priority order.
pub const NEWS_TIME_KEYS: &[&str] = &["date", "publishedAt", "time"];

pub const DEFAULT_TITLE: &str = "(no title)";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsItem {
    pub timestamp: DateTime<Tz>,
    pub title: String,
}

/// Closed interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewsWindow {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl NewsWindow {
    /// The `hours` leading up to and including `now`.
    pub fn trailing(now: DateTime<Tz>, hours: i64) -> Self {
        Self {
            start: now - Duration::hours(hours),
            end: now,
        }
    }

    pub fn contains(&self, ts: &DateTime<Tz>) -> bool {
        self.start <= *ts && *ts <= self.end
    }
}

/// Items from `payload` published inside `window`, converted to the window's zone.
///
/// Items without a parseable time are dropped silently. A payload that is not
/// a list yields no items.
pub fn filter_recent_news(payload: &Value, window: &NewsWindow) -> Vec<NewsItem> {
    let Some(items) = payload.as_array() else {
        return Vec::new();
    };
    let zone = window.end.timezone();

    items
        .iter()
        .filter_map(|item| {
            let raw = first_non_empty_str(item, NEWS_TIME_KEYS)?;
            let timestamp = parse_flexible(raw)?.in_zone(&zone);
            Some(NewsItem {
                timestamp,
                title: item
                    .get("title")
                    .and_then(Value::as_str)
                    .unwrap_or(DEFAULT_TITLE)
                    .to_string(),
            })
        })
        .filter(|news| window.contains(&news.timestamp))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::REPORTING_ZONE;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Tz> {
        REPORTING_ZONE
            .with_ymd_and_hms(2024, 3, 15, 15, 0, 0)
            .single()
            .unwrap()
    }

    #[test]
    fn window_start_is_inclusive() {
        let window = NewsWindow::trailing(now(), 12);
        // 03:00 ET == 07:00 UTC on 2024-03-15
        let payload = json!([
            {"date": "2024-03-15T07:00:00+00:00", "title": "on the boundary"},
            {"date": "2024-03-15T06:59:59+00:00", "title": "one second early"},
        ]);
        let recent = filter_recent_news(&payload, &window);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].title, "on the boundary");
    }

    #[test]
    fn window_end_is_inclusive_and_future_excluded() {
        let window = NewsWindow::trailing(now(), 12);
        let payload = json!([
            {"date": "2024-03-15T19:00:00Z", "title": "now"},
            {"date": "2024-03-15T19:00:01Z", "title": "future"},
        ]);
        let recent = filter_recent_news(&payload, &window);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].title, "now");
    }

    #[test]
    fn alternate_time_keys_and_naive_utc() {
        let window = NewsWindow::trailing(now(), 12);
        let payload = json!([
            {"publishedAt": "2024-03-15 12:00:00", "title": "published"},
            {"time": "2024-03-15 13:00:00"},
            {"date": "", "publishedAt": "2024-03-15 14:00:00", "title": "blank date"},
        ]);
        let recent = filter_recent_news(&payload, &window);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[1].title, DEFAULT_TITLE);
        assert_eq!(recent[0].timestamp.timezone(), REPORTING_ZONE);
        // 12:00 UTC is 08:00 EDT
        assert_eq!(recent[0].timestamp.format("%H:%M").to_string(), "08:00");
    }

    #[test]
    fn unparseable_or_missing_times_are_dropped() {
        let window = NewsWindow::trailing(now(), 12);
        let payload = json!([
            {"title": "no time at all"},
            {"date": "yesterday-ish", "title": "bad time"},
            {"date": 1710500000, "title": "numeric"},
        ]);
        assert!(filter_recent_news(&payload, &window).is_empty());
    }

    #[test]
    fn non_list_payload_is_empty() {
        let window = NewsWindow::trailing(now(), 12);
        assert!(filter_recent_news(&json!({"error": "limit"}), &window).is_empty());
    }
}
