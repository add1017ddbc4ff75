//! Intraday and end-of-day bar representations.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;

/// One intraday bar stamped in the reporting zone.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub timestamp: DateTime<Tz>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<f64>,
}

impl Bar {
    /// close > open
    pub fn is_green(&self) -> bool {
        self.close > self.open
    }

    pub fn session_date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// One daily bar. Only `date` and `close` are guaranteed by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: Option<f64>,
}

/// Highest high and lowest low across `bars`, `None` when empty.
pub fn day_range(bars: &[Bar]) -> Option<(f64, f64)> {
    let first = bars.first()?;
    let init = (first.high, first.low);
    Some(bars.iter().fold(init, |(hi, lo), b| (hi.max(b.high), lo.min(b.low))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::REPORTING_ZONE;
    use chrono::TimeZone;

    fn bar(minute: u32, open: f64, high: f64, low: f64, close: f64) -> Bar {
        Bar {
            timestamp: REPORTING_ZONE
                .with_ymd_and_hms(2024, 3, 15, 9, 30 + minute, 0)
                .single()
                .unwrap(),
            open,
            high,
            low,
            close,
            volume: Some(1000.0),
        }
    }

    #[test]
    fn green_requires_strictly_higher_close() {
        assert!(bar(0, 10.0, 11.0, 9.5, 10.5).is_green());
        assert!(!bar(0, 10.0, 11.0, 9.5, 10.0).is_green());
        assert!(!bar(0, 10.0, 11.0, 9.5, 9.8).is_green());
    }

    #[test]
    fn session_date_is_reporting_zone_date() {
        let b = bar(0, 1.0, 1.0, 1.0, 1.0);
        assert_eq!(b.session_date(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn day_range_spans_all_bars() {
        let bars = vec![
            bar(0, 100.0, 102.0, 100.0, 101.0),
            bar(5, 101.0, 104.0, 100.5, 103.0),
            bar(10, 103.0, 103.5, 101.0, 102.0),
        ];
        assert_eq!(day_range(&bars), Some((104.0, 100.0)));
    }

    #[test]
    fn day_range_of_empty_series() {
        assert_eq!(day_range(&[]), None);
    }
}
