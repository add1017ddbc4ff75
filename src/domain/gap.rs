//! Opening gap versus the previous session close.

use crate::domain::bar::{Bar, DailyBar};
use chrono::NaiveDate;
use serde::Serialize;

/// Gap percentage and its pass flag. Both are `None` when the gap cannot be
/// computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GapResult {
    pub gap_pct: Option<f64>,
    pub passes: Option<bool>,
}

impl GapResult {
    pub const UNKNOWN: GapResult = GapResult {
        gap_pct: None,
        passes: None,
    };

    /// Only an explicit pass counts; unknown is not a pass.
    pub fn is_pass(&self) -> bool {
        self.passes == Some(true)
    }
}

/// `(today / prev - 1) * 100`, passing when strictly greater than `limit_pct`.
pub fn compute_gap(today_close: Option<f64>, prev_close: Option<f64>, limit_pct: f64) -> GapResult {
    match (today_close, prev_close) {
        (Some(today), Some(prev)) if prev > 0.0 => {
            let gap_pct = (today / prev - 1.0) * 100.0;
            GapResult {
                gap_pct: Some(gap_pct),
                passes: Some(gap_pct > limit_pct),
            }
        }
        _ => GapResult::UNKNOWN,
    }
}

/// Where a previous close was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrevCloseSource {
    Intraday,
    Daily,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrevClose {
    pub close: f64,
    pub date: NaiveDate,
    pub source: PrevCloseSource,
}

/// Resolve the previous session's close.
///
/// Prefers the last bar of the previous session's intraday series. Otherwise
/// takes the latest daily row dated strictly before `session_day`, which
/// spans weekends and holidays.
pub fn resolve_prev_close(
    prev_intraday: Option<&[Bar]>,
    daily: &[DailyBar],
    session_day: NaiveDate,
) -> Option<PrevClose> {
    if let Some(last) = prev_intraday.and_then(<[Bar]>::last) {
        return Some(PrevClose {
            close: last.close,
            date: last.session_date(),
            source: PrevCloseSource::Intraday,
        });
    }

    daily
        .iter()
        .filter(|d| d.date < session_day)
        .max_by_key(|d| d.date)
        .map(|d| PrevClose {
            close: d.close,
            date: d.date,
            source: PrevCloseSource::Daily,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::REPORTING_ZONE;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    #[test]
    fn positive_gap_passes() {
        let r = compute_gap(Some(110.0), Some(100.0), -1.0);
        assert_relative_eq!(r.gap_pct.unwrap(), 10.0, epsilon = 1e-9);
        assert_eq!(r.passes, Some(true));
    }

    #[test]
    fn gap_below_limit_fails() {
        let r = compute_gap(Some(98.0), Some(100.0), -1.0);
        assert_relative_eq!(r.gap_pct.unwrap(), -2.0, epsilon = 1e-9);
        assert_eq!(r.passes, Some(false));
    }

    #[test]
    fn gap_exactly_at_limit_fails() {
        let r = compute_gap(Some(100.0), Some(100.0), 0.0);
        assert_eq!(r.gap_pct, Some(0.0));
        assert_eq!(r.passes, Some(false));
    }

    #[test]
    fn non_positive_or_missing_prev_is_unknown() {
        assert_eq!(compute_gap(Some(5.0), Some(0.0), -1.0), GapResult::UNKNOWN);
        assert_eq!(compute_gap(Some(5.0), Some(-3.0), -1.0), GapResult::UNKNOWN);
        assert_eq!(compute_gap(Some(5.0), None, -1.0), GapResult::UNKNOWN);
        assert_eq!(compute_gap(None, Some(5.0), -1.0), GapResult::UNKNOWN);
        assert!(!GapResult::UNKNOWN.is_pass());
    }

    fn bar_on(day: u32, close: f64) -> Bar {
        Bar {
            timestamp: REPORTING_ZONE
                .with_ymd_and_hms(2024, 3, day, 15, 55, 0)
                .single()
                .unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: None,
        }
    }

    fn daily(day: u32, close: f64) -> DailyBar {
        DailyBar {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            open: None,
            high: None,
            low: None,
            close,
            volume: None,
        }
    }

    #[test]
    fn intraday_close_is_preferred() {
        let prev = vec![bar_on(14, 9.0), bar_on(14, 9.5)];
        let eod = vec![daily(14, 9.4)];
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let resolved = resolve_prev_close(Some(prev.as_slice()), &eod, today).unwrap();
        assert_eq!(resolved.close, 9.5);
        assert_eq!(resolved.source, PrevCloseSource::Intraday);
    }

    #[test]
    fn monday_falls_back_to_friday_daily_close() {
        let eod = vec![daily(14, 9.0), daily(15, 9.4), daily(18, 9.9)];
        let monday = NaiveDate::from_ymd_opt(2024, 3, 18).unwrap();
        let resolved = resolve_prev_close(Some(&[][..]), &eod, monday).unwrap();
        assert_eq!(resolved.close, 9.4);
        assert_eq!(resolved.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(resolved.source, PrevCloseSource::Daily);
    }

    #[test]
    fn nothing_before_session_day() {
        let eod = vec![daily(18, 9.9)];
        let monday = NaiveDate::from_ymd_opt(2024, 3, 18).unwrap();
        assert_eq!(resolve_prev_close(None, &eod, monday), None);
    }
}
