//! Evaluation settings.
//!
//! Defaults match the dashboard's stock configuration.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Intraday bar interval accepted by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Interval {
    #[serde(rename = "1m")]
    OneMinute,
    #[default]
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "1h")]
    OneHour,
}

impl Interval {
    pub fn as_str(self) -> &'static str {
        match self {
            Interval::OneMinute => "1m",
            Interval::FiveMinutes => "5m",
            Interval::OneHour => "1h",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1m" => Ok(Interval::OneMinute),
            "5m" => Ok(Interval::FiveMinutes),
            "1h" => Ok(Interval::OneHour),
            other => Err(format!("unsupported interval '{other}' (expected 1m, 5m or 1h)")),
        }
    }
}

/// Rule thresholds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleSettings {
    /// Morning: gap must be strictly greater than this percentage.
    pub gap_limit_pct: f64,
    /// Overnight: volatility must be strictly less than this percentage.
    pub vola_limit_pct: f64,
    pub news_window_hours: i64,
    pub earnings_window_days: i64,
    pub eod_lookback_days: u64,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            gap_limit_pct: -1.0,
            vola_limit_pct: 4.0,
            news_window_hours: 12,
            earnings_window_days: 2,
            eod_lookback_days: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSettings {
    pub symbol: String,
    pub interval: Interval,
    pub rules: RuleSettings,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            symbol: "GEVO.US".to_string(),
            interval: Interval::default(),
            rules: RuleSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_parses_case_insensitively() {
        assert_eq!("5M".parse::<Interval>(), Ok(Interval::FiveMinutes));
        assert_eq!(" 1h ".parse::<Interval>(), Ok(Interval::OneHour));
        assert!("15m".parse::<Interval>().is_err());
    }

    #[test]
    fn defaults() {
        let s = DashboardSettings::default();
        assert_eq!(s.interval.as_str(), "5m");
        assert_eq!(s.rules.gap_limit_pct, -1.0);
        assert_eq!(s.rules.vola_limit_pct, 4.0);
        assert_eq!(s.rules.news_window_hours, 12);
        assert_eq!(s.rules.earnings_window_days, 2);
    }
}
