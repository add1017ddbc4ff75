//! Configuration validation.
//!
//! Checks every configured value before an evaluation runs. Absent keys fall
//! back to defaults and are not errors, except where a key must be present.

use crate::domain::error::SignalError;
use crate::domain::settings::{Interval, RuleSettings};
use crate::ports::config_port::ConfigPort;

pub fn validate_dashboard_config(config: &dyn ConfigPort) -> Result<(), SignalError> {
    validate_symbol(config)?;
    validate_interval(config)?;
    Ok(())
}

pub fn validate_rules_config(config: &dyn ConfigPort) -> Result<(), SignalError> {
    let defaults = RuleSettings::default();
    validate_range(config, "gap_limit", defaults.gap_limit_pct, -5.0, 0.0)?;
    validate_range(config, "vola_limit", defaults.vola_limit_pct, 1.0, 10.0)?;
    validate_news_window(config, defaults.news_window_hours)?;
    validate_earnings_window(config, defaults.earnings_window_days)?;
    validate_eod_lookback(config, defaults.eod_lookback_days)?;
    Ok(())
}

fn validate_symbol(config: &dyn ConfigPort) -> Result<(), SignalError> {
    match config.get_string("dashboard", "symbol") {
        Some(s) if !s.trim().is_empty() => {
            if s.trim().contains(char::is_whitespace) {
                return Err(SignalError::invalid(
                    "dashboard",
                    "symbol",
                    "symbol must not contain whitespace",
                ));
            }
            Ok(())
        }
        Some(_) => Err(SignalError::ConfigMissing {
            section: "dashboard".to_string(),
            key: "symbol".to_string(),
        }),
        None => Ok(()),
    }
}

fn validate_interval(config: &dyn ConfigPort) -> Result<(), SignalError> {
    match config.get_string("dashboard", "interval") {
        Some(s) => s
            .parse::<Interval>()
            .map(|_| ())
            .map_err(|reason| SignalError::invalid("dashboard", "interval", reason)),
        None => Ok(()),
    }
}

fn validate_range(
    config: &dyn ConfigPort,
    key: &str,
    default: f64,
    min: f64,
    max: f64,
) -> Result<(), SignalError> {
    if let Some(raw) = config.get_string("rules", key) {
        if raw.trim().parse::<f64>().is_err() {
            return Err(SignalError::invalid("rules", key, format!("'{raw}' is not a number")));
        }
    }
    let value = config.get_double("rules", key, default);
    if !(min..=max).contains(&value) {
        return Err(SignalError::invalid(
            "rules",
            key,
            format!("{key} must be between {min} and {max}"),
        ));
    }
    Ok(())
}

/// Reject a present value that is not an integer, instead of letting the
/// typed getter fall back to its default.
pub fn validate_integer(config: &dyn ConfigPort, section: &str, key: &str) -> Result<(), SignalError> {
    if let Some(raw) = config.get_string(section, key) {
        if raw.trim().parse::<i64>().is_err() {
            return Err(SignalError::invalid(
                section,
                key,
                format!("'{raw}' is not an integer"),
            ));
        }
    }
    Ok(())
}

fn validate_news_window(config: &dyn ConfigPort, default: i64) -> Result<(), SignalError> {
    validate_integer(config, "rules", "news_window_hours")?;
    let value = config.get_int("rules", "news_window_hours", default);
    if !(6..=24).contains(&value) {
        return Err(SignalError::invalid(
            "rules",
            "news_window_hours",
            "news_window_hours must be between 6 and 24",
        ));
    }
    Ok(())
}

fn validate_earnings_window(config: &dyn ConfigPort, default: i64) -> Result<(), SignalError> {
    validate_integer(config, "rules", "earnings_window_days")?;
    let value = config.get_int("rules", "earnings_window_days", default);
    if value < 0 {
        return Err(SignalError::invalid(
            "rules",
            "earnings_window_days",
            "earnings_window_days must be non-negative",
        ));
    }
    Ok(())
}

fn validate_eod_lookback(config: &dyn ConfigPort, default: u64) -> Result<(), SignalError> {
    validate_integer(config, "rules", "eod_lookback_days")?;
    let value = config.get_int("rules", "eod_lookback_days", default as i64);
    if value < 1 {
        return Err(SignalError::invalid(
            "rules",
            "eod_lookback_days",
            "eod_lookback_days must be at least 1",
        ));
    }
    Ok(())
}
