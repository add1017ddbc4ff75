//! Market data access port trait.
//!
//! Implementations return the provider's JSON untouched; normalization happens
//! in the domain layer.

use crate::domain::error::SignalError;
use crate::domain::settings::Interval;
use chrono::NaiveDate;
use serde_json::Value;

pub trait MarketDataPort {
    /// Intraday bars for the regular session of `day` (reporting zone).
    fn fetch_intraday(
        &self,
        symbol: &str,
        interval: Interval,
        day: NaiveDate,
    ) -> Result<Value, SignalError>;

    /// Daily bars with `from <= date <= to`.
    fn fetch_eod(&self, symbol: &str, from: NaiveDate, to: NaiveDate)
        -> Result<Value, SignalError>;

    fn fetch_fundamentals(&self, symbol: &str) -> Result<Value, SignalError>;

    /// News items published between the two dates, inclusive.
    fn fetch_news(&self, symbol: &str, from: NaiveDate, to: NaiveDate)
        -> Result<Value, SignalError>;
}
