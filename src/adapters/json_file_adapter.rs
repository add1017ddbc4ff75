//! Offline market data adapter reading provider JSON dumps from a directory.
//!
//! File layout, with `SYMBOL` as given (e.g. `GEVO.US`):
//!
//! - `SYMBOL_intraday_INTERVAL_YYYY-MM-DD.json`
//! - `SYMBOL_eod.json`
//! - `SYMBOL_fundamentals.json`
//! - `SYMBOL_news.json`

use crate::domain::datetime_parse::parse_date_flexible;
use crate::domain::error::SignalError;
use crate::domain::settings::Interval;
use crate::ports::market_data_port::MarketDataPort;
use chrono::NaiveDate;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

pub struct JsonFileAdapter {
    base_path: PathBuf,
}

impl JsonFileAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn intraday_path(&self, symbol: &str, interval: Interval, day: NaiveDate) -> PathBuf {
        self.base_path
            .join(format!("{}_intraday_{}_{}.json", symbol, interval, day))
    }

    fn path(&self, symbol: &str, kind: &str) -> PathBuf {
        self.base_path.join(format!("{}_{}.json", symbol, kind))
    }

    fn read_json(&self, what: &str, path: PathBuf) -> Result<Value, SignalError> {
        let content = fs::read_to_string(&path).map_err(|e| SignalError::Fetch {
            what: what.to_string(),
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        serde_json::from_str(&content).map_err(|e| SignalError::InvalidPayload {
            what: what.to_string(),
            reason: format!("{}: {}", path.display(), e),
        })
    }
}

/// Keep records whose `date_key` lies in `[from, to]`; undated records pass through.
fn retain_dated(payload: Value, date_key: &str, from: NaiveDate, to: NaiveDate) -> Value {
    match payload {
        Value::Array(records) => Value::Array(
            records
                .into_iter()
                .filter(|r| {
                    match r.get(date_key).and_then(Value::as_str).and_then(parse_date_flexible) {
                        Some(date) => date >= from && date <= to,
                        None => true,
                    }
                })
                .collect(),
        ),
        other => other,
    }
}

impl MarketDataPort for JsonFileAdapter {
    fn fetch_intraday(
        &self,
        symbol: &str,
        interval: Interval,
        day: NaiveDate,
    ) -> Result<Value, SignalError> {
        self.read_json("intraday bars", self.intraday_path(symbol, interval, day))
    }

    fn fetch_eod(&self, symbol: &str, from: NaiveDate, to: NaiveDate) -> Result<Value, SignalError> {
        let payload = self.read_json("daily bars", self.path(symbol, "eod"))?;
        Ok(retain_dated(payload, "date", from, to))
    }

    fn fetch_fundamentals(&self, symbol: &str) -> Result<Value, SignalError> {
        self.read_json("fundamentals", self.path(symbol, "fundamentals"))
    }

    fn fetch_news(&self, symbol: &str, _from: NaiveDate, _to: NaiveDate) -> Result<Value, SignalError> {
        // Exact window filtering happens in the domain.
        self.read_json("news", self.path(symbol, "news"))
    }
}
