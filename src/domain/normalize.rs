//! Conversion of raw provider bar payloads into uniform series.
//!
//! Both normalizers return `None` when the payload cannot be used at all
//! ("no data") and `Some(series)` otherwise. A `Some` series may be empty when
//! every record fell outside the session window.

use crate::domain::bar::{Bar, DailyBar};
use crate::domain::datetime_parse::{parse_date_flexible, parse_flexible};
use crate::domain::extract::{any_has_key, coerce_epoch_secs, first_f64, first_non_empty_str};
use crate::domain::session::{in_session, REPORTING_ZONE};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde_json::Value;

/// Record layout of an intraday payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarSchema {
    /// `{t, o, h, l, c, v}` with `t` in UTC epoch seconds.
    Compact,
    /// `{datetime, Open, High, Low, Close, Volume}` with a date-time string.
    Verbose,
}

struct PriceKeys {
    open: &'static [&'static str],
    high: &'static [&'static str],
    low: &'static [&'static str],
    close: &'static [&'static str],
    volume: &'static [&'static str],
}

static COMPACT_KEYS: PriceKeys = PriceKeys {
    open: &["o", "Open"],
    high: &["h", "High"],
    low: &["l", "Low"],
    close: &["c", "Close"],
    volume: &["v", "Volume"],
};

static VERBOSE_KEYS: PriceKeys = PriceKeys {
    open: &["Open", "open"],
    high: &["High", "high"],
    low: &["Low", "low"],
    close: &["Close", "close"],
    volume: &["Volume", "volume"],
};

impl BarSchema {
    /// Compact wins when both identifying fields are present.
    pub fn detect(records: &[Value]) -> Option<Self> {
        if any_has_key(records, &["t"]) {
            Some(BarSchema::Compact)
        } else if any_has_key(records, &["datetime"]) {
            Some(BarSchema::Verbose)
        } else {
            None
        }
    }

    fn keys(self) -> &'static PriceKeys {
        match self {
            BarSchema::Compact => &COMPACT_KEYS,
            BarSchema::Verbose => &VERBOSE_KEYS,
        }
    }

    fn timestamp(self, record: &Value) -> Option<DateTime<Tz>> {
        match self {
            BarSchema::Compact => {
                let secs = record.get("t").and_then(coerce_epoch_secs)?;
                Utc.timestamp_opt(secs, 0)
                    .single()
                    .map(|utc| utc.with_timezone(&REPORTING_ZONE))
            }
            BarSchema::Verbose => {
                let raw = first_non_empty_str(record, &["datetime"])?;
                parse_flexible(raw).map(|p| p.in_zone(&REPORTING_ZONE))
            }
        }
    }
}

/// Normalize an intraday payload to session-window bars sorted by timestamp.
///
/// Duplicate timestamps are kept as delivered.
pub fn normalize_intraday(payload: &Value) -> Option<Vec<Bar>> {
    let records = non_empty_records(payload)?;
    let Some(schema) = BarSchema::detect(records) else {
        tracing::debug!("intraday payload has neither `t` nor `datetime`");
        return None;
    };
    let keys = schema.keys();

    let has_prices = [keys.open, keys.high, keys.low, keys.close]
        .iter()
        .all(|candidates| any_has_key(records, candidates));
    if !has_prices {
        tracing::debug!(?schema, "intraday payload lacks an OHLC field");
        return None;
    }

    let mut dropped = 0usize;
    let mut bars: Vec<Bar> = records
        .iter()
        .filter_map(|record| {
            let bar = build_bar(schema, keys, record);
            if bar.is_none() {
                dropped += 1;
            }
            bar
        })
        .filter(|bar| in_session(&bar.timestamp))
        .collect();

    if dropped > 0 {
        tracing::debug!(dropped, ?schema, "skipped unparseable intraday records");
    }

    bars.sort_by_key(|b| b.timestamp);
    Some(bars)
}

fn build_bar(schema: BarSchema, keys: &PriceKeys, record: &Value) -> Option<Bar> {
    Some(Bar {
        timestamp: schema.timestamp(record)?,
        open: first_f64(record, keys.open)?,
        high: first_f64(record, keys.high)?,
        low: first_f64(record, keys.low)?,
        close: first_f64(record, keys.close)?,
        volume: first_f64(record, keys.volume),
    })
}

/// Normalize a daily payload to bars sorted by date.
pub fn normalize_eod(payload: &Value) -> Option<Vec<DailyBar>> {
    let records = non_empty_records(payload)?;
    if !any_has_key(records, &["date"]) {
        tracing::debug!("daily payload has no `date` field");
        return None;
    }

    let mut bars: Vec<DailyBar> = records
        .iter()
        .filter_map(|record| {
            let date = first_non_empty_str(record, &["date"]).and_then(parse_date_flexible)?;
            Some(DailyBar {
                date,
                open: first_f64(record, &["open", "Open"]),
                high: first_f64(record, &["high", "High"]),
                low: first_f64(record, &["low", "Low"]),
                close: first_f64(record, &["close", "Close"])?,
                volume: first_f64(record, &["volume", "Volume"]),
            })
        })
        .collect();

    bars.sort_by_key(|b| b.date);
    Some(bars)
}

fn non_empty_records(payload: &Value) -> Option<&[Value]> {
    payload
        .as_array()
        .map(Vec::as_slice)
        .filter(|records| !records.is_empty())
}
