#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone};
use chrono_tz::Tz;
use serde_json::{json, Value};
use sessionsignal::domain::error::SignalError;
use sessionsignal::domain::session::REPORTING_ZONE;
use sessionsignal::domain::settings::Interval;
use sessionsignal::ports::market_data_port::MarketDataPort;
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory market data. Anything not configured fails like a missing
/// upstream resource.
pub struct MockMarketDataPort {
    pub intraday: HashMap<NaiveDate, Value>,
    pub eod: Option<Value>,
    pub fundamentals: Option<Value>,
    pub news: Option<Value>,
    pub intraday_requests: RefCell<Vec<NaiveDate>>,
    pub eod_requests: RefCell<Vec<(NaiveDate, NaiveDate)>>,
}

impl MockMarketDataPort {
    pub fn new() -> Self {
        Self {
            intraday: HashMap::new(),
            eod: None,
            fundamentals: None,
            news: None,
            intraday_requests: RefCell::new(Vec::new()),
            eod_requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_intraday(mut self, day: NaiveDate, payload: Value) -> Self {
        self.intraday.insert(day, payload);
        self
    }

    pub fn with_eod(mut self, payload: Value) -> Self {
        self.eod = Some(payload);
        self
    }

    pub fn with_fundamentals(mut self, payload: Value) -> Self {
        self.fundamentals = Some(payload);
        self
    }

    pub fn with_news(mut self, payload: Value) -> Self {
        self.news = Some(payload);
        self
    }
}

fn missing(what: &str) -> SignalError {
    SignalError::Fetch {
        what: what.to_string(),
        reason: "HTTP 404".to_string(),
    }
}

impl MarketDataPort for MockMarketDataPort {
    fn fetch_intraday(
        &self,
        _symbol: &str,
        _interval: Interval,
        day: NaiveDate,
    ) -> Result<Value, SignalError> {
        self.intraday_requests.borrow_mut().push(day);
        self.intraday
            .get(&day)
            .cloned()
            .ok_or_else(|| missing("intraday bars"))
    }

    fn fetch_eod(&self, _symbol: &str, from: NaiveDate, to: NaiveDate) -> Result<Value, SignalError> {
        self.eod_requests.borrow_mut().push((from, to));
        self.eod.clone().ok_or_else(|| missing("daily bars"))
    }

    fn fetch_fundamentals(&self, _symbol: &str) -> Result<Value, SignalError> {
        self.fundamentals.clone().ok_or_else(|| missing("fundamentals"))
    }

    fn fetch_news(&self, _symbol: &str, _from: NaiveDate, _to: NaiveDate) -> Result<Value, SignalError> {
        self.news.clone().ok_or_else(|| missing("news"))
    }
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Wall-clock time in the reporting zone.
pub fn et(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Tz> {
    REPORTING_ZONE
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .unwrap()
}

/// Compact-schema bar at an Eastern wall-clock time.
pub fn compact_bar(at: DateTime<Tz>, o: f64, h: f64, l: f64, c: f64) -> Value {
    json!({"t": at.timestamp(), "o": o, "h": h, "l": l, "c": c, "v": 10_000})
}

/// A short Friday 2024-03-15 session: green open, high 10.30, low 10.00.
pub fn friday_bars() -> Value {
    json!([
        compact_bar(et(2024, 3, 15, 9, 30), 10.00, 10.25, 10.00, 10.20),
        compact_bar(et(2024, 3, 15, 9, 35), 10.20, 10.30, 10.10, 10.15),
        compact_bar(et(2024, 3, 15, 9, 40), 10.15, 10.20, 10.05, 10.10),
    ])
}

/// Thursday 2024-03-14 closing bars, last close 10.00.
pub fn thursday_bars() -> Value {
    json!([
        compact_bar(et(2024, 3, 14, 15, 50), 10.10, 10.12, 9.98, 10.05),
        compact_bar(et(2024, 3, 14, 15, 55), 10.05, 10.06, 9.99, 10.00),
    ])
}

pub fn daily_rows() -> Value {
    json!([
        {"date": "2024-03-13", "open": 9.8, "high": 10.0, "low": 9.7, "close": 9.9, "volume": 1_000_000},
        {"date": "2024-03-14", "open": 9.9, "high": 10.2, "low": 9.9, "close": 10.5, "volume": 1_200_000},
    ])
}
