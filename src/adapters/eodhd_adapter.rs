//! EODHD REST market data adapter (blocking HTTP).
//!
//! Endpoints: `intraday/{symbol}`, `eod/{symbol}`, `fundamentals/{symbol}`
//! and `news`. Payloads are returned untouched for the domain normalizers.

use crate::domain::config_validation::validate_integer;
use crate::domain::error::SignalError;
use crate::domain::session::session_bounds;
use crate::domain::settings::Interval;
use crate::ports::config_port::ConfigPort;
use crate::ports::market_data_port::MarketDataPort;
use chrono::NaiveDate;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://eodhd.com/api";
pub const DEFAULT_TIMEOUT_SECS: i64 = 60;
pub const API_KEY_ENV: &str = "EODHD_API_KEY";

pub struct EodhdAdapter {
    client: reqwest::blocking::Client,
    base_url: String,
    api_token: String,
}

impl EodhdAdapter {
    pub fn new(base_url: &str, api_token: String, timeout: Duration) -> Result<Self, SignalError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SignalError::Fetch {
                what: "http client".into(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
        })
    }

    /// Build from `[eodhd]`, taking the token from `api_token` or `EODHD_API_KEY`.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, SignalError> {
        Self::from_config_with_env(config, std::env::var(API_KEY_ENV).ok())
    }

    pub fn from_config_with_env(
        config: &dyn ConfigPort,
        env_token: Option<String>,
    ) -> Result<Self, SignalError> {
        let api_token = config
            .get_string("eodhd", "api_token")
            .filter(|t| !t.trim().is_empty())
            .or(env_token.filter(|t| !t.trim().is_empty()))
            .ok_or_else(|| SignalError::ConfigMissing {
                section: "eodhd".into(),
                key: "api_token".into(),
            })?;

        let base_url = config
            .get_string("eodhd", "base_url")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        validate_integer(config, "eodhd", "timeout_secs")?;
        let timeout_secs = config.get_int("eodhd", "timeout_secs", DEFAULT_TIMEOUT_SECS);
        if timeout_secs <= 0 {
            return Err(SignalError::invalid(
                "eodhd",
                "timeout_secs",
                "timeout_secs must be positive",
            ));
        }

        Self::new(&base_url, api_token, Duration::from_secs(timeout_secs as u64))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn get_json(
        &self,
        what: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, SignalError> {
        tracing::debug!(what, path, "requesting");
        let response = self
            .client
            .get(self.endpoint(path))
            .query(&[("api_token", self.api_token.as_str())])
            .query(query)
            .send()
            // Request errors carry the URL, which includes the token.
            .map_err(|e| SignalError::Fetch {
                what: what.to_string(),
                reason: e.without_url().to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SignalError::Fetch {
                what: what.to_string(),
                reason: format!("HTTP {}", status),
            });
        }

        response.json::<Value>().map_err(|e| SignalError::InvalidPayload {
            what: what.to_string(),
            reason: e.without_url().to_string(),
        })
    }
}

/// Query parameters for one session of intraday bars.
pub fn intraday_query(interval: Interval, day: NaiveDate) -> Option<Vec<(&'static str, String)>> {
    let (open, close) = session_bounds(day)?;
    Some(vec![
        ("interval", interval.as_str().to_string()),
        ("from", open.timestamp().to_string()),
        ("to", close.timestamp().to_string()),
        ("fmt", "json".to_string()),
    ])
}

pub fn date_range_query(from: NaiveDate, to: NaiveDate) -> Vec<(&'static str, String)> {
    vec![("from", from.to_string()), ("to", to.to_string())]
}

impl MarketDataPort for EodhdAdapter {
    fn fetch_intraday(
        &self,
        symbol: &str,
        interval: Interval,
        day: NaiveDate,
    ) -> Result<Value, SignalError> {
        let query = intraday_query(interval, day).ok_or_else(|| SignalError::Fetch {
            what: "intraday bars".into(),
            reason: format!("no session bounds for {}", day),
        })?;
        self.get_json("intraday bars", &format!("intraday/{}", symbol), &query)
    }

    fn fetch_eod(&self, symbol: &str, from: NaiveDate, to: NaiveDate) -> Result<Value, SignalError> {
        let mut query = date_range_query(from, to);
        query.push(("fmt", "json".to_string()));
        self.get_json("daily bars", &format!("eod/{}", symbol), &query)
    }

    fn fetch_fundamentals(&self, symbol: &str) -> Result<Value, SignalError> {
        self.get_json("fundamentals", &format!("fundamentals/{}", symbol), &[])
    }

    fn fetch_news(&self, symbol: &str, from: NaiveDate, to: NaiveDate) -> Result<Value, SignalError> {
        let mut query = vec![("s", symbol.to_string())];
        query.extend(date_range_query(from, to));
        self.get_json("news", "news", &query)
    }
}
