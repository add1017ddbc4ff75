//! One evaluation run: fetch, normalize, evaluate both rules.
//!
//! Fetch failures never abort a run. They are logged and the affected input
//! becomes "no data", which the rules report as insufficient or unknown.

use crate::domain::bar::{Bar, DailyBar};
use crate::domain::earnings::earnings_proximity;
use crate::domain::error::SignalError;
use crate::domain::morning::{evaluate_morning, MorningInputs};
use crate::domain::news::{filter_recent_news, NewsItem, NewsWindow};
use crate::domain::normalize::{normalize_eod, normalize_intraday};
use crate::domain::overnight::{evaluate_overnight, OvernightInputs};
use crate::domain::session::{previous_session_day, REPORTING_ZONE};
use crate::domain::settings::{DashboardSettings, Interval, RuleSettings};
use crate::domain::tristate::Tristate;
use crate::domain::verdict::RuleOutcome;
use crate::ports::market_data_port::MarketDataPort;
use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone};
use chrono_tz::Tz;
use serde::Serialize;
use serde_json::Value;

/// Everything the display layer needs for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub symbol: String,
    pub interval: Interval,
    pub now: DateTime<Tz>,
    pub rules: RuleSettings,
    pub morning: RuleOutcome,
    pub overnight: RuleOutcome,
    pub earnings_soon: Tristate,
    pub recent_news: Vec<NewsItem>,
}

/// Evaluate both rules for `settings.symbol` as of `now`.
pub fn evaluate_dashboard<Z: TimeZone>(
    port: &dyn MarketDataPort,
    settings: &DashboardSettings,
    now: DateTime<Z>,
) -> DashboardReport {
    let now = now.with_timezone(&REPORTING_ZONE);
    let today = now.date_naive();
    let symbol = settings.symbol.as_str();
    let rules = &settings.rules;

    let today_bars = fetch_intraday(port, symbol, settings.interval, today);
    let daily = fetch_daily(port, symbol, today, rules.eod_lookback_days);

    // Only look up the previous session when the morning check can run.
    let previous_bars = match (&today_bars, &daily) {
        (Some(bars), Some(days)) if !bars.is_empty() && !days.is_empty() => {
            let prev_day = previous_session_day(bars[0].session_date());
            fetch_intraday(port, symbol, settings.interval, prev_day)
        }
        _ => None,
    };

    let morning = evaluate_morning(
        &MorningInputs {
            today: today_bars.as_deref(),
            previous: previous_bars.as_deref(),
            daily: daily.as_deref(),
        },
        rules.gap_limit_pct,
    );

    let fundamentals = absorb("fundamentals", port.fetch_fundamentals(symbol));
    let earnings_soon = earnings_proximity(fundamentals.as_ref(), today, rules.earnings_window_days);

    let window = NewsWindow::trailing(now, rules.news_window_hours);
    let recent_news = absorb(
        "news",
        port.fetch_news(symbol, window.start.date_naive(), window.end.date_naive()),
    )
    .map(|payload| filter_recent_news(&payload, &window))
    .unwrap_or_default();

    let overnight = evaluate_overnight(
        &OvernightInputs {
            today: today_bars.as_deref(),
            earnings_soon,
            recent_news: &recent_news,
            weekday: now.weekday(),
        },
        rules.vola_limit_pct,
    );

    tracing::info!(
        symbol,
        morning = ?morning.passed(),
        overnight = ?overnight.passed(),
        news = recent_news.len(),
        "dashboard evaluated"
    );

    DashboardReport {
        symbol: settings.symbol.clone(),
        interval: settings.interval,
        now,
        rules: rules.clone(),
        morning,
        overnight,
        earnings_soon,
        recent_news,
    }
}

fn fetch_intraday(
    port: &dyn MarketDataPort,
    symbol: &str,
    interval: Interval,
    day: NaiveDate,
) -> Option<Vec<Bar>> {
    let payload = absorb("intraday bars", port.fetch_intraday(symbol, interval, day))?;
    let bars = normalize_intraday(&payload);
    if bars.is_none() {
        tracing::warn!(symbol, %day, "intraday payload unusable");
    }
    bars
}

fn fetch_daily(
    port: &dyn MarketDataPort,
    symbol: &str,
    today: NaiveDate,
    lookback_days: u64,
) -> Option<Vec<DailyBar>> {
    let from = today.checked_sub_days(Days::new(lookback_days)).unwrap_or(today);
    let payload = absorb("daily bars", port.fetch_eod(symbol, from, today))?;
    let bars = normalize_eod(&payload);
    if bars.is_none() {
        tracing::warn!(symbol, %from, %today, "daily payload unusable");
    }
    bars
}

fn absorb(what: &str, result: Result<Value, SignalError>) -> Option<Value> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(what, error = %e, "fetch failed; treating as no data");
            None
        }
    }
}
