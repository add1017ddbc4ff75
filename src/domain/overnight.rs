//! "Overnight Hold": carry a position into the next session on Mondays and Fridays.
//!
//! A hold is allowed when today's range is calm, no earnings are imminent and
//! no headline landed inside the freshness window.

use crate::domain::bar::{day_range, Bar};
use crate::domain::news::NewsItem;
use crate::domain::session::is_overnight_day;
use crate::domain::tristate::Tristate;
use crate::domain::verdict::{MetricValue, Metrics, RuleOutcome, RuleVerdict};
use chrono::Weekday;

pub const METRIC_VOLATILITY: &str = "volatility_pct";
pub const METRIC_VOLA_LIMIT: &str = "vola_limit";
pub const METRIC_DAY_HIGH: &str = "day_high";
pub const METRIC_DAY_LOW: &str = "day_low";
pub const METRIC_EARNINGS_SOON: &str = "earnings_soon";
pub const METRIC_RECENT_NEWS: &str = "recent_news";

#[derive(Debug, Clone, Copy)]
pub struct OvernightInputs<'a> {
    pub today: Option<&'a [Bar]>,
    pub earnings_soon: Tristate,
    pub recent_news: &'a [NewsItem],
    /// Current weekday in the reporting zone.
    pub weekday: Weekday,
}

/// `(high / low - 1) * 100` over the session, `None` if empty or `low <= 0`.
pub fn volatility_pct(bars: &[Bar]) -> Option<f64> {
    let (high, low) = day_range(bars)?;
    if low <= 0.0 {
        return None;
    }
    Some((high / low - 1.0) * 100.0)
}

/// Evaluate the Overnight rule.
///
/// On other weekdays the rule is not applicable, but the metrics are still
/// reported whenever today's bars exist.
pub fn evaluate_overnight(inputs: &OvernightInputs<'_>, vola_limit_pct: f64) -> RuleOutcome {
    let today = inputs.today.filter(|bars| !bars.is_empty());

    if !is_overnight_day(inputs.weekday) {
        return RuleOutcome::NotApplicable {
            reason: format!(
                "overnight holds are only considered on Monday and Friday (today is {})",
                inputs.weekday
            ),
            metrics: today.map(|bars| overnight_metrics(bars, inputs, vola_limit_pct)),
        };
    }

    let Some(today) = today else {
        return RuleOutcome::DataInsufficient {
            reason: "no intraday data for the overnight check yet".to_string(),
        };
    };

    let vola = volatility_pct(today);
    let vola_ok = vola.is_some_and(|v| v < vola_limit_pct);
    // Unknown earnings do not block the hold.
    let earnings_clear = !inputs.earnings_soon.is_yes();
    let news_ok = inputs.recent_news.is_empty();

    let metrics = overnight_metrics(today, inputs, vola_limit_pct);
    let passed = vola_ok && earnings_clear && news_ok;
    tracing::debug!(passed, vola_ok, earnings_clear, news_ok, "overnight rule evaluated");

    RuleOutcome::Evaluated(RuleVerdict { passed, metrics })
}

fn overnight_metrics(today: &[Bar], inputs: &OvernightInputs<'_>, vola_limit_pct: f64) -> Metrics {
    let vola = volatility_pct(today);
    let mut metrics = Metrics::new();
    metrics.insert(METRIC_VOLATILITY, MetricValue::percent_or_unknown(vola));
    metrics.insert(
        METRIC_VOLA_LIMIT,
        MetricValue::Limit {
            op: "<",
            pct: vola_limit_pct,
        },
    );
    if let Some((high, low)) = day_range(today) {
        metrics.insert(METRIC_DAY_HIGH, MetricValue::Price(high));
        metrics.insert(METRIC_DAY_LOW, MetricValue::Price(low));
    }
    metrics.insert(
        METRIC_EARNINGS_SOON,
        MetricValue::Tristate(inputs.earnings_soon),
    );
    metrics.insert(
        METRIC_RECENT_NEWS,
        MetricValue::Count(inputs.recent_news.len()),
    );
    metrics
}
