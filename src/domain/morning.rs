//! "Morning Pop": buy the open when the first bar is green and the gap holds.

use crate::domain::bar::{Bar, DailyBar};
use crate::domain::gap::{compute_gap, resolve_prev_close, GapResult};
use crate::domain::verdict::{MetricValue, Metrics, RuleOutcome, RuleVerdict};

pub const METRIC_GREEN_OPEN: &str = "green_open";
pub const METRIC_GAP: &str = "gap_pct";
pub const METRIC_GAP_LIMIT: &str = "gap_limit";
pub const METRIC_FIRST_CLOSE: &str = "first_close";
pub const METRIC_PREV_CLOSE: &str = "prev_close";

/// Series the Morning rule reads.
#[derive(Debug, Clone, Copy, Default)]
pub struct MorningInputs<'a> {
    /// Today's session bars; `None` when the fetch or parse failed.
    pub today: Option<&'a [Bar]>,
    /// Previous session's bars, preferred source for the previous close.
    pub previous: Option<&'a [Bar]>,
    pub daily: Option<&'a [DailyBar]>,
}

/// Core decision: passes iff the first bar is green and the gap explicitly passes.
pub fn morning_rule(first_bar: &Bar, gap: &GapResult, gap_limit_pct: f64) -> RuleVerdict {
    let green_open = first_bar.is_green();

    let mut metrics = Metrics::new();
    metrics.insert(METRIC_GREEN_OPEN, MetricValue::Flag(green_open));
    metrics.insert(METRIC_GAP, MetricValue::percent_or_unknown(gap.gap_pct));
    metrics.insert(
        METRIC_GAP_LIMIT,
        MetricValue::Limit {
            op: ">",
            pct: gap_limit_pct,
        },
    );

    RuleVerdict {
        passed: green_open && gap.is_pass(),
        metrics,
    }
}

/// Evaluate the Morning rule, reporting insufficient data when today's bars
/// or the daily series are missing or empty.
pub fn evaluate_morning(inputs: &MorningInputs<'_>, gap_limit_pct: f64) -> RuleOutcome {
    let today = inputs.today.filter(|bars| !bars.is_empty());
    let daily = inputs.daily.filter(|bars| !bars.is_empty());
    let (Some(today), Some(daily)) = (today, daily) else {
        return RuleOutcome::DataInsufficient {
            reason: "no intraday or daily data for the morning check yet".to_string(),
        };
    };
    let first_bar = &today[0];

    let prev = resolve_prev_close(inputs.previous, daily, first_bar.session_date());
    let gap = compute_gap(Some(first_bar.close), prev.map(|p| p.close), gap_limit_pct);

    let mut verdict = morning_rule(first_bar, &gap, gap_limit_pct);
    verdict
        .metrics
        .insert(METRIC_FIRST_CLOSE, MetricValue::Price(first_bar.close));
    verdict.metrics.insert(
        METRIC_PREV_CLOSE,
        prev.map_or(MetricValue::Unknown, |p| MetricValue::Price(p.close)),
    );

    tracing::debug!(
        passed = verdict.passed,
        gap_pct = ?gap.gap_pct,
        prev_source = ?prev.map(|p| p.source),
        "morning rule evaluated"
    );
    RuleOutcome::Evaluated(verdict)
}
