//! Rule outcomes and their displayable metrics.

use crate::domain::tristate::Tristate;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// A metric value as the display layer should render it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MetricValue {
    Flag(bool),
    Percent(f64),
    /// Threshold rendered with its comparison, e.g. `> -1.0%`.
    Limit { op: &'static str, pct: f64 },
    Tristate(Tristate),
    Count(usize),
    Price(f64),
    Unknown,
}

impl MetricValue {
    pub fn percent_or_unknown(value: Option<f64>) -> Self {
        value.map_or(MetricValue::Unknown, MetricValue::Percent)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Flag(true) => write!(f, "Yes"),
            MetricValue::Flag(false) => write!(f, "No"),
            MetricValue::Percent(v) => write!(f, "{v:.2}%"),
            MetricValue::Limit { op, pct } => write!(f, "{op} {pct:.1}%"),
            MetricValue::Tristate(t) => write!(f, "{t}"),
            MetricValue::Count(n) => write!(f, "{n}"),
            MetricValue::Price(p) => write!(f, "{p:.4}"),
            MetricValue::Unknown => write!(f, "unknown"),
        }
    }
}

/// Ordered metric name to value mapping.
pub type Metrics = IndexMap<&'static str, MetricValue>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleVerdict {
    pub passed: bool,
    pub metrics: Metrics,
}

impl RuleVerdict {
    pub fn metric(&self, name: &str) -> Option<&MetricValue> {
        self.metrics.get(name)
    }
}

/// What a rule produced for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RuleOutcome {
    /// The rule does not apply right now (e.g. the wrong weekday). Metrics
    /// are still carried for display when the inputs were available.
    NotApplicable {
        reason: String,
        metrics: Option<Metrics>,
    },
    /// Inputs were missing; neither pass nor fail may be shown.
    DataInsufficient { reason: String },
    Evaluated(RuleVerdict),
}

impl RuleOutcome {
    pub fn verdict(&self) -> Option<&RuleVerdict> {
        match self {
            RuleOutcome::Evaluated(v) => Some(v),
            _ => None,
        }
    }

    /// `Some(passed)` only when evaluated.
    pub fn passed(&self) -> Option<bool> {
        self.verdict().map(|v| v.passed)
    }
}
