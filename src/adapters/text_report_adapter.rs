//! Plain-text console report.

use crate::domain::dashboard::DashboardReport;
use crate::domain::error::SignalError;
use crate::domain::verdict::{Metrics, RuleOutcome};
use crate::ports::report_port::ReportPort;
use std::io::Write;

pub const MORNING_PASS: &str = "BUY MORNING POP";
pub const MORNING_FAIL: &str = "WAIT: morning criteria not met";
pub const OVERNIGHT_PASS: &str = "OK FOR OVERNIGHT";
pub const OVERNIGHT_FAIL: &str = "NOT OK FOR OVERNIGHT";
pub const INSUFFICIENT: &str = "insufficient data";

pub struct TextReportAdapter;

impl TextReportAdapter {
    fn write_rule(
        out: &mut dyn Write,
        title: &str,
        outcome: &RuleOutcome,
        pass: &str,
        fail: &str,
    ) -> Result<(), SignalError> {
        writeln!(out, "{title}")?;
        match outcome {
            RuleOutcome::NotApplicable { reason, metrics } => {
                writeln!(out, "  {reason}")?;
                if let Some(metrics) = metrics {
                    Self::write_metrics(out, metrics)?;
                }
            }
            RuleOutcome::DataInsufficient { reason } => {
                writeln!(out, "  {INSUFFICIENT} ({reason})")?
            }
            RuleOutcome::Evaluated(verdict) => {
                writeln!(out, "  {}", if verdict.passed { pass } else { fail })?;
                Self::write_metrics(out, &verdict.metrics)?;
            }
        }
        Ok(())
    }

    fn write_metrics(out: &mut dyn Write, metrics: &Metrics) -> Result<(), SignalError> {
        let width = metrics.keys().map(|k| k.len()).max().unwrap_or(0);
        for (name, value) in metrics {
            writeln!(out, "    {name:<width$}  {value}")?;
        }
        Ok(())
    }
}

impl ReportPort for TextReportAdapter {
    fn render(&self, report: &DashboardReport, out: &mut dyn Write) -> Result<(), SignalError> {
        writeln!(
            out,
            "{} ({}) as of {}",
            report.symbol,
            report.interval,
            report.now.format("%Y-%m-%d %H:%M %Z")
        )?;
        writeln!(out)?;

        Self::write_rule(out, "Morning Pop", &report.morning, MORNING_PASS, MORNING_FAIL)?;
        writeln!(out)?;
        Self::write_rule(
            out,
            "Overnight Hold",
            &report.overnight,
            OVERNIGHT_PASS,
            OVERNIGHT_FAIL,
        )?;
        writeln!(out)?;

        writeln!(out, "Earnings soon: {}", report.earnings_soon)?;
        if report.recent_news.is_empty() {
            writeln!(
                out,
                "No headlines in the last {}h",
                report.rules.news_window_hours
            )?;
        } else {
            writeln!(
                out,
                "Headlines in the last {}h:",
                report.rules.news_window_hours
            )?;
            for item in &report.recent_news {
                writeln!(out, "  {}  {}", item.timestamp.format("%m-%d %H:%M"), item.title)?;
            }
        }
        Ok(())
    }
}
