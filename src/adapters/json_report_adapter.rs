//! JSON report for scripting.

use crate::domain::dashboard::DashboardReport;
use crate::domain::error::SignalError;
use crate::ports::report_port::ReportPort;
use std::io::Write;

pub struct JsonReportAdapter;

impl ReportPort for JsonReportAdapter {
    fn render(&self, report: &DashboardReport, out: &mut dyn Write) -> Result<(), SignalError> {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
        Ok(())
    }
}
