//! Report rendering port trait.

use crate::domain::dashboard::DashboardReport;
use crate::domain::error::SignalError;
use std::io::Write;

/// Port for rendering an evaluation for display.
pub trait ReportPort {
    fn render(&self, report: &DashboardReport, out: &mut dyn Write) -> Result<(), SignalError>;

    /// Render into a `String`.
    fn render_to_string(&self, report: &DashboardReport) -> Result<String, SignalError> {
        let mut buf = Vec::new();
        self.render(report, &mut buf)?;
        String::from_utf8(buf).map_err(|e| SignalError::InvalidPayload {
            what: "report".into(),
            reason: e.to_string(),
        })
    }
}
