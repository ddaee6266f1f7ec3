use crate::application::read_models::ConflictReport;
use crate::shared::Result;

/// ReportFormatter port for rendering the analysis report
///
/// Implementations turn the report read model into text, CSV, a fixed-width
/// table or JSON.
pub trait ReportFormatter {
    /// Formats the report
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, report: &ConflictReport) -> Result<String>;
}
