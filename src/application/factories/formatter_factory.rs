use crate::adapters::outbound::formatters::{
    CsvFormatter, JsonFormatter, TableFormatter, TextFormatter,
};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::ReportFormatter;

/// Factory for creating report formatters
///
/// This factory encapsulates the creation logic for different formatter implementations,
/// following the Factory Pattern. It belongs in the application layer as it orchestrates
/// the selection of infrastructure adapters based on application needs.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use nuget_conflicts::application::dto::OutputFormat;
    /// use nuget_conflicts::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Csv);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn ReportFormatter> {
        match format {
            OutputFormat::Text => Box::new(TextFormatter::new()),
            OutputFormat::Csv => Box::new(CsvFormatter::new()),
            OutputFormat::Table => Box::new(TableFormatter::new()),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    ///
    /// # Examples
    /// ```
    /// use nuget_conflicts::application::dto::OutputFormat;
    /// use nuget_conflicts::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Csv);
    /// assert_eq!(message, "📝 Generating CSV package report...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Text => "📝 Generating conflict summary...",
            OutputFormat::Csv => "📝 Generating CSV package report...",
            OutputFormat::Table => "📝 Generating package table...",
            OutputFormat::Json => "📝 Generating JSON report...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::formatters::test_support::sample_report;

    #[test]
    fn test_each_format_renders_sample_report() {
        let report = sample_report();

        let text = FormatterFactory::create(OutputFormat::Text).format(&report).unwrap();
        assert!(text.starts_with("Package version conflicts detected:"));

        let csv = FormatterFactory::create(OutputFormat::Csv).format(&report).unwrap();
        assert!(csv.starts_with("Package;Version;Dependency paths"));

        let table = FormatterFactory::create(OutputFormat::Table).format(&report).unwrap();
        assert!(table.starts_with("----"));

        let json = FormatterFactory::create(OutputFormat::Json).format(&report).unwrap();
        assert!(json.starts_with('{'));
    }

    #[test]
    fn test_progress_message() {
        assert_eq!(
            FormatterFactory::progress_message(OutputFormat::Text),
            "📝 Generating conflict summary..."
        );
        assert_eq!(
            FormatterFactory::progress_message(OutputFormat::Json),
            "📝 Generating JSON report..."
        );
    }
}
