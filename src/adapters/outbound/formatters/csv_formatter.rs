use crate::application::read_models::ConflictReport;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// Field separator; spreadsheet applications in many locales expect `;`
const CSV_SEPARATOR: char = ';';

const CSV_HEADERS: [&str; 3] = ["Package", "Version", "Dependency paths"];

/// CsvFormatter adapter writing one row per package version
///
/// The version column is written as a `="..."` formula so spreadsheets keep
/// it as text instead of parsing `1.10` as a number.
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Quotes a field when it contains the separator, a quote or a line break
    fn escape_field(field: &str) -> String {
        if field.contains(CSV_SEPARATOR) || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn version_field(version: &str) -> String {
        format!("=\"{}\"", version.replace('"', "\"\""))
    }

    fn join_row(fields: &[String]) -> String {
        fields.join(&CSV_SEPARATOR.to_string())
    }
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for CsvFormatter {
    fn format(&self, report: &ConflictReport) -> Result<String> {
        let header: Vec<String> = CSV_HEADERS.iter().map(|h| Self::escape_field(h)).collect();
        let mut output = Self::join_row(&header);
        output.push('\n');

        for row in &report.usage_rows {
            let fields = [
                Self::escape_field(&row.package),
                Self::version_field(&row.version),
                Self::escape_field(&row.paths.join("\n")),
            ];
            output.push_str(&Self::join_row(&fields));
            output.push('\n');
        }

        Ok(output)
    }
}
