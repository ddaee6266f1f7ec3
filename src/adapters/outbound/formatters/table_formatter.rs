use crate::application::read_models::ConflictReport;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// A fixed-width column
struct Column {
    header: &'static str,
    width: usize,
}

const COLUMNS: [Column; 3] = [
    Column {
        header: "Package",
        width: 40,
    },
    Column {
        header: "Version",
        width: 20,
    },
    Column {
        header: "Dependency path",
        width: 80,
    },
];

/// TableFormatter adapter rendering usage rows as a fixed-width text table
///
/// A package version used through several paths takes one line per path;
/// the package and version cells are only filled on the first one.
pub struct TableFormatter;

impl TableFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Pads or truncates a cell to exactly `width` characters
    fn fit(value: &str, width: usize) -> String {
        let length = value.chars().count();
        if length > width {
            let kept: String = value.chars().take(width.saturating_sub(3)).collect();
            format!("{}...", kept)
        } else {
            format!("{}{}", value, " ".repeat(width - length))
        }
    }

    fn line(cells: [&str; 3]) -> String {
        let mut line = String::new();
        for (column, cell) in COLUMNS.iter().zip(cells) {
            line.push_str("| ");
            line.push_str(&Self::fit(cell, column.width));
            line.push(' ');
        }
        line.push_str("|\n");
        line
    }

    fn rule() -> String {
        let width: usize = COLUMNS.iter().map(|c| c.width + 3).sum::<usize>() + 1;
        format!("{}\n", "-".repeat(width))
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for TableFormatter {
    fn format(&self, report: &ConflictReport) -> Result<String> {
        let mut output = Self::rule();
        output.push_str(&Self::line([
            COLUMNS[0].header,
            COLUMNS[1].header,
            COLUMNS[2].header,
        ]));
        output.push_str(&Self::rule());

        for row in &report.usage_rows {
            let mut paths = row.paths.iter().map(String::as_str);
            let first = paths.next().unwrap_or("");
            output.push_str(&Self::line([row.package.as_str(), row.version.as_str(), first]));
            for path in paths {
                output.push_str(&Self::line(["", "", path]));
            }
        }

        output.push_str(&Self::rule());
        Ok(output)
    }
}
