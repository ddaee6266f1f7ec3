use crate::application::read_models::{ConflictReport, ConflictView};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use std::fmt::Write;

/// TextFormatter adapter rendering the conflict summary as plain text
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }

    fn write_conflicts(output: &mut String, conflicts: &[ConflictView]) -> std::fmt::Result {
        for conflict in conflicts {
            writeln!(output, "Package: {}", conflict.package)?;
            for version in &conflict.versions {
                writeln!(output, "  Version {} is used by:", version.version)?;
                for source in &version.sources {
                    writeln!(output, "    - {}", source)?;
                }
            }
            writeln!(output)?;
        }
        Ok(())
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for TextFormatter {
    fn format(&self, report: &ConflictReport) -> Result<String> {
        let mut output = String::new();

        if report.conflicts.is_empty() && report.transitive_conflicts.is_empty() {
            writeln!(output, "No package version conflicts detected.")?;
            return Ok(output);
        }

        if !report.conflicts.is_empty() {
            writeln!(output, "Package version conflicts detected:")?;
            writeln!(output)?;
            Self::write_conflicts(&mut output, &report.conflicts)?;
        }

        if !report.transitive_conflicts.is_empty() {
            writeln!(output, "Conflicts among transitive dependencies:")?;
            writeln!(output)?;
            Self::write_conflicts(&mut output, &report.transitive_conflicts)?;
        }

        Ok(output)
    }
}
