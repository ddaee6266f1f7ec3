//! Builder for constructing ConflictReport from the use case response

use super::conflict_report::{
    ConflictReport, ConflictVersionView, ConflictView, PackageUsageRow, ReportMetadata,
};
use crate::application::dto::AnalysisResponse;
use crate::conflict_analysis::domain::{ConflictRecord, ProjectPackageSet};
use std::collections::{BTreeMap, BTreeSet};

/// Direct and transitive usage labels of one package version
#[derive(Default)]
struct UsageLabels {
    direct: BTreeSet<String>,
    transitive: BTreeSet<String>,
}

/// Builder for constructing ConflictReport from domain objects
pub struct ConflictReportBuilder;

impl ConflictReportBuilder {
    /// Builds the report read model
    ///
    /// # Arguments
    /// * `response` - Enriched projects and conflicts from the use case
    /// * `metadata` - Run metadata (timestamp, tool, solution, cache)
    pub fn build(response: &AnalysisResponse, metadata: ReportMetadata) -> ConflictReport {
        ConflictReport {
            metadata,
            usage_rows: Self::build_usage_rows(&response.projects),
            conflicts: Self::build_conflicts(&response.conflicts),
            transitive_conflicts: Self::build_conflicts(&response.transitive_conflicts),
            warnings: response.warnings.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// One row per `(name, version)`, sorted by name then version.
    ///
    /// Within a row, project names (direct use) come before
    /// `"Project -> path"` chains (transitive use). Every path a package was
    /// reached through is listed, not only the one that introduced it.
    fn build_usage_rows(projects: &[ProjectPackageSet]) -> Vec<PackageUsageRow> {
        let mut usage: BTreeMap<(String, String), UsageLabels> = BTreeMap::new();

        for project in projects {
            let project_name = project.project_name();
            for reference in project.packages() {
                let key = reference.key();
                let labels = usage
                    .entry((key.name.clone(), key.version.clone()))
                    .or_default();
                match reference.origin_path() {
                    Some(origin) if reference.is_transitive() => {
                        labels
                            .transitive
                            .insert(format!("{} -> {}", project_name, origin));
                    }
                    _ => {
                        labels.direct.insert(project_name.clone());
                    }
                }

                // The package's own token marks direct use; the rest are paths
                let own_token = key.token();
                if let Some(paths) = project.usage_paths(&key) {
                    for path in paths.iter().filter(|p| **p != own_token) {
                        labels
                            .transitive
                            .insert(format!("{} -> {}", project_name, path));
                    }
                }
            }
        }

        usage
            .into_iter()
            .map(|((package, version), labels)| PackageUsageRow {
                package,
                version,
                paths: labels.direct.into_iter().chain(labels.transitive).collect(),
            })
            .collect()
    }

    fn build_conflicts(records: &[ConflictRecord]) -> Vec<ConflictView> {
        records
            .iter()
            .map(|record| ConflictView {
                package: record.package_name().to_string(),
                versions: record
                    .versions()
                    .iter()
                    .map(|v| ConflictVersionView {
                        version: v.version().to_string(),
                        sources: v.sources().iter().cloned().collect(),
                    })
                    .collect(),
            })
            .collect()
    }
}
