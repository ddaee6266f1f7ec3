//! Conflict report read model
//!
//! Everything a formatter needs, flattened into plain strings and vectors.

use chrono::Utc;
use serde::Serialize;
use std::path::Path;

/// Main read model for an analysis run
#[derive(Debug, Clone, Serialize)]
pub struct ConflictReport {
    pub metadata: ReportMetadata,
    /// One row per `(package, version)` used anywhere in the solution
    pub usage_rows: Vec<PackageUsageRow>,
    /// Packages used at more than one version across the solution
    pub conflicts: Vec<ConflictView>,
    /// Packages reached at more than one version through direct references' closures
    pub transitive_conflicts: Vec<ConflictView>,
    pub warnings: Vec<String>,
}

impl ConflictReport {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Where one package version is used
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageUsageRow {
    pub package: String,
    pub version: String,
    /// Project names for direct use, then `"Project -> A 1.0 -> B 2.0"` chains
    pub paths: Vec<String>,
}

/// View representation of a conflicting package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictView {
    pub package: String,
    pub versions: Vec<ConflictVersionView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictVersionView {
    pub version: String,
    pub sources: Vec<String>,
}

/// View representation of run metadata
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// RFC 3339 timestamp of report creation
    pub generated_at: String,
    pub tool_name: String,
    pub tool_version: String,
    pub solution: String,
    pub project_count: usize,
    /// Package cache root consulted for transitive analysis, if any
    pub package_cache: Option<String>,
    pub transitive_analysis: bool,
}

impl ReportMetadata {
    /// Metadata stamped with the current time and this tool's name and version
    pub fn generate(
        solution: &Path,
        project_count: usize,
        package_cache: Option<&Path>,
        transitive_analysis: bool,
    ) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            tool_name: env!("CARGO_PKG_NAME").to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            solution: solution.display().to_string(),
            project_count,
            package_cache: package_cache.map(|p| p.display().to_string()),
            transitive_analysis,
        }
    }
}
