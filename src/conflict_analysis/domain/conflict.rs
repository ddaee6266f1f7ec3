use serde::Serialize;
use std::collections::BTreeSet;

/// One version of a conflicting package and the sources that use it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictVersion {
    version: String,
    sources: BTreeSet<String>,
}

impl ConflictVersion {
    pub fn new(version: String, sources: BTreeSet<String>) -> Self {
        Self { version, sources }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Projects or dependency paths that introduced this version
    pub fn sources(&self) -> &BTreeSet<String> {
        &self.sources
    }
}

/// A package observed at two or more distinct versions within one
/// aggregation scope.
///
/// Records are only created by the aggregator and are read-only afterwards.
/// Versions are ordered by version string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictRecord {
    package_name: String,
    versions: Vec<ConflictVersion>,
}

impl ConflictRecord {
    pub(crate) fn new(package_name: String, versions: Vec<ConflictVersion>) -> Self {
        debug_assert!(versions.len() > 1);
        Self {
            package_name,
            versions,
        }
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn versions(&self) -> &[ConflictVersion] {
        &self.versions
    }

    pub fn version_strings(&self) -> Vec<&str> {
        self.versions.iter().map(|v| v.version()).collect()
    }

    /// Sources for a specific version, if that version is part of the conflict
    pub fn sources_for(&self, version: &str) -> Option<&BTreeSet<String>> {
        self.versions
            .iter()
            .find(|v| v.version() == version)
            .map(|v| v.sources())
    }
}
