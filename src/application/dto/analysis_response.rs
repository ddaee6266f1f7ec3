use crate::conflict_analysis::domain::{
    AnalysisWarning, ConflictRecord, ProjectPackageSet, ProjectTransitiveInfo,
};

/// AnalysisResponse - Internal response DTO from the solution analysis use case
///
/// Holds the enriched projects and both conflict scopes; the report read
/// model is built from it.
#[derive(Debug, Clone)]
pub struct AnalysisResponse {
    /// Projects in discovery order, direct references followed by
    /// transitive ones, with excluded packages removed
    pub projects: Vec<ProjectPackageSet>,
    /// Per-direct-reference expansions (empty when transitive analysis is off)
    pub transitive_projects: Vec<ProjectTransitiveInfo>,
    /// Conflicts across the whole solution
    pub conflicts: Vec<ConflictRecord>,
    /// Conflicts among the transitive closures of direct references
    pub transitive_conflicts: Vec<ConflictRecord>,
    /// Non-fatal problems met during the run, de-duplicated
    pub warnings: Vec<AnalysisWarning>,
}

impl AnalysisResponse {
    pub fn new(
        projects: Vec<ProjectPackageSet>,
        transitive_projects: Vec<ProjectTransitiveInfo>,
        conflicts: Vec<ConflictRecord>,
        transitive_conflicts: Vec<ConflictRecord>,
        warnings: Vec<AnalysisWarning>,
    ) -> Self {
        Self {
            projects,
            transitive_projects,
            conflicts,
            transitive_conflicts,
            warnings,
        }
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}
