use crate::application::dto::{AnalysisRequest, AnalysisResponse};
use crate::conflict_analysis::domain::{
    AnalysisWarning, ConflictRecord, ProjectPackageSet, ProjectTransitiveInfo,
};
use crate::conflict_analysis::services::{
    ConflictAggregator, PackageFilter, ProjectEnrichment, TransitiveExpander,
};
use crate::ports::outbound::{
    PackageMetadataSource, ProgressReporter, ProjectReader, SolutionReader,
};
use crate::shared::Result;
use anyhow::Context;
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Projects discovered from a solution plus the problems met on the way
type DiscoveredProjects = (Vec<ProjectPackageSet>, Vec<AnalysisWarning>);

/// Projects and both conflict scopes after exclusion filters
type FilteredResults = (Vec<ProjectPackageSet>, Vec<ConflictRecord>, Vec<ConflictRecord>);

/// Enriched projects, their per-direct-reference expansions and expansion warnings
type ExpandedProjects = (
    Vec<ProjectPackageSet>,
    Vec<ProjectTransitiveInfo>,
    Vec<AnalysisWarning>,
);

/// AnalyzeSolutionUseCase - Core use case for solution conflict analysis
///
/// This use case orchestrates the analysis workflow using generic
/// dependency injection for all infrastructure dependencies.
///
/// # Type Parameters
/// * `SR` - SolutionReader implementation
/// * `PR` - ProjectReader implementation
/// * `MS` - PackageMetadataSource implementation, shared with worker threads
/// * `RP` - ProgressReporter implementation
pub struct AnalyzeSolutionUseCase<SR, PR, MS, RP> {
    solution_reader: SR,
    project_reader: PR,
    metadata_source: Arc<MS>,
    progress_reporter: RP,
}

impl<SR, PR, MS, RP> AnalyzeSolutionUseCase<SR, PR, MS, RP>
where
    SR: SolutionReader,
    PR: ProjectReader,
    MS: PackageMetadataSource + 'static,
    RP: ProgressReporter,
{
    /// Creates a new AnalyzeSolutionUseCase with injected dependencies
    pub fn new(
        solution_reader: SR,
        project_reader: PR,
        metadata_source: Arc<MS>,
        progress_reporter: RP,
    ) -> Self {
        Self {
            solution_reader,
            project_reader,
            metadata_source,
            progress_reporter,
        }
    }

    /// Executes the analysis use case
    ///
    /// # Arguments
    /// * `request` - Solution path and analysis options
    ///
    /// # Returns
    /// AnalysisResponse with enriched projects and both conflict scopes.
    /// Missing packages and broken projects are reported as warnings; only
    /// an unreadable solution or invalid options fail the run.
    pub async fn execute(&self, request: AnalysisRequest) -> Result<AnalysisResponse> {
        // Validate options before touching the file system
        let filter = PackageFilter::new(request.exclude_patterns.clone())?;

        // Step 1: Read the solution
        let solution_projects = self.read_solution(&request.solution_path)?;

        // Step 2: Follow project references
        let (projects, mut warnings) = self.discover_projects(&solution_projects);
        if projects.is_empty() {
            self.report_warnings(&warnings);
            self.progress_reporter
                .report("ℹ️  No projects found in the solution; nothing to analyze.");
            return Ok(AnalysisResponse::new(
                Vec::new(),
                Vec::new(),
                Vec::new(),
                Vec::new(),
                warnings,
            ));
        }

        // Step 3: Transitive expansion, one worker per project
        let (projects, transitive_projects, expansion_warnings) = if request.include_transitive {
            self.expand_projects(projects).await?
        } else {
            self.progress_reporter
                .report("⏭️  Skipping transitive analysis (direct references only)");
            (projects, Vec::new(), Vec::new())
        };
        warnings.extend(expansion_warnings);
        let warnings = dedup_warnings(warnings);

        // Step 4: Aggregate conflicts
        let conflicts = ConflictAggregator::aggregate_conflicts(&projects);
        let transitive_conflicts =
            ConflictAggregator::aggregate_transitive_conflicts(&transitive_projects);

        // Step 5: Apply exclusion filters
        let (projects, conflicts, transitive_conflicts) =
            self.apply_exclusion_filters(&filter, projects, conflicts, transitive_conflicts);

        self.report_warnings(&warnings);
        self.progress_reporter.report(&format!(
            "📊 {} conflicting package(s) across the solution, {} among transitive dependencies",
            conflicts.len(),
            transitive_conflicts.len()
        ));

        Ok(AnalysisResponse::new(
            projects,
            transitive_projects,
            conflicts,
            transitive_conflicts,
            warnings,
        ))
    }

    fn read_solution(&self, solution_path: &Path) -> Result<Vec<PathBuf>> {
        self.progress_reporter.report(&format!(
            "📖 Reading solution: {}",
            solution_path.display()
        ));

        let project_paths = self.solution_reader.read_project_paths(solution_path)?;

        self.progress_reporter.report(&format!(
            "✅ Found {} project(s) in the solution",
            project_paths.len()
        ));
        for path in &project_paths {
            self.progress_reporter
                .report(&format!("   - {}", path.display()));
        }

        Ok(project_paths)
    }

    /// Reads every solution project and, recursively, the projects it
    /// references. Each path is read at most once; the first occurrence
    /// determines the position in the result.
    fn discover_projects(&self, solution_projects: &[PathBuf]) -> DiscoveredProjects {
        let mut visited = HashSet::new();
        let mut projects = Vec::new();
        let mut warnings = Vec::new();

        for path in solution_projects {
            self.visit_project(path, &mut visited, &mut projects, &mut warnings);
        }

        let referenced = projects.len().saturating_sub(solution_projects.len());
        if referenced > 0 {
            self.progress_reporter.report(&format!(
                "🔗 Found {} additional project(s) through project references",
                referenced
            ));
        }

        (projects, warnings)
    }

    fn visit_project(
        &self,
        path: &Path,
        visited: &mut HashSet<PathBuf>,
        projects: &mut Vec<ProjectPackageSet>,
        warnings: &mut Vec<AnalysisWarning>,
    ) {
        if !visited.insert(path.to_path_buf()) {
            return;
        }

        if !self.project_reader.project_exists(path) {
            warnings.push(AnalysisWarning::ProjectNotFound {
                path: path.to_path_buf(),
            });
            return;
        }

        let project = match self.project_reader.read_project(path) {
            Ok(project) => project,
            Err(e) => {
                warnings.push(AnalysisWarning::ProjectParseFailed {
                    path: path.to_path_buf(),
                    details: format!("{:#}", e),
                });
                return;
            }
        };

        let references = project.project_references().to_vec();
        projects.push(project);

        for reference in &references {
            self.visit_project(reference, visited, projects, warnings);
        }
    }

    /// Expands every project on the blocking pool and restores discovery order
    async fn expand_projects(&self, projects: Vec<ProjectPackageSet>) -> Result<ExpandedProjects> {
        let total = projects.len();
        self.progress_reporter.report(&format!(
            "🔍 Analyzing transitive dependencies of {} project(s)...",
            total
        ));

        let mut pending = FuturesUnordered::new();
        for (index, project) in projects.into_iter().enumerate() {
            let source = Arc::clone(&self.metadata_source);
            pending.push(tokio::task::spawn_blocking(move || {
                let expander = TransitiveExpander::new(source.as_ref());
                let analysis = expander.analyze_project(&project);
                let transitive = analysis.transitive.clone();
                let enrichment = ProjectEnrichment::from_analysis(&project, analysis);
                (index, transitive, enrichment)
            }));
        }

        let mut slots: Vec<Option<(ProjectPackageSet, ProjectTransitiveInfo)>> =
            vec![None; total];
        let mut warnings = Vec::new();
        let mut completed = 0;

        while let Some(joined) = pending.next().await {
            let (index, transitive, enrichment) =
                joined.context("Transitive expansion worker failed")?;
            completed += 1;
            self.progress_reporter.report_progress(
                completed,
                total,
                Some(&enrichment.project.project_name()),
            );
            warnings.extend(enrichment.warnings);
            slots[index] = Some((enrichment.project, transitive));
        }

        self.progress_reporter
            .report_completion("✅ Transitive analysis complete");

        let (enriched, transitive_projects): (Vec<_>, Vec<_>) =
            slots.into_iter().flatten().unzip();
        Ok((enriched, transitive_projects, warnings))
    }

    fn apply_exclusion_filters(
        &self,
        filter: &PackageFilter,
        projects: Vec<ProjectPackageSet>,
        conflicts: Vec<ConflictRecord>,
        transitive_conflicts: Vec<ConflictRecord>,
    ) -> FilteredResults {
        if filter.is_empty() {
            return (projects, conflicts, transitive_conflicts);
        }

        let before = conflicts.len() + transitive_conflicts.len();
        let projects = projects
            .iter()
            .map(|project| filter.filter_project(project))
            .collect();
        let conflicts = filter.filter_conflicts(conflicts);
        let transitive_conflicts = filter.filter_conflicts(transitive_conflicts);

        let hidden = before - conflicts.len() - transitive_conflicts.len();
        if hidden > 0 {
            self.progress_reporter.report(&format!(
                "🚫 Excluded {} conflict(s) based on filters",
                hidden
            ));
        }

        for pattern in filter.unmatched_patterns() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Exclude pattern '{}' did not match any package.",
                pattern
            ));
        }

        (projects, conflicts, transitive_conflicts)
    }

    fn report_warnings(&self, warnings: &[AnalysisWarning]) {
        for warning in warnings {
            self.progress_reporter
                .report_error(&format!("⚠️  Warning: {}", warning));
        }
    }
}

/// Removes repeated warnings, keeping the first occurrence
fn dedup_warnings(warnings: Vec<AnalysisWarning>) -> Vec<AnalysisWarning> {
    let mut seen = HashSet::new();
    warnings
        .into_iter()
        .filter(|w| seen.insert(w.clone()))
        .collect()
}
