use std::path::PathBuf;

/// AnalysisRequest - Internal request DTO for the solution analysis use case
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Path to the `.sln` file
    pub solution_path: PathBuf,
    /// Whether to walk the package cache for transitive dependencies
    pub include_transitive: bool,
    /// Patterns for hiding packages from the report
    pub exclude_patterns: Vec<String>,
}

impl AnalysisRequest {
    pub fn new(
        solution_path: PathBuf,
        include_transitive: bool,
        exclude_patterns: Vec<String>,
    ) -> Self {
        Self {
            solution_path,
            include_transitive,
            exclude_patterns,
        }
    }
}
