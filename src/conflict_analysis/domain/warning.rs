use std::path::PathBuf;
use thiserror::Error;

/// Non-fatal problems met during an analysis run.
///
/// None of these abort the run: the affected package branch or project is
/// skipped and the report is marked as possibly incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum AnalysisWarning {
    #[error("No package metadata found for {package} {version} in the local cache; its dependencies were not analyzed")]
    MissingMetadata { package: String, version: String },

    #[error("Package metadata for {package} {version} could not be read: {details}")]
    MalformedMetadata {
        package: String,
        version: String,
        details: String,
    },

    #[error("Referenced project not found: {}", path.display())]
    ProjectNotFound { path: PathBuf },

    #[error("Project {} could not be parsed and was skipped: {details}", path.display())]
    ProjectParseFailed { path: PathBuf, details: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_metadata_message() {
        let warning = AnalysisWarning::MissingMetadata {
            package: "Gamma".to_string(),
            version: "9.9.9".to_string(),
        };
        let message = warning.to_string();
        assert!(message.contains("Gamma 9.9.9"));
        assert!(message.contains("not analyzed"));
    }

    #[test]
    fn test_project_not_found_message() {
        let warning = AnalysisWarning::ProjectNotFound {
            path: PathBuf::from("/src/Missing/Missing.csproj"),
        };
        assert!(warning.to_string().contains("/src/Missing/Missing.csproj"));
    }
}
