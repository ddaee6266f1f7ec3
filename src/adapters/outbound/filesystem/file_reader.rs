use super::project_file_parser::parse_project_file;
use super::solution_parser::{parse_solution, resolve_relative};
use crate::conflict_analysis::domain::ProjectPackageSet;
use crate::ports::outbound::{ProjectReader, SolutionReader};
use crate::shared::error::AnalyzerError;
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum file size for security (100 MB)
const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Safely read a file with security checks:
/// - Reject symbolic links
/// - Check file size limits
/// - Validate file is a regular file
pub(crate) fn safe_read_file(path: &Path, file_type: &str) -> Result<String> {
    // Get file metadata without following symlinks
    let metadata = fs::symlink_metadata(path).map_err(|e| AnalyzerError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read {} metadata: {}", file_type, e),
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    // Security check: File size limit (prevent DoS via huge files)
    let file_size = metadata.len();
    if file_size > MAX_FILE_SIZE {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            MAX_FILE_SIZE
        );
    }

    fs::read_to_string(path).map_err(|e| {
        AnalyzerError::FileReadError {
            path: path.to_path_buf(),
            details: format!("Failed to read {}: {}", file_type, e),
        }
        .into()
    })
}

/// FileSystemReader adapter for reading solution and project files
///
/// This adapter implements both SolutionReader and ProjectReader ports,
/// providing file system access for `.sln` and `.csproj` files.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SolutionReader for FileSystemReader {
    fn read_project_paths(&self, solution_path: &Path) -> Result<Vec<PathBuf>> {
        if !solution_path.exists() {
            return Err(AnalyzerError::SolutionNotFound {
                path: solution_path.to_path_buf(),
            }
            .into());
        }

        let content = safe_read_file(solution_path, ".sln")?;
        let solution_dir = solution_path.parent().unwrap_or_else(|| Path::new(""));

        parse_solution(&content, solution_dir)
    }
}

impl ProjectReader for FileSystemReader {
    fn project_exists(&self, project_path: &Path) -> bool {
        project_path.is_file()
    }

    fn read_project(&self, project_path: &Path) -> Result<ProjectPackageSet> {
        let content = safe_read_file(project_path, "project file")?;

        let contents =
            parse_project_file(&content).map_err(|e| AnalyzerError::ProjectParseError {
                path: project_path.to_path_buf(),
                details: format!("{:#}", e),
            })?;

        let project_dir = project_path.parent().unwrap_or_else(|| Path::new(""));
        let project_references = contents
            .project_references
            .iter()
            .map(|relative| resolve_relative(project_dir, relative))
            .collect();

        Ok(
            ProjectPackageSet::new(project_path.to_path_buf(), contents.package_references)
                .with_project_references(project_references),
        )
    }
}
