use crate::conflict_analysis::domain::ProjectPackageSet;
use crate::shared::Result;
use std::path::Path;

/// ProjectReader port for reading a project's declared references
///
/// This port abstracts parsing of project files (e.g., `.csproj`) into
/// direct package references and project-to-project references.
pub trait ProjectReader {
    /// Whether a project file exists at `project_path`
    fn project_exists(&self, project_path: &Path) -> bool;

    /// Reads the direct references of a single project
    ///
    /// # Returns
    /// A `ProjectPackageSet` holding only direct package references, with
    /// project references resolved to absolute paths
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid XML
    fn read_project(&self, project_path: &Path) -> Result<ProjectPackageSet>;
}
