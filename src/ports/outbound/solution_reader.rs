use crate::shared::Result;
use std::path::{Path, PathBuf};

/// SolutionReader port for locating the projects of a solution
pub trait SolutionReader {
    /// Reads a solution file and returns the project files it lists
    ///
    /// # Arguments
    /// * `solution_path` - Path to the `.sln` file
    ///
    /// # Returns
    /// Absolute paths of existing `.csproj` files, in solution order
    ///
    /// # Errors
    /// Returns an error if the solution file cannot be read
    fn read_project_paths(&self, solution_path: &Path) -> Result<Vec<PathBuf>>;
}
