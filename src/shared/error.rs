use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between a clean solution,
/// a solution with version conflicts, and a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - analysis finished (conflicts may exist unless failing on them)
    Success = 0,
    /// Version conflicts were detected and `--fail-on-conflict` was given
    ConflictsDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (unreadable solution, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ConflictsDetected => write!(f, "Conflicts Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for solution analysis.
///
/// These are the failures that abort a run. Per-package and per-project
/// problems are not errors; they surface as [`AnalysisWarning`]s instead.
///
/// [`AnalysisWarning`]: crate::conflict_analysis::domain::AnalysisWarning
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Solution file not found: {path}\n\n💡 Hint: Please pass the path to an existing .sln file")]
    SolutionNotFound { path: PathBuf },

    #[error("Invalid solution path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a Visual Studio solution (.sln) file")]
    InvalidSolutionPath { path: PathBuf, reason: String },

    #[error("Failed to parse project file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the project file is well-formed XML")]
    ProjectParseError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to parse package metadata: {path}\nDetails: {details}\n\n💡 Hint: The package cache entry may be corrupt; restoring the package again usually fixes it")]
    MetadataParseError { path: PathBuf, details: String },

    /// Validation error for user supplied options
    #[error("Validation error: {message}")]
    Validation { message: String },
}
