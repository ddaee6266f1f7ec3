mod cli;
mod config;

use chrono::{DateTime, Local};
use cli::Args;
use config::{discover_config, load_config_from_path, resolve_settings, Settings};
use nuget_conflicts::adapters::outbound::console::StderrProgressReporter;
use nuget_conflicts::adapters::outbound::filesystem::FileSystemReader;
use nuget_conflicts::adapters::outbound::nuget_cache::{
    CachingMetadataSource, NuGetCacheMetadataSource,
};
use nuget_conflicts::application::dto::{AnalysisRequest, OutputFormat};
use nuget_conflicts::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use nuget_conflicts::application::read_models::{ConflictReportBuilder, ReportMetadata};
use nuget_conflicts::application::use_cases::AnalyzeSolutionUseCase;
use nuget_conflicts::shared::error::{AnalyzerError, ExitCode};
use nuget_conflicts::shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    match run().await {
        Ok(exit_code) => process::exit(exit_code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

async fn run() -> Result<ExitCode> {
    // Parse command-line arguments (clap exits with code 2 on invalid input)
    let args = Args::parse_args();

    validate_solution_path(&args.solution)?;
    let solution_dir = solution_directory(&args.solution);

    // Merge CLI flags with the config file
    let config = match args.config.as_deref() {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(&solution_dir)?,
    };
    let mut settings = resolve_settings(&args, config.as_ref())?;

    let cache_root = resolve_cache_root(&mut settings);

    // Create adapters (Dependency Injection)
    let metadata_source = NuGetCacheMetadataSource::new(cache_root.clone().unwrap_or_default());
    let use_case = AnalyzeSolutionUseCase::new(
        FileSystemReader::new(),
        FileSystemReader::new(),
        Arc::new(CachingMetadataSource::new(metadata_source)),
        StderrProgressReporter::new(),
    );

    let request = AnalysisRequest::new(
        args.solution.clone(),
        settings.include_transitive,
        settings.exclude_patterns.clone(),
    );
    let response = use_case.execute(request).await?;

    let metadata = ReportMetadata::generate(
        &args.solution,
        response.projects.len(),
        cache_root.as_deref(),
        settings.include_transitive,
    );
    let report = ConflictReportBuilder::build(&response, metadata);

    eprintln!("{}", FormatterFactory::progress_message(settings.format));
    let formatted_output = FormatterFactory::create(settings.format).format(&report)?;

    let presenter_type = match args.output {
        Some(path) => PresenterType::File(path),
        None if settings.format == OutputFormat::Csv => {
            PresenterType::File(default_csv_path(&solution_dir, Local::now()))
        }
        None => PresenterType::Stdout,
    };
    PresenterFactory::create(presenter_type).present(&formatted_output)?;

    if settings.fail_on_conflict && report.has_conflicts() {
        return Ok(ExitCode::ConflictsDetected);
    }
    Ok(ExitCode::Success)
}

/// Picks the package cache root and turns transitive analysis off when
/// there is none to read from.
fn resolve_cache_root(settings: &mut Settings) -> Option<PathBuf> {
    if !settings.include_transitive {
        return settings.package_cache.clone();
    }

    let root = settings
        .package_cache
        .clone()
        .or_else(NuGetCacheMetadataSource::default_root);

    match &root {
        Some(path) if !path.is_dir() => eprintln!(
            "⚠️  Warning: NuGet package cache not found at {}; transitive analysis may be incomplete.",
            path.display()
        ),
        Some(_) => {}
        None => {
            eprintln!(
                "⚠️  Warning: Could not locate the NuGet package cache (set NUGET_PACKAGES or use --package-cache); \
                 only direct references will be analyzed."
            );
            settings.include_transitive = false;
        }
    }

    root
}

fn solution_directory(solution: &Path) -> PathBuf {
    match solution.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// `<solution dir>/packages_report_<YYYYMMDD_HHMMSS>.csv`
fn default_csv_path(solution_dir: &Path, now: DateTime<Local>) -> PathBuf {
    solution_dir.join(format!("packages_report_{}.csv", now.format("%Y%m%d_%H%M%S")))
}

fn validate_solution_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(AnalyzerError::SolutionNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    // Security check: Reject symbolic links for the solution path
    let metadata = std::fs::symlink_metadata(path).map_err(|e| AnalyzerError::InvalidSolutionPath {
        path: path.to_path_buf(),
        reason: format!("Failed to read path metadata: {}", e),
    })?;

    if metadata.is_symlink() {
        return Err(AnalyzerError::InvalidSolutionPath {
            path: path.to_path_buf(),
            reason: "Security: Solution path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(AnalyzerError::InvalidSolutionPath {
            path: path.to_path_buf(),
            reason: "Not a file".to_string(),
        }
        .into());
    }

    let is_sln = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("sln"))
        .unwrap_or(false);
    if !is_sln {
        return Err(AnalyzerError::InvalidSolutionPath {
            path: path.to_path_buf(),
            reason: "Not a .sln file".to_string(),
        }
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::TempDir;

    fn settings(include_transitive: bool, package_cache: Option<PathBuf>) -> Settings {
        Settings {
            format: OutputFormat::Text,
            package_cache,
            include_transitive,
            exclude_patterns: Vec::new(),
            fail_on_conflict: false,
        }
    }

    #[test]
    fn test_validate_solution_path_valid() {
        let temp_dir = TempDir::new().unwrap();
        let solution = temp_dir.path().join("App.SLN");
        fs::write(&solution, "").unwrap();

        assert!(validate_solution_path(&solution).is_ok());
    }

    #[test]
    fn test_validate_solution_path_nonexistent() {
        let result = validate_solution_path(Path::new("/nonexistent/App.sln"));

        let err_string = format!("{}", result.unwrap_err());
        assert!(err_string.contains("Solution file not found"));
    }

    #[test]
    fn test_validate_solution_path_wrong_extension() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join("App.csproj");
        fs::write(&project, "<Project />").unwrap();

        let err_string = format!("{}", validate_solution_path(&project).unwrap_err());
        assert!(err_string.contains("Not a .sln file"));
    }

    #[test]
    fn test_validate_solution_path_directory() {
        let temp_dir = TempDir::new().unwrap();

        let err_string = format!("{}", validate_solution_path(temp_dir.path()).unwrap_err());
        assert!(err_string.contains("Not a file"));
    }

    #[test]
    fn test_default_csv_path() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let path = default_csv_path(Path::new("/repo"), now);

        assert_eq!(path, PathBuf::from("/repo/packages_report_20240309_140507.csv"));
    }

    #[test]
    fn test_solution_directory_of_bare_file_name() {
        assert_eq!(solution_directory(Path::new("App.sln")), PathBuf::from("."));
        assert_eq!(
            solution_directory(Path::new("/repo/App.sln")),
            PathBuf::from("/repo")
        );
    }

    #[test]
    fn test_resolve_cache_root_prefers_explicit_setting() {
        let temp_dir = TempDir::new().unwrap();
        let mut settings = settings(true, Some(temp_dir.path().to_path_buf()));

        let root = resolve_cache_root(&mut settings);

        assert_eq!(root, Some(temp_dir.path().to_path_buf()));
        assert!(settings.include_transitive);
    }

    #[test]
    fn test_resolve_cache_root_missing_directory_keeps_transitive() {
        let mut settings = settings(true, Some(PathBuf::from("/nonexistent/nuget/packages")));

        let root = resolve_cache_root(&mut settings);

        assert_eq!(root, Some(PathBuf::from("/nonexistent/nuget/packages")));
        assert!(settings.include_transitive);
    }
}
