use clap::Parser;
use nuget_conflicts::application::dto::OutputFormat;
use std::path::PathBuf;

/// Detect NuGet package version conflicts in a .NET solution
#[derive(Parser, Debug)]
#[command(name = "nuget-conflicts")]
#[command(version)]
#[command(
    about = "Detect NuGet package version conflicts across the projects of a .NET solution",
    long_about = None
)]
pub struct Args {
    /// Path to the solution (.sln) file
    #[arg(value_name = "SOLUTION")]
    pub solution: PathBuf,

    /// Output format: text, csv, table or json [default: text]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (stdout if not specified; csv defaults to a
    /// timestamped file next to the solution)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// NuGet global packages folder (defaults to $NUGET_PACKAGES or ~/.nuget/packages)
    #[arg(long, value_name = "DIR")]
    pub package_cache: Option<PathBuf>,

    /// Only analyze directly declared package references
    #[arg(long)]
    pub no_transitive: bool,

    /// Exclude packages matching patterns (supports wildcards: *)
    /// Can be specified multiple times: -e "Microsoft.*" -e "*.Analyzers"
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Exit with code 1 when version conflicts are found
    #[arg(long)]
    pub fail_on_conflict: bool,

    /// Path to a config file (defaults to nuget-conflicts.config.yml next to the solution)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
