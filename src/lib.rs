//! nuget-conflicts - NuGet package version conflict detection for .NET solutions
//!
//! This library reads a solution's projects, expands every direct package
//! reference into its transitive closure using the local NuGet package cache,
//! and reports packages that are used at more than one version. It follows
//! hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`conflict_analysis`): Domain models, transitive expansion
//!   and conflict aggregation
//! - **Application Layer** (`application`): Use cases, DTOs and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use nuget_conflicts::prelude::*;
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<()> {
//! // Create adapters
//! let cache = NuGetCacheMetadataSource::new(PathBuf::from("/home/dev/.nuget/packages"));
//! let use_case = AnalyzeSolutionUseCase::new(
//!     FileSystemReader::new(),
//!     FileSystemReader::new(),
//!     Arc::new(CachingMetadataSource::new(cache)),
//!     StderrProgressReporter::new(),
//! );
//!
//! // Execute
//! let solution = PathBuf::from("App.sln");
//! let request = AnalysisRequest::new(solution.clone(), true, vec![]);
//! let response = use_case.execute(request).await?;
//!
//! // Format output
//! let metadata = ReportMetadata::generate(&solution, response.projects.len(), None, true);
//! let report = ConflictReportBuilder::build(&response, metadata);
//! println!("{}", TextFormatter::new().format(&report)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod conflict_analysis;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{
        CsvFormatter, JsonFormatter, TableFormatter, TextFormatter,
    };
    pub use crate::adapters::outbound::nuget_cache::{
        CachingMetadataSource, NuGetCacheMetadataSource,
    };
    pub use crate::application::dto::{AnalysisRequest, AnalysisResponse, OutputFormat};
    pub use crate::application::read_models::{
        ConflictReport, ConflictReportBuilder, ReportMetadata,
    };
    pub use crate::application::use_cases::AnalyzeSolutionUseCase;
    pub use crate::conflict_analysis::domain::{
        AnalysisWarning, ConflictRecord, DependencyPath, PackageMetadata, PackageReference,
        ProjectPackageSet, TransitivePackageInfo,
    };
    pub use crate::conflict_analysis::services::{
        ConflictAggregator, PackageFilter, TransitiveExpander, VersionRangeNormalizer,
    };
    pub use crate::ports::outbound::{
        OutputPresenter, PackageMetadataSource, ProgressReporter, ProjectReader,
        ReportFormatter, SolutionReader,
    };
    pub use crate::shared::Result;
}
