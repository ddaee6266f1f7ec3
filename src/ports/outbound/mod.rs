/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (package cache, project files, console, etc.).
pub mod output_presenter;
pub mod package_metadata_source;
pub mod progress_reporter;
pub mod project_reader;
pub mod report_formatter;
pub mod solution_reader;

pub use output_presenter::OutputPresenter;
pub use package_metadata_source::PackageMetadataSource;
pub use progress_reporter::ProgressReporter;
pub use project_reader::ProjectReader;
pub use report_formatter::ReportFormatter;
pub use solution_reader::SolutionReader;
