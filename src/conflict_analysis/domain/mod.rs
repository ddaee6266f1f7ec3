pub mod conflict;
pub mod dependency_path;
pub mod metadata;
pub mod package;
pub mod project;
pub mod warning;

pub use conflict::{ConflictRecord, ConflictVersion};
pub use dependency_path::{DependencyPath, TransitivePackageInfo};
pub use metadata::{DeclaredDependency, PackageMetadata};
pub use package::{PackageKey, PackageReference};
pub use project::{DirectPackageExpansion, ProjectPackageSet, ProjectTransitiveInfo};
pub use warning::AnalysisWarning;
