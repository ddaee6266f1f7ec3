mod conflict_aggregator;
mod package_filter;
mod transitive_expander;
mod version_normalizer;

pub use conflict_aggregator::ConflictAggregator;
pub use package_filter::PackageFilter;
pub use transitive_expander::{Expansion, ProjectAnalysis, ProjectEnrichment, TransitiveExpander};
pub use version_normalizer::VersionRangeNormalizer;
