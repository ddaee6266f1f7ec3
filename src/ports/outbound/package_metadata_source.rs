use crate::conflict_analysis::domain::PackageMetadata;
use crate::shared::Result;

/// PackageMetadataSource port for looking up a package's own dependencies
///
/// This port abstracts the local package store (e.g., the NuGet global
/// packages folder) consulted during transitive expansion.
///
/// # Concurrency
/// Implementations are shared read-only between worker threads, one per
/// project, and must be `Send + Sync`. Lookups never mutate the store.
pub trait PackageMetadataSource: Send + Sync {
    /// Looks up the declared dependencies of an exact package version
    ///
    /// # Arguments
    /// * `name` - Package id as written in the referencing manifest
    /// * `version` - Exact version string
    ///
    /// # Returns
    /// * `Ok(Some(metadata))` - the package is present in the store
    /// * `Ok(None)` - the package/version pair is absent; this is a normal outcome
    ///
    /// # Errors
    /// Returns an error if an entry exists but cannot be read or parsed
    fn lookup(&self, name: &str, version: &str) -> Result<Option<PackageMetadata>>;
}
