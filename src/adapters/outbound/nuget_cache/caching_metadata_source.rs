use crate::conflict_analysis::domain::PackageMetadata;
use crate::ports::outbound::PackageMetadataSource;
use crate::shared::Result;
use dashmap::DashMap;

/// Cache key for a package version lookup
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct CacheKey {
    name: String,
    version: String,
}

impl CacheKey {
    fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            version: version.to_lowercase(),
        }
    }
}

/// CachingMetadataSource wraps a PackageMetadataSource and memoizes lookups.
///
/// Projects of one solution share most of their dependency graph, so the
/// same `.nuspec` would otherwise be read once per path that reaches it.
/// Both hits and "not found" results are cached; errors are not.
/// The map is sharded, so concurrent per-project workers can share it.
pub struct CachingMetadataSource<S: PackageMetadataSource> {
    inner: S,
    cache: DashMap<CacheKey, Option<PackageMetadata>>,
}

impl<S: PackageMetadataSource> CachingMetadataSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of distinct package versions looked up so far
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl<S: PackageMetadataSource> PackageMetadataSource for CachingMetadataSource<S> {
    fn lookup(&self, name: &str, version: &str) -> Result<Option<PackageMetadata>> {
        let key = CacheKey::new(name, version);

        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached.clone());
        }

        let metadata = self.inner.lookup(name, version)?;
        self.cache.insert(key, metadata.clone());

        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict_analysis::domain::DeclaredDependency;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Mock source that tracks call counts
    struct CountingSource {
        call_count: AtomicUsize,
        fail: bool,
    }

    impl CountingSource {
        fn new(fail: bool) -> Self {
            Self {
                call_count: AtomicUsize::new(0),
                fail,
            }
        }

        fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    impl PackageMetadataSource for CountingSource {
        fn lookup(&self, name: &str, _version: &str) -> Result<Option<PackageMetadata>> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("disk error");
            }
            if name == "Missing" {
                return Ok(None);
            }
            Ok(Some(PackageMetadata::with_dependencies(vec![
                DeclaredDependency::new("Dep", "1.0"),
            ])))
        }
    }

    #[test]
    fn test_repeated_lookup_hits_cache() {
        let source = CachingMetadataSource::new(CountingSource::new(false));

        let first = source.lookup("Alpha", "1.0").unwrap();
        let second = source.lookup("alpha", "1.0").unwrap();

        assert_eq!(first, second);
        assert_eq!(source.inner().calls(), 1);
        assert_eq!(source.cache_size(), 1);
    }

    #[test]
    fn test_not_found_is_cached() {
        let source = CachingMetadataSource::new(CountingSource::new(false));

        assert!(source.lookup("Missing", "1.0").unwrap().is_none());
        assert!(source.lookup("Missing", "1.0").unwrap().is_none());

        assert_eq!(source.inner().calls(), 1);
    }

    #[test]
    fn test_versions_are_cached_separately() {
        let source = CachingMetadataSource::new(CountingSource::new(false));

        source.lookup("Alpha", "1.0").unwrap();
        source.lookup("Alpha", "2.0").unwrap();

        assert_eq!(source.inner().calls(), 2);
        assert_eq!(source.cache_size(), 2);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let source = CachingMetadataSource::new(CountingSource::new(true));

        assert!(source.lookup("Alpha", "1.0").is_err());
        assert!(source.lookup("Alpha", "1.0").is_err());

        assert_eq!(source.inner().calls(), 2);
        assert_eq!(source.cache_size(), 0);
    }

    #[test]
    fn test_concurrent_readers_share_cache() {
        let source = Arc::new(CachingMetadataSource::new(CountingSource::new(false)));

        std::thread::scope(|scope| {
            for _ in 0..4 {
                let source = Arc::clone(&source);
                scope.spawn(move || {
                    for i in 0..10 {
                        source.lookup("Pkg", &format!("{}.0", i)).unwrap();
                    }
                });
            }
        });

        assert_eq!(source.cache_size(), 10);
        assert!(source.inner().calls() >= 10);
    }
}
