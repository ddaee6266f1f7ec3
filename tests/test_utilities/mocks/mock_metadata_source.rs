use nuget_conflicts::conflict_analysis::domain::DeclaredDependency;
use nuget_conflicts::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory package metadata keyed by `(name, version)`
#[derive(Default)]
pub struct MockMetadataSource {
    packages: HashMap<(String, String), PackageMetadata>,
    lookups: AtomicUsize,
}

impl MockMetadataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, name: &str, version: &str, dependencies: &[(&str, &str)]) -> Self {
        let dependencies = dependencies
            .iter()
            .map(|(id, range)| DeclaredDependency::new(*id, *range))
            .collect();
        self.packages.insert(
            (name.to_lowercase(), version.to_lowercase()),
            PackageMetadata::with_dependencies(dependencies),
        );
        self
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl PackageMetadataSource for MockMetadataSource {
    fn lookup(&self, name: &str, version: &str) -> Result<Option<PackageMetadata>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .packages
            .get(&(name.to_lowercase(), version.to_lowercase()))
            .cloned())
    }
}
