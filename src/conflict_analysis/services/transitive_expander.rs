use super::VersionRangeNormalizer;
use crate::conflict_analysis::domain::{
    AnalysisWarning, DependencyPath, DirectPackageExpansion, PackageKey, PackageReference,
    ProjectPackageSet, ProjectTransitiveInfo, TransitivePackageInfo,
};
use crate::ports::outbound::PackageMetadataSource;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Result of expanding one seed package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    /// Discovered packages in pre-order: a node's own dependencies are
    /// listed together before any of them is expanded further
    pub packages: Vec<TransitivePackageInfo>,
    pub warnings: Vec<AnalysisWarning>,
}

/// Per-direct-reference expansion of a project plus the warnings it raised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectAnalysis {
    pub transitive: ProjectTransitiveInfo,
    pub warnings: Vec<AnalysisWarning>,
}

/// A project whose package list now includes transitive references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEnrichment {
    /// Direct references followed by newly discovered transitive references,
    /// carrying every label each package was reached under
    pub project: ProjectPackageSet,
    pub warnings: Vec<AnalysisWarning>,
}

impl ProjectEnrichment {
    /// Merges a project's expansions into its package list.
    ///
    /// A package already present (declared directly or reached through an
    /// earlier path) is not added again; the new path is recorded as an
    /// additional label instead.
    pub fn from_analysis(project: &ProjectPackageSet, analysis: ProjectAnalysis) -> Self {
        let direct: Vec<PackageReference> = project.direct_packages().cloned().collect();

        let mut usage_paths: BTreeMap<PackageKey, BTreeSet<String>> = BTreeMap::new();
        for reference in &direct {
            let key = reference.key();
            let label = key.token();
            usage_paths.entry(key).or_default().insert(label);
        }

        let mut transitive = Vec::new();
        for direct_expansion in analysis.transitive.direct_packages {
            for info in direct_expansion.transitive_packages {
                let rendered = info.dependency_path.render();
                match usage_paths.entry(info.key()) {
                    Entry::Occupied(mut existing) => {
                        existing.get_mut().insert(rendered);
                    }
                    Entry::Vacant(slot) => {
                        transitive.push(PackageReference::transitive(
                            info.name,
                            info.version,
                            rendered.clone(),
                        ));
                        slot.insert(BTreeSet::from([rendered]));
                    }
                }
            }
        }

        let mut packages = direct;
        packages.extend(transitive);

        Self {
            project: project.with_packages(packages).with_usage_paths(usage_paths),
            warnings: dedup_warnings(analysis.warnings),
        }
    }
}

/// TransitiveExpander walks the package metadata source depth-first to
/// discover every package a seed package pulls in.
///
/// Termination relies only on the path guard: a dependency whose
/// `"name version"` token already occurs in the current path is dropped
/// instead of being visited again. There is no depth cap.
///
/// The expander borrows the source immutably and keeps no state between
/// calls, so one expander per worker can share a single source.
pub struct TransitiveExpander<'a, S: PackageMetadataSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: PackageMetadataSource + ?Sized> TransitiveExpander<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Expands a package into its full transitive closure
    ///
    /// # Arguments
    /// * `name` / `version` - The package to expand
    /// * `ancestor_path` - Path accumulated so far; it must end with the
    ///   package's own `"name version"` token (use [`DependencyPath::root`]
    ///   for a seed call)
    ///
    /// # Returns
    /// Discovered packages with their paths, plus warnings for packages
    /// whose metadata was missing or unreadable. Nothing is returned when
    /// the package already appears earlier in `ancestor_path`.
    pub fn expand(&self, name: &str, version: &str, ancestor_path: &DependencyPath) -> Expansion {
        let mut warnings = Vec::new();
        let packages = self.expand_into(name, version, ancestor_path, &mut warnings);
        Expansion { packages, warnings }
    }

    /// Expands every direct reference of a project separately
    pub fn analyze_project(&self, project: &ProjectPackageSet) -> ProjectAnalysis {
        let mut warnings = Vec::new();
        let direct_packages = project
            .direct_packages()
            .map(|reference| {
                let seed = DependencyPath::root(reference.name(), reference.version());
                let expansion = self.expand(reference.name(), reference.version(), &seed);
                warnings.extend(expansion.warnings);
                DirectPackageExpansion {
                    name: reference.name().to_string(),
                    version: reference.version().to_string(),
                    transitive_packages: expansion.packages,
                }
            })
            .collect();

        ProjectAnalysis {
            transitive: ProjectTransitiveInfo {
                project_path: project.project_path().to_path_buf(),
                direct_packages,
            },
            warnings,
        }
    }

    /// Adds the transitive references of a project to its package list
    pub fn enrich_project(&self, project: &ProjectPackageSet) -> ProjectEnrichment {
        ProjectEnrichment::from_analysis(project, self.analyze_project(project))
    }

    fn expand_into(
        &self,
        name: &str,
        version: &str,
        ancestor_path: &DependencyPath,
        warnings: &mut Vec<AnalysisWarning>,
    ) -> Vec<TransitivePackageInfo> {
        let token = PackageKey::new(name, version).token();
        if ancestor_path.contains_before_last(&token) {
            return Vec::new();
        }

        let metadata = match self.source.lookup(name, version) {
            Ok(Some(metadata)) => metadata,
            Ok(None) => {
                warnings.push(AnalysisWarning::MissingMetadata {
                    package: name.to_string(),
                    version: version.to_string(),
                });
                return Vec::new();
            }
            Err(e) => {
                warnings.push(AnalysisWarning::MalformedMetadata {
                    package: name.to_string(),
                    version: version.to_string(),
                    details: format!("{:#}", e),
                });
                return Vec::new();
            }
        };

        let mut children = Vec::with_capacity(metadata.dependencies().len());
        for dependency in metadata.dependencies() {
            let clean_version = VersionRangeNormalizer::normalize(&dependency.version_expression);
            let candidate = PackageKey::new(dependency.name.as_str(), clean_version.as_str());

            // Cycle: the dependency is already one of our ancestors (or us)
            if ancestor_path.contains(&candidate.token()) {
                continue;
            }

            let path = ancestor_path.extended(&dependency.name, &clean_version);
            children.push(TransitivePackageInfo::new(
                dependency.name.clone(),
                clean_version,
                path,
            ));
        }

        let mut discovered = children.clone();
        for child in &children {
            discovered.extend(self.expand_into(
                &child.name,
                &child.version,
                &child.dependency_path,
                warnings,
            ));
        }
        discovered
    }
}

fn dedup_warnings(warnings: Vec<AnalysisWarning>) -> Vec<AnalysisWarning> {
    let mut seen = HashSet::new();
    warnings
        .into_iter()
        .filter(|w| seen.insert(w.clone()))
        .collect()
}
