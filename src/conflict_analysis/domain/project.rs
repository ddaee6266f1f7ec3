use super::{PackageKey, PackageReference, TransitivePackageInfo};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};

/// All packages used by one project: direct references first, followed by
/// transitive references once the project has been enriched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectPackageSet {
    project_path: PathBuf,
    packages: Vec<PackageReference>,
    project_references: Vec<PathBuf>,
    /// Every label under which each package was reached: its own
    /// `"name version"` token for direct use, rendered paths for transitive use
    #[serde(skip)]
    usage_paths: BTreeMap<PackageKey, BTreeSet<String>>,
}

impl ProjectPackageSet {
    pub fn new(project_path: PathBuf, packages: Vec<PackageReference>) -> Self {
        Self {
            project_path,
            packages,
            project_references: Vec::new(),
            usage_paths: BTreeMap::new(),
        }
    }

    pub fn with_project_references(mut self, project_references: Vec<PathBuf>) -> Self {
        self.project_references = project_references;
        self
    }

    pub fn with_usage_paths(mut self, usage_paths: BTreeMap<PackageKey, BTreeSet<String>>) -> Self {
        self.usage_paths = usage_paths;
        self
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    /// Project file name without extension, used as the label in reports
    pub fn project_name(&self) -> String {
        self.project_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.project_path.display().to_string())
    }

    pub fn packages(&self) -> &[PackageReference] {
        &self.packages
    }

    pub fn project_references(&self) -> &[PathBuf] {
        &self.project_references
    }

    /// Labels recorded for a package during enrichment; `None` for projects
    /// that were never enriched
    pub fn usage_paths(&self, key: &PackageKey) -> Option<&BTreeSet<String>> {
        self.usage_paths.get(key)
    }

    pub fn direct_packages(&self) -> impl Iterator<Item = &PackageReference> {
        self.packages.iter().filter(|p| !p.is_transitive())
    }

    pub fn transitive_packages(&self) -> impl Iterator<Item = &PackageReference> {
        self.packages.iter().filter(|p| p.is_transitive())
    }

    /// Packages de-duplicated by `(name, version)`, keeping the first entry.
    ///
    /// Direct references come first in the list, so a package that is both
    /// declared and pulled in transitively is reported as direct.
    pub fn distinct_packages(&self) -> Vec<&PackageReference> {
        let mut seen: HashSet<PackageKey> = HashSet::new();
        self.packages
            .iter()
            .filter(|p| seen.insert(p.key()))
            .collect()
    }

    /// Returns a copy of this project holding `packages` instead of its current list
    pub fn with_packages(&self, packages: Vec<PackageReference>) -> Self {
        Self {
            project_path: self.project_path.clone(),
            packages,
            project_references: self.project_references.clone(),
            usage_paths: self.usage_paths.clone(),
        }
    }
}

/// Transitive closure of one direct reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectPackageExpansion {
    pub name: String,
    pub version: String,
    pub transitive_packages: Vec<TransitivePackageInfo>,
}

impl DirectPackageExpansion {
    /// `"name version"` label identifying the direct package
    pub fn label(&self) -> String {
        PackageKey::new(self.name.clone(), self.version.clone()).token()
    }
}

/// Per-direct-reference expansion of one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectTransitiveInfo {
    pub project_path: PathBuf,
    pub direct_packages: Vec<DirectPackageExpansion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_project() -> ProjectPackageSet {
        ProjectPackageSet::new(
            PathBuf::from("/src/App/App.csproj"),
            vec![
                PackageReference::direct("Alpha", "1.0.0"),
                PackageReference::direct("Beta", "2.0.0"),
            ],
        )
    }

    #[test]
    fn test_project_name_is_file_stem() {
        assert_eq!(sample_project().project_name(), "App");
    }

    #[test]
    fn test_with_packages_keeps_project_identity() {
        let project = sample_project()
            .with_project_references(vec![PathBuf::from("/src/Lib/Lib.csproj")]);
        let mut packages = project.packages().to_vec();
        packages.push(PackageReference::transitive(
            "Gamma",
            "3.0.0",
            "Alpha 1.0.0 -> Gamma 3.0.0",
        ));
        let enriched = project.with_packages(packages);

        assert_eq!(project.packages().len(), 2);
        assert_eq!(enriched.packages().len(), 3);
        assert_eq!(enriched.direct_packages().count(), 2);
        assert_eq!(enriched.transitive_packages().count(), 1);
        assert_eq!(enriched.packages()[2].name(), "Gamma");
        assert_eq!(enriched.project_path(), project.project_path());
        assert_eq!(enriched.project_references().len(), 1);
    }

    #[test]
    fn test_distinct_packages_prefers_first_entry() {
        let mut packages = sample_project().packages().to_vec();
        packages.push(PackageReference::transitive(
            "Beta",
            "2.0.0",
            "Alpha 1.0.0 -> Beta 2.0.0",
        ));
        packages.push(PackageReference::transitive(
            "Beta",
            "2.1.0",
            "Alpha 1.0.0 -> Beta 2.1.0",
        ));
        let project = sample_project().with_packages(packages);

        let distinct = project.distinct_packages();
        assert_eq!(distinct.len(), 3);
        let beta_2_0 = distinct
            .iter()
            .find(|p| p.name() == "Beta" && p.version() == "2.0.0")
            .unwrap();
        assert!(!beta_2_0.is_transitive());
    }

    #[test]
    fn test_direct_package_expansion_label() {
        let expansion = DirectPackageExpansion {
            name: "Alpha".to_string(),
            version: "1.0.0".to_string(),
            transitive_packages: vec![],
        };
        assert_eq!(expansion.label(), "Alpha 1.0.0");
    }
}
