use crate::conflict_analysis::domain::{
    ConflictRecord, ConflictVersion, ProjectPackageSet, ProjectTransitiveInfo,
};
use std::collections::{BTreeMap, BTreeSet};

/// package name -> version -> labels of whoever uses that version
#[derive(Debug, Default)]
struct VersionUsageIndex {
    packages: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
}

impl VersionUsageIndex {
    fn record(&mut self, name: &str, version: &str, label: String) {
        self.packages
            .entry(name.to_string())
            .or_default()
            .entry(version.to_string())
            .or_default()
            .insert(label);
    }

    fn into_conflicts(self) -> Vec<ConflictRecord> {
        self.packages
            .into_iter()
            .filter(|(_, versions)| versions.len() > 1)
            .map(|(name, versions)| {
                let versions = versions
                    .into_iter()
                    .map(|(version, sources)| ConflictVersion::new(version, sources))
                    .collect();
                ConflictRecord::new(name, versions)
            })
            .collect()
    }
}

/// ConflictAggregator groups package usage by name and version and reports
/// every package seen at more than one version.
///
/// This is a pure transformation; records come out sorted by package name
/// and each record's versions by version string.
pub struct ConflictAggregator;

impl ConflictAggregator {
    /// Finds version conflicts across whole projects
    ///
    /// Each project's packages are de-duplicated by `(name, version)` first.
    /// A direct use is labelled with the project name, a transitive use with
    /// `"project (via origin path)"`.
    pub fn aggregate_conflicts(projects: &[ProjectPackageSet]) -> Vec<ConflictRecord> {
        let mut index = VersionUsageIndex::default();

        for project in projects {
            let project_name = project.project_name();
            for package in project.distinct_packages() {
                let label = match package.origin_path() {
                    Some(origin) if package.is_transitive() => {
                        format!("{} (via {})", project_name, origin)
                    }
                    _ => project_name.clone(),
                };
                index.record(package.name(), package.version(), label);
            }
        }

        index.into_conflicts()
    }

    /// Finds version conflicts among transitive packages only
    ///
    /// Each transitive use is labelled with the `"name version"` of the
    /// direct package that pulled it in.
    pub fn aggregate_transitive_conflicts(projects: &[ProjectTransitiveInfo]) -> Vec<ConflictRecord> {
        let mut index = VersionUsageIndex::default();

        for project in projects {
            for direct in &project.direct_packages {
                let label = direct.label();
                for transitive in &direct.transitive_packages {
                    index.record(&transitive.name, &transitive.version, label.clone());
                }
            }
        }

        index.into_conflicts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict_analysis::domain::{
        DependencyPath, DirectPackageExpansion, PackageReference, TransitivePackageInfo,
    };
    use std::path::PathBuf;

    fn project(name: &str, packages: Vec<PackageReference>) -> ProjectPackageSet {
        ProjectPackageSet::new(PathBuf::from(format!("/src/{0}/{0}.csproj", name)), packages)
    }

    #[test]
    fn test_single_version_is_not_a_conflict() {
        let projects = vec![
            project("App", vec![PackageReference::direct("Serilog", "3.1.1")]),
            project("Lib", vec![PackageReference::direct("Serilog", "3.1.1")]),
        ];

        assert!(ConflictAggregator::aggregate_conflicts(&projects).is_empty());
    }

    #[test]
    fn test_two_versions_produce_one_record() {
        let projects = vec![
            project("App", vec![PackageReference::direct("Serilog", "3.1.1")]),
            project("Lib", vec![PackageReference::direct("Serilog", "2.12.0")]),
            project("Tests", vec![PackageReference::direct("Serilog", "3.1.1")]),
        ];

        let conflicts = ConflictAggregator::aggregate_conflicts(&projects);

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].package_name(), "Serilog");
        assert_eq!(conflicts[0].version_strings(), vec!["2.12.0", "3.1.1"]);
        let sources = conflicts[0].sources_for("3.1.1").unwrap();
        assert_eq!(
            sources.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["App", "Tests"]
        );
    }

    #[test]
    fn test_transitive_use_is_labelled_with_origin() {
        let projects = vec![
            project(
                "X",
                vec![
                    PackageReference::direct("Alpha", "1.0"),
                    PackageReference::transitive("Beta", "2.0.0,3.0.0", "Alpha 1.0 -> Beta 2.0.0,3.0.0"),
                ],
            ),
            project("Y", vec![PackageReference::direct("Beta", "2.5.0")]),
        ];

        let conflicts = ConflictAggregator::aggregate_conflicts(&projects);

        assert_eq!(conflicts.len(), 1);
        let beta = &conflicts[0];
        assert_eq!(beta.version_strings(), vec!["2.0.0,3.0.0", "2.5.0"]);
        assert!(beta
            .sources_for("2.0.0,3.0.0")
            .unwrap()
            .contains("X (via Alpha 1.0 -> Beta 2.0.0,3.0.0)"));
        assert!(beta.sources_for("2.5.0").unwrap().contains("Y"));
    }

    #[test]
    fn test_duplicate_entries_within_project_collapse() {
        let projects = vec![project(
            "App",
            vec![
                PackageReference::direct("Beta", "1.0"),
                PackageReference::transitive("Beta", "1.0", "Alpha 1 -> Beta 1.0"),
                PackageReference::direct("Beta", "2.0"),
            ],
        )];

        let conflicts = ConflictAggregator::aggregate_conflicts(&projects);

        assert_eq!(conflicts.len(), 1);
        let sources = conflicts[0].sources_for("1.0").unwrap();
        assert_eq!(sources.len(), 1);
        assert!(sources.contains("App"));
    }

    #[test]
    fn test_every_observed_version_is_listed_once() {
        let projects = vec![
            project("A", vec![PackageReference::direct("Pkg", "1.0")]),
            project("B", vec![PackageReference::direct("Pkg", "2.0")]),
            project("C", vec![PackageReference::direct("Pkg", "3.0")]),
            project("D", vec![PackageReference::direct("Pkg", "2.0")]),
            project("E", vec![PackageReference::direct("Other", "1.0")]),
        ];

        let conflicts = ConflictAggregator::aggregate_conflicts(&projects);

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].version_strings(), vec!["1.0", "2.0", "3.0"]);
    }

    #[test]
    fn test_records_are_sorted_by_package_name() {
        let projects = vec![
            project(
                "A",
                vec![
                    PackageReference::direct("Zeta", "1"),
                    PackageReference::direct("Alpha", "1"),
                ],
            ),
            project(
                "B",
                vec![
                    PackageReference::direct("Zeta", "2"),
                    PackageReference::direct("Alpha", "2"),
                ],
            ),
        ];

        let conflicts = ConflictAggregator::aggregate_conflicts(&projects);
        let names: Vec<&str> = conflicts.iter().map(|c| c.package_name()).collect();

        assert_eq!(names, vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn test_no_projects_yields_no_conflicts() {
        assert!(ConflictAggregator::aggregate_conflicts(&[]).is_empty());
        assert!(ConflictAggregator::aggregate_transitive_conflicts(&[]).is_empty());
    }

    fn transitive(name: &str, version: &str, path: &[&str]) -> TransitivePackageInfo {
        TransitivePackageInfo::new(
            name.to_string(),
            version.to_string(),
            DependencyPath::from_tokens(path.iter().copied()),
        )
    }

    #[test]
    fn test_transitive_conflicts_labelled_by_direct_package() {
        let projects = vec![ProjectTransitiveInfo {
            project_path: PathBuf::from("/src/App/App.csproj"),
            direct_packages: vec![
                DirectPackageExpansion {
                    name: "Alpha".to_string(),
                    version: "1.0".to_string(),
                    transitive_packages: vec![transitive("Gamma", "1.0", &["Alpha 1.0", "Gamma 1.0"])],
                },
                DirectPackageExpansion {
                    name: "Beta".to_string(),
                    version: "2.0".to_string(),
                    transitive_packages: vec![
                        transitive("Gamma", "2.0", &["Beta 2.0", "Gamma 2.0"]),
                        transitive("Delta", "1.0", &["Beta 2.0", "Delta 1.0"]),
                    ],
                },
            ],
        }];

        let conflicts = ConflictAggregator::aggregate_transitive_conflicts(&projects);

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].package_name(), "Gamma");
        assert!(conflicts[0].sources_for("1.0").unwrap().contains("Alpha 1.0"));
        assert!(conflicts[0].sources_for("2.0").unwrap().contains("Beta 2.0"));
    }

    #[test]
    fn test_transitive_conflicts_ignore_direct_versions() {
        // Direct references themselves are not part of the transitive-only scope
        let projects = vec![ProjectTransitiveInfo {
            project_path: PathBuf::from("/src/App/App.csproj"),
            direct_packages: vec![
                DirectPackageExpansion {
                    name: "Gamma".to_string(),
                    version: "2.0".to_string(),
                    transitive_packages: vec![],
                },
                DirectPackageExpansion {
                    name: "Alpha".to_string(),
                    version: "1.0".to_string(),
                    transitive_packages: vec![transitive("Gamma", "1.0", &["Alpha 1.0", "Gamma 1.0"])],
                },
            ],
        }];

        assert!(ConflictAggregator::aggregate_transitive_conflicts(&projects).is_empty());
    }
}
