/// A dependency declared in a package's own metadata.
///
/// `version_expression` is kept exactly as written (it may be a range such
/// as `[2.0.0, 3.0.0)`); normalization happens during expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredDependency {
    pub name: String,
    pub version_expression: String,
}

impl DeclaredDependency {
    pub fn new(name: impl Into<String>, version_expression: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version_expression: version_expression.into(),
        }
    }
}

/// Dependency declarations of one package version, flattened across all
/// dependency groups in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackageMetadata {
    pub id: Option<String>,
    pub version: Option<String>,
    pub dependencies: Vec<DeclaredDependency>,
}

impl PackageMetadata {
    pub fn with_dependencies(dependencies: Vec<DeclaredDependency>) -> Self {
        Self {
            id: None,
            version: None,
            dependencies,
        }
    }

    pub fn dependencies(&self) -> &[DeclaredDependency] {
        &self.dependencies
    }
}
