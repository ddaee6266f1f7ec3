use serde::Serialize;
use std::fmt;

/// Identity of a package usage: `(name, version)`.
///
/// Ordering is by name, then version string, which is what every
/// report uses for stable output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PackageKey {
    pub name: String,
    pub version: String,
}

impl PackageKey {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// The `"name version"` token used in dependency paths and labels
    pub fn token(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}

impl fmt::Display for PackageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

/// A package used by a project, either declared directly or pulled in
/// through another package.
///
/// `origin_path` is only present for transitive references and holds the
/// rendered dependency path (`"A 1.0 -> B 2.0"`) that introduced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageReference {
    name: String,
    version: String,
    is_transitive: bool,
    origin_path: Option<String>,
}

impl PackageReference {
    /// Creates a reference declared directly in a project file
    pub fn direct(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            is_transitive: false,
            origin_path: None,
        }
    }

    /// Creates a reference discovered through the package cache
    pub fn transitive(
        name: impl Into<String>,
        version: impl Into<String>,
        origin_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            is_transitive: true,
            origin_path: Some(origin_path.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn is_transitive(&self) -> bool {
        self.is_transitive
    }

    pub fn origin_path(&self) -> Option<&str> {
        self.origin_path.as_deref()
    }

    pub fn key(&self) -> PackageKey {
        PackageKey::new(self.name.clone(), self.version.clone())
    }
}
