use super::PackageKey;
use serde::Serialize;
use std::fmt;

const PATH_SEPARATOR: &str = " -> ";

/// Root-to-leaf chain of `"name version"` tokens describing how a package
/// was reached.
///
/// Paths are immutable values: extending a path produces a new one, so
/// every branch of a traversal owns its own snapshot. A path never holds
/// the same token twice; the expander refuses to extend a path with a
/// token it already contains.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DependencyPath(Vec<String>);

impl DependencyPath {
    /// Path consisting of a single seed package
    pub fn root(name: &str, version: &str) -> Self {
        Self(vec![PackageKey::new(name, version).token()])
    }

    /// Builds a path from already rendered tokens
    pub fn from_tokens<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self(tokens.into_iter().map(Into::into).collect())
    }

    /// Returns a new path with `"name version"` appended
    pub fn extended(&self, name: &str, version: &str) -> Self {
        let mut tokens = self.0.clone();
        tokens.push(PackageKey::new(name, version).token());
        Self(tokens)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|t| t == token)
    }

    /// Whether `token` occurs anywhere except the final position
    pub fn contains_before_last(&self, token: &str) -> bool {
        match self.0.split_last() {
            Some((_, ancestors)) => ancestors.iter().any(|t| t == token),
            None => false,
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Human readable form, e.g. `"Alpha 1.0 -> Beta 2.0"`
    pub fn render(&self) -> String {
        self.0.join(PATH_SEPARATOR)
    }
}

impl fmt::Display for DependencyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// One package discovered during expansion, with the path that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitivePackageInfo {
    pub name: String,
    pub version: String,
    pub dependency_path: DependencyPath,
}

impl TransitivePackageInfo {
    pub fn new(name: String, version: String, dependency_path: DependencyPath) -> Self {
        Self {
            name,
            version,
            dependency_path,
        }
    }

    pub fn key(&self) -> PackageKey {
        PackageKey::new(self.name.clone(), self.version.clone())
    }
}
