use super::nuspec_parser::parse_nuspec;
use crate::adapters::outbound::filesystem::safe_read_file;
use crate::conflict_analysis::domain::PackageMetadata;
use crate::ports::outbound::PackageMetadataSource;
use crate::shared::error::AnalyzerError;
use crate::shared::Result;
use directories::BaseDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that relocates the global packages folder
const NUGET_PACKAGES_ENV: &str = "NUGET_PACKAGES";

/// NuGetCacheMetadataSource adapter reading `.nuspec` files from the
/// global packages folder (`~/.nuget/packages` by default).
///
/// Layout: `<root>/<id lowercase>/<version lowercase>/<id>.nuspec`.
/// Absence of a package or version directory is reported as `Ok(None)`.
pub struct NuGetCacheMetadataSource {
    root: PathBuf,
}

impl NuGetCacheMetadataSource {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Default cache root: `$NUGET_PACKAGES`, then `<home>/.nuget/packages`
    pub fn default_root() -> Option<PathBuf> {
        if let Some(custom) = std::env::var_os(NUGET_PACKAGES_ENV).filter(|v| !v.is_empty()) {
            return Some(PathBuf::from(custom));
        }
        BaseDirs::new().map(|dirs| dirs.home_dir().join(".nuget").join("packages"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn root_exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Finds the `.nuspec` file of a package version, if it is cached
    fn find_nuspec(&self, name: &str, version: &str) -> Result<Option<PathBuf>> {
        if !is_safe_segment(name) || !is_safe_segment(version) {
            return Ok(None);
        }

        let package_dir = self
            .root
            .join(name.to_lowercase())
            .join(version.to_lowercase());
        if !package_dir.is_dir() {
            return Ok(None);
        }

        let entries = fs::read_dir(&package_dir).map_err(|e| AnalyzerError::FileReadError {
            path: package_dir.clone(),
            details: e.to_string(),
        })?;
        let mut nuspecs: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension()
                    .map(|ext| ext.eq_ignore_ascii_case("nuspec"))
                    .unwrap_or(false)
            })
            .collect();
        nuspecs.sort();

        if let Some(first) = nuspecs.into_iter().next() {
            return Ok(Some(first));
        }

        let named = package_dir.join(format!("{}.nuspec", name));
        Ok(named.is_file().then_some(named))
    }
}

impl PackageMetadataSource for NuGetCacheMetadataSource {
    fn lookup(&self, name: &str, version: &str) -> Result<Option<PackageMetadata>> {
        let Some(nuspec_path) = self.find_nuspec(name, version)? else {
            return Ok(None);
        };

        let content = safe_read_file(&nuspec_path, ".nuspec")?;
        let metadata = parse_nuspec(&content).map_err(|e| AnalyzerError::MetadataParseError {
            path: nuspec_path.clone(),
            details: format!("{:#}", e),
        })?;

        Ok(Some(metadata))
    }
}

/// Names and versions become path segments; refuse anything that could
/// escape the cache root.
fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\'])
        && !segment.contains("..")
}
