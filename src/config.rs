//! Configuration file support for nuget-conflicts.
//!
//! Provides YAML-based configuration through `nuget-conflicts.config.yml`
//! files, and the merge of CLI flags, config values and defaults.

use anyhow::{bail, Context};
use nuget_conflicts::application::dto::OutputFormat;
use nuget_conflicts::shared::error::AnalyzerError;
use nuget_conflicts::shared::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::cli::Args;

pub const CONFIG_FILENAME: &str = "nuget-conflicts.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub package_cache: Option<PathBuf>,
    pub include_transitive: Option<bool>,
    pub exclude_packages: Option<Vec<String>>,
    pub fail_on_conflict: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Effective options for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub format: OutputFormat,
    pub package_cache: Option<PathBuf>,
    pub include_transitive: bool,
    pub exclude_patterns: Vec<String>,
    pub fail_on_conflict: bool,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Merge CLI flags over config values over defaults.
///
/// Exclusion patterns given on the command line replace the configured list.
pub fn resolve_settings(args: &Args, config: Option<&ConfigFile>) -> Result<Settings> {
    let config_format = match config.and_then(|c| c.format.as_deref()) {
        Some(raw) => Some(
            raw.parse::<OutputFormat>()
                .map_err(|message| AnalyzerError::Validation { message })?,
        ),
        None => None,
    };

    let exclude_patterns = if args.exclude.is_empty() {
        config
            .and_then(|c| c.exclude_packages.clone())
            .unwrap_or_default()
    } else {
        args.exclude.clone()
    };

    Ok(Settings {
        format: args.format.or(config_format).unwrap_or_default(),
        package_cache: args
            .package_cache
            .clone()
            .or_else(|| config.and_then(|c| c.package_cache.clone())),
        include_transitive: !args.no_transitive
            && config.and_then(|c| c.include_transitive).unwrap_or(true),
        exclude_patterns,
        fail_on_conflict: args.fail_on_conflict
            || config.and_then(|c| c.fail_on_conflict).unwrap_or(false),
    })
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref patterns) = config.exclude_packages {
        for (i, pattern) in patterns.iter().enumerate() {
            if pattern.trim().is_empty() {
                bail!(
                    "Invalid config: exclude_packages[{}] must not be empty.\n\n\
                     💡 Hint: Each entry must be a package id or a wildcard pattern (e.g., \"Microsoft.*\").",
                    i
                );
            }
        }
    }
    if let Some(ref cache) = config.package_cache {
        if cache.as_os_str().is_empty() {
            bail!(
                "Invalid config: package_cache must not be empty.\n\n\
                 💡 Hint: Remove the field to use $NUGET_PACKAGES or ~/.nuget/packages."
            );
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["nuget-conflicts", "App.sln"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
format: table
package_cache: /opt/nuget/packages
include_transitive: false
exclude_packages:
  - Microsoft.*
  - StyleCop.Analyzers
fail_on_conflict: true
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.format.as_deref(), Some("table"));
        assert_eq!(
            config.package_cache,
            Some(PathBuf::from("/opt/nuget/packages"))
        );
        assert_eq!(config.include_transitive, Some(false));
        assert_eq!(
            config.exclude_packages.as_deref(),
            Some(&["Microsoft.*".to_string(), "StyleCop.Analyzers".to_string()][..])
        );
        assert_eq!(config.fail_on_conflict, Some(true));
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "format: json\n").unwrap();

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.format.as_deref(), Some("json"));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        let config = discover_config(dir.path()).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path(Path::new("/nonexistent/config.yml"));
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("bad.yml");
        fs::write(&config_path, "invalid: yaml: [[[broken").unwrap();

        let result = load_config_from_path(&config_path);
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_empty_exclude_pattern_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "exclude_packages:\n  - \"  \"\n").unwrap();

        let result = load_config_from_path(&config_path);
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("must not be empty"));
    }

    #[test]
    fn test_unknown_fields_warning() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
format: json
license_policy: strict
another_unknown: value
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.unknown_fields.len(), 2);
        assert!(config.unknown_fields.contains_key("license_policy"));
        assert!(config.unknown_fields.contains_key("another_unknown"));
    }

    #[test]
    fn test_defaults_without_config() {
        let settings = resolve_settings(&args(&[]), None).unwrap();

        assert_eq!(
            settings,
            Settings {
                format: OutputFormat::Text,
                package_cache: None,
                include_transitive: true,
                exclude_patterns: Vec::new(),
                fail_on_conflict: false,
            }
        );
    }

    #[test]
    fn test_config_values_fill_in_missing_flags() {
        let config = ConfigFile {
            format: Some("csv".to_string()),
            package_cache: Some(PathBuf::from("/cache")),
            include_transitive: Some(false),
            exclude_packages: Some(vec!["Microsoft.*".to_string()]),
            fail_on_conflict: Some(true),
            ..ConfigFile::default()
        };

        let settings = resolve_settings(&args(&[]), Some(&config)).unwrap();

        assert_eq!(settings.format, OutputFormat::Csv);
        assert_eq!(settings.package_cache, Some(PathBuf::from("/cache")));
        assert!(!settings.include_transitive);
        assert_eq!(settings.exclude_patterns, vec!["Microsoft.*"]);
        assert!(settings.fail_on_conflict);
    }

    #[test]
    fn test_cli_flags_win_over_config() {
        let config = ConfigFile {
            format: Some("csv".to_string()),
            package_cache: Some(PathBuf::from("/cache")),
            exclude_packages: Some(vec!["Microsoft.*".to_string()]),
            ..ConfigFile::default()
        };

        let settings = resolve_settings(
            &args(&["-f", "json", "--package-cache", "/other", "-e", "Serilog*", "--no-transitive"]),
            Some(&config),
        )
        .unwrap();

        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.package_cache, Some(PathBuf::from("/other")));
        assert_eq!(settings.exclude_patterns, vec!["Serilog*"]);
        assert!(!settings.include_transitive);
    }

    #[test]
    fn test_invalid_config_format() {
        let config = ConfigFile {
            format: Some("markdown".to_string()),
            ..ConfigFile::default()
        };

        let err = resolve_settings(&args(&[]), Some(&config)).unwrap_err();
        assert!(err.to_string().contains("Invalid format: markdown"));
    }
}
