use crate::conflict_analysis::domain::{ConflictRecord, ProjectPackageSet};
use crate::shared::error::AnalyzerError;
use crate::shared::Result;
use std::cell::Cell;

/// Maximum number of exclude patterns accepted on one run
const MAX_EXCLUDE_PATTERNS: usize = 64;

/// Maximum length of a single exclude pattern
const MAX_PATTERN_LENGTH: usize = 255;

/// PackageFilter - Hides packages from the report based on exclusion patterns
///
/// Supports wildcard patterns using '*' to match zero or more characters.
/// NuGet package ids are case-insensitive, so matching is too.
#[derive(Debug)]
pub struct PackageFilter {
    patterns: Vec<ExcludePattern>,
}

impl PackageFilter {
    /// Creates a new PackageFilter from raw pattern strings
    ///
    /// # Arguments
    /// * `patterns` - Pattern strings (e.g., "Microsoft.*", "*.Analyzers")
    ///
    /// # Errors
    /// - Too many patterns (> MAX_EXCLUDE_PATTERNS)
    /// - Invalid pattern format (length, characters, wildcard only)
    pub fn new(patterns: Vec<String>) -> Result<Self> {
        if patterns.len() > MAX_EXCLUDE_PATTERNS {
            return Err(AnalyzerError::Validation {
                message: format!(
                    "Too many exclusion patterns: {} (maximum: {})",
                    patterns.len(),
                    MAX_EXCLUDE_PATTERNS
                ),
            }
            .into());
        }

        let patterns = patterns
            .into_iter()
            .map(ExcludePattern::new)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Checks if a package name matches any exclusion pattern
    pub fn matches(&self, package_name: &str) -> bool {
        let lowered = package_name.to_lowercase();
        // Evaluate every pattern so each one records whether it matched
        self.patterns
            .iter()
            .fold(false, |any, p| p.matches(&lowered) || any)
    }

    /// Drops conflict records for excluded packages
    pub fn filter_conflicts(&self, conflicts: Vec<ConflictRecord>) -> Vec<ConflictRecord> {
        conflicts
            .into_iter()
            .filter(|c| !self.matches(c.package_name()))
            .collect()
    }

    /// Returns a copy of the project without excluded packages
    pub fn filter_project(&self, project: &ProjectPackageSet) -> ProjectPackageSet {
        let kept = project
            .packages()
            .iter()
            .filter(|p| !self.matches(p.name()))
            .cloned()
            .collect();
        project.with_packages(kept)
    }

    /// Patterns that have not matched any package name so far
    pub fn unmatched_patterns(&self) -> Vec<String> {
        self.patterns
            .iter()
            .filter(|p| !p.matched.get())
            .map(|p| p.original.clone())
            .collect()
    }
}

/// Represents a single exclusion pattern with its compiled matcher
#[derive(Debug)]
struct ExcludePattern {
    original: String,
    matcher: PatternMatcher,
    matched: Cell<bool>,
}

impl ExcludePattern {
    fn new(pattern: String) -> Result<Self> {
        validate_pattern(&pattern)?;
        let matcher = PatternMatcher::compile(&pattern.to_lowercase());

        Ok(Self {
            original: pattern,
            matcher,
            matched: Cell::new(false),
        })
    }

    /// `package_name` must already be lowercase
    fn matches(&self, package_name: &str) -> bool {
        let is_match = self.matcher.matches(package_name);
        if is_match {
            self.matched.set(true);
        }
        is_match
    }
}

/// Pattern matcher types for efficient matching
#[derive(Debug)]
enum PatternMatcher {
    /// Exact match: "newtonsoft.json"
    Exact(String),
    /// "microsoft.*"
    Prefix(String),
    /// "*.analyzers"
    Suffix(String),
    /// "*test*"
    Contains(String),
    /// General case: "microsoft.*.abstractions", anchored at both ends
    Segments {
        parts: Vec<String>,
        anchored_start: bool,
        anchored_end: bool,
    },
}

impl PatternMatcher {
    fn compile(pattern: &str) -> Self {
        let starts = pattern.starts_with('*');
        let ends = pattern.ends_with('*');
        let parts: Vec<String> = pattern
            .split('*')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        match (pattern.matches('*').count(), starts, ends) {
            (0, _, _) => PatternMatcher::Exact(pattern.to_string()),
            (1, false, true) => PatternMatcher::Prefix(parts[0].clone()),
            (1, true, false) => PatternMatcher::Suffix(parts[0].clone()),
            (2, true, true) if parts.len() == 1 => PatternMatcher::Contains(parts[0].clone()),
            _ => PatternMatcher::Segments {
                parts,
                anchored_start: !starts,
                anchored_end: !ends,
            },
        }
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            PatternMatcher::Exact(s) => name == s,
            PatternMatcher::Prefix(prefix) => name.starts_with(prefix),
            PatternMatcher::Suffix(suffix) => name.ends_with(suffix),
            PatternMatcher::Contains(middle) => name.contains(middle),
            PatternMatcher::Segments {
                parts,
                anchored_start,
                anchored_end,
            } => {
                let mut rest = name;
                for (i, part) in parts.iter().enumerate() {
                    let is_first = i == 0;
                    let is_last = i == parts.len() - 1;
                    if is_first && *anchored_start {
                        match rest.strip_prefix(part.as_str()) {
                            Some(r) => rest = r,
                            None => return false,
                        }
                    } else if is_last && *anchored_end {
                        return rest.ends_with(part.as_str());
                    } else {
                        match rest.find(part.as_str()) {
                            Some(pos) => rest = &rest[pos + part.len()..],
                            None => return false,
                        }
                    }
                }
                !*anchored_end || rest.is_empty()
            }
        }
    }
}

fn validate_pattern(pattern: &str) -> Result<()> {
    let invalid = |message: String| -> anyhow::Error {
        AnalyzerError::Validation { message }.into()
    };

    if pattern.is_empty() {
        return Err(invalid("Exclusion pattern cannot be empty".to_string()));
    }

    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(invalid(format!(
            "Exclusion pattern is too long: '{}' ({} chars). Maximum: {} chars",
            pattern,
            pattern.len(),
            MAX_PATTERN_LENGTH
        )));
    }

    if let Some(ch) = pattern.chars().find(|c| !is_valid_pattern_char(*c)) {
        return Err(invalid(format!(
            "Exclusion pattern contains invalid character '{}' in pattern '{}'. \
             Only alphanumeric, hyphens, underscores, dots, and asterisks (*) are allowed.",
            ch, pattern
        )));
    }

    if pattern.chars().all(|c| c == '*') {
        return Err(invalid(format!(
            "Exclusion pattern cannot contain only wildcards: '{}'",
            pattern
        )));
    }

    Ok(())
}

fn is_valid_pattern_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || c == '.' || c == '*'
}
