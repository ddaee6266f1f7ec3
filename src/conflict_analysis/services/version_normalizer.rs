/// Characters that make up NuGet range syntax: `[1.0, 2.0)`, `>=1.0`, ...
const RANGE_SPECIFIER_CHARS: [char; 7] = ['[', ']', '(', ')', '>', '<', '='];

/// VersionRangeNormalizer reduces a declared version expression to a
/// single version label.
///
/// This is deliberately lossy: a real range such as `[1.0.0, 2.0.0)` keeps
/// both bounds (`"1.0.0, 2.0.0"`) rather than picking one. The result is a
/// label for grouping, not a validated semantic version.
pub struct VersionRangeNormalizer;

impl VersionRangeNormalizer {
    /// Strips every range specifier character and trims surrounding whitespace
    pub fn normalize(raw_version: &str) -> String {
        raw_version
            .chars()
            .filter(|c| !RANGE_SPECIFIER_CHARS.contains(c))
            .collect::<String>()
            .trim()
            .to_string()
    }
}
