//! `.sln` parsing: project entries of a Visual Studio solution.

use crate::shared::Result;
use anyhow::Context;
use regex::Regex;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

/// `Project("{type-guid}") = "Name", "relative\path", "{project-guid}"`
const PROJECT_LINE_PATTERN: &str =
    r#"Project\("\{[\w-]*\}"\)\s*=\s*"[^"]*",\s*"([^"]*)",\s*"\{[\w-]*\}""#;

static PROJECT_LINE: OnceLock<Regex> = OnceLock::new();

/// The compiled project-line pattern, built on first use
fn project_line() -> Result<&'static Regex> {
    if let Some(compiled) = PROJECT_LINE.get() {
        return Ok(compiled);
    }
    let compiled =
        Regex::new(PROJECT_LINE_PATTERN).context("invalid solution project pattern")?;
    Ok(PROJECT_LINE.get_or_init(|| compiled))
}

/// Extract the `.csproj` files listed by a solution.
///
/// Paths are resolved against `solution_dir`. Solution folders and other
/// project types are dropped, as are entries whose file does not exist.
/// File order is preserved.
pub fn parse_solution(content: &str, solution_dir: &Path) -> Result<Vec<PathBuf>> {
    let projects = project_line()?
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|relative| resolve_relative(solution_dir, relative.as_str()))
        .filter(|path| has_csproj_extension(path) && path.is_file())
        .collect();

    Ok(projects)
}

/// Join a Windows-style relative path onto `base` and collapse `.` / `..`
/// lexically, without touching the file system.
pub fn resolve_relative(base: &Path, relative: &str) -> PathBuf {
    let relative = relative.replace('\\', std::path::MAIN_SEPARATOR_STR);
    normalize(&base.join(relative))
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

fn has_csproj_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("csproj"))
        .unwrap_or(false)
}
