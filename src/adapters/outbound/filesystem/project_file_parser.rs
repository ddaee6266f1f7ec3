//! `.csproj` parsing: direct package references and project references.

use crate::conflict_analysis::domain::PackageReference;
use crate::shared::Result;
use anyhow::Context;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// References declared by a single project file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFileContents {
    pub package_references: Vec<PackageReference>,
    /// `Include` values as written, relative to the project directory
    pub project_references: Vec<String>,
}

/// A `<PackageReference>` whose nested elements are still being read
struct OpenPackageReference {
    name: String,
    version: Option<String>,
    depth: usize,
}

/// Parse a project file.
///
/// Every `<PackageReference Include=".." />` is a direct reference. The
/// version comes from the `Version` attribute or a nested `<Version>`
/// element, and is empty when neither is present (central package
/// management). `<ProjectReference>` entries with an empty `Include` are
/// ignored.
pub fn parse_project_file(xml: &str) -> Result<ProjectFileContents> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut contents = ProjectFileContents::default();
    let mut path: Vec<String> = Vec::new();
    let mut open: Option<OpenPackageReference> = None;
    let mut saw_root = false;

    loop {
        let event = reader
            .read_event()
            .with_context(|| format!("invalid XML at position {}", reader.buffer_position()))?;

        match event {
            Event::Start(ref e) => {
                saw_root = true;
                let tag = local_name(e);
                match tag.as_str() {
                    "PackageReference" => {
                        let (name, version) = package_attributes(e)?;
                        open = Some(OpenPackageReference {
                            name,
                            version,
                            depth: path.len(),
                        });
                    }
                    "ProjectReference" => push_project_reference(e, &mut contents)?,
                    _ => {}
                }
                path.push(tag);
            }
            Event::Empty(ref e) => {
                saw_root = true;
                match local_name(e).as_str() {
                    "PackageReference" => {
                        let (name, version) = package_attributes(e)?;
                        push_package(&mut contents, name, version);
                    }
                    "ProjectReference" => push_project_reference(e, &mut contents)?,
                    _ => {}
                }
            }
            Event::Text(ref t) => {
                if let Some(pending) = open.as_mut() {
                    let in_version = path.len() == pending.depth + 2
                        && path.last().map(String::as_str) == Some("Version");
                    if in_version && pending.version.is_none() {
                        let text = t.unescape().context("invalid text content")?;
                        pending.version = Some(text.trim().to_string());
                    }
                }
            }
            Event::End(_) => {
                path.pop();
                if open.as_ref().is_some_and(|p| p.depth == path.len()) {
                    if let Some(done) = open.take() {
                        push_package(&mut contents, done.name, done.version);
                    }
                }
            }
            Event::Eof => {
                // quick-xml does not flag elements left open at end of input
                if let Some(open_tag) = path.last() {
                    anyhow::bail!("unexpected end of document inside <{}>", open_tag);
                }
                break;
            }
            _ => {}
        }
    }

    if !saw_root {
        anyhow::bail!("document has no root element");
    }

    Ok(contents)
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.context("invalid attribute")?;
        if attr.key.local_name().as_ref() == key {
            let value = attr
                .unescape_value()
                .context("invalid attribute value")?
                .trim()
                .to_string();
            return Ok(Some(value));
        }
    }
    Ok(None)
}

fn package_attributes(e: &BytesStart<'_>) -> Result<(String, Option<String>)> {
    let name = attribute(e, b"Include")?.unwrap_or_default();
    let version = attribute(e, b"Version")?;
    Ok((name, version))
}

fn push_package(contents: &mut ProjectFileContents, name: String, version: Option<String>) {
    if name.is_empty() {
        return;
    }
    contents
        .package_references
        .push(PackageReference::direct(name, version.unwrap_or_default()));
}

fn push_project_reference(e: &BytesStart<'_>, contents: &mut ProjectFileContents) -> Result<()> {
    if let Some(include) = attribute(e, b"Include")?.filter(|v| !v.is_empty()) {
        contents.project_references.push(include);
    }
    Ok(())
}
