//! `.nuspec` parsing: package identity and declared dependencies.

use crate::conflict_analysis::domain::{DeclaredDependency, PackageMetadata};
use crate::shared::Result;
use anyhow::Context;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Parse a `.nuspec` XML document.
///
/// Dependencies are collected from `<dependencies>` directly and from every
/// `<group>` inside it (one group per target framework), in document order.
/// Declarations missing an `id` or a `version` are skipped.
pub fn parse_nuspec(xml: &str) -> Result<PackageMetadata> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut metadata = PackageMetadata::default();
    let mut path: Vec<String> = Vec::new();
    let mut saw_root = false;

    loop {
        let event = reader
            .read_event()
            .with_context(|| format!("invalid XML at position {}", reader.buffer_position()))?;

        match event {
            Event::Start(ref e) => {
                saw_root = true;
                let tag = local_name(e);
                if tag == "dependency" {
                    push_dependency(e, &path, &mut metadata)?;
                }
                path.push(tag);
            }
            Event::Empty(ref e) => {
                saw_root = true;
                if local_name(e) == "dependency" {
                    push_dependency(e, &path, &mut metadata)?;
                }
            }
            Event::Text(ref t) => {
                let text = t.unescape().context("invalid text content")?;
                match parent_chain(&path) {
                    (Some("metadata"), Some("id")) => metadata.id = Some(text.into_owned()),
                    (Some("metadata"), Some("version")) => {
                        metadata.version = Some(text.into_owned())
                    }
                    _ => {}
                }
            }
            Event::End(_) => {
                path.pop();
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

    Ok(metadata)
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

/// Last two elements of the open-element path as (parent, current)
fn parent_chain(path: &[String]) -> (Option<&str>, Option<&str>) {
    match path {
        [.., parent, current] => (Some(parent.as_str()), Some(current.as_str())),
        [current] => (None, Some(current.as_str())),
        [] => (None, None),
    }
}

fn push_dependency(e: &BytesStart<'_>, path: &[String], metadata: &mut PackageMetadata) -> Result<()> {
    let in_dependencies = match path {
        [.., last] if last == "dependencies" => true,
        [.., outer, last] if last == "group" && outer == "dependencies" => true,
        _ => false,
    };
    if !in_dependencies {
        return Ok(());
    }

    let mut id = None;
    let mut version = None;
    for attr in e.attributes() {
        let attr = attr.context("invalid dependency attribute")?;
        let value = attr
            .unescape_value()
            .context("invalid dependency attribute value")?
            .into_owned();
        match attr.key.local_name().as_ref() {
            b"id" => id = Some(value),
            b"version" => version = Some(value),
            _ => {}
        }
    }

    if let (Some(id), Some(version)) = (id, version) {
        if !id.is_empty() && !version.is_empty() {
            metadata.dependencies.push(DeclaredDependency::new(id, version));
        }
    }
    Ok(())
}
