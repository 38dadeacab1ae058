//! Relationship parts (`*.rels`).

use super::xml::{attr, local_name};
use crate::error::{Error, Result};
use crate::model::Relationship;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Relationship type of the main document part.
const OFFICE_DOCUMENT_REL: &str = "/officeDocument";

/// Finds the main document part named by the package relationships.
pub(crate) fn main_document_path(package_rels: &str) -> Result<Option<String>> {
    let rels = parse_relationships(package_rels, "")?;
    Ok(rels
        .into_iter()
        .find(|r| !r.external && r.rel_type.ends_with(OFFICE_DOCUMENT_REL))
        .map(|r| r.target))
}

/// Returns the relationship part that belongs to `part`.
///
/// `word/document.xml` maps to `word/_rels/document.xml.rels`.
pub(crate) fn rels_path_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, name)) => format!("{}/_rels/{}.rels", dir, name),
        None => format!("_rels/{}.rels", part),
    }
}

/// Returns the directory of a package part, without trailing slash.
pub(crate) fn part_dir(part: &str) -> &str {
    part.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// Parses a relationship part.
///
/// Internal targets are resolved against `base_dir` into package paths.
/// Blobs are not loaded here.
pub(crate) fn parse_relationships(xml: &str, base_dir: &str) -> Result<Vec<Relationship>> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut rels = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if local_name(&e) == "Relationship" {
                    let (Some(id), Some(target)) = (attr(&e, "Id"), attr(&e, "Target")) else {
                        tracing::debug!("Relationship without Id or Target skipped");
                        buf.clear();
                        continue;
                    };
                    let rel_type = attr(&e, "Type").unwrap_or_default();
                    let external = attr(&e, "TargetMode")
                        .is_some_and(|mode| mode.eq_ignore_ascii_case("External"));

                    let target = if external {
                        target
                    } else {
                        resolve_target(base_dir, &target)
                    };

                    rels.push(Relationship {
                        id,
                        rel_type,
                        target,
                        external,
                        data: None,
                    });
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

/// Resolves a relationship target against the source part's directory.
///
/// A leading `/` means the package root. `.` and `..` segments are folded.
pub(crate) fn resolve_target(base_dir: &str, target: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    let (start, rest) = match target.strip_prefix('/') {
        Some(absolute) => ("", absolute),
        None => (base_dir, target),
    };

    for segment in start.split('/').chain(rest.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    segments.join("/")
}
