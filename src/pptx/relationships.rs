//! Slide relationship resolution.
//!
//! Each slide part may have a sibling `_rels/slideN.xml.rels` part mapping
//! the `r:embed` ids used in its markup to other parts of the package. Only
//! image relationships matter for reconstruction, so everything else is
//! dropped while parsing.

use crate::container::OoxmlContainer;
use crate::error::{Error, Result};
use crate::model::is_raster_path;
use log::{debug, warn};
use quick_xml::events::{BytesStart, Event};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What a relationship points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
    Image,
    Other,
}

/// Classify a relationship by its declared type URI and its target.
///
/// A relationship is an image when the type mentions "image" in any case, or
/// when the target carries a raster file extension.
pub fn classify(rel_type: &str, target: &str) -> RelationshipKind {
    if rel_type.to_ascii_lowercase().contains("image") || is_raster_path(target) {
        RelationshipKind::Image
    } else {
        RelationshipKind::Other
    }
}

/// A single entry of a relationships part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId2")
    pub id: String,
    /// Target as written in the part (e.g., "../media/image1.png")
    pub target: String,
    /// Target resolved against the owning part (e.g., "ppt/media/image1.png")
    pub resolved: String,
    pub kind: RelationshipKind,
}

/// Image relationships of one slide, keyed by relationship id.
pub type SlideRelationships = HashMap<String, Relationship>;

/// Parse a relationships part, keeping only internal image entries.
///
/// `owner` is the archive path of the part the relationships belong to and
/// is used to resolve relative targets.
pub fn parse_relationships(xml: &str, owner: &str) -> Result<SlideRelationships> {
    let mut rels = SlideRelationships::new();
    if xml.trim().is_empty() {
        return Ok(rels);
    }

    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.name().local_name().as_ref() == b"Relationship" =>
            {
                if let Some(rel) = read_relationship(e, owner)? {
                    rels.insert(rel.id.clone(), rel);
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

fn read_relationship(e: &BytesStart<'_>, owner: &str) -> Result<Option<Relationship>> {
    let mut id = String::new();
    let mut rel_type = String::new();
    let mut target = String::new();
    let mut external = false;

    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?;
        match attr.key.as_ref() {
            b"Id" => id = value.into_owned(),
            b"Type" => rel_type = value.into_owned(),
            b"Target" => target = value.into_owned(),
            b"TargetMode" => external = value.eq_ignore_ascii_case("external"),
            _ => {}
        }
    }

    if id.is_empty() || target.is_empty() || external {
        return Ok(None);
    }

    let kind = classify(&rel_type, &target);
    if kind != RelationshipKind::Image {
        return Ok(None);
    }

    Ok(Some(Relationship {
        resolved: OoxmlContainer::resolve_path(owner, &target),
        id,
        target,
        kind,
    }))
}

/// Image relationships of the part at `part_path`.
///
/// A missing relationships part means the slide references nothing. An
/// unreadable or malformed one is logged and treated the same way.
pub fn resolve_for_part(container: &OoxmlContainer, part_path: &str) -> SlideRelationships {
    let rels_path = OoxmlContainer::relationships_path(part_path);
    if !container.exists(&rels_path) {
        return SlideRelationships::new();
    }

    let parsed = container
        .read_xml(&rels_path)
        .and_then(|xml| parse_relationships(&xml, part_path))
        .map_err(|e| e.in_part(rels_path.as_str()));

    match parsed {
        Ok(rels) => rels,
        Err(e) => {
            warn!("ignoring relationships of {}: {}", part_path, e);
            SlideRelationships::new()
        }
    }
}

/// Resolve the relationships of every part in `part_paths` concurrently.
///
/// The result is keyed by part path; every requested path has an entry.
pub fn resolve_all(
    container: &OoxmlContainer,
    part_paths: &[String],
) -> HashMap<String, SlideRelationships> {
    let resolved: HashMap<String, SlideRelationships> = part_paths
        .par_iter()
        .map(|path| (path.clone(), resolve_for_part(container, path)))
        .collect();
    debug!(
        "resolved relationships for {} parts ({} image links)",
        resolved.len(),
        resolved.values().map(HashMap::len).sum::<usize>()
    );
    resolved
}
