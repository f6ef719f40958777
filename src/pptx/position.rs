//! Transform lookup and EMU to pixel conversion for shapes.
//!
//! A shape's transform (`a:xfrm` with `a:off` and `a:ext`) can sit at several
//! depths depending on the producing application. The places to look are an
//! ordered table of locator functions; the first that finds a transform wins.

use crate::model::{emu_to_px, Position};
use crate::xml::XmlNode;

/// Finds a transform element under a shape node.
pub type TransformLocator = for<'a> fn(&'a XmlNode) -> Option<&'a XmlNode>;

/// Transform locations, most specific first.
pub const TRANSFORM_LOCATORS: &[(&str, TransformLocator)] = &[
    ("shape properties", in_shape_properties),
    ("preset geometry", in_preset_geometry),
    ("anywhere", anywhere),
];

/// Width used when the transform extent converts to 0.
const DEFAULT_WIDTH: i64 = 200;

/// Height used when the transform extent converts to 0.
const DEFAULT_HEIGHT: i64 = 50;

fn shape_properties(node: &XmlNode) -> Option<&XmlNode> {
    node.first_descendant("p:spPr")
}

fn in_shape_properties(node: &XmlNode) -> Option<&XmlNode> {
    shape_properties(node)?.first_descendant("a:xfrm")
}

fn in_preset_geometry(node: &XmlNode) -> Option<&XmlNode> {
    shape_properties(node)?
        .first_descendant("a:prstGeom")?
        .first_descendant("a:xfrm")
}

fn anywhere(node: &XmlNode) -> Option<&XmlNode> {
    node.first_descendant("a:xfrm")
}

/// First transform found by [`TRANSFORM_LOCATORS`].
pub fn find_transform(node: &XmlNode) -> Option<&XmlNode> {
    TRANSFORM_LOCATORS
        .iter()
        .find_map(|(_, locate)| locate(node))
}

/// Convert a transform element to a pixel position.
///
/// Missing offset or extent attributes count as 0. A zero width or height
/// after conversion is replaced by 200 or 50.
pub fn position_from_transform(xfrm: &XmlNode) -> Position {
    let off = xfrm.first_descendant("a:off");
    let ext = xfrm.first_descendant("a:ext");
    let read = |node: Option<&XmlNode>, name: &str| {
        node.and_then(|n| n.attr_i64(name)).unwrap_or(0)
    };

    let width = emu_to_px(read(ext, "cx"));
    let height = emu_to_px(read(ext, "cy"));
    Position::new(
        emu_to_px(read(off, "x")),
        emu_to_px(read(off, "y")),
        if width == 0 { DEFAULT_WIDTH } else { width },
        if height == 0 { DEFAULT_HEIGHT } else { height },
    )
}

/// Position from the node's own transform, if it has one.
pub fn explicit_position(node: &XmlNode) -> Option<Position> {
    find_transform(node).map(position_from_transform)
}

/// Position of `node`, or [`Position::FALLBACK`] when it has no transform.
pub fn resolve_position(node: &XmlNode) -> Position {
    explicit_position(node).unwrap_or(Position::FALLBACK)
}
