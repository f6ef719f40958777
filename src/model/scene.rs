//! Two-pass composited scene of a slide.
//!
//! Pictures are painted first on layer 1 and text second on layer 10, each
//! pass keeping element order. A picture therefore never covers text even
//! when it comes later in the document.

use super::geometry::Bounds;
use super::slide::{Element, Slide};
use serde::Serialize;

/// Stacking level of pictures.
pub const IMAGE_Z_INDEX: u32 = 1;

/// Stacking level of text.
pub const TEXT_Z_INDEX: u32 = 10;

/// One element placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneLayer<'a> {
    /// Canvas-relative left edge
    pub left: i64,
    /// Canvas-relative top edge
    pub top: i64,
    pub width: i64,
    pub height: i64,
    pub z_index: u32,
    pub element: &'a Element,
}

/// Paint-ordered view of a slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideScene<'a> {
    pub canvas: Bounds,
    pub layers: Vec<SceneLayer<'a>>,
}

impl<'a> SlideScene<'a> {
    /// Compose the scene for `slide`.
    pub fn compose(slide: &'a Slide) -> Self {
        let canvas = slide.bounds;
        let layer = |element: &'a Element, z_index: u32| {
            let pos = element.position();
            let (left, top) = canvas.relative(pos);
            SceneLayer {
                left,
                top,
                width: pos.width,
                height: pos.height,
                z_index,
                element,
            }
        };

        let images = slide
            .elements
            .iter()
            .filter(|e| e.is_image())
            .map(|e| layer(e, IMAGE_Z_INDEX));
        let texts = slide
            .elements
            .iter()
            .filter(|e| !e.is_image())
            .map(|e| layer(e, TEXT_Z_INDEX));

        Self {
            canvas,
            layers: images.chain(texts).collect(),
        }
    }
}
