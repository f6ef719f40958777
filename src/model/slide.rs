//! Slides and the elements placed on them.

use super::geometry::{Bounds, Position};
use super::media::MediaAsset;
use super::style::TextSegment;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Positioned text block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    /// Plain text of the block
    pub content: String,

    /// Styled pieces of `content`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<TextSegment>,

    pub position: Position,

    /// Document order; fractional for blocks split out of one shape
    pub order: f64,

    #[serde(default)]
    pub is_title: bool,
}

/// Positioned picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    pub asset: Arc<MediaAsset>,
    pub alt: String,
    pub position: Position,
    pub order: f64,
}

/// Anything drawn on a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Text(TextElement),
    Image(ImageElement),
}

impl Element {
    pub fn position(&self) -> &Position {
        match self {
            Element::Text(t) => &t.position,
            Element::Image(i) => &i.position,
        }
    }

    pub fn order(&self) -> f64 {
        match self {
            Element::Text(t) => t.order,
            Element::Image(i) => i.order,
        }
    }

    pub fn as_text(&self) -> Option<&TextElement> {
        match self {
            Element::Text(t) => Some(t),
            Element::Image(_) => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageElement> {
        match self {
            Element::Image(i) => Some(i),
            Element::Text(_) => None,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Element::Image(_))
    }
}

/// One reconstructed slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// 1-based, contiguous across the deck
    pub index: usize,

    pub title: String,

    /// Elements sorted by `order`
    pub elements: Vec<Element>,

    pub bounds: Bounds,

    /// Set when the slide part could not be parsed
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub placeholder: bool,
}

impl Slide {
    /// Iterate over text elements.
    pub fn texts(&self) -> impl Iterator<Item = &TextElement> {
        self.elements.iter().filter_map(Element::as_text)
    }

    /// Iterate over image elements.
    pub fn images(&self) -> impl Iterator<Item = &ImageElement> {
        self.elements.iter().filter_map(Element::as_image)
    }

    /// Default title for slide number `index`.
    pub fn default_title(index: usize) -> String {
        format!("Slide {}", index)
    }
}
