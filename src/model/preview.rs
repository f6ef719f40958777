//! What each pipeline stage hands to the presentation surface.

use super::media::MediaAsset;
use super::slide::Slide;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Full positional reconstruction of a deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideDeck {
    pub slides: Vec<Slide>,
    /// Every materialized image, including ones no slide references
    pub media: Vec<Arc<MediaAsset>>,
}

impl SlideDeck {
    /// Number of slides replaced by placeholders.
    pub fn placeholder_count(&self) -> usize {
        self.slides.iter().filter(|s| s.placeholder).count()
    }
}

/// One picture in the image-only gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryEntry {
    /// 1-based position in the gallery
    pub number: usize,
    /// Heading shown above the picture ("Image n")
    pub label: String,
    pub asset: Arc<MediaAsset>,
}

/// Text extracted from one slide, without formatting or position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextOutlineSlide {
    pub index: usize,
    pub title: String,
    pub body: Vec<String>,
}

/// Static information card shown when nothing could be extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackSummary {
    pub file_name: String,
    pub byte_size: u64,
    /// Human-readable size, e.g. "1.5 KB"
    pub size_label: String,
    pub file_type: String,
    pub guidance: Vec<String>,
}

/// Suggestions shown on the fallback card.
pub const FALLBACK_GUIDANCE: &[&str] = &[
    "Convert the presentation to PDF with a desktop application and preview the PDF",
    "Open the file in PowerPoint, LibreOffice Impress, or WPS",
    "Use an office app on a mobile device",
    "Images contained in the package are shown when they can be extracted",
];

impl FallbackSummary {
    /// Build the card for a document.
    pub fn new(file_name: impl Into<String>, byte_size: u64) -> Self {
        Self {
            file_name: file_name.into(),
            byte_size,
            size_label: format_file_size(byte_size),
            file_type: "PowerPoint Presentation (PPTX)".to_string(),
            guidance: FALLBACK_GUIDANCE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Format a byte count as `Bytes`/`KB`/`MB`/`GB` with at most two decimals.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

/// The result a pipeline stage produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "content", rename_all = "camelCase")]
pub enum Preview {
    /// Positioned slides with composited elements
    Slides(SlideDeck),
    /// Flat list of pictures
    Gallery(Vec<GalleryEntry>),
    /// Title and body text per slide
    TextOutline(Vec<TextOutlineSlide>),
    /// Informational card
    Fallback(FallbackSummary),
}

impl Preview {
    /// Short name of the preview mode.
    pub fn mode(&self) -> &'static str {
        match self {
            Preview::Slides(_) => "slides",
            Preview::Gallery(_) => "gallery",
            Preview::TextOutline(_) => "textOutline",
            Preview::Fallback(_) => "fallback",
        }
    }

    pub fn as_deck(&self) -> Option<&SlideDeck> {
        match self {
            Preview::Slides(deck) => Some(deck),
            _ => None,
        }
    }
}
