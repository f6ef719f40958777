//! Shape decomposition into positioned text and image elements.
//!
//! A text shape is split as finely as its markup allows:
//!
//! 1. several paragraphs: one block per paragraph, stacked vertically inside
//!    the shape;
//! 2. one paragraph with several runs: one block per run, laid side by side;
//! 3. otherwise: one block for the whole shape.
//!
//! Paragraph and run positions are estimates. Slide markup carries no
//! geometry below the shape level and no font metrics are available.

use super::formatting::{effective_run_style, paragraph_style};
use super::media::MediaTable;
use super::position::{explicit_position, resolve_position};
use super::relationships::SlideRelationships;
use crate::model::{ImageElement, Position, StyleSet, TextElement, TextSegment};
use crate::options::LayoutOptions;
use crate::xml::XmlNode;
use std::sync::Arc;

/// Characters that end a sentence; text containing one is not a title.
const SENTENCE_TERMINATORS: &[char] = &['。', '！', '？'];

/// Spacing between two sub-elements split out of one shape, in `order` units.
const BLOCK_ORDER_STEP: f64 = 0.1;

/// Guess whether `text` reads like a heading.
///
/// True for non-empty text of 3 to 99 characters with no sentence
/// terminator.
pub fn is_likely_title(text: &str) -> bool {
    let len = text.chars().count();
    len > 2 && len < 100 && !text.contains(SENTENCE_TERMINATORS)
}

/// Text and styled segments of one block before positioning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormattedText {
    pub text: String,
    pub segments: Vec<TextSegment>,
}

impl FormattedText {
    fn push(&mut self, text: &str, style: StyleSet) {
        if text.is_empty() {
            return;
        }
        self.text.push_str(text);
        self.segments.push(TextSegment::styled(text, style));
    }

    fn push_line_break(&mut self) {
        let brk = TextSegment::line_break();
        self.text.push_str(&brk.text);
        self.segments.push(brk);
    }

    /// True when the text has visible content.
    pub fn has_content(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// A positioned block of text produced from one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub formatted: FormattedText,
    pub position: Position,
}

/// Formatted text of a paragraph.
///
/// Runs take the paragraph style overlaid by their own; a paragraph without
/// runs contributes its bare `a:t` text with the paragraph style.
pub fn paragraph_text(paragraph: &XmlNode) -> FormattedText {
    let mut out = FormattedText::default();
    append_paragraph(&mut out, paragraph);
    out
}

fn append_paragraph(out: &mut FormattedText, paragraph: &XmlNode) {
    let para_style = paragraph_style(paragraph);
    let runs = paragraph.descendants("a:r");
    if runs.is_empty() {
        for t in paragraph.descendants("a:t") {
            out.push(&t.text_content(), para_style.clone());
        }
        return;
    }
    for run in runs {
        let style = effective_run_style(&para_style, run, Some(paragraph));
        for t in run.descendants("a:t") {
            out.push(&t.text_content(), style.clone());
        }
    }
}

/// Estimated vertical offset of paragraph `index` out of `count` inside its
/// shape, in pixels.
///
/// Uses before-spacing and line spacing (`a:spcPts`, hundredths of a point)
/// when present. Without them, or when they add up to nothing, paragraphs
/// are stacked `line_height` apart.
pub fn paragraph_vertical_offset(
    paragraph: &XmlNode,
    index: usize,
    count: usize,
    line_height: i64,
) -> i64 {
    let mut offset = 0_i64;

    if let Some(ppr) = paragraph.first_descendant("a:pPr") {
        let spacing = |name: &str| {
            ppr.first_descendant(name)
                .and_then(|n| n.first_descendant("a:spcPts"))
                .map(|pts| pts.attr_i64("val").unwrap_or(0) as f64 / 100.0)
        };
        if let Some(before) = spacing("a:spcBef") {
            offset += before.round() as i64;
        }
        if let Some(line) = spacing("a:lnSpc") {
            if index > 0 {
                offset += (line * index as f64).round() as i64;
            }
        }
    }

    if offset == 0 && count > 1 {
        offset = index as i64 * line_height;
    }
    offset
}

/// Splits shapes into elements using a fixed set of layout constants.
#[derive(Debug, Clone, Copy)]
pub struct ShapeExtractor<'a> {
    layout: &'a LayoutOptions,
}

impl<'a> ShapeExtractor<'a> {
    pub fn new(layout: &'a LayoutOptions) -> Self {
        Self { layout }
    }

    /// Split a shape into text blocks. Blocks without visible text are
    /// dropped.
    pub fn text_blocks(&self, shape: &XmlNode) -> Vec<TextBlock> {
        let base = resolve_position(shape);
        let paragraphs = shape.descendants("a:p");

        if paragraphs.len() > 1 {
            return self.paragraph_blocks(&paragraphs, base);
        }

        let runs = shape.descendants("a:r");
        if runs.len() > 1 {
            return self.run_blocks(&runs, paragraphs.first().copied(), base);
        }

        let formatted = self.shape_text(&paragraphs);
        if formatted.has_content() {
            vec![TextBlock {
                formatted,
                position: base,
            }]
        } else {
            Vec::new()
        }
    }

    fn paragraph_blocks(&self, paragraphs: &[&XmlNode], base: Position) -> Vec<TextBlock> {
        let count = paragraphs.len();
        let height = ((base.height as f64 / count as f64).round() as i64)
            .max(self.layout.paragraph_min_height);

        paragraphs
            .iter()
            .enumerate()
            .filter_map(|(i, para)| {
                let formatted = paragraph_text(para);
                if !formatted.has_content() {
                    return None;
                }
                let position = explicit_position(para).unwrap_or_else(|| {
                    let dy = paragraph_vertical_offset(para, i, count, self.layout.line_height);
                    Position::new(base.x, base.y + dy, base.width, height)
                });
                Some(TextBlock {
                    formatted,
                    position,
                })
            })
            .collect()
    }

    fn run_blocks(
        &self,
        runs: &[&XmlNode],
        paragraph: Option<&XmlNode>,
        base: Position,
    ) -> Vec<TextBlock> {
        let para_style = paragraph.map(paragraph_style).unwrap_or_default();
        let slot = ((base.width as f64 / runs.len() as f64).round() as i64)
            .max(self.layout.run_min_width);

        runs.iter()
            .enumerate()
            .filter_map(|(i, run)| {
                let style = effective_run_style(&para_style, run, paragraph);
                let mut formatted = FormattedText::default();
                for t in run.descendants("a:t") {
                    formatted.push(&t.text_content(), style.clone());
                }
                if !formatted.has_content() {
                    return None;
                }
                let position = explicit_position(run).unwrap_or_else(|| {
                    Position::new(base.x + i as i64 * slot, base.y, slot, base.height)
                });
                Some(TextBlock {
                    formatted,
                    position,
                })
            })
            .collect()
    }

    /// Whole-shape text: every paragraph, separated by line breaks.
    fn shape_text(&self, paragraphs: &[&XmlNode]) -> FormattedText {
        let mut out = FormattedText::default();
        for (i, para) in paragraphs.iter().enumerate() {
            if i > 0 {
                out.push_line_break();
            }
            append_paragraph(&mut out, para);
        }
        out
    }

    /// Text elements of a shape, ordered after the shape's sibling index.
    pub fn text_elements(&self, shape: &XmlNode) -> Vec<TextElement> {
        let base_order = shape.index as f64;
        self.text_blocks(shape)
            .into_iter()
            .enumerate()
            .map(|(i, block)| {
                let is_title = is_likely_title(&block.formatted.text);
                TextElement {
                    content: block.formatted.text,
                    segments: block.formatted.segments,
                    position: block.position,
                    order: base_order + i as f64 * BLOCK_ORDER_STEP,
                    is_title,
                }
            })
            .collect()
    }

    /// Image element of a picture shape.
    ///
    /// Returns `None` when the picture has no embedded reference, the
    /// reference is not an image relationship, or no extracted asset matches.
    pub fn image_element(
        &self,
        pic: &XmlNode,
        rels: &SlideRelationships,
        media: &MediaTable,
    ) -> Option<ImageElement> {
        let embed = pic.first_descendant("a:blip")?.attr("r:embed")?;
        let rel = rels.get(embed)?;
        let asset = media.find_for_target(&rel.resolved)?;
        Some(ImageElement {
            asset: Arc::clone(asset),
            alt: picture_alt(pic),
            position: resolve_position(pic),
            order: pic.index as f64,
        })
    }
}

/// Alt text: description, else name, else empty.
fn picture_alt(pic: &XmlNode) -> String {
    let Some(props) = pic.first_descendant("p:cNvPr") else {
        return String::new();
    };
    props
        .attr("descr")
        .filter(|d| !d.is_empty())
        .or_else(|| props.attr("name"))
        .unwrap_or_default()
        .to_string()
}
