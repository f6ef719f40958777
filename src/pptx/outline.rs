//! Text-only extraction: titles and body lines per slide, no layout.

use super::assembler::slide_parts;
use crate::container::OoxmlContainer;
use crate::error::Result;
use crate::model::{Slide, TextOutlineSlide};
use crate::xml;
use log::warn;

/// Body used when a slide part cannot be read or parsed.
pub const UNREADABLE_BODY: &str = "Unable to parse content";

/// Trimmed, non-empty `a:t` texts of a slide in document order.
pub fn slide_texts(slide_xml: &str) -> Result<Vec<String>> {
    let root = xml::parse(slide_xml)?;
    Ok(root
        .descendants("a:t")
        .into_iter()
        .map(|t| t.text_content().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect())
}

/// Outline entry for slide `index`: first text is the title, the rest the
/// body.
pub fn outline_slide(index: usize, texts: Vec<String>) -> TextOutlineSlide {
    let mut texts = texts.into_iter();
    match texts.next() {
        Some(title) => TextOutlineSlide {
            index,
            title,
            body: texts.collect(),
        },
        None => TextOutlineSlide {
            index,
            title: Slide::default_title(index),
            body: Vec::new(),
        },
    }
}

/// Outline of a whole deck.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    pub slides: Vec<TextOutlineSlide>,
    /// Texts actually read from slide markup, over all slides
    pub text_count: usize,
}

/// Outline of every slide. Unreadable slides get a fixed notice as body.
pub fn extract_outline(container: &OoxmlContainer) -> Outline {
    let mut outline = Outline::default();
    for (i, part) in slide_parts(container).iter().enumerate() {
        let index = i + 1;
        let texts = container
            .read_xml(&part.path)
            .and_then(|xml| slide_texts(&xml));
        let slide = match texts {
            Ok(texts) => {
                outline.text_count += texts.len();
                outline_slide(index, texts)
            }
            Err(e) => {
                warn!("no text for slide {}: {}", index, e);
                TextOutlineSlide {
                    index,
                    title: Slide::default_title(index),
                    body: vec![UNREADABLE_BODY.to_string()],
                }
            }
        };
        outline.slides.push(slide);
    }
    outline
}
