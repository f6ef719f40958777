//! Plain text renderer implementation.

use crate::error::Result;
use crate::model::{format_file_size, Element, Preview, Slide};

/// Convert a preview to plain text.
pub fn to_text(preview: &Preview) -> Result<String> {
    let mut output = String::new();

    match preview {
        Preview::Slides(deck) => {
            for (i, slide) in deck.slides.iter().enumerate() {
                if i > 0 {
                    output.push_str("\n---\n\n");
                }
                output.push_str(&render_slide_text(slide));
            }
        }
        Preview::Gallery(entries) => {
            for entry in entries {
                output.push_str(&format!(
                    "{}: {} ({})\n",
                    entry.label,
                    entry.asset.name,
                    format_file_size(entry.asset.byte_size as u64)
                ));
            }
        }
        Preview::TextOutline(slides) => {
            for (i, slide) in slides.iter().enumerate() {
                if i > 0 {
                    output.push('\n');
                }
                output.push_str(&format!("{}. {}\n", slide.index, slide.title));
                for line in &slide.body {
                    output.push_str(line);
                    output.push('\n');
                }
            }
        }
        Preview::Fallback(summary) => {
            output.push_str(&format!(
                "{} ({}, {})\n\n",
                summary.file_name, summary.size_label, summary.file_type
            ));
            for line in &summary.guidance {
                output.push_str(&format!("- {}\n", line));
            }
        }
    }

    Ok(output.trim().to_string())
}

/// Text of one reconstructed slide, elements in document order.
fn render_slide_text(slide: &Slide) -> String {
    let mut output = format!("{}. {}\n", slide.index, slide.title);
    for element in &slide.elements {
        match element {
            Element::Text(text) => {
                let content = text.content.trim();
                // the title line already carries it
                if content != slide.title {
                    output.push_str(content);
                    output.push('\n');
                }
            }
            Element::Image(image) => {
                if image.alt.is_empty() {
                    output.push_str("[Image]\n");
                } else {
                    output.push_str(&format!("[Image: {}]\n", image.alt));
                }
            }
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Bounds, FallbackSummary, GalleryEntry, ImageElement, MediaAsset, Position, SlideDeck,
        TextElement, TextOutlineSlide,
    };
    use std::sync::Arc;

    fn text(content: &str) -> Element {
        Element::Text(TextElement {
            content: content.to_string(),
            segments: Vec::new(),
            position: Position::FALLBACK,
            order: 0.0,
            is_title: false,
        })
    }

    #[test]
    fn test_slides_text() {
        let asset = Arc::new(MediaAsset::new("a.png", "ppt/media/a.png", vec![0]));
        let slide = Slide {
            index: 1,
            title: "Agenda".to_string(),
            elements: vec![
                text("Agenda"),
                text("First point"),
                Element::Image(ImageElement {
                    asset,
                    alt: "Chart".to_string(),
                    position: Position::FALLBACK,
                    order: 2.0,
                }),
            ],
            bounds: Bounds::EMPTY_SLIDE,
            placeholder: false,
        };
        let second = Slide {
            index: 2,
            title: "Slide 2".to_string(),
            elements: Vec::new(),
            bounds: Bounds::EMPTY_SLIDE,
            placeholder: false,
        };
        let preview = Preview::Slides(SlideDeck {
            slides: vec![slide, second],
            media: Vec::new(),
        });

        let out = to_text(&preview).unwrap();
        assert_eq!(
            out,
            "1. Agenda\nFirst point\n[Image: Chart]\n\n---\n\n2. Slide 2"
        );
    }

    #[test]
    fn test_gallery_text() {
        let asset = Arc::new(MediaAsset::new("image1.png", "ppt/media/image1.png", vec![0; 1536]));
        let preview = Preview::Gallery(vec![GalleryEntry {
            number: 1,
            label: "Image 1".to_string(),
            asset,
        }]);
        assert_eq!(to_text(&preview).unwrap(), "Image 1: image1.png (1.5 KB)");
    }

    #[test]
    fn test_outline_text() {
        let preview = Preview::TextOutline(vec![
            TextOutlineSlide {
                index: 1,
                title: "Hello".to_string(),
                body: vec!["World".to_string()],
            },
            TextOutlineSlide {
                index: 2,
                title: "Slide 2".to_string(),
                body: Vec::new(),
            },
        ]);
        assert_eq!(to_text(&preview).unwrap(), "1. Hello\nWorld\n\n2. Slide 2");
    }

    #[test]
    fn test_fallback_text() {
        let preview = Preview::Fallback(FallbackSummary::new("deck.pptx", 10));
        let out = to_text(&preview).unwrap();
        assert!(out.starts_with("deck.pptx (10 Bytes, PowerPoint Presentation (PPTX))"));
        assert!(out.contains("\n- "));
    }
}
