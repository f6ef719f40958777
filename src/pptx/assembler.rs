//! Slide assembly: from slide parts to ordered, bounded slides.

use super::media::MediaTable;
use super::relationships::{resolve_all, SlideRelationships};
use super::shapes::ShapeExtractor;
use crate::container::OoxmlContainer;
use crate::error::{ErrorKind, Result};
use crate::model::{Bounds, Element, Position, Slide, SlideDeck, TextElement};
use crate::options::LayoutOptions;
use crate::xml;
use log::{debug, warn};
use rayon::prelude::*;

/// Folder holding the slide parts.
pub const SLIDES_FOLDER: &str = "ppt/slides/";

/// Content of the single element on a placeholder slide.
pub const PLACEHOLDER_TEXT: &str = "parse failed";

/// A slide part found in the package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidePart {
    /// Full archive path (e.g., "ppt/slides/slide3.xml")
    pub path: String,
    /// Number taken from the file name; 0 when it has none
    pub number: u32,
}

fn slide_number(file_name: &str) -> u32 {
    file_name
        .strip_prefix("slide")
        .and_then(|rest| rest.strip_suffix(".xml"))
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(0)
}

/// Slide parts directly under [`SLIDES_FOLDER`], ordered by slide number.
pub fn slide_parts(container: &OoxmlContainer) -> Vec<SlidePart> {
    let mut parts: Vec<SlidePart> = container
        .list_folder(SLIDES_FOLDER)
        .into_iter()
        .filter(|e| e.relative_path.ends_with(".xml") && !e.relative_path.contains('/'))
        .map(|e| SlidePart {
            number: slide_number(&e.relative_path),
            path: e.path,
        })
        .collect();
    // list_folder is sorted by path, so equal numbers keep a stable order
    parts.sort_by_key(|p| p.number);
    parts
}

/// Replacement for a slide whose part could not be parsed.
pub fn placeholder_slide(index: usize, layout: &LayoutOptions) -> Slide {
    let element = TextElement {
        content: PLACEHOLDER_TEXT.to_string(),
        segments: Vec::new(),
        position: Position::FALLBACK,
        order: 0.0,
        is_title: false,
    };
    let bounds = bounds_for(std::slice::from_ref(&element.position), layout);
    Slide {
        index,
        title: Slide::default_title(index),
        elements: vec![Element::Text(element)],
        bounds,
        placeholder: true,
    }
}

fn bounds_for(positions: &[Position], layout: &LayoutOptions) -> Bounds {
    Bounds::enclosing(
        positions,
        layout.padding,
        layout.min_canvas_width,
        layout.min_canvas_height,
    )
}

/// Pick the slide title: the first title-like text, else the first text,
/// else "Slide n".
pub fn infer_title(index: usize, elements: &[Element]) -> String {
    let texts = || elements.iter().filter_map(Element::as_text);
    texts()
        .find(|t| t.is_title)
        .or_else(|| texts().next())
        .map(|t| t.content.clone())
        .unwrap_or_else(|| Slide::default_title(index))
}

/// Sort elements, compute bounds and title.
pub fn finish_slide(index: usize, mut elements: Vec<Element>, layout: &LayoutOptions) -> Slide {
    // stable: equal orders keep discovery order
    elements.sort_by(|a, b| a.order().total_cmp(&b.order()));
    let positions: Vec<Position> = elements.iter().map(|e| *e.position()).collect();
    Slide {
        index,
        title: infer_title(index, &elements),
        bounds: bounds_for(&positions, layout),
        elements,
        placeholder: false,
    }
}

/// Builds slides from slide markup against one media table.
#[derive(Debug, Clone, Copy)]
pub struct SlideAssembler<'a> {
    layout: &'a LayoutOptions,
    media: &'a MediaTable,
}

impl<'a> SlideAssembler<'a> {
    pub fn new(layout: &'a LayoutOptions, media: &'a MediaTable) -> Self {
        Self { layout, media }
    }

    /// Reconstruct one slide from its markup.
    pub fn assemble_slide(
        &self,
        index: usize,
        slide_xml: &str,
        rels: &SlideRelationships,
    ) -> Result<Slide> {
        let root = xml::parse(slide_xml)?;
        let extractor = ShapeExtractor::new(self.layout);

        let mut elements: Vec<Element> = Vec::new();
        for shape in root.descendants("p:sp") {
            elements.extend(extractor.text_elements(shape).into_iter().map(Element::Text));
        }
        for pic in root.descendants("p:pic") {
            if let Some(image) = extractor.image_element(pic, rels, self.media) {
                elements.push(Element::Image(image));
            }
        }

        Ok(finish_slide(index, elements, self.layout))
    }

    /// Read and reconstruct the slide at `part`.
    ///
    /// A part that cannot be decompressed is an archive failure and is
    /// returned as an error. Markup that cannot be parsed yields a
    /// placeholder slide.
    pub fn assemble_part(
        &self,
        container: &OoxmlContainer,
        index: usize,
        part: &SlidePart,
        rels: &SlideRelationships,
    ) -> Result<Slide> {
        let parsed = container.read_xml(&part.path).and_then(|xml| {
            self.assemble_slide(index, &xml, rels)
                .map_err(|e| e.in_part(part.path.as_str()))
        });

        match parsed {
            Ok(slide) => Ok(slide),
            Err(e) if e.kind() == ErrorKind::ArchiveRead => Err(e),
            Err(e) => {
                warn!("slide {} replaced by placeholder: {}", index, e);
                Ok(placeholder_slide(index, self.layout))
            }
        }
    }
}

/// Reconstruct every slide of the package.
///
/// Slides are numbered 1..=n in slide-number order regardless of gaps in
/// the part names. A package without slide parts is an empty deck. Fails
/// when a slide part cannot be read from the archive.
pub fn reconstruct_slides(
    container: &OoxmlContainer,
    media: &MediaTable,
    layout: &LayoutOptions,
) -> Result<Vec<Slide>> {
    let parts = slide_parts(container);
    if parts.is_empty() {
        debug!("package has no slide parts");
        return Ok(Vec::new());
    }

    let paths: Vec<String> = parts.iter().map(|p| p.path.clone()).collect();
    let rels = resolve_all(container, &paths);
    let assembler = SlideAssembler::new(layout, media);
    let empty = SlideRelationships::new();

    let slides = parts
        .par_iter()
        .enumerate()
        .map(|(i, part)| {
            let slide_rels = rels.get(&part.path).unwrap_or(&empty);
            assembler.assemble_part(container, i + 1, part, slide_rels)
        })
        .collect::<Result<Vec<Slide>>>()?;

    debug!(
        "reconstructed {} slides ({} placeholders)",
        slides.len(),
        slides.iter().filter(|s| s.placeholder).count()
    );
    Ok(slides)
}

/// Full positional reconstruction: media table plus slides.
pub fn reconstruct_deck(
    container: &OoxmlContainer,
    media: &MediaTable,
    layout: &LayoutOptions,
) -> Result<SlideDeck> {
    let slides = reconstruct_slides(container, media, layout)?;
    Ok(SlideDeck {
        slides,
        media: media.assets().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ImageElement;
    use std::io::{Cursor, Write};
    use std::sync::Arc;
    use zip::write::SimpleFileOptions;

    fn package(entries: &[(&str, &str)]) -> OoxmlContainer {
        let mut buffer = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buffer));
            let options = SimpleFileOptions::default();
            for (name, body) in entries {
                zip.start_file(*name, options).unwrap();
                zip.write_all(body.as_bytes()).unwrap();
            }
            zip.finish().unwrap();
        }
        OoxmlContainer::from_bytes(buffer).unwrap()
    }

    fn text_slide(text: &str) -> String {
        format!(
            r#"<p:sld><p:cSld><p:spTree><p:sp><p:spPr><a:xfrm><a:off x="914400" y="914400"/><a:ext cx="1828800" cy="457200"/></a:xfrm></p:spPr><p:txBody><a:p><a:r><a:t>{}</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#,
            text
        )
    }

    fn text(content: &str, order: f64, is_title: bool) -> Element {
        Element::Text(TextElement {
            content: content.into(),
            segments: vec![],
            position: Position::new(100, 50, 200, 100),
            order,
            is_title,
        })
    }

    #[test]
    fn test_slide_number() {
        assert_eq!(slide_number("slide12.xml"), 12);
        assert_eq!(slide_number("slideA.xml"), 0);
        assert_eq!(slide_number("notes.xml"), 0);
    }

    #[test]
    fn test_slide_parts_numeric_order() {
        let container = package(&[
            ("ppt/slides/slide10.xml", "<p:sld/>"),
            ("ppt/slides/slide2.xml", "<p:sld/>"),
            ("ppt/slides/slide1.xml", "<p:sld/>"),
            ("ppt/slides/_rels/slide1.xml.rels", "<Relationships/>"),
        ]);
        let parts = slide_parts(&container);
        let numbers: Vec<u32> = parts.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 2, 10]);
    }

    #[test]
    fn test_infer_title() {
        let elements = vec![
            text("a very long body sentence。", 0.0, false),
            text("Heading", 1.0, true),
        ];
        assert_eq!(infer_title(1, &elements), "Heading");

        let elements = vec![text("xy", 0.0, false)];
        assert_eq!(infer_title(1, &elements), "xy");

        assert_eq!(infer_title(4, &[]), "Slide 4");
    }

    #[test]
    fn test_finish_slide_sorts_and_bounds() {
        let asset = Arc::new(crate::model::MediaAsset::new("a.png", "ppt/media/a.png", vec![1]));
        let image = Element::Image(ImageElement {
            asset,
            alt: String::new(),
            position: Position::new(100, 50, 200, 100),
            order: 1.0,
        });
        let slide = finish_slide(
            2,
            vec![text("later", 3.0, true), image, text("tie", 1.0, false)],
            &LayoutOptions::default(),
        );
        assert!(slide.elements[0].is_image());
        assert_eq!(slide.elements[1].as_text().unwrap().content, "tie");
        assert_eq!(slide.title, "later");
        assert_eq!(slide.bounds.width, 600);
        assert_eq!(slide.bounds.height, 400);
        assert_eq!(slide.bounds.min_x, 80);
    }

    #[test]
    fn test_empty_slide() {
        let slide = finish_slide(1, Vec::new(), &LayoutOptions::default());
        assert_eq!(slide.title, "Slide 1");
        assert_eq!(slide.bounds, Bounds::EMPTY_SLIDE);
    }

    #[test]
    fn test_placeholder_containment() {
        let container = package(&[
            ("ppt/slides/slide1.xml", &text_slide("One")),
            ("ppt/slides/slide2.xml", "<p:sld><p:cSld>"),
            ("ppt/slides/slide3.xml", &text_slide("Three")),
        ]);
        let slides =
            reconstruct_slides(&container, &MediaTable::default(), &LayoutOptions::default())
                .unwrap();
        assert_eq!(slides.len(), 3);
        assert_eq!(slides[0].title, "One");
        assert!(slides[1].placeholder);
        assert_eq!(slides[1].title, "Slide 2");
        assert_eq!(
            slides[1].elements[0].as_text().unwrap().content,
            PLACEHOLDER_TEXT
        );
        assert_eq!(slides[2].index, 3);
        assert!(!slides[2].placeholder);
    }

    #[test]
    fn test_no_slides_is_an_empty_deck() {
        let container = package(&[("ppt/presentation.xml", "<p:presentation/>")]);
        let slides =
            reconstruct_slides(&container, &MediaTable::default(), &LayoutOptions::default())
                .unwrap();
        assert!(slides.is_empty());
    }
}
