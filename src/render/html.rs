//! HTML renderer implementation.
//!
//! Slides are drawn on an absolutely positioned canvas sized to the slide
//! bounds. Pictures go on the bottom layer and text on top, following
//! [`SlideScene`].

use crate::error::Result;
use crate::model::{
    Element, GalleryEntry, MediaAsset, Preview, Slide, SlideScene, TextElement, TextOutlineSlide,
    TextSegment,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::options::{MediaEmbedding, RenderOptions};

/// Shown on slides without elements.
pub const EMPTY_SLIDE_NOTICE: &str = "This slide has no displayable content";

/// Shown for outline slides without body text.
pub const EMPTY_BODY_NOTICE: &str = "This slide has no text content";

const BASE_STYLE: &str = "\
.unslide-preview{font-family:sans-serif;}\
.slide-canvas{position:relative;margin:0 auto 24px;background:#ffffff;border:1px solid #e1dfdd;overflow:hidden;}\
.positioned-image img{width:100%;height:100%;object-fit:cover;}\
.positioned-title{font-weight:600;}\
.gallery-item img{max-width:100%;}";

/// Render a preview as an HTML fragment.
pub fn to_html(preview: &Preview, options: &RenderOptions) -> Result<String> {
    let mut out = String::new();
    out.push_str(&format!(
        "<div class=\"unslide-preview\" data-mode=\"{}\">",
        preview.mode()
    ));
    match preview {
        Preview::Slides(deck) => {
            if options.all_slides {
                for slide in &deck.slides {
                    render_slide(&mut out, slide, options);
                }
            } else if let Some(slide) = deck.slides.get(options.current_slide) {
                render_counter(&mut out, options.current_slide + 1, deck.slides.len());
                render_slide(&mut out, slide, options);
            }
        }
        Preview::Gallery(entries) => render_gallery(&mut out, entries, options),
        Preview::TextOutline(slides) => render_outline(&mut out, slides),
        Preview::Fallback(summary) => {
            out.push_str("<div class=\"fallback-card\">");
            out.push_str(&format!(
                "<h2>{}</h2><p>{} · {}</p><ul>",
                escape_html(&summary.file_name),
                escape_html(&summary.size_label),
                escape_html(&summary.file_type)
            ));
            for line in &summary.guidance {
                out.push_str(&format!("<li>{}</li>", escape_html(line)));
            }
            out.push_str("</ul></div>");
        }
    }
    out.push_str("</div>");
    Ok(out)
}

/// Render a preview as a standalone HTML page.
pub fn to_html_document(title: &str, preview: &Preview, options: &RenderOptions) -> Result<String> {
    let body = to_html(preview, options)?;
    Ok(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        BASE_STYLE,
        body
    ))
}

fn render_counter(out: &mut String, current: usize, total: usize) {
    out.push_str(&format!(
        "<div class=\"slide-counter\">{} / {}</div>",
        current, total
    ));
}

/// Render one slide canvas.
pub fn render_slide(out: &mut String, slide: &Slide, options: &RenderOptions) {
    out.push_str(&format!(
        "<section class=\"slide\" data-index=\"{}\" title=\"{}\">",
        slide.index,
        escape_html(&slide.title)
    ));
    if slide.elements.is_empty() {
        out.push_str(&format!("<div class=\"slide-empty\">{}</div>", EMPTY_SLIDE_NOTICE));
        out.push_str("</section>");
        return;
    }

    let scene = SlideScene::compose(slide);
    out.push_str(&format!(
        "<div class=\"slide-canvas\" style=\"width:{}px;height:{}px;{}\">",
        scene.canvas.width,
        scene.canvas.height,
        zoom_css(options.zoom)
    ));
    for layer in &scene.layers {
        match layer.element {
            Element::Image(image) => {
                out.push_str(&format!(
                    "<div class=\"positioned-image\" style=\"position:absolute;left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};\"><img src=\"{}\" alt=\"{}\"></div>",
                    layer.left,
                    layer.top,
                    layer.width,
                    layer.height,
                    layer.z_index,
                    media_src(&image.asset, options),
                    escape_html(&image.alt)
                ));
            }
            Element::Text(text) => {
                let class = if text.is_title {
                    "positioned-title"
                } else {
                    "positioned-text"
                };
                out.push_str(&format!(
                    "<div class=\"{}\" style=\"position:absolute;left:{}px;top:{}px;width:{}px;z-index:{};\">{}</div>",
                    class,
                    layer.left,
                    layer.top,
                    layer.width,
                    layer.z_index,
                    text_html(text)
                ));
            }
        }
    }
    out.push_str("</div></section>");
}

fn zoom_css(zoom: u32) -> String {
    if zoom == 100 {
        return String::new();
    }
    format!(
        "transform:scale({});transform-origin:top center;",
        zoom as f64 / 100.0
    )
}

/// Inner HTML of a text element: one span per styled segment.
pub fn text_html(element: &TextElement) -> String {
    if element.segments.is_empty() {
        return escape_html(&element.content);
    }
    segments_html(&element.segments)
}

/// Spans for `segments`; line-break segments become `<br>`.
pub fn segments_html(segments: &[TextSegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        if segment.is_line_break {
            out.push_str("<br>");
            continue;
        }
        let css = segment.style.to_css();
        if css.is_empty() {
            out.push_str(&format!("<span>{}</span>", escape_html(&segment.text)));
        } else {
            out.push_str(&format!(
                "<span style=\"{}\">{}</span>",
                escape_html(&css),
                escape_html(&segment.text)
            ));
        }
    }
    out
}

fn render_gallery(out: &mut String, entries: &[GalleryEntry], options: &RenderOptions) {
    out.push_str(&format!(
        "<p class=\"gallery-notice\">{} images extracted</p><div class=\"gallery\">",
        entries.len()
    ));
    for entry in entries {
        out.push_str(&format!(
            "<figure class=\"gallery-item\"><h3>{}</h3><img src=\"{}\" alt=\"{}\"><figcaption>{}</figcaption></figure>",
            escape_html(&entry.label),
            media_src(&entry.asset, options),
            escape_html(&entry.label),
            escape_html(&entry.asset.name)
        ));
    }
    out.push_str("</div>");
}

fn render_outline(out: &mut String, slides: &[TextOutlineSlide]) {
    out.push_str(&format!(
        "<p class=\"outline-notice\">{} slides parsed</p>",
        slides.len()
    ));
    for slide in slides {
        out.push_str(&format!(
            "<div class=\"slide-text-item\"><h3>{}</h3><span class=\"slide-number\">{}</span>",
            escape_html(&slide.title),
            Slide::default_title(slide.index)
        ));
        if slide.body.is_empty() {
            out.push_str(&format!("<p class=\"slide-text-empty\">{}</p>", EMPTY_BODY_NOTICE));
        }
        for line in &slide.body {
            out.push_str(&format!("<p>{}</p>", escape_html(line)));
        }
        out.push_str("</div>");
    }
}

/// `src` attribute value for a picture.
pub fn media_src(asset: &MediaAsset, options: &RenderOptions) -> String {
    match options.media {
        MediaEmbedding::DataUri => format!(
            "data:{};base64,{}",
            asset.mime_type.as_deref().unwrap_or("application/octet-stream"),
            STANDARD.encode(&asset.data)
        ),
        MediaEmbedding::Link => escape_html(&format!(
            "{}{}",
            options.media_path_prefix,
            asset.file_name()
        )),
    }
}

/// Escape text for element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Bounds, FallbackSummary, ImageElement, Position, SlideDeck, StyleSet,
    };
    use std::sync::Arc;

    fn deck() -> Preview {
        let asset = Arc::new(MediaAsset::new("image1.png", "ppt/media/image1.png", vec![1, 2, 3]));
        let mut bold = StyleSet::new();
        bold.bold = Some(true);
        let slide = Slide {
            index: 1,
            title: "Intro".to_string(),
            elements: vec![
                Element::Text(TextElement {
                    content: "Intro & more".to_string(),
                    segments: vec![
                        TextSegment::styled("Intro", bold),
                        TextSegment::line_break(),
                        TextSegment::styled("& more", StyleSet::new()),
                    ],
                    position: Position::new(120, 70, 200, 40),
                    order: 0.0,
                    is_title: true,
                }),
                Element::Image(ImageElement {
                    asset: Arc::clone(&asset),
                    alt: "Logo".to_string(),
                    position: Position::new(100, 50, 300, 200),
                    order: 1.0,
                }),
            ],
            bounds: Bounds {
                min_x: 80,
                min_y: 30,
                width: 600,
                height: 400,
            },
            placeholder: false,
        };
        Preview::Slides(SlideDeck {
            slides: vec![slide],
            media: vec![asset],
        })
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_slide_layers() {
        let html = to_html(&deck(), &RenderOptions::default()).unwrap();
        assert!(html.contains("width:600px;height:400px;"));

        let image_at = html.find("positioned-image").unwrap();
        let text_at = html.find("positioned-title").unwrap();
        assert!(image_at < text_at);
        assert!(html.contains("left:20px;top:20px;width:300px;height:200px;z-index:1;"));
        assert!(html.contains("left:40px;top:40px;width:200px;z-index:10;"));
        assert!(html.contains("src=\"data:image/png;base64,AQID\""));
    }

    #[test]
    fn test_segments() {
        let html = to_html(&deck(), &RenderOptions::default()).unwrap();
        assert!(html.contains("<span style=\"font-weight:bold\">Intro</span><br><span>&amp; more</span>"));
    }

    #[test]
    fn test_linked_media_and_zoom() {
        let opts = RenderOptions::new().with_linked_media("media/").with_zoom(150);
        let html = to_html(&deck(), &opts).unwrap();
        assert!(html.contains("src=\"media/image1.png\""));
        assert!(html.contains("transform:scale(1.5)"));
    }

    #[test]
    fn test_single_slide_counter() {
        let opts = RenderOptions::new().with_single_slide(0);
        let html = to_html(&deck(), &opts).unwrap();
        assert!(html.contains("<div class=\"slide-counter\">1 / 1</div>"));
    }

    #[test]
    fn test_empty_slide() {
        let preview = Preview::Slides(SlideDeck {
            slides: vec![Slide {
                index: 1,
                title: "Slide 1".to_string(),
                elements: Vec::new(),
                bounds: Bounds::EMPTY_SLIDE,
                placeholder: false,
            }],
            media: Vec::new(),
        });
        let html = to_html(&preview, &RenderOptions::default()).unwrap();
        assert!(html.contains(EMPTY_SLIDE_NOTICE));
        assert!(!html.contains("slide-canvas"));
    }

    #[test]
    fn test_outline_and_fallback() {
        let outline = Preview::TextOutline(vec![TextOutlineSlide {
            index: 2,
            title: "<Title>".to_string(),
            body: Vec::new(),
        }]);
        let html = to_html(&outline, &RenderOptions::default()).unwrap();
        assert!(html.contains("<h3>&lt;Title&gt;</h3>"));
        assert!(html.contains(EMPTY_BODY_NOTICE));

        let card = Preview::Fallback(FallbackSummary::new("deck.pptx", 2048));
        let html = to_html_document("deck.pptx", &card, &RenderOptions::default()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("2 KB"));
    }
}
