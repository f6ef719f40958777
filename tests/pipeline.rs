//! End-to-end tests over synthetic presentation packages.
//!
//! Packages are written with stored (uncompressed) entries so a test can
//! damage the bytes of one part in place: the central directory still lists
//! it, but reading it fails its checksum.

use std::io::{Cursor, Write};
use unslide::model::Preview;
use unslide::render::{self, RenderOptions};
use unslide::{
    ErrorKind, NavKey, Navigator, SlideScene, SourceDocument, StageKind, TextAlign,
    ThumbnailPreview, Viewer, ViewerOptions,
};
use zip::write::SimpleFileOptions;

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

const CORRUPT_MARKER: &str = "DAMAGE-THIS-PART";

fn package(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut buffer = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buffer));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (name, body) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(body).unwrap();
        }
        zip.finish().unwrap();
    }
    buffer
}

/// Flip the stored marker so the entry no longer matches its checksum.
fn damage(mut data: Vec<u8>) -> Vec<u8> {
    let marker = CORRUPT_MARKER.as_bytes();
    let at = data
        .windows(marker.len())
        .position(|w| w == marker)
        .expect("marker present");
    data[at] ^= 0x20;
    data
}

fn text_slide(title: &str) -> String {
    format!(
        r#"<p:sld><p:cSld><p:spTree><p:sp><p:spPr><a:xfrm><a:off x="914400" y="457200"/><a:ext cx="7315200" cy="914400"/></a:xfrm></p:spPr><p:txBody><a:p><a:r><a:t>{}</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#,
        title
    )
}

fn damaged_slide() -> String {
    text_slide(CORRUPT_MARKER)
}

const RICH_SLIDE: &str = concat!(
    r#"<p:sld><p:cSld><p:spTree>"#,
    r#"<p:sp><p:spPr><a:xfrm><a:off x="914400" y="457200"/><a:ext cx="7315200" cy="914400"/></a:xfrm></p:spPr>"#,
    r#"<p:txBody><a:p><a:pPr algn="ctr"/><a:r><a:rPr sz="4400" b="1"/><a:t>Q3 Results</a:t></a:r></a:p></p:txBody></p:sp>"#,
    r#"<p:sp><p:spPr><a:xfrm><a:off x="914400" y="1828800"/><a:ext cx="3657600" cy="1828800"/></a:xfrm></p:spPr>"#,
    r#"<p:txBody><a:p><a:r><a:t>Revenue grew strongly this quarter。</a:t></a:r></a:p>"#,
    r#"<a:p><a:r><a:rPr i="1"><a:solidFill><a:srgbClr val="FF0000"/></a:solidFill></a:rPr><a:t>Costs flat</a:t></a:r></a:p></p:txBody></p:sp>"#,
    r#"<p:pic><p:nvPicPr><p:cNvPr id="4" name="Picture 3" descr="Chart"/></p:nvPicPr>"#,
    r#"<p:blipFill><a:blip r:embed="rId2"/></p:blipFill>"#,
    r#"<p:spPr><a:xfrm><a:off x="4572000" y="1828800"/><a:ext cx="2743200" cy="1828800"/></a:xfrm></p:spPr></p:pic>"#,
    r#"</p:spTree></p:cSld></p:sld>"#
);

const RICH_RELS: &str = concat!(
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>"#,
    r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image1.png"/>"#,
    r#"</Relationships>"#
);

#[test]
fn test_damaged_slides_cascade_to_gallery() {
    let slide = damaged_slide();
    let data = damage(package(&[
        ("ppt/slides/slide1.xml", slide.as_bytes()),
        ("ppt/media/image1.png", PNG),
        ("ppt/media/image2.jpg", PNG),
        ("ppt/media/image3.gif", PNG),
    ]));

    let outcome = Viewer::new().preview_bytes("broken.pptx", data);

    assert_eq!(outcome.stage, StageKind::ImageOnly);
    assert_eq!(outcome.attempts.len(), 1);
    assert_eq!(outcome.attempts[0].stage, StageKind::Combined);
    assert_eq!(outcome.attempts[0].kind, ErrorKind::ArchiveRead);
    let Preview::Gallery(entries) = &outcome.preview else {
        panic!("expected gallery, got {}", outcome.preview.mode());
    };
    assert_eq!(entries.len(), 3);
    let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["Image 1", "Image 2", "Image 3"]);
}

#[test]
fn test_unparsable_slide_becomes_placeholder() {
    let slides: Vec<String> = (1..=5)
        .map(|n| {
            if n == 3 {
                "<p:sld><p:cSld><p:spTree>".to_string()
            } else {
                text_slide(&format!("Topic {}", n))
            }
        })
        .collect();
    let names: Vec<String> = (1..=5).map(|n| format!("ppt/slides/slide{}.xml", n)).collect();
    let entries: Vec<(&str, &[u8])> = names
        .iter()
        .zip(&slides)
        .map(|(name, body)| (name.as_str(), body.as_bytes()))
        .collect();

    let outcome = Viewer::new().preview_bytes("deck.pptx", package(&entries));

    assert_eq!(outcome.stage, StageKind::Combined);
    assert!(outcome.attempts.is_empty());
    let deck = outcome.preview.as_deck().unwrap();
    assert_eq!(deck.slides.len(), 5);
    assert_eq!(deck.placeholder_count(), 1);
    assert!(deck.slides[2].placeholder);
    assert_eq!(deck.slides[2].title, "Slide 3");
    assert_eq!(deck.slides[3].title, "Topic 4");
    let indices: Vec<usize> = deck.slides.iter().map(|s| s.index).collect();
    assert_eq!(indices, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_rich_slide_reconstruction() {
    let data = package(&[
        ("ppt/slides/slide1.xml", RICH_SLIDE.as_bytes()),
        ("ppt/slides/_rels/slide1.xml.rels", RICH_RELS.as_bytes()),
        ("ppt/media/image1.png", PNG),
    ]);

    let slides = unslide::reconstruct(&data).unwrap();
    assert_eq!(slides.len(), 1);
    let slide = &slides[0];
    assert_eq!(slide.title, "Q3 Results");

    let texts: Vec<_> = slide.texts().collect();
    assert_eq!(texts.len(), 3);

    let title = texts[0];
    assert!(title.is_title);
    assert_eq!(
        (title.position.x, title.position.y, title.position.width, title.position.height),
        (96, 48, 768, 96)
    );
    let style = &title.segments[0].style;
    assert_eq!(style.font_size, Some(44.0));
    assert_eq!(style.bold, Some(true));
    assert_eq!(style.align, Some(TextAlign::Center));

    // two paragraphs split evenly over the shape height
    assert!(!texts[1].is_title);
    assert_eq!(texts[1].position.y, 192);
    assert_eq!(texts[1].position.height, 96);
    assert_eq!(texts[2].content, "Costs flat");
    assert_eq!(texts[2].position.y, 222);
    assert_eq!(texts[2].segments[0].style.italic, Some(true));
    assert_eq!(texts[2].segments[0].style.color.as_deref(), Some("#FF0000"));

    let image = slide.images().next().unwrap();
    assert_eq!(image.alt, "Chart");
    assert_eq!(image.asset.path, "ppt/media/image1.png");
    assert_eq!(
        (image.position.x, image.position.y, image.position.width, image.position.height),
        (480, 192, 288, 192)
    );

    // union [96, 864] x [48, 384] plus 20px padding
    assert_eq!(slide.bounds.min_x, 76);
    assert_eq!(slide.bounds.min_y, 28);
    assert_eq!(slide.bounds.width, 808);
    assert_eq!(slide.bounds.height, 400);

    let scene = SlideScene::compose(slide);
    assert!(scene.layers[0].element.is_image());
    assert_eq!(scene.layers[0].z_index, 1);
    assert!(scene.layers[1..].iter().all(|l| l.z_index == 10));
    assert_eq!((scene.layers[1].left, scene.layers[1].top), (20, 20));
}

#[test]
fn test_slides_follow_numeric_order() {
    let one = text_slide("First");
    let three = text_slide("Second");
    let ten = text_slide("Third");
    let data = package(&[
        ("ppt/slides/slide10.xml", ten.as_bytes()),
        ("ppt/slides/slide1.xml", one.as_bytes()),
        ("ppt/slides/slide3.xml", three.as_bytes()),
    ]);

    let slides = unslide::reconstruct(&data).unwrap();
    let titles: Vec<&str> = slides.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
    assert_eq!(slides[2].index, 3);
}

#[test]
fn test_text_outline_when_slides_and_images_fail() {
    let broken = damaged_slide();
    let fine = r#"<p:sld><a:t>Closing</a:t><a:t>Thanks for listening</a:t></p:sld>"#;
    let data = damage(package(&[
        ("ppt/slides/slide1.xml", broken.as_bytes()),
        ("ppt/slides/slide2.xml", fine.as_bytes()),
    ]));

    let outcome = Viewer::new().preview_bytes("deck.pptx", data);

    assert_eq!(outcome.stage, StageKind::TextOnly);
    let kinds: Vec<StageKind> = outcome.attempts.iter().map(|a| a.stage).collect();
    assert_eq!(kinds, vec![StageKind::Combined, StageKind::ImageOnly]);
    assert_eq!(outcome.attempts[1].kind, ErrorKind::NoExtractableContent);

    let Preview::TextOutline(slides) = &outcome.preview else {
        panic!("expected outline");
    };
    assert_eq!(slides[0].title, "Slide 1");
    assert_eq!(slides[0].body, vec!["Unable to parse content"]);
    assert_eq!(slides[1].title, "Closing");
    assert_eq!(slides[1].body, vec!["Thanks for listening"]);
}

#[test]
fn test_package_without_slides_is_an_empty_deck() {
    let data = package(&[
        (
            "[Content_Types].xml",
            br#"<Types><Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/></Types>"#,
        ),
        (
            "ppt/presentation.xml",
            b"<p:presentation><p:sldIdLst/></p:presentation>",
        ),
        ("ppt/slideLayouts/slideLayout1.xml", b"<p:sldLayout/>"),
        ("ppt/media/image1.png", PNG),
    ]);

    let outcome = Viewer::new().preview_bytes("template.pptx", data);

    assert_eq!(outcome.stage, StageKind::Combined);
    assert!(outcome.attempts.is_empty());
    let deck = outcome.preview.as_deck().unwrap();
    assert!(deck.slides.is_empty());
    assert_eq!(deck.media.len(), 1);
}

#[test]
fn test_word_package_without_media_falls_back() {
    let data = package(&[("word/document.xml", b"<w:document/>")]);
    let outcome = Viewer::new().preview_bytes("report.docx", data.clone());

    assert_eq!(outcome.stage, StageKind::Fallback);
    assert_eq!(outcome.attempts.len(), 3);
    assert_eq!(outcome.attempts[0].kind, ErrorKind::Other);
    assert_eq!(outcome.attempts[1].kind, ErrorKind::NoExtractableContent);
    let Preview::Fallback(summary) = &outcome.preview else {
        panic!("expected fallback card");
    };
    assert_eq!(summary.file_name, "report.docx");
    assert_eq!(summary.byte_size, data.len() as u64);
    assert!(!summary.guidance.is_empty());
}

#[test]
fn test_corrupt_image_is_left_out() {
    let slide = text_slide("Gallery");
    let mut broken = PNG.to_vec();
    broken.extend_from_slice(CORRUPT_MARKER.as_bytes());
    let data = damage(package(&[
        ("ppt/slides/slide1.xml", slide.as_bytes()),
        ("ppt/media/a.png", PNG),
        ("ppt/media/b.png", &broken),
        ("ppt/media/c.png", PNG),
    ]));

    let outcome = Viewer::new().preview_bytes("deck.pptx", data);

    assert_eq!(outcome.stage, StageKind::Combined);
    let deck = outcome.preview.as_deck().unwrap();
    let names: Vec<&str> = deck.media.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["a.png", "c.png"]);
    assert_eq!(deck.slides[0].title, "Gallery");
}

#[test]
fn test_malformed_relationships_keep_the_slide() {
    let data = package(&[
        ("ppt/slides/slide1.xml", RICH_SLIDE.as_bytes()),
        (
            "ppt/slides/_rels/slide1.xml.rels",
            b"<Relationships><Relationship Id=\"rId2\" Target=\"../media/image1.png\"></Other>",
        ),
        ("ppt/media/image1.png", PNG),
    ]);

    let outcome = Viewer::new().preview_bytes("deck.pptx", data);

    assert_eq!(outcome.stage, StageKind::Combined);
    let slide = &outcome.preview.as_deck().unwrap().slides[0];
    assert!(!slide.placeholder);
    assert_eq!(slide.images().count(), 0);
    assert!(slide.texts().count() > 0);
    assert_eq!(slide.title, "Q3 Results");
}

#[test]
fn test_preview_is_repeatable() {
    let data = package(&[
        ("ppt/slides/slide1.xml", RICH_SLIDE.as_bytes()),
        ("ppt/slides/_rels/slide1.xml.rels", RICH_RELS.as_bytes()),
        ("ppt/media/image1.png", PNG),
    ]);
    let document = SourceDocument::new("deck.pptx", data);
    let viewer = Viewer::new();

    let first = viewer.preview(&document);
    let second = viewer.preview(&document);
    assert_eq!(first, second);
    assert_eq!(
        render::to_json_default(&first).unwrap(),
        render::to_json_default(&second).unwrap()
    );
}

#[test]
fn test_text_only_option_skips_reconstruction() {
    let slide = text_slide("Only text");
    let data = package(&[("ppt/slides/slide1.xml", slide.as_bytes())]);
    let viewer = Viewer::with_options(ViewerOptions::default().text_only());

    let outcome = viewer.preview_bytes("deck.pptx", data);
    assert_eq!(outcome.stage, StageKind::TextOnly);
    assert!(outcome.attempts.is_empty());
}

#[test]
fn test_navigate_and_render_deck() {
    let rich = RICH_SLIDE;
    let plain = text_slide("Next steps");
    let data = package(&[
        ("ppt/slides/slide1.xml", rich.as_bytes()),
        ("ppt/slides/_rels/slide1.xml.rels", RICH_RELS.as_bytes()),
        ("ppt/slides/slide2.xml", plain.as_bytes()),
        ("ppt/media/image1.png", PNG),
    ]);
    let outcome = Viewer::new().preview_bytes("deck.pptx", data);

    let mut nav = Navigator::from_preview(&outcome.preview).unwrap();
    assert_eq!(nav.counter(), "1 / 2");
    assert!(nav.handle_key(NavKey::Right));
    assert_eq!(nav.current().unwrap().title, "Next steps");
    assert!(!nav.handle_key(NavKey::Down));

    let thumbs = nav.thumbnails();
    assert!(matches!(thumbs[0].preview, ThumbnailPreview::Image(_)));
    assert!(matches!(thumbs[1].preview, ThumbnailPreview::Text(_)));

    let html = render::to_html(
        &outcome.preview,
        &RenderOptions::new().with_single_slide(nav.current_index()),
    )
    .unwrap();
    assert!(html.contains("2 / 2"));
    assert!(html.contains("Next steps"));
    assert!(!html.contains("Q3 Results"));
}

#[cfg(feature = "async")]
#[tokio::test]
async fn test_preview_file_async() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deck.pptx");
    let slide = text_slide("Async");
    std::fs::write(&path, package(&[("ppt/slides/slide1.xml", slide.as_bytes())])).unwrap();

    let outcome = Viewer::new().preview_file_async(&path).await.unwrap();
    assert_eq!(outcome.stage, StageKind::Combined);
    assert_eq!(outcome.preview.as_deck().unwrap().slides[0].title, "Async");
}
