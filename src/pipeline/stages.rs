//! The built-in stages.

use super::StageContext;
use crate::detect::FormatType;
use crate::document::SourceDocument;
use crate::error::{Error, Result};
use crate::model::{FallbackSummary, GalleryEntry, Preview};
use crate::pptx::{outline, reconstruct_deck};
use std::sync::Arc;

/// Positional reconstruction of every slide.
///
/// Fails when the archive cannot be opened, is a Word or Excel package, or a
/// slide part cannot be decompressed. A package without slides is an empty
/// deck. Unparsable slides become placeholders and do not fail the stage.
pub fn combined(ctx: &StageContext<'_>) -> Result<Preview> {
    let container = ctx.cache.container(ctx.document)?;
    if let Some(format) = ctx.document.format() {
        if format != FormatType::Pptx {
            return Err(Error::UnsupportedFormat(format.to_string()));
        }
    }
    let media = ctx.cache.media(ctx.document)?;
    let deck = reconstruct_deck(&container, &media, &ctx.options.layout)?;
    Ok(Preview::Slides(deck))
}

/// Gallery of every extractable picture. Fails when there are none.
pub fn image_only(ctx: &StageContext<'_>) -> Result<Preview> {
    let media = ctx.cache.media(ctx.document)?;
    if media.is_empty() {
        return Err(Error::NoExtractableContent(
            "no images could be extracted".to_string(),
        ));
    }
    let gallery = media
        .assets()
        .iter()
        .enumerate()
        .map(|(i, asset)| GalleryEntry {
            number: i + 1,
            label: format!("Image {}", i + 1),
            asset: Arc::clone(asset),
        })
        .collect();
    Ok(Preview::Gallery(gallery))
}

/// Plain text of every slide. Fails when no slide yields any text.
pub fn text_only(ctx: &StageContext<'_>) -> Result<Preview> {
    let container = ctx.cache.container(ctx.document)?;
    let outline = outline::extract_outline(&container);
    if outline.text_count == 0 {
        return Err(Error::NoExtractableContent(format!(
            "no text found in {} slides",
            outline.slides.len()
        )));
    }
    Ok(Preview::TextOutline(outline.slides))
}

/// Information card. Never fails.
pub fn fallback(ctx: &StageContext<'_>) -> Result<Preview> {
    Ok(fallback_preview(ctx.document))
}

pub(crate) fn fallback_preview(document: &SourceDocument) -> Preview {
    Preview::Fallback(FallbackSummary::new(document.name(), document.size()))
}
