//! # unslide
//!
//! Slide layout reconstruction for PowerPoint packages.
//!
//! This library rebuilds a positioned, styled view of every slide in a
//! `.pptx` file: text blocks and pictures with pixel positions, per-run
//! formatting and a canvas sized to the slide content. When a package is
//! too damaged for that, it degrades step by step to an image gallery, a
//! plain text outline and finally an information card.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unslide::{render, Viewer};
//!
//! let outcome = Viewer::new().preview_file("deck.pptx")?;
//! println!("settled on {} stage", outcome.stage);
//!
//! let html = render::to_html(&outcome.preview, &render::RenderOptions::default())?;
//! std::fs::write("deck.html", html)?;
//! # Ok::<(), unslide::Error>(())
//! ```
//!
//! ## Slides only
//!
//! ```no_run
//! let data = std::fs::read("deck.pptx")?;
//! let slides = unslide::reconstruct(&data)?;
//! for slide in &slides {
//!     println!("{}: {} elements", slide.title, slide.elements.len());
//! }
//! # Ok::<(), unslide::Error>(())
//! ```
//!
//! ## Features
//!
//! - `async`: Async file loading with Tokio

pub mod cache;
pub mod container;
pub mod detect;
pub mod document;
pub mod error;
pub mod model;
pub mod navigator;
pub mod options;
pub mod pipeline;
pub mod pptx;
pub mod render;
pub mod xml;

// Re-exports
pub use cache::{LoadCache, SessionCache};
pub use container::OoxmlContainer;
pub use detect::{detect_format_from_bytes, FormatType};
pub use document::{DocumentKey, SourceDocument};
pub use error::{Error, ErrorKind, Result};
pub use model::{
    Bounds, Element, FallbackSummary, GalleryEntry, ImageElement, MediaAsset, Position, Preview,
    Slide, SlideDeck, SlideScene, StyleSet, TextAlign, TextElement, TextOutlineSlide, TextSegment,
};
pub use navigator::{NavKey, Navigator, Thumbnail, ThumbnailPreview};
pub use options::{LayoutOptions, ViewerOptions};
pub use pipeline::{PipelineOutcome, RenderPipeline, StageAttempt, StageContext, StageKind};

use log::info;
use std::path::Path;
use std::sync::Arc;

/// Runs the render pipeline over documents.
///
/// A viewer owns the session cache shared by the stages of a run. Each
/// preview starts from an empty cache so a newly loaded file never sees
/// resources of the previous one.
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    options: ViewerOptions,
    cache: Arc<SessionCache>,
}

impl Viewer {
    /// Viewer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ViewerOptions) -> Self {
        Self {
            options,
            cache: Arc::new(SessionCache::new()),
        }
    }

    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    /// Run the pipeline over `document`. Never fails: the worst outcome is
    /// the fallback card.
    pub fn preview(&self, document: &SourceDocument) -> PipelineOutcome {
        self.cache.clear();
        let ctx = StageContext {
            document,
            options: &self.options,
            cache: &self.cache,
        };
        let outcome = RenderPipeline::new(&self.options).run(&ctx);
        info!(
            "{}: {} preview after {} failed stage(s)",
            document.name(),
            outcome.stage,
            outcome.attempts.len()
        );
        outcome
    }

    /// Preview in-memory bytes.
    pub fn preview_bytes(&self, name: &str, bytes: impl Into<Arc<[u8]>>) -> PipelineOutcome {
        self.preview(&SourceDocument::new(name, bytes))
    }

    /// Preview a file on disk. Fails only when the file cannot be read.
    pub fn preview_file(&self, path: impl AsRef<Path>) -> Result<PipelineOutcome> {
        let document = SourceDocument::from_path(path)?;
        Ok(self.preview(&document))
    }

    /// Preview a file on disk without blocking the runtime.
    #[cfg(feature = "async")]
    pub async fn preview_file_async(&self, path: impl AsRef<Path>) -> Result<PipelineOutcome> {
        let document = SourceDocument::from_path_async(path).await?;
        let viewer = self.clone();
        tokio::task::spawn_blocking(move || viewer.preview(&document))
            .await
            .map_err(|e| Error::Render(format!("preview task failed: {}", e)))
    }
}

/// Reconstruct the slides of a presentation package.
///
/// Unlike [`Viewer::preview`] this does not degrade: an unreadable archive
/// or a package without slides is an error. Unparsable slides still become
/// placeholders.
///
/// # Example
///
/// ```no_run
/// let data = std::fs::read("deck.pptx")?;
/// let slides = unslide::reconstruct(&data)?;
/// println!("{} slides", slides.len());
/// # Ok::<(), unslide::Error>(())
/// ```
pub fn reconstruct(data: &[u8]) -> Result<Vec<Slide>> {
    reconstruct_with_options(data, &LayoutOptions::default())
}

/// Reconstruct slides with custom layout constants.
pub fn reconstruct_with_options(data: &[u8], layout: &LayoutOptions) -> Result<Vec<Slide>> {
    let container = OoxmlContainer::from_bytes(data.to_vec())?;
    let media = pptx::MediaTable::extract(&container);
    pptx::reconstruct_slides(&container, &media, layout)
}
