//! Viewing state over a reconstructed deck.
//!
//! The navigator owns the slides of the current file together with the
//! selected slide, the zoom level and the fullscreen flag. Loading another
//! file means building a new navigator.

use crate::model::{MediaAsset, Preview, Slide, SlideScene};
use serde::Serialize;
use std::sync::Arc;

/// Zoom level of a freshly loaded deck.
pub const DEFAULT_ZOOM: u32 = 100;
pub const MIN_ZOOM: u32 = 50;
pub const MAX_ZOOM: u32 = 200;
pub const ZOOM_STEP: u32 = 10;

/// Upper bound of the fit-to-width zoom.
pub const MAX_FIT_ZOOM: u32 = 150;

/// Horizontal room kept free around the canvas when fitting.
pub const FIT_MARGIN: f64 = 40.0;

/// Keys the navigator reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Up,
    Right,
    Down,
}

/// What a thumbnail shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ThumbnailPreview {
    /// First picture of the slide
    Image(Arc<MediaAsset>),
    /// Marker for slides without pictures
    Text(String),
}

/// Marker shown for slides without pictures.
pub const TEXT_THUMBNAIL_MARKER: &str = "📝";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Thumbnail {
    /// 1-based slide number
    pub number: usize,
    pub title: String,
    pub preview: ThumbnailPreview,
}

/// Selected slide, zoom and fullscreen state over a deck.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigator {
    slides: Vec<Slide>,
    current: usize,
    zoom: u32,
    fullscreen: bool,
}

impl Navigator {
    pub fn new(slides: Vec<Slide>) -> Self {
        Self {
            slides,
            current: 0,
            zoom: DEFAULT_ZOOM,
            fullscreen: false,
        }
    }

    /// Navigator over the slides of a preview, if it has any.
    pub fn from_preview(preview: &Preview) -> Option<Self> {
        preview.as_deck().map(|deck| Self::new(deck.slides.clone()))
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// 0-based index of the selected slide.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&Slide> {
        self.slides.get(self.current)
    }

    /// Scene of the selected slide.
    pub fn current_scene(&self) -> Option<SlideScene<'_>> {
        self.current().map(SlideScene::compose)
    }

    /// Select slide `index`. Out-of-range indices are ignored.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index < self.slides.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.slides.len()
    }

    pub fn next(&mut self) -> bool {
        self.has_next() && self.go_to(self.current + 1)
    }

    pub fn previous(&mut self) -> bool {
        self.has_previous() && self.go_to(self.current - 1)
    }

    /// Left and up go back, right and down go forward.
    pub fn handle_key(&mut self, key: NavKey) -> bool {
        match key {
            NavKey::Left | NavKey::Up => self.previous(),
            NavKey::Right | NavKey::Down => self.next(),
        }
    }

    /// Zoom in percent.
    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    pub fn zoom_in(&mut self) -> u32 {
        self.zoom = (self.zoom + ZOOM_STEP).min(MAX_ZOOM);
        self.zoom
    }

    pub fn zoom_out(&mut self) -> u32 {
        self.zoom = self.zoom.saturating_sub(ZOOM_STEP).max(MIN_ZOOM);
        self.zoom
    }

    /// Zoom so a canvas of `canvas_width` fits a container of
    /// `container_width`. A zero-width canvas resets the zoom.
    pub fn fit_to_width(&mut self, container_width: f64, canvas_width: f64) -> u32 {
        self.zoom = fit_zoom(container_width, canvas_width);
        self.zoom
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn toggle_fullscreen(&mut self) -> bool {
        self.fullscreen = !self.fullscreen;
        self.fullscreen
    }

    /// "current / total", 1-based.
    pub fn counter(&self) -> String {
        if self.slides.is_empty() {
            return "0 / 0".to_string();
        }
        format!("{} / {}", self.current + 1, self.slides.len())
    }

    pub fn thumbnails(&self) -> Vec<Thumbnail> {
        self.slides.iter().map(thumbnail).collect()
    }
}

/// Fit-to-width zoom, clamped to 50..=150.
pub fn fit_zoom(container_width: f64, canvas_width: f64) -> u32 {
    if canvas_width <= 0.0 {
        return DEFAULT_ZOOM;
    }
    let ratio = ((container_width - FIT_MARGIN) / canvas_width * 100.0).round();
    ratio.clamp(MIN_ZOOM as f64, MAX_FIT_ZOOM as f64) as u32
}

fn thumbnail(slide: &Slide) -> Thumbnail {
    let preview = match slide.images().next() {
        Some(image) => ThumbnailPreview::Image(Arc::clone(&image.asset)),
        None => ThumbnailPreview::Text(TEXT_THUMBNAIL_MARKER.to_string()),
    };
    Thumbnail {
        number: slide.index,
        title: slide.title.clone(),
        preview,
    }
}
