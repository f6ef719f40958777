//! Rendering options configuration.

/// How pictures are referenced from HTML output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MediaEmbedding {
    /// Inline `data:` URIs carrying the image bytes
    #[default]
    DataUri,
    /// Relative links of the form `{prefix}{file name}`
    Link,
}

/// Options for rendering previews.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// How pictures are referenced in HTML
    pub media: MediaEmbedding,

    /// Prefix for linked image paths (e.g., "media/")
    pub media_path_prefix: String,

    /// Canvas zoom in percent, applied as a CSS scale
    pub zoom: u32,

    /// Render every slide instead of only `current_slide`
    pub all_slides: bool,

    /// 0-based slide rendered when `all_slides` is off
    pub current_slide: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            media: MediaEmbedding::DataUri,
            media_path_prefix: String::new(),
            zoom: 100,
            all_slides: true,
            current_slide: 0,
        }
    }
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Link pictures under `prefix` instead of inlining them.
    pub fn with_linked_media(mut self, prefix: impl Into<String>) -> Self {
        self.media = MediaEmbedding::Link;
        self.media_path_prefix = prefix.into();
        self
    }

    pub fn with_zoom(mut self, zoom: u32) -> Self {
        self.zoom = zoom;
        self
    }

    /// Render only slide `index` (0-based).
    pub fn with_single_slide(mut self, index: usize) -> Self {
        self.all_slides = false;
        self.current_slide = index;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = RenderOptions::default();
        assert_eq!(opts.media, MediaEmbedding::DataUri);
        assert_eq!(opts.zoom, 100);
        assert!(opts.all_slides);
    }

    #[test]
    fn test_builder_pattern() {
        let opts = RenderOptions::new()
            .with_linked_media("assets/")
            .with_zoom(150)
            .with_single_slide(2);

        assert_eq!(opts.media, MediaEmbedding::Link);
        assert_eq!(opts.media_path_prefix, "assets/");
        assert_eq!(opts.zoom, 150);
        assert!(!opts.all_slides);
        assert_eq!(opts.current_slide, 2);
    }
}
