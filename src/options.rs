//! Viewer configuration.

use crate::pipeline::StageKind;

/// Geometry constants used while laying out slides.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Padding added around the element union, in pixels
    pub padding: i64,

    /// Smallest canvas width
    pub min_canvas_width: i64,

    /// Smallest canvas height
    pub min_canvas_height: i64,

    /// Per-paragraph offset used when a shape has no spacing hints
    pub line_height: i64,

    /// Smallest horizontal slot given to one run
    pub run_min_width: i64,

    /// Smallest height given to one paragraph block
    pub paragraph_min_height: i64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            padding: 20,
            min_canvas_width: 600,
            min_canvas_height: 400,
            line_height: 30,
            run_min_width: 80,
            paragraph_min_height: 25,
        }
    }
}

/// Options for previewing a document.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerOptions {
    pub layout: LayoutOptions,

    /// Stages tried in order. Fallback is always appended when missing.
    pub stages: Vec<StageKind>,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            layout: LayoutOptions::default(),
            stages: StageKind::ALL.to_vec(),
        }
    }
}

impl ViewerOptions {
    /// Create default viewer options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas padding.
    pub fn with_padding(mut self, padding: i64) -> Self {
        self.layout.padding = padding.max(0);
        self
    }

    /// Set the minimum canvas size.
    pub fn with_min_canvas(mut self, width: i64, height: i64) -> Self {
        self.layout.min_canvas_width = width.max(0);
        self.layout.min_canvas_height = height.max(0);
        self
    }

    /// Set the per-paragraph line height estimate.
    pub fn with_line_height(mut self, line_height: i64) -> Self {
        self.layout.line_height = line_height.max(0);
        self
    }

    /// Restrict the pipeline to `stages`, in the given order.
    pub fn with_stages(mut self, stages: impl IntoIterator<Item = StageKind>) -> Self {
        self.stages = stages.into_iter().collect();
        self
    }

    /// Only extract text (skips positional reconstruction and the gallery).
    pub fn text_only(self) -> Self {
        self.with_stages([StageKind::TextOnly])
    }

    /// The stage list actually run: configured order, duplicates removed,
    /// Fallback last.
    pub fn effective_stages(&self) -> Vec<StageKind> {
        let mut stages: Vec<StageKind> = Vec::with_capacity(self.stages.len() + 1);
        for kind in &self.stages {
            if *kind != StageKind::Fallback && !stages.contains(kind) {
                stages.push(*kind);
            }
        }
        stages.push(StageKind::Fallback);
        stages
    }
}
