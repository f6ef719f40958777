//! Render pipeline: an ordered list of fallible extraction strategies.
//!
//! Each stage is a plain function from a [`StageContext`] to a [`Preview`].
//! [`RenderPipeline::run`] tries them in order and commits to the first that
//! returns `Ok`; an error moves on to the next stage. The last stage is
//! always [`StageKind::Fallback`], which cannot fail, so a run always ends
//! with something to show.

pub mod stages;

use crate::cache::SessionCache;
use crate::document::SourceDocument;
use crate::error::{ErrorKind, Result};
use crate::model::Preview;
use crate::options::ViewerOptions;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StageKind {
    /// Positioned slides with text and pictures
    Combined,
    /// Flat gallery of the package's pictures
    ImageOnly,
    /// Title and body text per slide
    TextOnly,
    /// Static information card
    Fallback,
}

impl StageKind {
    /// Every stage, in cascade order.
    pub const ALL: [StageKind; 4] = [
        StageKind::Combined,
        StageKind::ImageOnly,
        StageKind::TextOnly,
        StageKind::Fallback,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StageKind::Combined => "combined",
            StageKind::ImageOnly => "image-only",
            StageKind::TextOnly => "text-only",
            StageKind::Fallback => "fallback",
        }
    }

    /// The built-in stage for this kind.
    pub fn stage(self) -> Stage {
        let run: StageFn = match self {
            StageKind::Combined => stages::combined,
            StageKind::ImageOnly => stages::image_only,
            StageKind::TextOnly => stages::text_only,
            StageKind::Fallback => stages::fallback,
        };
        Stage { kind: self, run }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a stage may use.
#[derive(Debug, Clone, Copy)]
pub struct StageContext<'a> {
    pub document: &'a SourceDocument,
    pub options: &'a ViewerOptions,
    pub cache: &'a SessionCache,
}

/// Signature of a stage.
pub type StageFn = fn(&StageContext<'_>) -> Result<Preview>;

/// A named extraction strategy.
#[derive(Clone, Copy)]
pub struct Stage {
    pub kind: StageKind,
    pub run: StageFn,
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage").field("kind", &self.kind).finish()
    }
}

/// A stage that failed before the pipeline settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageAttempt {
    pub stage: StageKind,
    #[serde(skip)]
    pub kind: ErrorKind,
    pub message: String,
}

/// Result of a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOutcome {
    /// Stage whose preview was kept
    pub stage: StageKind,
    pub preview: Preview,
    /// Stages that failed first, in order
    pub attempts: Vec<StageAttempt>,
}

/// Ordered chain of stages.
#[derive(Debug, Clone)]
pub struct RenderPipeline {
    stages: Vec<Stage>,
}

impl RenderPipeline {
    /// Pipeline for the stage list of `options`.
    pub fn new(options: &ViewerOptions) -> Self {
        Self {
            stages: options
                .effective_stages()
                .into_iter()
                .map(StageKind::stage)
                .collect(),
        }
    }

    /// Pipeline with custom stages. A fallback stage is appended when the
    /// list does not end with one.
    pub fn with_stages(mut stages: Vec<Stage>) -> Self {
        if stages.last().map(|s| s.kind) != Some(StageKind::Fallback) {
            stages.push(StageKind::Fallback.stage());
        }
        Self { stages }
    }

    /// Kinds of the stages, in order.
    pub fn kinds(&self) -> Vec<StageKind> {
        self.stages.iter().map(|s| s.kind).collect()
    }

    /// Run stages until one succeeds.
    pub fn run(&self, ctx: &StageContext<'_>) -> PipelineOutcome {
        let mut attempts = Vec::new();

        for stage in &self.stages {
            debug!("{}: trying {} stage", ctx.document.name(), stage.kind);
            match (stage.run)(ctx) {
                Ok(preview) => {
                    debug!("{}: settled on {} stage", ctx.document.name(), stage.kind);
                    return PipelineOutcome {
                        stage: stage.kind,
                        preview,
                        attempts,
                    };
                }
                Err(e) => {
                    warn!("{}: {} stage failed: {}", ctx.document.name(), stage.kind, e);
                    attempts.push(StageAttempt {
                        stage: stage.kind,
                        kind: e.kind(),
                        message: e.to_string(),
                    });
                }
            }
        }

        // only reachable when a custom fallback stage failed
        PipelineOutcome {
            stage: StageKind::Fallback,
            preview: stages::fallback_preview(ctx.document),
            attempts,
        }
    }
}
