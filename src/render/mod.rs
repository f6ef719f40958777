//! Output rendering for previews.
//!
//! This module provides renderers for converting pipeline previews
//! to various output formats: HTML, plain text, and JSON.
//!
//! # Example
//!
//! ```no_run
//! use unslide::{render::*, Viewer};
//!
//! let outcome = Viewer::new().preview_file("deck.pptx")?;
//!
//! // Render to HTML with inline images
//! let html = to_html(&outcome.preview, &RenderOptions::default())?;
//!
//! // Render to plain text
//! let text = to_text(&outcome.preview)?;
//!
//! // Render the whole outcome to JSON
//! let json = to_json(&outcome, JsonFormat::Pretty)?;
//! # Ok::<(), unslide::Error>(())
//! ```

mod html;
mod json;
mod options;
mod text;

pub use html::{
    escape_html, media_src, render_slide, segments_html, text_html, to_html, to_html_document,
    EMPTY_BODY_NOTICE, EMPTY_SLIDE_NOTICE,
};
pub use json::{to_json, to_json_default, JsonFormat};
pub use options::{MediaEmbedding, RenderOptions};
pub use text::to_text;
