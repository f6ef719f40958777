//! Presentation model.
//!
//! Format-neutral structures produced by the reconstruction stages and
//! consumed by the renderers and the navigator.

mod geometry;
mod media;
mod preview;
mod scene;
mod slide;
mod style;

pub use geometry::*;
pub use media::*;
pub use preview::*;
pub use scene::*;
pub use slide::*;
pub use style::*;
