//! PPTX (PowerPoint) layout reconstruction.
//!
//! Components, leaves first:
//!
//! - [`relationships`]: per-slide `r:embed` id to image part maps
//! - [`media`]: every raster image of the package, read once
//! - [`position`]: shape transforms to pixel positions
//! - [`formatting`]: paragraph and run styles
//! - [`shapes`]: shapes split into positioned text and image elements
//! - [`assembler`]: ordered, bounded, titled slides
//! - [`outline`]: plain text per slide, for the text-only mode

pub mod assembler;
pub mod formatting;
pub mod media;
pub mod outline;
pub mod position;
pub mod relationships;
pub mod shapes;

pub use assembler::{reconstruct_deck, reconstruct_slides, SlideAssembler, SlidePart};
pub use media::MediaTable;
pub use relationships::{Relationship, RelationshipKind, SlideRelationships};
pub use shapes::ShapeExtractor;
