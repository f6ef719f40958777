//! Pixel geometry: element positions, canvas bounds, EMU conversion.

use serde::{Deserialize, Serialize};

/// English Metric Units per inch.
pub const EMUS_PER_INCH: f64 = 914_400.0;

/// Display pixels per inch.
pub const PIXELS_PER_INCH: f64 = 96.0;

/// Convert EMU to display pixels: `round(emu / 914400 * 96)`.
#[inline]
pub fn emu_to_px(emu: i64) -> i64 {
    (emu as f64 / EMUS_PER_INCH * PIXELS_PER_INCH).round() as i64
}

/// Placement of an element on the slide canvas, in pixels.
///
/// `width` and `height` are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Position {
    /// Used when a shape carries no transform at all.
    pub const FALLBACK: Position = Position {
        x: 50,
        y: 50,
        width: 200,
        height: 50,
    };

    /// Create a position, clamping negative extents to zero.
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width: width.max(0),
            height: height.max(0),
        }
    }

    /// Right edge.
    pub fn right(&self) -> i64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> i64 {
        self.y + self.height
    }
}

/// The canvas needed to show every element of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: i64,
    pub min_y: i64,
    pub width: i64,
    pub height: i64,
}

impl Bounds {
    /// Canvas for a slide without elements.
    pub const EMPTY_SLIDE: Bounds = Bounds {
        min_x: 0,
        min_y: 0,
        width: 800,
        height: 600,
    };

    /// Union of `positions`, grown by `padding` on every side, with the
    /// resulting size raised to at least `min_width` x `min_height`.
    pub fn enclosing<'a>(
        positions: impl IntoIterator<Item = &'a Position>,
        padding: i64,
        min_width: i64,
        min_height: i64,
    ) -> Self {
        let mut iter = positions.into_iter();
        let Some(first) = iter.next() else {
            return Self::EMPTY_SLIDE;
        };

        let (mut min_x, mut min_y) = (first.x, first.y);
        let (mut max_x, mut max_y) = (first.right(), first.bottom());
        for pos in iter {
            min_x = min_x.min(pos.x);
            min_y = min_y.min(pos.y);
            max_x = max_x.max(pos.right());
            max_y = max_y.max(pos.bottom());
        }

        min_x -= padding;
        min_y -= padding;
        max_x += padding;
        max_y += padding;

        Self {
            min_x,
            min_y,
            width: (max_x - min_x).max(min_width),
            height: (max_y - min_y).max(min_height),
        }
    }

    /// Translate a slide position into canvas coordinates.
    pub fn relative(&self, pos: &Position) -> (i64, i64) {
        (pos.x - self.min_x, pos.y - self.min_y)
    }
}
