//! Bar position model.
//!
//! A bar is the on-screen rectangle of a task. The engine reasons about the
//! time axis only (`x`, `width`); `y` and `height` are carried through so
//! callers can hand over their own geometry unchanged.

use serde::{Deserialize, Serialize};

/// Pixel-space rectangle of a task bar.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct BarPosition {
    /// Left edge (start anchor), px.
    pub x: f64,
    /// Row offset, px. Not used by the engine.
    pub y: f64,
    /// Bar length on the time axis, px.
    pub width: f64,
    /// Row height, px. Not used by the engine.
    pub height: f64,
}

impl BarPosition {
    /// Creates a bar at `x` with the given `width` (y/height zero).
    pub fn new(x: f64, width: f64) -> Self {
        Self {
            x,
            y: 0.0,
            width,
            height: 0.0,
        }
    }

    /// Sets the row geometry.
    pub fn with_row(mut self, y: f64, height: f64) -> Self {
        self.y = y;
        self.height = height;
        self
    }

    /// Right edge (end anchor), px.
    #[inline]
    pub fn end(&self) -> f64 {
        self.x + self.width
    }

    /// Same bar, moved to `x`.
    pub fn moved_to(self, x: f64) -> Self {
        Self { x, ..self }
    }

    /// Same bar, with a new start and width.
    pub fn reshaped(self, x: f64, width: f64) -> Self {
        Self { x, width, ..self }
    }
}
