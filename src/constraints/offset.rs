//! Single-edge pixel offsets.
//!
//! Converts one relationship's `(lag, min, max)` into the legal pixel gap
//! between the two anchors it binds:
//!
//! ```text
//! min_px = (lag + min) * px_per_day
//! max_px = (lag + max) * px_per_day     (+∞ when max is absent)
//! ```
//!
//! Negative offsets are legal (lead time).

use crate::models::{Anchor, BarPosition, Relationship};

/// Legal gap `[min_px, max_px]` between predecessor and successor anchors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeOffset {
    /// Smallest gap, px.
    pub min_px: f64,
    /// Largest gap, px. `+∞` for elastic edges.
    pub max_px: f64,
}

impl EdgeOffset {
    /// Whether the edge has no upper gap.
    #[inline]
    pub fn is_elastic(&self) -> bool {
        self.max_px == f64::INFINITY
    }
}

/// Pixel interval of one relationship.
pub fn edge_offset(rel: &Relationship, px_per_day: f64) -> EdgeOffset {
    EdgeOffset {
        min_px: (rel.lag + rel.min) * px_per_day,
        max_px: match rel.max {
            Some(max) => (rel.lag + max) * px_per_day,
            None => f64::INFINITY,
        },
    }
}

/// Pixel position of a bar anchor.
#[inline]
pub fn anchor_x(bar: &BarPosition, anchor: Anchor) -> f64 {
    match anchor {
        Anchor::Start => bar.x,
        Anchor::End => bar.end(),
    }
}

/// Converts a bound on an anchor into a bound on the bar's start.
#[inline]
pub fn start_from_anchor(value: f64, anchor: Anchor, width: f64) -> f64 {
    match anchor {
        Anchor::Start => value,
        Anchor::End => value - width,
    }
}

/// Smallest successor start allowed by this one edge.
///
/// Other edges into the same successor are ignored on purpose: the cascade
/// asks whether *this* edge is violated, not what the aggregate bound is.
pub fn required_successor_x(
    rel: &Relationship,
    predecessor: &BarPosition,
    successor_width: f64,
    px_per_day: f64,
) -> f64 {
    let target = anchor_x(predecessor, rel.kind.predecessor_anchor())
        + edge_offset(rel, px_per_day).min_px;
    start_from_anchor(target, rel.kind.successor_anchor(), successor_width)
}
