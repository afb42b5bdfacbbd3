//! Bounds imposed on a task by its predecessors.
//!
//! Folds every incoming edge into one interval on the task's start.
//!
//! # Algorithm
//! For each edge `p → task`:
//! 1. Take the predecessor anchor (end for FS/FF, start for SS/SF).
//! 2. Add the edge's `[min_px, max_px]` gap.
//! 3. FF/SF bind the task's *end*; subtract the width to get a start bound.
//!
//! The lower bound is the maximum over edges (tightest predecessor wins),
//! the upper bound the minimum over finite values.
//!
//! Edges whose predecessor has no bar, and self-references, are vacuous.

use crate::constraints::offset::{anchor_x, edge_offset};
use crate::index::RelationshipSource;
use crate::lookup::PositionLookup;
use crate::models::Anchor;

/// Incoming bounds split by the anchor they bind.
///
/// Kept apart so a resize can use only the moving edge's bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncomingBounds {
    /// Largest start lower bound (FS/SS), if any edge contributes.
    pub start_min: Option<f64>,
    /// Smallest start upper bound (FS/SS). `+∞` if none.
    pub start_max: f64,
    /// Largest end lower bound (FF/SF), if any edge contributes.
    pub end_min: Option<f64>,
    /// Smallest end upper bound (FF/SF). `+∞` if none.
    pub end_max: f64,
}

impl Default for IncomingBounds {
    fn default() -> Self {
        Self {
            start_min: None,
            start_max: f64::INFINITY,
            end_min: None,
            end_max: f64::INFINITY,
        }
    }
}

impl IncomingBounds {
    /// Lower bound on the start for a bar of `width`. `0` if no edge.
    pub fn min_x(&self, width: f64) -> f64 {
        match (self.start_min, self.end_min.map(|e| e - width)) {
            (Some(s), Some(e)) => s.max(e),
            (Some(s), None) => s,
            (None, Some(e)) => e,
            (None, None) => 0.0,
        }
    }

    /// Upper bound on the start for a bar of `width`. `+∞` if none.
    pub fn max_x(&self, width: f64) -> f64 {
        self.start_max.min(self.end_max - width)
    }
}

fn raise(slot: &mut Option<f64>, value: f64) {
    if value.is_nan() {
        return;
    }
    *slot = Some(slot.map_or(value, |current| current.max(value)));
}

/// Folds the incoming edges of `task_id` into per-anchor bounds.
pub fn incoming_bounds(
    task_id: &str,
    source: &dyn RelationshipSource,
    positions: &dyn PositionLookup,
    px_per_day: f64,
) -> IncomingBounds {
    let mut bounds = IncomingBounds::default();

    for rel in source.incoming(task_id) {
        if rel.is_self_reference() {
            continue;
        }
        let Some(pred) = positions.position(&rel.from) else {
            continue;
        };

        let anchor = anchor_x(&pred, rel.kind.predecessor_anchor());
        let offset = edge_offset(rel, px_per_day);
        let low = anchor + offset.min_px;
        let high = anchor + offset.max_px;

        match rel.kind.successor_anchor() {
            Anchor::Start => {
                raise(&mut bounds.start_min, low);
                bounds.start_max = bounds.start_max.min(high);
            }
            Anchor::End => {
                raise(&mut bounds.end_min, low);
                bounds.end_max = bounds.end_max.min(high);
            }
        }
    }

    bounds
}

/// Tightest lower bound on `task_id`'s start imposed by its predecessors.
///
/// Returns `0` when the task has no (usable) incoming edge.
pub fn predecessor_min_x(
    task_id: &str,
    source: &dyn RelationshipSource,
    positions: &dyn PositionLookup,
    px_per_day: f64,
    width: f64,
) -> f64 {
    incoming_bounds(task_id, source, positions, px_per_day).min_x(width)
}

/// Tightest upper bound on `task_id`'s start imposed by its predecessors.
///
/// Returns `+∞` when no incoming edge has a finite maximum.
pub fn predecessor_max_x(
    task_id: &str,
    source: &dyn RelationshipSource,
    positions: &dyn PositionLookup,
    px_per_day: f64,
    width: f64,
) -> f64 {
    incoming_bounds(task_id, source, positions, px_per_day).max_x(width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BarPosition, Relationship, RelationshipKind};
    use std::collections::HashMap;

    fn positions(entries: &[(&str, f64, f64)]) -> HashMap<String, BarPosition> {
        entries
            .iter()
            .map(|&(id, x, w)| (id.to_string(), BarPosition::new(x, w)))
            .collect()
    }

    #[test]
    fn test_no_predecessors() {
        let rels: Vec<Relationship> = vec![];
        let pos = positions(&[("A", 10.0, 10.0)]);
        assert_eq!(predecessor_min_x("A", &rels, &pos, 10.0, 10.0), 0.0);
        assert_eq!(predecessor_max_x("A", &rels, &pos, 10.0, 10.0), f64::INFINITY);
    }

    #[test]
    fn test_most_restrictive_predecessor_wins() {
        // P1 ends at 100, P2 ends at 140
        let rels = vec![
            Relationship::finish_to_start("P1", "T"),
            Relationship::finish_to_start("P2", "T").with_lag(1.0),
        ];
        let pos = positions(&[("P1", 50.0, 50.0), ("P2", 100.0, 40.0), ("T", 0.0, 30.0)]);
        assert_eq!(predecessor_min_x("T", &rels, &pos, 10.0, 30.0), 150.0);
    }

    #[test]
    fn test_end_bound_subtracts_width() {
        // FF: T.end >= P.end (=100) → T.x >= 100 - 30
        let rels = vec![Relationship::new("P", "T", RelationshipKind::FinishToFinish)];
        let pos = positions(&[("P", 50.0, 50.0)]);
        assert_eq!(predecessor_min_x("T", &rels, &pos, 10.0, 30.0), 70.0);
    }

    #[test]
    fn test_negative_contribution_is_kept() {
        let rels = vec![Relationship::new("P", "T", RelationshipKind::StartToStart).with_lag(-5.0)];
        let pos = positions(&[("P", 20.0, 10.0)]);
        assert_eq!(predecessor_min_x("T", &rels, &pos, 10.0, 30.0), -30.0);
    }

    #[test]
    fn test_max_x_bounded_and_elastic() {
        let rels = vec![
            Relationship::finish_to_start("P1", "T").with_max(2.0),
            Relationship::finish_to_start("P2", "T"),
            Relationship::new("P3", "T", RelationshipKind::FinishToFinish).with_max(1.0),
        ];
        let pos = positions(&[("P1", 0.0, 100.0), ("P2", 0.0, 10.0), ("P3", 0.0, 200.0)]);
        // P1: start <= 100 + 20 = 120; P3: end <= 210 → start <= 210 - 40 = 170
        assert_eq!(predecessor_max_x("T", &rels, &pos, 10.0, 40.0), 120.0);
        // P2 alone is elastic
        let elastic = vec![rels[1].clone()];
        assert_eq!(predecessor_max_x("T", &elastic, &pos, 10.0, 40.0), f64::INFINITY);
    }

    #[test]
    fn test_missing_predecessor_is_vacuous() {
        let rels = vec![
            Relationship::finish_to_start("ghost", "T").with_lag(100.0),
            Relationship::finish_to_start("T", "T"),
        ];
        let pos = positions(&[("T", 10.0, 10.0)]);
        assert_eq!(predecessor_min_x("T", &rels, &pos, 10.0, 10.0), 0.0);
    }

    #[test]
    fn test_incoming_bounds_split_by_anchor() {
        let rels = vec![
            Relationship::finish_to_start("P", "T"),
            Relationship::new("Q", "T", RelationshipKind::StartToFinish).with_max(0.0),
        ];
        let pos = positions(&[("P", 0.0, 20.0), ("Q", 60.0, 10.0)]);
        let b = incoming_bounds("T", &rels, &pos, 10.0);
        assert_eq!(b.start_min, Some(20.0));
        assert_eq!(b.start_max, f64::INFINITY);
        assert_eq!(b.end_min, Some(60.0));
        assert_eq!(b.end_max, 60.0);
    }
}
