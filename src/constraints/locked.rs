//! Direct successors with a frozen anchor.
//!
//! SS and SF edges hang off the task's *start*. When the successor end of
//! such an edge is frozen (a start-locked successor on SS, an end-locked
//! one on SF), the task's start is capped without looking any further
//! downstream:
//!
//! ```text
//! task.x ≤ frozen_anchor − min_px
//! ```

use crate::constraints::offset::{anchor_x, edge_offset};
use crate::index::RelationshipSource;
use crate::lookup::{PositionLookup, TaskLookup};
use crate::models::Anchor;

/// Cap on `task_id`'s start from locked direct successors. `+∞` if none.
pub fn locked_successor_max_x(
    task_id: &str,
    source: &dyn RelationshipSource,
    positions: &dyn PositionLookup,
    tasks: &dyn TaskLookup,
    px_per_day: f64,
) -> f64 {
    let mut bound = f64::INFINITY;

    for rel in source.outgoing(task_id) {
        if rel.kind.predecessor_anchor() != Anchor::Start || rel.is_self_reference() {
            continue;
        }
        let frozen_anchor = rel.kind.successor_anchor();
        if !tasks.lock_state(&rel.to).freezes(frozen_anchor) {
            continue;
        }
        let Some(bar) = positions.position(&rel.to) else {
            continue;
        };
        let cap = anchor_x(&bar, frozen_anchor) - edge_offset(rel, px_per_day).min_px;
        bound = bound.min(cap);
    }

    bound
}
