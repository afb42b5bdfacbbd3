//! Forward cascade of an accepted position.
//!
//! # Algorithm
//! Breadth-first walk over successor edges, starting at the moved bar:
//! 1. For each outgoing edge, compute the successor start required by that
//!    edge alone.
//! 2. Already satisfied: nothing to do.
//! 3. Locked successor: absorbs the push, is never recorded, and the walk
//!    stops there.
//! 4. Otherwise record `{x: required}` and continue from the successor's
//!    new position.
//!
//! Only lower bounds are enforced; successors are never pulled left. A task
//! already moved is queued again only when a later edge demands a strictly
//! larger start.
//!
//! # Termination
//! Every edge is a difference constraint `succ.x ≥ pred.x + c`, so this is a
//! FIFO longest-path relaxation. Without a cycle, no task leaves the queue
//! more often than there are tasks reachable from the origin. A task that
//! exceeds that count sits on a cycle and is not expanded further.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{trace, warn};

use super::ConstraintEngine;
use crate::constraints::offset::required_successor_x;
use crate::index::RelationshipSource;
use crate::lookup::{PositionLookup, TaskLookup};
use crate::models::{BarPosition, CascadeUpdates, PositionUpdate};

/// Computes the position updates triggered by placing `origin_id` at
/// `origin_bar`.
pub fn propagate(
    origin_id: &str,
    origin_bar: BarPosition,
    source: &dyn RelationshipSource,
    positions: &dyn PositionLookup,
    tasks: &dyn TaskLookup,
    px_per_day: f64,
) -> CascadeUpdates {
    let mut updates = CascadeUpdates::new();
    if !source.has_outgoing(origin_id) {
        return updates;
    }

    let max_dequeues = source.reachable_count(origin_id);
    let mut moved: HashMap<&str, BarPosition> = HashMap::new();
    moved.insert(origin_id, origin_bar);
    let mut dequeues: HashMap<&str, usize> = HashMap::new();
    let mut queued: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    queue.push_back(origin_id);

    while let Some(id) = queue.pop_front() {
        queued.remove(id);
        let count = dequeues.entry(id).or_insert(0);
        *count += 1;
        if *count > max_dequeues {
            warn!(task_id = id, "cascade keeps raising a task; cyclic relationships?");
            continue;
        }
        let Some(bar) = moved.get(id).copied() else {
            continue;
        };

        for rel in source.outgoing(id) {
            let succ = rel.to.as_str();
            if succ == origin_id || succ == id {
                continue;
            }
            let Some(current) = moved
                .get(succ)
                .copied()
                .or_else(|| positions.position(succ))
            else {
                continue;
            };

            let required = required_successor_x(rel, &bar, current.width, px_per_day);
            if required.is_nan() || current.x >= required {
                continue;
            }
            if tasks.lock_state(succ).is_locked() {
                trace!(task_id = succ, required, "locked successor absorbs push");
                continue;
            }

            trace!(task_id = succ, from = current.x, to = required, "cascade push");
            moved.insert(succ, current.moved_to(required));
            updates.insert(succ.to_string(), PositionUpdate::move_to(required));
            if queued.insert(succ) {
                queue.push_back(succ);
            }
        }
    }

    updates
}

impl ConstraintEngine<'_> {
    /// Successors that must move when `task_id` is placed at `bar`.
    pub fn cascade(&self, task_id: &str, bar: BarPosition) -> CascadeUpdates {
        propagate(
            task_id,
            bar,
            self.relationships,
            self.positions,
            self.tasks,
            self.px_per_day(),
        )
    }
}
