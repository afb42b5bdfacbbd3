//! Whole-bar move resolution.
//!
//! # Algorithm
//!
//! 1. No bar for the task: pass the proposal through unblocked.
//! 2. Proposal equals the current bar: unblocked, no cascade.
//! 3. Locked task: blocked (`Locked`) at the current position.
//! 4. `min_x = max(0, earliest start, predecessor minimum)`.
//! 5. `max_x = min(latest start, latest end − width, predecessor maximum)`.
//! 6. Moving right or growing only: intersect `max_x` with the downstream
//!    ceiling (minus width) and the locked direct successors. When that
//!    stop is the binding cap, overshooting it by more than the tolerance
//!    refuses the move instead of clamping it. A tighter cap from step 5
//!    still clamps.
//! 7. Clamp the proposal into `[min_x, max_x]`.
//! 8. `min_x > max_x + ε`: blocked (`ConflictingConstraints`).
//! 9. Otherwise cascade from the accepted bar.

use tracing::{debug, instrument};

use super::ConstraintEngine;
use crate::constraints::{
    absolute_bounds, downstream_ceiling, incoming_bounds, lock_blocks_move,
    locked_successor_max_x,
};
use crate::models::{BarPosition, BlockReason, Resolution};

impl ConstraintEngine<'_> {
    /// Resolves a proposed move of `task_id` to `proposed_x`.
    ///
    /// `proposed_width` is passed through; moves do not resize.
    #[instrument(level = "debug", skip(self))]
    pub fn resolve_move(&self, task_id: &str, proposed_x: f64, proposed_width: f64) -> Resolution {
        let Some(current) = self.positions.position(task_id) else {
            return Resolution::accepted(proposed_x, proposed_width);
        };
        if proposed_x == current.x && proposed_width == current.width {
            return Resolution::accepted(current.x, current.width);
        }

        let task = self.tasks.task(task_id);
        if lock_blocks_move(task) {
            debug!("move refused: task is locked");
            return Resolution::blocked(current, BlockReason::Locked);
        }

        let width = proposed_width;
        let eps = self.config.epsilon_px;
        let absolute = absolute_bounds(task, &self.scale);
        let incoming = incoming_bounds(task_id, self.relationships, self.positions, self.px_per_day());

        let min_x = 0f64.max(absolute.min_x).max(incoming.min_x(width));
        let mut max_x = f64::INFINITY
            .min(absolute.max_x)
            .min(absolute.max_end_x(width))
            .min(incoming.max_x(width));

        if moves_forward(&current, proposed_x, width) {
            let stop_x = self.downstream_stop_x(task_id, width);
            if stop_x <= max_x && proposed_x > stop_x + eps {
                debug!(stop_x, "move refused: runs into a locked downstream task");
                return Resolution::blocked(current, BlockReason::ConflictingConstraints);
            }
            max_x = max_x.min(stop_x);
        }

        if min_x > max_x + eps {
            debug!(min_x, max_x, "move refused: conflicting bounds");
            return Resolution::blocked(current, BlockReason::ConflictingConstraints);
        }

        let constrained_x = proposed_x.max(min_x).min(max_x);
        let updates = self.cascade(task_id, current.reshaped(constrained_x, width));
        debug!(constrained_x, cascaded = updates.len(), "move accepted");
        Resolution::accepted(constrained_x, width).with_cascade(updates)
    }

    /// Cap on the start of `task_id` (as a bar of `width`) set by locked
    /// tasks downstream.
    fn downstream_stop_x(&self, task_id: &str, width: f64) -> f64 {
        let ceiling = downstream_ceiling(
            task_id,
            width,
            self.relationships,
            self.positions,
            self.tasks,
            self.px_per_day(),
        );
        let locked = locked_successor_max_x(
            task_id,
            self.relationships,
            self.positions,
            self.tasks,
            self.px_per_day(),
        );
        (ceiling - width).min(locked)
    }
}

/// Whether a proposal can tighten downstream caps (start or end moves right).
fn moves_forward(current: &BarPosition, proposed_x: f64, proposed_width: f64) -> bool {
    proposed_x > current.x || proposed_x + proposed_width > current.end()
}
