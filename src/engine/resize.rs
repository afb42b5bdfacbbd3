//! Edge resize resolution.
//!
//! Same bound machinery as a move, restricted to the edge being dragged:
//!
//! | Edge | Fixed | Bounds on the moving edge |
//! |------|-------|---------------------------|
//! | `End` (right) | start | FF/SF predecessors, latest end, downstream end cap |
//! | `Start` (left) | end | FS/SS predecessors, earliest/latest start, downstream start cap, locked SS/SF successors |
//!
//! Downstream caps are consulted only when the moving edge goes right, and
//! refuse the resize only when they are the binding cap.
//! After clamping, the minimum width is enforced by moving the dragged edge
//! back; if that breaks a bound beyond the tolerance the resize is refused.
//! The fixed edge never moves.

use tracing::{debug, instrument};

use super::ConstraintEngine;
use crate::constraints::{
    absolute_bounds, incoming_bounds, lock_blocks_resize, locked_successor_max_x, scan_downstream,
};
use crate::models::{Anchor, BarPosition, BlockReason, Resolution};

impl ConstraintEngine<'_> {
    /// Resolves dragging one edge of `task_id`.
    ///
    /// For a right-edge (`Anchor::End`) resize only `proposed_width` is
    /// read; the start stays put. For a left-edge (`Anchor::Start`) resize
    /// only `proposed_x` is read; the width follows from the fixed end.
    #[instrument(level = "debug", skip(self))]
    pub fn resolve_resize(
        &self,
        task_id: &str,
        edge: Anchor,
        proposed_x: f64,
        proposed_width: f64,
    ) -> Resolution {
        let Some(current) = self.positions.position(task_id) else {
            return Resolution::accepted(proposed_x, proposed_width);
        };
        if proposed_x == current.x && proposed_width == current.width {
            return Resolution::accepted(current.x, current.width);
        }

        if lock_blocks_resize(self.tasks.task(task_id), edge) {
            debug!("resize refused: edge is locked");
            return Resolution::blocked(current, BlockReason::Locked);
        }

        let placed = match edge {
            Anchor::End => self.resize_end(task_id, &current, current.x + proposed_width),
            Anchor::Start => self.resize_start(task_id, &current, proposed_x),
        };
        let bar = match placed {
            Ok(bar) => bar,
            Err(reason) => return Resolution::blocked(current, reason),
        };

        let updates = self.cascade(task_id, bar);
        debug!(x = bar.x, width = bar.width, cascaded = updates.len(), "resize accepted");
        Resolution::accepted(bar.x, bar.width).with_cascade(updates)
    }

    fn resize_end(
        &self,
        task_id: &str,
        current: &BarPosition,
        proposed_end: f64,
    ) -> Result<BarPosition, BlockReason> {
        let eps = self.config.epsilon_px;
        let x = current.x;
        let absolute = absolute_bounds(self.tasks.task(task_id), &self.scale);
        let incoming = incoming_bounds(task_id, self.relationships, self.positions, self.px_per_day());

        let end_min = incoming.end_min.unwrap_or(f64::NEG_INFINITY);
        let mut end_max = absolute.latest_end_x.min(incoming.end_max);

        if proposed_end > current.end() {
            let ceiling = scan_downstream(
                task_id,
                self.relationships,
                self.positions,
                self.tasks,
                self.px_per_day(),
            );
            if ceiling.end <= end_max && proposed_end > ceiling.end + eps {
                debug!(cap = ceiling.end, "resize refused: runs into a locked downstream task");
                return Err(BlockReason::ConflictingConstraints);
            }
            end_max = end_max.min(ceiling.end);
        }

        if end_min > end_max + eps {
            debug!(end_min, end_max, "resize refused: conflicting bounds");
            return Err(BlockReason::ConflictingConstraints);
        }

        let mut end = proposed_end.max(end_min).min(end_max);
        let min_width = self.config.min_width_px;
        if end - x < min_width {
            end = x + min_width;
            if end > end_max + eps {
                debug!(end_max, "resize refused: minimum width does not fit");
                return Err(BlockReason::ConflictingConstraints);
            }
        }

        Ok(current.reshaped(x, end - x))
    }

    fn resize_start(
        &self,
        task_id: &str,
        current: &BarPosition,
        proposed_x: f64,
    ) -> Result<BarPosition, BlockReason> {
        let eps = self.config.epsilon_px;
        let end = current.end();
        let absolute = absolute_bounds(self.tasks.task(task_id), &self.scale);
        let incoming = incoming_bounds(task_id, self.relationships, self.positions, self.px_per_day());

        let start_min = 0f64
            .max(absolute.min_x)
            .max(incoming.start_min.unwrap_or(f64::NEG_INFINITY));
        let mut start_max = absolute.max_x.min(incoming.start_max);

        if proposed_x > current.x {
            let ceiling = scan_downstream(
                task_id,
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
            let stop_x = ceiling.start.min(locked);
            if stop_x <= start_max && proposed_x > stop_x + eps {
                debug!(stop_x, "resize refused: runs into a locked downstream task");
                return Err(BlockReason::ConflictingConstraints);
            }
            start_max = start_max.min(stop_x);
        }

        if start_min > start_max + eps {
            debug!(start_min, start_max, "resize refused: conflicting bounds");
            return Err(BlockReason::ConflictingConstraints);
        }

        let mut x = proposed_x.max(start_min).min(start_max);
        let min_width = self.config.min_width_px;
        if end - x < min_width {
            x = end - min_width;
            if x < start_min - eps {
                debug!(start_min, "resize refused: minimum width does not fit");
                return Err(BlockReason::ConflictingConstraints);
            }
        }

        Ok(current.reshaped(x, end - x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::models::{LockState, Relationship, RelationshipKind, TaskAttributes, TimeScale};
    use chrono::NaiveDate;
    use std::collections::HashMap;

    struct World {
        positions: HashMap<String, BarPosition>,
        tasks: HashMap<String, TaskAttributes>,
        rels: Vec<Relationship>,
        scale: TimeScale,
    }

    impl World {
        fn new() -> Self {
            Self {
                positions: HashMap::new(),
                tasks: HashMap::new(),
                rels: Vec::new(),
                scale: TimeScale::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 10.0)
                    .unwrap(),
            }
        }

        fn task(mut self, attrs: TaskAttributes, x: f64, w: f64) -> Self {
            self.positions.insert(attrs.id.clone(), BarPosition::new(x, w));
            self.tasks.insert(attrs.id.clone(), attrs);
            self
        }

        fn rel(mut self, rel: Relationship) -> Self {
            self.rels.push(rel);
            self
        }

        fn engine(&self) -> ConstraintEngine<'_> {
            ConstraintEngine::new(&self.positions, &self.tasks, &self.rels, self.scale)
                .with_config(EngineConfig::new().with_min_width_px(10.0))
        }
    }

    #[test]
    fn test_right_resize_free() {
        let w = World::new().task(TaskAttributes::new("A"), 50.0, 40.0);
        let r = w.engine().resolve_resize("A", Anchor::End, 50.0, 70.0);
        assert!(!r.blocked);
        assert_eq!(r.constrained_x, 50.0);
        assert_eq!(r.constrained_width, 70.0);
    }

    #[test]
    fn test_min_width_floor() {
        let w = World::new().task(TaskAttributes::new("A"), 50.0, 40.0);
        let e = w.engine();

        let r = e.resolve_resize("A", Anchor::End, 50.0, 2.0);
        assert_eq!(r.constrained_width, 10.0);

        let r = e.resolve_resize("A", Anchor::Start, 88.0, 2.0);
        assert_eq!(r.constrained_x, 80.0);
        assert_eq!(r.constrained_width, 10.0);
    }

    #[test]
    fn test_edge_locks() {
        let w = World::new()
            .task(TaskAttributes::new("L").with_lock(LockState::LeftEdgeLocked), 50.0, 40.0)
            .task(TaskAttributes::new("F").locked(), 0.0, 40.0);
        let e = w.engine();

        let r = e.resolve_resize("L", Anchor::Start, 40.0, 50.0);
        assert_eq!(r.block_reason, Some(BlockReason::Locked));

        let r = e.resolve_resize("L", Anchor::End, 50.0, 60.0);
        assert!(!r.blocked);
        assert_eq!(r.constrained_x, 50.0);
        assert_eq!(r.constrained_width, 60.0);

        let r = e.resolve_resize("F", Anchor::End, 0.0, 60.0);
        assert_eq!(r.block_reason, Some(BlockReason::Locked));
    }

    #[test]
    fn test_left_resize_clamped_shrinks_width() {
        // Predecessor ends at 60: start may not go left of it
        let w = World::new()
            .task(TaskAttributes::new("P"), 0.0, 60.0)
            .task(TaskAttributes::new("T"), 80.0, 40.0)
            .rel(Relationship::finish_to_start("P", "T"));
        let r = w.engine().resolve_resize("T", Anchor::Start, 30.0, 90.0);
        assert!(!r.blocked);
        assert_eq!(r.constrained_x, 60.0);
        assert_eq!(r.constrained_width, 60.0);
        assert_eq!(r.constrained_x + r.constrained_width, 120.0);
    }

    #[test]
    fn test_right_resize_finish_bound() {
        // FF with max: T.end in [P.end, P.end + 2d]
        let w = World::new()
            .task(TaskAttributes::new("P"), 0.0, 100.0)
            .task(TaskAttributes::new("T"), 50.0, 60.0)
            .rel(Relationship::new("P", "T", RelationshipKind::FinishToFinish).with_max(2.0));
        let e = w.engine();
        assert_eq!(e.resolve_resize("T", Anchor::End, 50.0, 20.0).constrained_width, 50.0);
        assert_eq!(e.resolve_resize("T", Anchor::End, 50.0, 200.0).constrained_width, 70.0);
    }

    #[test]
    fn test_right_resize_into_locked_successor() {
        let w = World::new()
            .task(TaskAttributes::new("A"), 0.0, 50.0)
            .task(TaskAttributes::new("B").locked(), 100.0, 20.0)
            .rel(Relationship::finish_to_start("A", "B"));
        let e = w.engine();
        assert!(!e.resolve_resize("A", Anchor::End, 0.0, 100.0).blocked);
        let r = e.resolve_resize("A", Anchor::End, 0.0, 120.0);
        assert_eq!(r.block_reason, Some(BlockReason::ConflictingConstraints));
        assert_eq!(r.constrained_width, 50.0);
    }

    #[test]
    fn test_tighter_cap_clamps_past_locked_stop() {
        // Latest end (day 8, x = 70) binds before the locked successor at 100
        let w = World::new()
            .task(
                TaskAttributes::new("A")
                    .with_latest_end(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap())
                    .with_latest_start(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()),
                0.0,
                50.0,
            )
            .task(TaskAttributes::new("B").locked(), 100.0, 20.0)
            .task(TaskAttributes::new("S").locked(), 60.0, 20.0)
            .rel(Relationship::finish_to_start("A", "B"))
            .rel(Relationship::new("A", "S", RelationshipKind::StartToStart));
        let e = w.engine();

        let r = e.resolve_resize("A", Anchor::End, 0.0, 150.0);
        assert!(!r.blocked);
        assert_eq!(r.constrained_width, 70.0);

        // Latest start (day 3, x = 20) binds before the SS stop at 60
        let r = e.resolve_resize("A", Anchor::Start, 80.0, 50.0);
        assert!(!r.blocked);
        assert_eq!(r.constrained_x, 20.0);
        assert_eq!(r.constrained_width, 30.0);
    }

    #[test]
    fn test_left_resize_into_locked_ss_successor() {
        let w = World::new()
            .task(TaskAttributes::new("A"), 0.0, 100.0)
            .task(TaskAttributes::new("B").locked(), 40.0, 20.0)
            .rel(Relationship::new("A", "B", RelationshipKind::StartToStart));
        let e = w.engine();
        assert!(!e.resolve_resize("A", Anchor::Start, 40.0, 60.0).blocked);
        let r = e.resolve_resize("A", Anchor::Start, 60.0, 40.0);
        assert_eq!(r.block_reason, Some(BlockReason::ConflictingConstraints));
    }

    #[test]
    fn test_resize_cascades() {
        let w = World::new()
            .task(TaskAttributes::new("A"), 0.0, 50.0)
            .task(TaskAttributes::new("B"), 50.0, 20.0)
            .rel(Relationship::finish_to_start("A", "B"));
        let r = w.engine().resolve_resize("A", Anchor::End, 0.0, 80.0);
        assert_eq!(r.cascade_updates["B"].x, Some(80.0));
    }
}
