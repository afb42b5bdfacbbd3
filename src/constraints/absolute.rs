//! A task's own calendar bounds, in pixels.
//!
//! | Attribute | Bound |
//! |-----------|-------|
//! | earliest start | `x ≥ date_to_x(earliest_start)` |
//! | latest start | `x ≤ date_to_x(latest_start)` |
//! | latest end | `x + width ≤ date_to_x(latest_end)` |
//!
//! Missing attributes (or an unknown task) give `0` / `+∞`.

use crate::models::{Anchor, TaskAttributes, TimeScale};

/// Calendar bounds of one task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbsoluteBounds {
    /// Lower bound on the start. `0` if none.
    pub min_x: f64,
    /// Upper bound on the start. `+∞` if none.
    pub max_x: f64,
    /// Upper bound on the end. `+∞` if none.
    pub latest_end_x: f64,
}

impl AbsoluteBounds {
    /// No calendar bound.
    pub const UNBOUNDED: Self = Self {
        min_x: 0.0,
        max_x: f64::INFINITY,
        latest_end_x: f64::INFINITY,
    };

    /// Latest-end bound expressed on the start of a bar of `width`.
    #[inline]
    pub fn max_end_x(&self, width: f64) -> f64 {
        self.latest_end_x - width
    }
}

/// Converts a task's calendar bounds to pixels.
pub fn absolute_bounds(task: Option<&TaskAttributes>, scale: &TimeScale) -> AbsoluteBounds {
    let Some(task) = task else {
        return AbsoluteBounds::UNBOUNDED;
    };
    AbsoluteBounds {
        min_x: task.earliest_start.map_or(0.0, |d| scale.date_to_x(d)),
        max_x: task.latest_start.map_or(f64::INFINITY, |d| scale.date_to_x(d)),
        latest_end_x: task.latest_end.map_or(f64::INFINITY, |d| scale.date_to_x(d)),
    }
}

/// Whether a whole-bar move is refused outright.
///
/// A move shifts both edges, so any lock refuses it.
pub fn lock_blocks_move(task: Option<&TaskAttributes>) -> bool {
    task.is_some_and(|t| t.lock.is_locked())
}

/// Whether resizing the given edge is refused outright.
pub fn lock_blocks_resize(task: Option<&TaskAttributes>, edge: Anchor) -> bool {
    task.is_some_and(|t| t.lock.freezes(edge))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LockState;
    use chrono::NaiveDate;

    fn scale() -> TimeScale {
        TimeScale::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 10.0).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_unbounded() {
        assert_eq!(absolute_bounds(None, &scale()), AbsoluteBounds::UNBOUNDED);
        let task = TaskAttributes::new("T");
        assert_eq!(absolute_bounds(Some(&task), &scale()), AbsoluteBounds::UNBOUNDED);
    }

    #[test]
    fn test_bounds_to_pixels() {
        let task = TaskAttributes::new("T")
            .with_earliest_start(day(3))
            .with_latest_start(day(11))
            .with_latest_end(day(21));
        let b = absolute_bounds(Some(&task), &scale());
        assert_eq!(b.min_x, 20.0);
        assert_eq!(b.max_x, 100.0);
        assert_eq!(b.latest_end_x, 200.0);
        assert_eq!(b.max_end_x(50.0), 150.0);
    }

    #[test]
    fn test_lock_checks() {
        let free = TaskAttributes::new("T");
        let full = TaskAttributes::new("T").locked();
        let left = TaskAttributes::new("T").with_lock(LockState::LeftEdgeLocked);

        assert!(!lock_blocks_move(None));
        assert!(!lock_blocks_move(Some(&free)));
        assert!(lock_blocks_move(Some(&full)));
        assert!(lock_blocks_move(Some(&left)));

        assert!(lock_blocks_resize(Some(&full), Anchor::End));
        assert!(lock_blocks_resize(Some(&left), Anchor::Start));
        assert!(!lock_blocks_resize(Some(&left), Anchor::End));
        assert!(!lock_blocks_resize(Some(&free), Anchor::Start));
    }
}
