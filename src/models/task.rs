//! Task attribute model.
//!
//! The engine only reads a handful of task attributes: the identifier,
//! the lock state, and optional absolute calendar bounds. Everything else
//! about a task (name, duration, progress) stays with the caller.
//!
//! # Lock Semantics
//! - `FullyLocked`: neither edge may move.
//! - `LeftEdgeLocked`: the start is frozen, the end may be resized.
//! - `RightEdgeLocked`: the end is frozen, the start may be resized.
//!
//! Any lock state makes a task immovable by cascade, since shifting a bar
//! moves both of its edges.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Anchor;

/// Lock state of a task.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum LockState {
    /// Free to move and resize.
    #[default]
    Unlocked,
    /// Frozen in place.
    FullyLocked,
    /// Start frozen.
    LeftEdgeLocked,
    /// End frozen.
    RightEdgeLocked,
}

impl LockState {
    /// Whether any lock applies.
    #[inline]
    pub fn is_locked(self) -> bool {
        self != Self::Unlocked
    }

    /// Whether the given anchor cannot move.
    pub fn freezes(self, anchor: Anchor) -> bool {
        match self {
            Self::Unlocked => false,
            Self::FullyLocked => true,
            Self::LeftEdgeLocked => anchor == Anchor::Start,
            Self::RightEdgeLocked => anchor == Anchor::End,
        }
    }
}

/// Attributes of a task as seen by the constraint engine.
///
/// # Time Representation
/// Absolute bounds are calendar dates. They are converted to pixels with a
/// [`TimeScale`](super::TimeScale) at resolution time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskAttributes {
    /// Unique task identifier.
    pub id: String,
    /// Lock state.
    #[serde(default)]
    pub lock: LockState,
    /// The bar may not start before this date.
    #[serde(default)]
    pub earliest_start: Option<NaiveDate>,
    /// The bar may not start after this date.
    #[serde(default)]
    pub latest_start: Option<NaiveDate>,
    /// The bar may not end after this date.
    #[serde(default)]
    pub latest_end: Option<NaiveDate>,
}

impl TaskAttributes {
    /// Creates an unlocked, unbounded task.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            lock: LockState::Unlocked,
            earliest_start: None,
            latest_start: None,
            latest_end: None,
        }
    }

    /// Sets the lock state.
    pub fn with_lock(mut self, lock: LockState) -> Self {
        self.lock = lock;
        self
    }

    /// Shorthand for `with_lock(LockState::FullyLocked)`.
    pub fn locked(self) -> Self {
        self.with_lock(LockState::FullyLocked)
    }

    /// Sets the earliest start date.
    pub fn with_earliest_start(mut self, date: NaiveDate) -> Self {
        self.earliest_start = Some(date);
        self
    }

    /// Sets the latest start date.
    pub fn with_latest_start(mut self, date: NaiveDate) -> Self {
        self.latest_start = Some(date);
        self
    }

    /// Sets the latest end date (due date).
    pub fn with_latest_end(mut self, date: NaiveDate) -> Self {
        self.latest_end = Some(date);
        self
    }

    /// Whether any absolute calendar bound is set.
    pub fn has_absolute_bounds(&self) -> bool {
        self.earliest_start.is_some() || self.latest_start.is_some() || self.latest_end.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let task = TaskAttributes::new("T1")
            .with_earliest_start(d)
            .with_latest_end(d + chrono::Duration::days(10))
            .with_lock(LockState::LeftEdgeLocked);

        assert_eq!(task.id, "T1");
        assert_eq!(task.earliest_start, Some(d));
        assert!(task.latest_start.is_none());
        assert!(task.has_absolute_bounds());
        assert!(task.lock.is_locked());
    }

    #[test]
    fn test_lock_freezes() {
        assert!(!LockState::Unlocked.freezes(Anchor::Start));
        assert!(LockState::FullyLocked.freezes(Anchor::Start));
        assert!(LockState::FullyLocked.freezes(Anchor::End));
        assert!(LockState::LeftEdgeLocked.freezes(Anchor::Start));
        assert!(!LockState::LeftEdgeLocked.freezes(Anchor::End));
        assert!(LockState::RightEdgeLocked.freezes(Anchor::End));
        assert!(!LockState::RightEdgeLocked.freezes(Anchor::Start));
    }

    #[test]
    fn test_lock_serde_names() {
        let json = serde_json::to_string(&LockState::LeftEdgeLocked).unwrap();
        assert_eq!(json, "\"left-edge-locked\"");

        let task: TaskAttributes =
            serde_json::from_str(r#"{"id":"T9","latest_end":"2024-05-01"}"#).unwrap();
        assert_eq!(task.lock, LockState::Unlocked);
        assert_eq!(task.latest_end, NaiveDate::from_ymd_opt(2024, 5, 1));
    }
}
