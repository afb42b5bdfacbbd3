//! Caller-side lookups.
//!
//! The engine never owns task state. It reads bar positions and task
//! attributes through these two traits, which the caller implements over
//! whatever store it keeps. Map implementations are provided.

use std::collections::{BTreeMap, HashMap};

use crate::models::{BarPosition, LockState, TaskAttributes};

/// Read access to current bar positions.
pub trait PositionLookup {
    /// Current bar of a task, or `None` if the task has no bar.
    fn position(&self, task_id: &str) -> Option<BarPosition>;
}

/// Read access to task attributes.
pub trait TaskLookup {
    /// Attributes of a task, or `None` if unknown.
    fn task(&self, task_id: &str) -> Option<&TaskAttributes>;

    /// Lock state of a task. Unknown tasks are unlocked.
    fn lock_state(&self, task_id: &str) -> LockState {
        self.task(task_id).map(|t| t.lock).unwrap_or_default()
    }
}

impl PositionLookup for HashMap<String, BarPosition> {
    fn position(&self, task_id: &str) -> Option<BarPosition> {
        self.get(task_id).copied()
    }
}

impl PositionLookup for BTreeMap<String, BarPosition> {
    fn position(&self, task_id: &str) -> Option<BarPosition> {
        self.get(task_id).copied()
    }
}

impl TaskLookup for HashMap<String, TaskAttributes> {
    fn task(&self, task_id: &str) -> Option<&TaskAttributes> {
        self.get(task_id)
    }
}

impl TaskLookup for BTreeMap<String, TaskAttributes> {
    fn task(&self, task_id: &str) -> Option<&TaskAttributes> {
        self.get(task_id)
    }
}
