//! Resolution (result) model.
//!
//! A resolution is the engine's answer to one proposed move or resize:
//! where the dragged bar may go, whether the gesture is refused, and which
//! other bars must move in sympathy. It is advisory; the caller decides
//! whether and when to commit it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::BarPosition;

/// Why a proposal was refused.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    /// The task (or the moving edge) is locked.
    Locked,
    /// The lower bound exceeds the upper bound, or the proposal runs into
    /// an immovable downstream task.
    ConflictingConstraints,
}

/// New values for a cascaded task. Absent fields are unchanged.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PositionUpdate {
    /// New start, px.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// New width, px.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

impl PositionUpdate {
    /// Update moving the bar to `x`.
    pub fn move_to(x: f64) -> Self {
        Self {
            x: Some(x),
            width: None,
        }
    }

    /// Applies this update to a bar.
    pub fn apply(&self, bar: BarPosition) -> BarPosition {
        BarPosition {
            x: self.x.unwrap_or(bar.x),
            width: self.width.unwrap_or(bar.width),
            ..bar
        }
    }
}

/// Cascade updates keyed by task ID, in deterministic order.
pub type CascadeUpdates = BTreeMap<String, PositionUpdate>;

/// Result of resolving one proposed move or resize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Resolution {
    /// Legal start of the dragged bar, px.
    pub constrained_x: f64,
    /// Legal width of the dragged bar, px.
    pub constrained_width: f64,
    /// Whether the proposal was refused.
    pub blocked: bool,
    /// Why it was refused.
    pub block_reason: Option<BlockReason>,
    /// Bars that must move in sympathy.
    pub cascade_updates: CascadeUpdates,
}

impl Resolution {
    /// Accepted result with no cascade.
    pub fn accepted(x: f64, width: f64) -> Self {
        Self {
            constrained_x: x,
            constrained_width: width,
            blocked: false,
            block_reason: None,
            cascade_updates: CascadeUpdates::new(),
        }
    }

    /// Refused result; the bar stays at `current`.
    pub fn blocked(current: BarPosition, reason: BlockReason) -> Self {
        Self {
            constrained_x: current.x,
            constrained_width: current.width,
            blocked: true,
            block_reason: Some(reason),
            cascade_updates: CascadeUpdates::new(),
        }
    }

    /// Attaches cascade updates.
    pub fn with_cascade(mut self, updates: CascadeUpdates) -> Self {
        self.cascade_updates = updates;
        self
    }

    /// Number of tasks moved in sympathy.
    pub fn cascade_count(&self) -> usize {
        self.cascade_updates.len()
    }

    /// Commits this result to a caller-owned position map in one pass.
    ///
    /// Does nothing when blocked. Updates for unknown task IDs are skipped.
    pub fn apply_to(&self, task_id: &str, positions: &mut HashMap<String, BarPosition>) {
        if self.blocked {
            return;
        }
        if let Some(bar) = positions.get_mut(task_id) {
            bar.x = self.constrained_x;
            bar.width = self.constrained_width;
        }
        for (id, update) in &self.cascade_updates {
            if let Some(bar) = positions.get_mut(id) {
                *bar = update.apply(*bar);
            }
        }
    }
}
