//! Drag and resize resolution.
//!
//! [`ConstraintEngine`] bundles the caller's lookups with the time scale and
//! tunables, and exposes the three operations a Gantt UI needs per pointer
//! move:
//!
//! - [`resolve_move`](ConstraintEngine::resolve_move): legal position for a
//!   whole-bar drag, plus the cascade it triggers.
//! - [`resolve_resize`](ConstraintEngine::resolve_resize): the same for
//!   dragging one edge.
//! - [`cascade`](ConstraintEngine::cascade): successors that must move when
//!   a bar is committed somewhere.
//!
//! The engine holds no mutable state. Building one per pointer move is
//! cheap; reuse a [`RelationshipIndex`](crate::index::RelationshipIndex)
//! across moves of one gesture to keep adjacency lookups O(1).
//!
//! # Usage
//!
//! ```
//! use std::collections::HashMap;
//! use chrono::NaiveDate;
//! use u_gantt::engine::ConstraintEngine;
//! use u_gantt::index::RelationshipIndex;
//! use u_gantt::models::{BarPosition, Relationship, TaskAttributes, TimeScale};
//!
//! let mut positions = HashMap::new();
//! positions.insert("A".to_string(), BarPosition::new(0.0, 100.0));
//! positions.insert("B".to_string(), BarPosition::new(100.0, 50.0));
//! let mut tasks = HashMap::new();
//! tasks.insert("A".to_string(), TaskAttributes::new("A"));
//! tasks.insert("B".to_string(), TaskAttributes::new("B"));
//! let index = RelationshipIndex::build(&[Relationship::finish_to_start("A", "B")]);
//! let scale = TimeScale::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 20.0).unwrap();
//!
//! let engine = ConstraintEngine::new(&positions, &tasks, &index, scale);
//! let r = engine.resolve_move("A", 40.0, 100.0);
//! assert!(!r.blocked);
//! assert_eq!(r.constrained_x, 40.0);
//! assert_eq!(r.cascade_updates["B"].x, Some(140.0));
//! ```

mod cascade;
mod resize;
mod resolve;

pub use cascade::propagate;

use crate::config::EngineConfig;
use crate::index::RelationshipSource;
use crate::lookup::{PositionLookup, TaskLookup};
use crate::models::TimeScale;

/// Constraint engine over caller-owned state.
#[derive(Clone, Copy)]
pub struct ConstraintEngine<'a> {
    positions: &'a dyn PositionLookup,
    tasks: &'a dyn TaskLookup,
    relationships: &'a dyn RelationshipSource,
    scale: TimeScale,
    config: EngineConfig,
}

impl<'a> ConstraintEngine<'a> {
    /// Creates an engine with the default configuration.
    pub fn new(
        positions: &'a dyn PositionLookup,
        tasks: &'a dyn TaskLookup,
        relationships: &'a dyn RelationshipSource,
        scale: TimeScale,
    ) -> Self {
        Self {
            positions,
            tasks,
            relationships,
            scale,
            config: EngineConfig::default(),
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Time scale in use.
    pub fn scale(&self) -> &TimeScale {
        &self.scale
    }

    /// Configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn px_per_day(&self) -> f64 {
        self.scale.px_per_day
    }
}
