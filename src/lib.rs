//! Constraint propagation for interactive Gantt charts.
//!
//! Answers the question a Gantt UI asks on every pointer move: given a
//! proposed position for one bar, where may it actually go, and which
//! other bars must follow? Dependencies (FS/SS/FF/SF with lag and slack),
//! locks, and calendar bounds are all honored. Everything happens in
//! pixel space; a [`TimeScale`](models::TimeScale) converts dates.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `BarPosition`, `TaskAttributes`,
//!   `Relationship`, `TimeScale`, `Resolution`
//! - **`lookup`** / **`index`**: Read-only views over caller-owned state
//! - **`constraints`**: Individual bound components (offsets, predecessor
//!   bounds, downstream ceiling, locked successors, calendar bounds)
//! - **`engine`**: `ConstraintEngine` for move/resize resolution and cascade
//! - **`config`**: Tunables (`epsilon_px`, `min_width_px`)
//! - **`probe`**: Opt-in timing around resolution calls
//! - **`validation`**: Integrity checks (duplicate IDs, dangling edges, cycles)
//!
//! # Architecture
//!
//! The engine never owns or mutates chart state. It reads positions and
//! attributes through [`PositionLookup`](lookup::PositionLookup) and
//! [`TaskLookup`](lookup::TaskLookup), and returns a
//! [`Resolution`](models::Resolution) the caller may commit.
//!
//! # References
//!
//! - PMI (2017), "A Guide to the Project Management Body of Knowledge", Ch. 6.3
//!   (Sequence Activities: precedence diagramming method)
//! - Kelley & Walker (1959), "Critical-Path Planning and Scheduling"

pub mod config;
pub mod constraints;
pub mod engine;
pub mod index;
pub mod lookup;
pub mod models;
pub mod probe;
pub mod validation;

pub use config::{ConfigError, EngineConfig};
pub use engine::ConstraintEngine;
