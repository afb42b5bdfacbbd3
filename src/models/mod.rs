//! Gantt engine domain models.
//!
//! Provides the data types exchanged between the constraint engine and its
//! caller: bar geometry, task attributes, dependency relationships, the
//! date-to-pixel scale, and resolution results.
//!
//! # Ownership
//!
//! | Type | Owned by | Engine access |
//! |------|----------|---------------|
//! | BarPosition | caller's task store | read, propose |
//! | TaskAttributes | caller's task store | read |
//! | Relationship | caller's data layer | read |
//! | Resolution | returned to caller | produced |

mod position;
mod relationship;
mod resolution;
mod task;
mod timescale;

pub use position::BarPosition;
pub use relationship::{Anchor, Elasticity, Relationship, RelationshipKind};
pub use resolution::{BlockReason, CascadeUpdates, PositionUpdate, Resolution};
pub use task::{LockState, TaskAttributes};
pub use timescale::TimeScale;
