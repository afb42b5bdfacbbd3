//! Bound components.
//!
//! Each submodule turns one source of constraint into pixel bounds on a
//! single task. They are pure functions over the caller's lookups; the
//! [`engine`](crate::engine) combines them.
//!
//! | Module | Source | Bounds |
//! |--------|--------|--------|
//! | `offset` | one relationship | gap between two anchors |
//! | `predecessor` | incoming edges | `[min_x, max_x]` |
//! | `ceiling` | locked descendants (transitive) | cap on start/end |
//! | `locked` | locked direct successors (SS/SF) | cap on start |
//! | `absolute` | the task's calendar dates, lock flag | `[min_x, max_x]`, latest end |

pub mod absolute;
pub mod ceiling;
pub mod locked;
pub mod offset;
pub mod predecessor;

pub use absolute::{absolute_bounds, lock_blocks_move, lock_blocks_resize, AbsoluteBounds};
pub use ceiling::{downstream_ceiling, scan_downstream, DownstreamCeiling};
pub use locked::locked_successor_max_x;
pub use offset::{anchor_x, edge_offset, required_successor_x, EdgeOffset};
pub use predecessor::{incoming_bounds, predecessor_max_x, predecessor_min_x, IncomingBounds};
