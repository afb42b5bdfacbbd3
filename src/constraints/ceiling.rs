//! Ceiling imposed by locked descendants.
//!
//! When a task moves right, the cascade pushes its successors right, and
//! theirs, and so on. A locked task cannot be pushed, so it caps how far
//! the origin may go. This module finds the tightest such cap.
//!
//! # Algorithm
//!
//! Breadth-first walk forward through successor edges. Every reached task
//! `n` carries the lower bound the origin forces on it through the chain,
//! as two linear forms in the origin's start `S` and end `E`:
//!
//! ```text
//! n.x ≥ S + a_s        n.x ≥ E + a_e
//! ```
//!
//! Crossing an edge adds the predecessor anchor shift, the edge's
//! `min_px`, and (for end-bound kinds) minus the successor width. At a
//! locked task with frozen start `x_L` the forms turn around into
//! `S ≤ x_L − a_s` and `E ≤ x_L − a_e`. The walk does not continue past a
//! locked task, since the cascade never moves one.
//!
//! A task reached again through a longer chain is re-expanded only when
//! its forms strictly tighten, which keeps diamonds correct.
//!
//! # Complexity
//! O(V + E) over the reachable subgraph for trees. In general this is a
//! FIFO longest-path relaxation, so without a cycle no task is dequeued
//! more than V times (V = tasks reachable from the origin). A task past
//! that count sits on a cycle and is dropped from the walk.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::warn;

use crate::constraints::offset::edge_offset;
use crate::index::RelationshipSource;
use crate::lookup::{PositionLookup, TaskLookup};
use crate::models::Anchor;

/// Caps on the origin's anchors imposed by locked descendants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DownstreamCeiling {
    /// Cap on the origin's start, px. `+∞` if none.
    pub start: f64,
    /// Cap on the origin's end, px. `+∞` if none.
    pub end: f64,
}

impl DownstreamCeiling {
    /// No locked descendant.
    pub const UNBOUNDED: Self = Self {
        start: f64::INFINITY,
        end: f64::INFINITY,
    };

    /// Whether no locked descendant constrains the origin.
    pub fn is_unbounded(&self) -> bool {
        self.start == f64::INFINITY && self.end == f64::INFINITY
    }

    /// Combined cap on the end of an origin bar of `width`.
    pub fn end_cap(&self, width: f64) -> f64 {
        self.end.min(self.start + width)
    }

    /// Combined cap on the start of an origin bar of `width`.
    pub fn start_cap(&self, width: f64) -> f64 {
        self.start.min(self.end - width)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Reach {
    via_start: Option<f64>,
    via_end: Option<f64>,
}

impl Reach {
    fn shifted(self, by: f64) -> Self {
        Self {
            via_start: self.via_start.map(|v| v + by),
            via_end: self.via_end.map(|v| v + by),
        }
    }

    /// Tightens with `other`; returns whether anything changed.
    fn absorb(&mut self, other: Reach) -> bool {
        let a = tighten(&mut self.via_start, other.via_start);
        let b = tighten(&mut self.via_end, other.via_end);
        a || b
    }
}

fn tighten(slot: &mut Option<f64>, candidate: Option<f64>) -> bool {
    match (candidate, *slot) {
        (Some(c), Some(s)) if c > s => {
            *slot = Some(c);
            true
        }
        (Some(c), None) if !c.is_nan() => {
            *slot = Some(c);
            true
        }
        _ => false,
    }
}

/// Scans the successor subgraph of `origin_id` for locked descendants.
///
/// Returns [`DownstreamCeiling::UNBOUNDED`] immediately when the origin has
/// no successor.
pub fn scan_downstream(
    origin_id: &str,
    source: &dyn RelationshipSource,
    positions: &dyn PositionLookup,
    tasks: &dyn TaskLookup,
    px_per_day: f64,
) -> DownstreamCeiling {
    if !source.has_outgoing(origin_id) {
        return DownstreamCeiling::UNBOUNDED;
    }

    let mut ceiling = DownstreamCeiling::UNBOUNDED;
    let mut reach: HashMap<&str, Reach> = HashMap::new();
    let max_dequeues = source.reachable_count(origin_id);
    let mut dequeues: HashMap<&str, usize> = HashMap::new();
    let mut queued: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    queue.push_back(origin_id);

    while let Some(id) = queue.pop_front() {
        queued.remove(id);
        let count = dequeues.entry(id).or_insert(0);
        *count += 1;
        if *count > max_dequeues {
            warn!(task_id = id, "downstream scan keeps tightening a task; cyclic relationships?");
            continue;
        }

        let (start_form, end_form) = if id == origin_id {
            (
                Reach {
                    via_start: Some(0.0),
                    via_end: None,
                },
                Reach {
                    via_start: None,
                    via_end: Some(0.0),
                },
            )
        } else {
            let (Some(r), Some(bar)) = (reach.get(id).copied(), positions.position(id)) else {
                continue;
            };
            (r, r.shifted(bar.width))
        };

        for rel in source.outgoing(id) {
            let succ = rel.to.as_str();
            if succ == origin_id || succ == id {
                continue;
            }
            let Some(succ_bar) = positions.position(succ) else {
                continue;
            };

            let pred_form = match rel.kind.predecessor_anchor() {
                Anchor::Start => start_form,
                Anchor::End => end_form,
            };
            let succ_shift = match rel.kind.successor_anchor() {
                Anchor::Start => 0.0,
                Anchor::End => -succ_bar.width,
            };
            let implied = pred_form.shifted(edge_offset(rel, px_per_day).min_px + succ_shift);

            let entry = reach.entry(succ).or_default();
            if !entry.absorb(implied) {
                continue;
            }

            if tasks.lock_state(succ).is_locked() {
                if let Some(a_s) = entry.via_start {
                    ceiling.start = ceiling.start.min(succ_bar.x - a_s);
                }
                if let Some(a_e) = entry.via_end {
                    ceiling.end = ceiling.end.min(succ_bar.x - a_e);
                }
                continue;
            }

            if queued.insert(succ) {
                queue.push_back(succ);
            }
        }
    }

    ceiling
}

/// Tightest cap on the origin's end imposed by locked descendants.
///
/// `origin_width` is the width the origin will have after the move.
pub fn downstream_ceiling(
    origin_id: &str,
    origin_width: f64,
    source: &dyn RelationshipSource,
    positions: &dyn PositionLookup,
    tasks: &dyn TaskLookup,
    px_per_day: f64,
) -> f64 {
    scan_downstream(origin_id, source, positions, tasks, px_per_day).end_cap(origin_width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BarPosition, Relationship, RelationshipKind, TaskAttributes};

    struct Fixture {
        positions: HashMap<String, BarPosition>,
        tasks: HashMap<String, TaskAttributes>,
        rels: Vec<Relationship>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                positions: HashMap::new(),
                tasks: HashMap::new(),
                rels: Vec::new(),
            }
        }

        fn bar(mut self, id: &str, x: f64, w: f64) -> Self {
            self.positions.insert(id.into(), BarPosition::new(x, w));
            self.tasks.insert(id.into(), TaskAttributes::new(id));
            self
        }

        fn locked(mut self, id: &str, x: f64, w: f64) -> Self {
            self.positions.insert(id.into(), BarPosition::new(x, w));
            self.tasks.insert(id.into(), TaskAttributes::new(id).locked());
            self
        }

        fn rel(mut self, rel: Relationship) -> Self {
            self.rels.push(rel);
            self
        }

        fn scan(&self, origin: &str) -> DownstreamCeiling {
            scan_downstream(origin, &self.rels, &self.positions, &self.tasks, 10.0)
        }
    }

    #[test]
    fn test_no_successors_is_unbounded() {
        let f = Fixture::new().bar("A", 0.0, 50.0);
        assert!(f.scan("A").is_unbounded());
    }

    #[test]
    fn test_unlocked_chain_is_unbounded() {
        let f = Fixture::new()
            .bar("A", 0.0, 50.0)
            .bar("B", 50.0, 50.0)
            .rel(Relationship::finish_to_start("A", "B"));
        assert!(f.scan("A").is_unbounded());
    }

    #[test]
    fn test_direct_locked_successor() {
        let f = Fixture::new()
            .bar("A", 0.0, 50.0)
            .locked("B", 500.0, 80.0)
            .rel(Relationship::finish_to_start("A", "B"));
        let c = f.scan("A");
        assert_eq!(c.end, 500.0);
        assert_eq!(c.end_cap(50.0), 500.0);
        assert_eq!(c.start_cap(50.0), 450.0);
    }

    #[test]
    fn test_transitive_ceiling_through_chain() {
        // A -FS(lag 1d)-> B(w=30) -FS-> C locked at 300
        // B.x >= E + 10; C.x >= B.x + 30 → E <= 300 - 40
        let f = Fixture::new()
            .bar("A", 0.0, 50.0)
            .bar("B", 100.0, 30.0)
            .locked("C", 300.0, 20.0)
            .rel(Relationship::finish_to_start("A", "B").with_lag(1.0))
            .rel(Relationship::finish_to_start("B", "C"));
        assert_eq!(f.scan("A").end_cap(50.0), 260.0);
    }

    #[test]
    fn test_start_to_start_bounds_origin_start() {
        // A -SS(lag 2d)-> L locked at 200: S + 20 <= 200
        let f = Fixture::new()
            .bar("A", 0.0, 50.0)
            .locked("L", 200.0, 20.0)
            .rel(Relationship::new("A", "L", RelationshipKind::StartToStart).with_lag(2.0));
        let c = f.scan("A");
        assert_eq!(c.start, 180.0);
        assert_eq!(c.end, f64::INFINITY);
        assert_eq!(c.end_cap(50.0), 230.0);
    }

    #[test]
    fn test_diamond_takes_longest_chain() {
        // A → B (w=10) → D, A → C (w=100) → D, D → L locked at 400
        let f = Fixture::new()
            .bar("A", 0.0, 10.0)
            .bar("B", 10.0, 10.0)
            .bar("C", 10.0, 100.0)
            .bar("D", 110.0, 10.0)
            .locked("L", 400.0, 10.0)
            .rel(Relationship::finish_to_start("A", "B"))
            .rel(Relationship::finish_to_start("B", "D"))
            .rel(Relationship::finish_to_start("A", "C"))
            .rel(Relationship::finish_to_start("C", "D"))
            .rel(Relationship::finish_to_start("D", "L"));
        // Through C: D.x >= E + 100, L.x >= E + 110 → E <= 290
        assert_eq!(f.scan("A").end_cap(10.0), 290.0);
    }

    #[test]
    fn test_scan_stops_at_locked_task() {
        // L1 locked absorbs; L2 beyond it must not bound A
        let f = Fixture::new()
            .bar("A", 0.0, 10.0)
            .locked("L1", 100.0, 10.0)
            .locked("L2", 20.0, 10.0)
            .rel(Relationship::finish_to_start("A", "L1"))
            .rel(Relationship::finish_to_start("L1", "L2"));
        assert_eq!(f.scan("A").end_cap(10.0), 100.0);
    }

    #[test]
    fn test_cycle_terminates() {
        let f = Fixture::new()
            .bar("A", 0.0, 10.0)
            .bar("B", 10.0, 10.0)
            .bar("C", 20.0, 10.0)
            .rel(Relationship::finish_to_start("A", "B"))
            .rel(Relationship::finish_to_start("B", "C"))
            .rel(Relationship::finish_to_start("C", "B"));
        assert!(f.scan("A").is_unbounded());
    }

    #[test]
    fn test_dense_dag_finds_longest_chain() {
        // A → X1 → … → X6, every Xi → every Pj (width j), every Pj → locked D
        let mut f = Fixture::new().bar("A", 0.0, 10.0).locked("D", 200.0, 10.0);
        for i in 1..=6 {
            f = f.bar(&format!("X{i}"), 0.0, 10.0);
            f = f.bar(&format!("P{i}"), 0.0, f64::from(i));
        }
        f = f.rel(Relationship::finish_to_start("A", "X1"));
        for i in 1..6 {
            f = f.rel(Relationship::finish_to_start(format!("X{i}"), format!("X{}", i + 1)));
        }
        for i in 1..=6 {
            for j in 1..=6 {
                f = f.rel(Relationship::finish_to_start(format!("X{i}"), format!("P{j}")));
            }
        }
        for j in 1..=6 {
            f = f.rel(Relationship::finish_to_start(format!("P{j}"), "D"));
        }

        // D.x >= A.end + 6 * 10 (X chain) + 6 (P6)
        assert_eq!(f.scan("A").end, 134.0);
    }

    #[test]
    fn test_downstream_ceiling_fn() {
        let f = Fixture::new()
            .bar("A", 0.0, 50.0)
            .locked("B", 500.0, 80.0)
            .rel(Relationship::finish_to_start("A", "B"));
        let c = downstream_ceiling("A", 50.0, &f.rels, &f.positions, &f.tasks, 10.0);
        assert_eq!(c, 500.0);
    }
}
