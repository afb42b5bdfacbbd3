//! Opt-in timing and outcome counters around resolution calls.
//!
//! The engine never times itself. Wrap the calls you care about:
//!
//! ```
//! # use std::collections::HashMap;
//! # use chrono::NaiveDate;
//! # use u_gantt::engine::ConstraintEngine;
//! # use u_gantt::models::{BarPosition, Relationship, TaskAttributes, TimeScale};
//! use u_gantt::probe::ResolutionProbe;
//! # let mut positions = HashMap::new();
//! # positions.insert("A".to_string(), BarPosition::new(0.0, 10.0));
//! # let tasks: HashMap<String, TaskAttributes> = HashMap::new();
//! # let rels: Vec<Relationship> = Vec::new();
//! # let scale = TimeScale::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 10.0).unwrap();
//! # let engine = ConstraintEngine::new(&positions, &tasks, &rels, scale);
//!
//! let mut probe = ResolutionProbe::new();
//! probe.measure("move", || engine.resolve_move("A", 30.0, 10.0));
//! let report = probe.report();
//! assert_eq!(report.operations[0].calls, 1);
//! ```

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::models::Resolution;

/// Counters for one named operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct OpStats {
    calls: usize,
    blocked: usize,
    cascaded: usize,
    total: Duration,
    max: Duration,
}

/// Accumulates per-operation statistics over wrapped resolution calls.
#[derive(Debug, Clone, Default)]
pub struct ResolutionProbe {
    ops: BTreeMap<String, OpStats>,
}

impl ResolutionProbe {
    /// Creates an empty probe.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f`, recording its duration and outcome under `name`.
    pub fn measure(&mut self, name: &str, f: impl FnOnce() -> Resolution) -> Resolution {
        let started = Instant::now();
        let resolution = f();
        self.record(name, started.elapsed(), &resolution);
        resolution
    }

    /// Records an externally timed call.
    pub fn record(&mut self, name: &str, elapsed: Duration, resolution: &Resolution) {
        let stats = self.ops.entry(name.to_string()).or_default();
        stats.calls += 1;
        if resolution.blocked {
            stats.blocked += 1;
        }
        stats.cascaded += resolution.cascade_count();
        stats.total += elapsed;
        stats.max = stats.max.max(elapsed);
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Drops all recorded statistics.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Snapshot of the statistics, sorted by operation name.
    pub fn report(&self) -> ProbeReport {
        let operations = self
            .ops
            .iter()
            .map(|(name, s)| OpReport {
                name: name.clone(),
                calls: s.calls,
                blocked: s.blocked,
                cascaded: s.cascaded,
                total_us: s.total.as_micros(),
                max_us: s.max.as_micros(),
            })
            .collect();
        ProbeReport { operations }
    }
}

/// Statistics for one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpReport {
    /// Operation name given to [`ResolutionProbe::measure`].
    pub name: String,
    /// Number of calls.
    pub calls: usize,
    /// Calls that came back blocked.
    pub blocked: usize,
    /// Cascaded tasks summed over all calls.
    pub cascaded: usize,
    /// Total time spent, microseconds.
    pub total_us: u128,
    /// Slowest call, microseconds.
    pub max_us: u128,
}

impl OpReport {
    /// Mean call duration, microseconds.
    pub fn mean_us(&self) -> u128 {
        if self.calls == 0 {
            0
        } else {
            self.total_us / self.calls as u128
        }
    }
}

/// Snapshot produced by [`ResolutionProbe::report`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    /// One entry per operation name, sorted.
    pub operations: Vec<OpReport>,
}

impl ProbeReport {
    /// Renders the report as a plain-text table.
    pub fn display_table(&self) -> String {
        if self.operations.is_empty() {
            return "No resolutions recorded.".to_string();
        }

        let mut out = String::new();
        out.push_str("operation            calls  blocked  cascaded   mean_us    max_us\n");
        out.push_str("-----------------------------------------------------------------\n");
        for op in &self.operations {
            let _ = writeln!(
                out,
                "{:<20} {:>5} {:>8} {:>9} {:>9} {:>9}",
                op.name,
                op.calls,
                op.blocked,
                op.cascaded,
                op.mean_us(),
                op.max_us
            );
        }
        out
    }
}
