//! Dependency relationships between tasks.
//!
//! A relationship is a directed edge `from → to` (predecessor → successor)
//! binding one anchor of each bar:
//!
//! | Kind | Constraint |
//! |------|------------|
//! | FS | successor.start ≥ predecessor.end + lag |
//! | SS | successor.start ≥ predecessor.start + lag |
//! | FF | successor.end ≥ predecessor.end + lag |
//! | SF | successor.end ≥ predecessor.start + lag |
//!
//! `min`/`max` widen the legal gap beyond `lag`: the successor anchor must
//! fall within `[lag + min, lag + max]` of the predecessor anchor. Lag and
//! slack are expressed in days.
//!
//! # Reference
//! PMI (2021), "PMBOK Guide", Ch. 6 (precedence diagramming method)

use serde::{Deserialize, Serialize};

/// One end of a bar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Left edge.
    Start,
    /// Right edge.
    End,
}

/// Dependency type.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    /// Finish-to-Start.
    #[default]
    #[serde(rename = "FS")]
    FinishToStart,
    /// Start-to-Start.
    #[serde(rename = "SS")]
    StartToStart,
    /// Finish-to-Finish.
    #[serde(rename = "FF")]
    FinishToFinish,
    /// Start-to-Finish.
    #[serde(rename = "SF")]
    StartToFinish,
}

impl RelationshipKind {
    /// Anchor of the predecessor bound by this kind.
    pub fn predecessor_anchor(self) -> Anchor {
        match self {
            Self::FinishToStart | Self::FinishToFinish => Anchor::End,
            Self::StartToStart | Self::StartToFinish => Anchor::Start,
        }
    }

    /// Anchor of the successor bound by this kind.
    pub fn successor_anchor(self) -> Anchor {
        match self {
            Self::FinishToStart | Self::StartToStart => Anchor::Start,
            Self::FinishToFinish | Self::StartToFinish => Anchor::End,
        }
    }

    /// Short code (`"FS"`, `"SS"`, `"FF"`, `"SF"`).
    pub fn code(self) -> &'static str {
        match self {
            Self::FinishToStart => "FS",
            Self::StartToStart => "SS",
            Self::FinishToFinish => "FF",
            Self::StartToFinish => "SF",
        }
    }
}

/// Slack classification of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elasticity {
    /// No upper slack bound.
    Elastic,
    /// `max == min`: the gap is exact.
    Fixed,
    /// `max > min`.
    Bounded,
}

/// A dependency edge between two tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Relationship {
    /// Predecessor task ID.
    pub from: String,
    /// Successor task ID.
    pub to: String,
    /// Which anchors are bound.
    #[serde(rename = "type", default)]
    pub kind: RelationshipKind,
    /// Nominal signed offset (days). Negative lag models lead time.
    #[serde(default)]
    pub lag: f64,
    /// Minimum slack beyond `lag` (days).
    #[serde(default)]
    pub min: f64,
    /// Maximum slack beyond `lag` (days). `None` = elastic.
    #[serde(default)]
    pub max: Option<f64>,
}

impl Relationship {
    /// Creates an elastic relationship with zero lag.
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: RelationshipKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
            lag: 0.0,
            min: 0.0,
            max: None,
        }
    }

    /// Creates an elastic Finish-to-Start relationship.
    pub fn finish_to_start(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::new(from, to, RelationshipKind::FinishToStart)
    }

    /// Sets the lag (days).
    pub fn with_lag(mut self, lag: f64) -> Self {
        self.lag = lag;
        self
    }

    /// Sets the minimum slack (days).
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = min;
        self
    }

    /// Sets the maximum slack (days).
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Makes the gap exact: `max = min`.
    pub fn fixed(mut self) -> Self {
        self.max = Some(self.min);
        self
    }

    /// Slack classification.
    pub fn elasticity(&self) -> Elasticity {
        match self.max {
            None => Elasticity::Elastic,
            Some(max) if max == self.min => Elasticity::Fixed,
            Some(_) => Elasticity::Bounded,
        }
    }

    /// Whether the edge connects a task to itself.
    pub fn is_self_reference(&self) -> bool {
        self.from == self.to
    }
}
