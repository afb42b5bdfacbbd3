//! Relationship lookup: flat list or precomputed adjacency index.
//!
//! Every bound computation walks the edges around one task. With a flat
//! list that is an O(n) scan per lookup; a [`RelationshipIndex`] built once
//! per drag gesture turns it into an O(1) bucket lookup. Both backings
//! implement [`RelationshipSource`] and must yield the same edges in the
//! same order, so results never depend on which one the caller passes.

use std::collections::{HashMap, HashSet};

use crate::models::Relationship;

/// Edge iterator returned by a [`RelationshipSource`].
pub type Edges<'a> = Box<dyn Iterator<Item = &'a Relationship> + 'a>;

/// Adjacency lookup over a relationship set.
pub trait RelationshipSource {
    /// Edges where `task_id` is the successor, in list order.
    fn incoming<'a>(&'a self, task_id: &'a str) -> Edges<'a>;

    /// Edges where `task_id` is the predecessor, in list order.
    fn outgoing<'a>(&'a self, task_id: &'a str) -> Edges<'a>;

    /// Whether `task_id` has any successor.
    fn has_outgoing(&self, task_id: &str) -> bool {
        self.outgoing(task_id).next().is_some()
    }

    /// Total number of edges.
    fn edge_count(&self) -> usize;

    /// Number of tasks reachable from `origin` through successor edges,
    /// `origin` included.
    fn reachable_count(&self, origin: &str) -> usize {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut stack = vec![origin];
        seen.insert(origin);
        while let Some(id) = stack.pop() {
            for rel in self.outgoing(id) {
                if seen.insert(rel.to.as_str()) {
                    stack.push(rel.to.as_str());
                }
            }
        }
        seen.len()
    }
}

/// Unindexed view over a relationship slice.
#[derive(Debug, Clone, Copy)]
pub struct RelationshipList<'r> {
    relationships: &'r [Relationship],
}

impl<'r> RelationshipList<'r> {
    /// Wraps a slice.
    pub fn new(relationships: &'r [Relationship]) -> Self {
        Self { relationships }
    }
}

impl RelationshipSource for RelationshipList<'_> {
    fn incoming<'a>(&'a self, task_id: &'a str) -> Edges<'a> {
        let relationships: &'a [Relationship] = self.relationships;
        Box::new(relationships.iter().filter(move |r| r.to == task_id))
    }

    fn outgoing<'a>(&'a self, task_id: &'a str) -> Edges<'a> {
        let relationships: &'a [Relationship] = self.relationships;
        Box::new(relationships.iter().filter(move |r| r.from == task_id))
    }

    fn edge_count(&self) -> usize {
        self.relationships.len()
    }
}

impl RelationshipSource for Vec<Relationship> {
    fn incoming<'a>(&'a self, task_id: &'a str) -> Edges<'a> {
        Box::new(self.iter().filter(move |r| r.to == task_id))
    }

    fn outgoing<'a>(&'a self, task_id: &'a str) -> Edges<'a> {
        Box::new(self.iter().filter(move |r| r.from == task_id))
    }

    fn edge_count(&self) -> usize {
        self.len()
    }
}

/// Adjacency index: task → incoming edges, task → outgoing edges.
///
/// Owns a copy of the relationships. Read-only after construction; rebuild
/// it whenever the relationship set changes.
#[derive(Debug, Clone, Default)]
pub struct RelationshipIndex {
    relationships: Vec<Relationship>,
    by_successor: HashMap<String, Vec<usize>>,
    by_predecessor: HashMap<String, Vec<usize>>,
}

impl RelationshipIndex {
    /// Builds the index. Bucket order follows list order.
    pub fn build(relationships: &[Relationship]) -> Self {
        let mut by_successor: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_predecessor: HashMap<String, Vec<usize>> = HashMap::new();

        for (i, rel) in relationships.iter().enumerate() {
            by_successor.entry(rel.to.clone()).or_default().push(i);
            by_predecessor.entry(rel.from.clone()).or_default().push(i);
        }

        Self {
            relationships: relationships.to_vec(),
            by_successor,
            by_predecessor,
        }
    }

    /// Indexed relationships, in original order.
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Whether the index holds no edges.
    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    fn bucket<'a>(&'a self, map: &'a HashMap<String, Vec<usize>>, task_id: &str) -> Edges<'a> {
        match map.get(task_id) {
            Some(indices) => Box::new(indices.iter().map(move |&i| &self.relationships[i])),
            None => Box::new(std::iter::empty()),
        }
    }
}

impl RelationshipSource for RelationshipIndex {
    fn incoming<'a>(&'a self, task_id: &'a str) -> Edges<'a> {
        self.bucket(&self.by_successor, task_id)
    }

    fn outgoing<'a>(&'a self, task_id: &'a str) -> Edges<'a> {
        self.bucket(&self.by_predecessor, task_id)
    }

    fn has_outgoing(&self, task_id: &str) -> bool {
        self.by_predecessor.contains_key(task_id)
    }

    fn edge_count(&self) -> usize {
        self.relationships.len()
    }
}
