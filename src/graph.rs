//! Undirected graph over a [`HashDictionary`] adjacency map.
//!
//! Each node maps to a [`SinglyLinkedList`] adjacency entry. The plain
//! [`Graph`] stores bare neighbour identifiers; [`WeightedGraph`] reuses
//! the same adjacency core with `(neighbour, weights)` payloads.
//!
//! [`WeightedGraph`]: crate::weighted_graph::WeightedGraph

use crate::error::Result;
use crate::hash_dictionary::{CharKey, HashDictionary};
use crate::linked_list::SinglyLinkedList;
use core::borrow::Borrow;
use core::fmt;
use tracing::debug;

/// Whether `add_edge` may record the same pair more than once.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum DuplicateEdges {
    /// Every call appends, so repeated calls leave repeated neighbour entries.
    #[default]
    Allow,
    /// A call for an already adjacent pair is a no-op reporting `false`.
    Reject,
}

/// Construction-time settings shared by both graph flavours.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct GraphConfig {
    /// Bucket count of the adjacency dictionary. Fixed for the graph's lifetime.
    pub node_capacity: usize,
    pub duplicate_edges: DuplicateEdges,
}

impl GraphConfig {
    pub const DEFAULT_NODE_CAPACITY: usize = 20;

    pub fn with_node_capacity(mut self, node_capacity: usize) -> Self {
        self.node_capacity = node_capacity;
        self
    }

    pub fn with_duplicate_edges(mut self, duplicate_edges: DuplicateEdges) -> Self {
        self.duplicate_edges = duplicate_edges;
        self
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            node_capacity: Self::DEFAULT_NODE_CAPACITY,
            duplicate_edges: DuplicateEdges::Allow,
        }
    }
}

/// Adjacency core: node -> list of entries of type `E`. `target` projects
/// an entry onto the neighbour it names.
pub(crate) struct Adjacency<N, E> {
    pub(crate) lists: HashDictionary<N, SinglyLinkedList<E>>,
    config: GraphConfig,
    // Handed out for absent nodes so lookups never fail.
    empty: SinglyLinkedList<E>,
}

pub(crate) type Target<N, E> = fn(&E) -> &N;

impl<N, E> Adjacency<N, E>
where
    N: CharKey + Eq + Clone,
{
    pub(crate) fn new(config: GraphConfig) -> Result<Self> {
        Ok(Self {
            lists: HashDictionary::new(config.node_capacity)?,
            config,
            empty: SinglyLinkedList::new(),
        })
    }

    pub(crate) fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub(crate) fn add_node(&mut self, node: N) -> Result<bool> {
        if self.lists.contains(&node) {
            return Ok(false);
        }
        self.lists.insert(node, SinglyLinkedList::new())?;
        debug!(nodes = self.lists.len(), "graph node added");
        Ok(true)
    }

    pub(crate) fn neighbours<Q>(&self, node: &Q) -> &SinglyLinkedList<E>
    where
        N: Borrow<Q>,
        Q: ?Sized + CharKey + Eq,
    {
        self.lists.get(node).unwrap_or(&self.empty)
    }

    pub(crate) fn neighbours_mut<Q>(&mut self, node: &Q) -> Result<&mut SinglyLinkedList<E>>
    where
        N: Borrow<Q>,
        Q: ?Sized + CharKey + Eq,
    {
        self.lists.get_mut(node)
    }

    pub(crate) fn has_edge<Q>(&self, a: &Q, b: &Q, target: Target<N, E>) -> bool
    where
        N: Borrow<Q>,
        Q: ?Sized + CharKey + Eq,
    {
        self.neighbours(a).iter().any(|e| target(e).borrow() == b)
    }

    /// Create missing endpoints, then append `ab` to `a`'s list and `ba`
    /// to `b`'s list. Returns `false` when duplicates are rejected and the
    /// pair is already adjacent.
    pub(crate) fn link(&mut self, a: N, b: N, ab: E, ba: E, target: Target<N, E>) -> Result<bool> {
        self.add_node(a.clone())?;
        self.add_node(b.clone())?;
        if self.config.duplicate_edges == DuplicateEdges::Reject
            && self.has_edge(&a, &b, target)
        {
            return Ok(false);
        }
        self.lists.get_mut(&a)?.append(ab);
        self.lists.get_mut(&b)?.append(ba);
        Ok(true)
    }

    /// Remove one entry naming `b` from `a`'s list and one naming `a` from
    /// `b`'s list. Missing nodes or entries are skipped.
    pub(crate) fn unlink<Q>(&mut self, a: &Q, b: &Q, target: Target<N, E>) -> bool
    where
        N: Borrow<Q>,
        Q: ?Sized + CharKey + Eq,
    {
        let mut removed = false;
        if let Ok(list) = self.lists.get_mut(a) {
            removed |= list.remove_first(|e| target(e).borrow() == b).is_some();
        }
        if let Ok(list) = self.lists.get_mut(b) {
            removed |= list.remove_first(|e| target(e).borrow() == a).is_some();
        }
        removed
    }

    pub(crate) fn fmt_with(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        N: fmt::Display,
        E: fmt::Display,
    {
        if self.lists.is_empty() {
            return f.write_str("[]");
        }
        for (i, (node, list)) in self.lists.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{node}: {list}")?;
        }
        Ok(())
    }
}

fn identity<N>(n: &N) -> &N {
    n
}

/// Undirected, unweighted graph.
pub struct Graph<N> {
    adj: Adjacency<N, N>,
}

impl<N> Graph<N>
where
    N: CharKey + Eq + Clone,
{
    /// Graph with [`GraphConfig::default`] settings.
    pub fn new() -> Result<Self> {
        Self::with_config(GraphConfig::default())
    }

    pub fn with_config(config: GraphConfig) -> Result<Self> {
        Ok(Self {
            adj: Adjacency::new(config)?,
        })
    }

    pub fn config(&self) -> &GraphConfig {
        self.adj.config()
    }

    pub fn node_count(&self) -> usize {
        self.adj.lists.len()
    }

    /// Nodes in adjacency-dictionary iteration order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.adj.lists.keys()
    }

    pub fn contains_node<Q>(&self, node: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: ?Sized + CharKey + Eq,
    {
        self.adj.lists.contains(node)
    }

    /// Add `node` with no neighbours. Returns `false` if it was already present.
    pub fn add_node(&mut self, node: N) -> Result<bool> {
        self.adj.add_node(node)
    }

    /// Connect `a` and `b`, creating either endpoint if needed.
    ///
    /// With [`DuplicateEdges::Allow`] every call appends a fresh pair of
    /// entries; with [`DuplicateEdges::Reject`] a second call for the same
    /// pair returns `Ok(false)` and changes nothing.
    pub fn add_edge(&mut self, a: N, b: N) -> Result<bool> {
        let (ab, ba) = (b.clone(), a.clone());
        self.adj.link(a, b, ab, ba, identity)
    }

    pub fn has_edge<Q>(&self, a: &Q, b: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: ?Sized + CharKey + Eq,
    {
        self.adj.has_edge(a, b, identity)
    }

    /// Remove one `a`-`b` entry from each side. Absent nodes or edges are
    /// not an error; the return value says whether anything was removed.
    pub fn remove_edge<Q>(&mut self, a: &Q, b: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: ?Sized + CharKey + Eq,
    {
        self.adj.unlink(a, b, identity)
    }

    /// Remove `node` and every edge back to it, returning its former
    /// adjacency entry. Fails with `KeyNotFound` if the node is absent;
    /// removing an unknown node is an error, not a silent no-op.
    ///
    /// Uses `node`'s own neighbour list as the reverse index, so the cost
    /// is proportional to its degree times the neighbours' list lengths.
    pub fn remove_node<Q>(&mut self, node: &Q) -> Result<SinglyLinkedList<N>>
    where
        N: Borrow<Q>,
        Q: ?Sized + CharKey + Eq,
    {
        let own = self.adj.lists.remove(node)?;
        for neighbour in own.iter() {
            let neighbour: &Q = neighbour.borrow();
            if neighbour == node {
                continue;
            }
            if let Ok(list) = self.adj.lists.get_mut(neighbour) {
                list.remove_first(|v| v.borrow() == node);
            }
        }
        debug!(nodes = self.adj.lists.len(), degree = own.len(), "graph node removed");
        Ok(own)
    }

    /// Neighbours of `node`, or an empty list if it is absent.
    pub fn get_neighbours<Q>(&self, node: &Q) -> &SinglyLinkedList<N>
    where
        N: Borrow<Q>,
        Q: ?Sized + CharKey + Eq,
    {
        self.adj.neighbours(node)
    }
}

impl<N: fmt::Display + CharKey + Eq + Clone> fmt::Display for Graph<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.adj.fmt_with(f)
    }
}

impl<N: fmt::Debug> fmt::Debug for Graph<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.adj.lists.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CollectionError;

    fn residual_refs(g: &Graph<&'static str>, gone: &str) -> usize {
        g.nodes()
            .map(|n| g.get_neighbours(n).iter().filter(|v| **v == gone).count())
            .sum()
    }

    /// Invariant: edges are symmetric.
    #[test]
    fn add_edge_is_symmetric_and_creates_nodes() {
        let mut g = Graph::new().unwrap();
        assert!(g.add_edge("A", "B").unwrap());
        assert_eq!(g.node_count(), 2);
        assert!(g.get_neighbours(&"A").contains(&"B"));
        assert!(g.get_neighbours(&"B").contains(&"A"));
        assert!(g.has_edge(&"B", &"A"));
    }

    #[test]
    fn add_node_is_idempotent() {
        let mut g = Graph::new().unwrap();
        assert!(g.add_node("A").unwrap());
        g.add_edge("A", "B").unwrap();
        assert!(!g.add_node("A").unwrap());
        assert_eq!(g.get_neighbours(&"A").len(), 1);
    }

    #[test]
    fn duplicate_edges_follow_config() {
        let mut allow = Graph::new().unwrap();
        allow.add_edge("A", "B").unwrap();
        assert!(allow.add_edge("A", "B").unwrap());
        assert_eq!(allow.get_neighbours(&"A").len(), 2);

        let cfg = GraphConfig::default().with_duplicate_edges(DuplicateEdges::Reject);
        let mut reject = Graph::with_config(cfg).unwrap();
        reject.add_edge("A", "B").unwrap();
        assert!(!reject.add_edge("A", "B").unwrap());
        assert!(!reject.add_edge("B", "A").unwrap());
        assert_eq!(reject.get_neighbours(&"A").len(), 1);
        assert_eq!(reject.get_neighbours(&"B").len(), 1);
    }

    #[test]
    fn remove_edge_takes_one_entry_per_side() {
        let mut g = Graph::new().unwrap();
        g.add_edge("A", "B").unwrap();
        g.add_edge("A", "B").unwrap();
        assert!(g.remove_edge(&"A", &"B"));
        assert_eq!(g.get_neighbours(&"A").len(), 1);
        assert_eq!(g.get_neighbours(&"B").len(), 1);
        assert!(g.remove_edge(&"B", &"A"));
        assert!(!g.remove_edge(&"A", &"B"));
        assert!(!g.remove_edge(&"A", &"Z"));
    }

    /// Invariant: removing a node leaves no reference to it anywhere.
    #[test]
    fn remove_node_clears_back_references() {
        let mut g = Graph::new().unwrap();
        g.add_edge("A", "B").unwrap();
        g.add_edge("A", "B").unwrap();
        g.add_edge("B", "C").unwrap();
        g.add_edge("B", "B").unwrap();
        let own = g.remove_node(&"B").unwrap();
        assert_eq!(own.len(), 5);
        assert!(!g.contains_node(&"B"));
        assert_eq!(residual_refs(&g, "B"), 0);
        assert!(g.get_neighbours(&"A").is_empty());
        assert!(g.get_neighbours(&"C").is_empty());
    }

    #[test]
    fn absent_nodes() {
        let mut g: Graph<String> = Graph::new().unwrap();
        assert!(g.get_neighbours("ghost").is_empty());
        assert_eq!(g.remove_node("ghost").err(), Some(CollectionError::KeyNotFound));
        assert_eq!(g.to_string(), "[]");
        g.add_node("Station A".to_string()).unwrap();
        assert_eq!(g.to_string(), "Station A: []");
    }

    #[test]
    fn zero_capacity_graph_rejects_nodes() {
        let cfg = GraphConfig::default().with_node_capacity(0);
        let mut g = Graph::with_config(cfg).unwrap();
        assert_eq!(
            g.add_edge("A", "B"),
            Err(CollectionError::CapacityExceeded { capacity: 0 })
        );
    }
}
