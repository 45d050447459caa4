//! Undirected graph whose adjacency entries carry a weight vector.
//!
//! A weight vector is a [`SparseIntArray`] of arbitrary length (for a
//! transit route: distance, travel time, ...). `add_edge` stores an
//! independent copy per direction, so editing the weights seen from one
//! endpoint never changes the other endpoint's copy.

use crate::error::{CollectionError, Result};
use crate::graph::{Adjacency, GraphConfig};
use crate::hash_dictionary::CharKey;
use crate::linked_list::SinglyLinkedList;
use crate::sparse_int_array::SparseIntArray;
use core::borrow::Borrow;
use core::fmt;
use tracing::debug;

/// One side of a weighted edge: the neighbour it leads to and its weights.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightedEdge<N> {
    neighbour: N,
    weights: SparseIntArray,
}

impl<N> WeightedEdge<N> {
    pub fn new(neighbour: N, weights: SparseIntArray) -> Self {
        Self { neighbour, weights }
    }

    pub fn neighbour(&self) -> &N {
        &self.neighbour
    }

    pub fn weights(&self) -> &SparseIntArray {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut SparseIntArray {
        &mut self.weights
    }

    pub fn into_parts(self) -> (N, SparseIntArray) {
        (self.neighbour, self.weights)
    }
}

impl<N: fmt::Display> fmt::Display for WeightedEdge<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.neighbour, self.weights)
    }
}

pub struct WeightedGraph<N> {
    adj: Adjacency<N, WeightedEdge<N>>,
}

impl<N> WeightedGraph<N>
where
    N: CharKey + Eq + Clone,
{
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

    pub fn add_node(&mut self, node: N) -> Result<bool> {
        self.adj.add_node(node)
    }

    /// Connect `a` and `b` with `weights`, creating either endpoint if
    /// needed. `b`'s entry receives its own clone of the vector.
    pub fn add_edge(&mut self, a: N, b: N, weights: SparseIntArray) -> Result<bool> {
        let ab = WeightedEdge::new(b.clone(), weights.clone());
        let ba = WeightedEdge::new(a.clone(), weights);
        self.adj.link(a, b, ab, ba, WeightedEdge::neighbour)
    }

    /// Convenience for `add_edge` with weights given as a slice.
    pub fn add_edge_with(&mut self, a: N, b: N, weights: &[i32]) -> Result<bool> {
        self.add_edge(a, b, SparseIntArray::from_values(weights)?)
    }

    pub fn has_edge<Q>(&self, a: &Q, b: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: ?Sized + CharKey + Eq,
    {
        self.adj.has_edge(a, b, WeightedEdge::neighbour)
    }

    /// Weights stored on `a`'s side of the first `a`-`b` entry.
    pub fn weights<Q>(&self, a: &Q, b: &Q) -> Option<&SparseIntArray>
    where
        N: Borrow<Q>,
        Q: ?Sized + CharKey + Eq,
    {
        self.adj
            .neighbours(a)
            .iter()
            .find(|e| e.neighbour.borrow() == b)
            .map(WeightedEdge::weights)
    }

    /// Remove the first entry whose neighbour matches on each side.
    pub fn remove_edge<Q>(&mut self, a: &Q, b: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: ?Sized + CharKey + Eq,
    {
        self.adj.unlink(a, b, WeightedEdge::neighbour)
    }

    /// Remove `node` and every entry pointing at it, returning its former
    /// adjacency entry. Fails with `KeyNotFound` if the node is absent.
    ///
    /// Entries do not index their reverse side, so every other node's list
    /// is scanned: O(V·E) for the whole graph.
    pub fn remove_node<Q>(&mut self, node: &Q) -> Result<SinglyLinkedList<WeightedEdge<N>>>
    where
        N: Borrow<Q>,
        Q: ?Sized + CharKey + Eq,
    {
        if !self.adj.lists.contains(node) {
            return Err(CollectionError::KeyNotFound);
        }
        let referencing: Vec<N> = self
            .adj
            .lists
            .iter()
            .filter(|(other, list)| {
                (*other).borrow() != node && list.iter().any(|e| e.neighbour.borrow() == node)
            })
            .map(|(other, _)| other.clone())
            .collect();
        for other in &referencing {
            let list = self.adj.lists.get_mut::<N>(other)?;
            while list
                .remove_first(|e| e.neighbour.borrow() == node)
                .is_some()
            {}
        }
        let own = self.adj.lists.remove(node)?;
        debug!(
            nodes = self.adj.lists.len(),
            scanned = referencing.len(),
            "weighted graph node removed"
        );
        Ok(own)
    }

    /// `(neighbour, weights)` entries of `node`, empty if it is absent.
    pub fn get_neighbours<Q>(&self, node: &Q) -> &SinglyLinkedList<WeightedEdge<N>>
    where
        N: Borrow<Q>,
        Q: ?Sized + CharKey + Eq,
    {
        self.adj.neighbours(node)
    }

    /// Mutable access to `node`'s entries, e.g. to edit weights in place.
    pub fn neighbours_mut<Q>(&mut self, node: &Q) -> Result<&mut SinglyLinkedList<WeightedEdge<N>>>
    where
        N: Borrow<Q>,
        Q: ?Sized + CharKey + Eq,
    {
        self.adj.neighbours_mut(node)
    }
}

impl<N: fmt::Display + CharKey + Eq + Clone> fmt::Display for WeightedGraph<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.adj.fmt_with(f)
    }
}

impl<N: fmt::Debug> fmt::Debug for WeightedGraph<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.adj.lists.iter()).finish()
    }
}
