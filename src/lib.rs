//! fixed-collections: fixed-capacity containers, a singly linked list, a
//! separate-chaining dictionary and undirected graphs built on them.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small set of containers whose capacity is decided once at
//!   construction, with explicit size bookkeeping and bounds checks, so
//!   higher layers can reason about occupancy without a growable buffer.
//! - Layers (leaves first):
//!   - FlagArray: booleans, every slot always present.
//!   - SparseIntArray: `i32` slots plus a FlagArray "assigned" bitmap.
//!   - ValueArray<T>: owned values; reads bounded by the occupied count.
//!   - TextArray: owned strings; length tracks the highest written index.
//!   - SinglyLinkedList<T>: head/tail list over a generational arena.
//!   - HashDictionary<K, V>: ValueArray of SinglyLinkedList chains.
//!   - Graph<N> / WeightedGraph<N>: HashDictionary of adjacency lists.
//! - Each layer uses only the public contract of the layer below.
//!
//! Constraints
//! - Single-threaded: the dictionary and graphs are `!Send`/`!Sync`.
//! - Capacity never grows. The dictionary never rehashes; chains grow
//!   instead and lookups degrade towards O(n) once keys outnumber
//!   buckets. Iteration order is therefore stable: bucket index, then
//!   insertion order within a chain.
//! - Ordering everywhere (iteration, chains, adjacency) is a pure
//!   function of the mutation sequence.
//!
//! Ownership
//! - Storing moves the value into the container. Overwriting a slot
//!   returns the previous value to the caller, so nothing is dropped
//!   twice or kept alive by accident.
//! - The linked list links nodes by arena key, not by pointer; dropping
//!   the list drops the arena in one pass.
//!
//! Errors
//! - Every fallible operation returns [`Result`] with a
//!   [`CollectionError`]. Composite containers pass inner errors through
//!   unchanged; a dictionary miss is `KeyNotFound`, never the chain's
//!   `IndexOutOfRange`.
//!
//! Reentrancy
//! - Dictionary chain walks run user `Eq`. A debug-only guard panics if
//!   that code re-enters the same dictionary mid-walk; release builds
//!   carry no cost.
//!
//! Notes and non-goals
//! - No resizing, no thread safety, no persistence format.
//! - Graph duplicate-edge behaviour is a construction-time choice
//!   ([`DuplicateEdges`]); the default keeps every call.

mod buffer;
pub mod error;
pub mod flag_array;
pub mod graph;
pub mod hash_dictionary;
mod hash_dictionary_proptest;
pub mod linked_list;
mod reentrancy;
pub mod rows;
pub mod sparse_int_array;
pub mod text_array;
pub mod value_array;
pub mod weighted_graph;

// Public surface
pub use error::{CollectionError, Result};
pub use flag_array::{FlagArray, IntoFlag};
pub use graph::{DuplicateEdges, Graph, GraphConfig};
pub use hash_dictionary::{polynomial_hash, CharKey, HashDictionary};
pub use linked_list::SinglyLinkedList;
pub use reentrancy::{DebugReentrancy, ReentrancyGuard};
pub use rows::{RowField, RowTable};
pub use sparse_int_array::SparseIntArray;
pub use text_array::TextArray;
pub use value_array::ValueArray;
pub use weighted_graph::{WeightedEdge, WeightedGraph};
