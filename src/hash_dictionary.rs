//! HashDictionary: separate-chaining hash table with a fixed bucket count.
//!
//! Buckets are a [`ValueArray`] of [`SinglyLinkedList`] chains filled at
//! construction. A key lands in bucket
//! `fold(0, |h, c| (h * 31 + c) mod bucket_count)` over its character
//! codes. The table never rehashes: once entries outnumber buckets the
//! chains simply grow and lookups degrade towards O(n). Iteration order is
//! bucket index order, then insertion order within a chain.
//!
//! Chain walks compare keys with user-provided `Eq`, so each walk holds a
//! debug reentrancy guard.

use crate::error::{CollectionError, Result};
use crate::linked_list::{self, SinglyLinkedList};
use crate::reentrancy::DebugReentrancy;
use crate::value_array::{self, ValueArray};
use core::borrow::Borrow;
use core::fmt;
use std::rc::Rc;
use tracing::trace;

/// Keys hashed by their character codes.
pub trait CharKey {
    fn char_codes(&self) -> impl Iterator<Item = u32> + '_;
}

impl CharKey for str {
    fn char_codes(&self) -> impl Iterator<Item = u32> + '_ {
        self.chars().map(u32::from)
    }
}

impl CharKey for String {
    fn char_codes(&self) -> impl Iterator<Item = u32> + '_ {
        self.as_str().char_codes()
    }
}

impl CharKey for Box<str> {
    fn char_codes(&self) -> impl Iterator<Item = u32> + '_ {
        (**self).char_codes()
    }
}

impl CharKey for Rc<str> {
    fn char_codes(&self) -> impl Iterator<Item = u32> + '_ {
        (**self).char_codes()
    }
}

impl CharKey for char {
    fn char_codes(&self) -> impl Iterator<Item = u32> + '_ {
        core::iter::once(u32::from(*self))
    }
}

impl<T: CharKey + ?Sized> CharKey for &T {
    fn char_codes(&self) -> impl Iterator<Item = u32> + '_ {
        (**self).char_codes()
    }
}

/// Bucket index of `key` among `bucket_count` buckets, or `None` when
/// there are no buckets.
pub fn polynomial_hash<Q: CharKey + ?Sized>(key: &Q, bucket_count: usize) -> Option<usize> {
    if bucket_count == 0 {
        return None;
    }
    let m = bucket_count as u128;
    let h = key
        .char_codes()
        .fold(0u128, |h, c| (h * 31 + u128::from(c)) % m);
    // h < bucket_count, so it fits.
    Some(h as usize)
}

#[derive(Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
}

type Chain<K, V> = SinglyLinkedList<Entry<K, V>>;

pub struct HashDictionary<K, V> {
    buckets: ValueArray<Chain<K, V>>,
    size: usize,
    reentrancy: DebugReentrancy,
}

impl<K, V> HashDictionary<K, V>
where
    K: CharKey + Eq,
{
    /// Create a dictionary with `bucket_count` empty chains.
    ///
    /// A zero-bucket dictionary is valid but cannot store anything:
    /// lookups miss and inserts fail with `CapacityExceeded`.
    pub fn new(bucket_count: usize) -> Result<Self> {
        let mut buckets = ValueArray::new(bucket_count)?;
        for i in 0..bucket_count {
            buckets.set(i, SinglyLinkedList::new())?;
        }
        Ok(Self {
            buckets,
            size: 0,
            reentrancy: DebugReentrancy::new(),
        })
    }

    /// Fixed number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.capacity()
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn bucket_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + CharKey + Eq,
    {
        polynomial_hash(key, self.buckets.capacity())
    }

    /// Length of the longest chain.
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(SinglyLinkedList::len).max().unwrap_or(0)
    }

    fn chain<Q>(&self, key: &Q) -> Result<&Chain<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + CharKey + Eq,
    {
        let idx = self.bucket_of(key).ok_or(CollectionError::KeyNotFound)?;
        self.buckets.get(idx)?.ok_or(CollectionError::KeyNotFound)
    }

    /// Insert or overwrite. Returns the value previously stored under
    /// `key`; overwriting leaves `len()` unchanged.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        let _g = self.reentrancy.enter();
        let idx = polynomial_hash(&key, self.buckets.capacity()).ok_or(
            CollectionError::CapacityExceeded {
                capacity: self.buckets.capacity(),
            },
        )?;
        let chain = self
            .buckets
            .get_mut(idx)?
            .ok_or(CollectionError::KeyNotFound)?;
        if let Some(pos) = chain.position(|e| e.key == key) {
            let entry = chain.get_mut(pos)?;
            return Ok(Some(core::mem::replace(&mut entry.value, value)));
        }
        chain.append(Entry { key, value });
        self.size += 1;
        trace!(bucket = idx, chain_len = chain.len(), "dictionary insert");
        Ok(None)
    }

    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + CharKey + Eq,
    {
        let _g = self.reentrancy.enter();
        self.chain(key)?
            .iter()
            .find(|e| e.key.borrow() == key)
            .map(|e| &e.value)
            .ok_or(CollectionError::KeyNotFound)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + CharKey + Eq,
    {
        let _g = self.reentrancy.enter();
        let idx = polynomial_hash(key, self.buckets.capacity())
            .ok_or(CollectionError::KeyNotFound)?;
        let chain = self
            .buckets
            .get_mut(idx)?
            .ok_or(CollectionError::KeyNotFound)?;
        let pos = chain
            .position(|e| e.key.borrow() == key)
            .ok_or(CollectionError::KeyNotFound)?;
        Ok(&mut chain.get_mut(pos)?.value)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + CharKey + Eq,
    {
        self.get(key).is_ok()
    }

    /// Unlink the pair stored under `key` and return its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + CharKey + Eq,
    {
        let _g = self.reentrancy.enter();
        let idx = polynomial_hash(key, self.buckets.capacity())
            .ok_or(CollectionError::KeyNotFound)?;
        let chain = self
            .buckets
            .get_mut(idx)?
            .ok_or(CollectionError::KeyNotFound)?;
        let pos = chain
            .position(|e| e.key.borrow() == key)
            .ok_or(CollectionError::KeyNotFound)?;
        let entry = chain.remove_at(pos)?;
        self.size -= 1;
        trace!(bucket = idx, chain_len = chain.len(), "dictionary remove");
        Ok(entry.value)
    }
}

impl<K, V> HashDictionary<K, V> {
    /// `(key, value)` pairs in bucket order, then chain order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: None,
            remaining: self.size,
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { it: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { it: self.iter() }
    }
}

impl<K, V> Default for HashDictionary<K, V> {
    fn default() -> Self {
        Self {
            buckets: ValueArray::default(),
            size: 0,
            reentrancy: DebugReentrancy::new(),
        }
    }
}

impl<K: Clone, V: Clone> Clone for HashDictionary<K, V> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            size: self.size,
            reentrancy: DebugReentrancy::new(),
        }
    }
}

pub struct Iter<'a, K, V> {
    buckets: value_array::Iter<'a, Chain<K, V>>,
    chain: Option<linked_list::Iter<'a, Entry<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.chain.as_mut().and_then(Iterator::next) {
                self.remaining = self.remaining.saturating_sub(1);
                return Some((&e.key, &e.value));
            }
            self.chain = Some(self.buckets.next()?.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

pub struct Keys<'a, K, V> {
    it: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<&'a K> {
        self.it.next().map(|(k, _)| k)
    }
}

pub struct Values<'a, K, V> {
    it: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<&'a V> {
        self.it.next().map(|(_, v)| v)
    }
}

impl<'a, K, V> IntoIterator for &'a HashDictionary<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

/// One line per bucket: `Bucket 1: [(k, v) -> (k, v)]`.
impl<K: fmt::Display, V: fmt::Display> fmt::Display for HashDictionary<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chain) in self.buckets.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "Bucket {i}: [")?;
            for (j, e) in chain.iter().enumerate() {
                if j > 0 {
                    f.write_str(" -> ")?;
                }
                write!(f, "({}, {})", e.key, e.value)?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for HashDictionary<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
