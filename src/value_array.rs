//! ValueArray: fixed-capacity array of owned values.
//!
//! Storage is sparse (any slot below `capacity` can be written) but reads
//! are bounded by the occupied count `len()`: the container presents the
//! occupied prefix `[0, len)` to readers. A slot inside that prefix that
//! was never written reads as `None`.
//!
//! Storing moves the value in; replacing a slot hands the previous value
//! back to the caller, so ownership is never duplicated.

use crate::buffer;
use crate::error::{check_index, Result};
use core::fmt;

pub struct ValueArray<T> {
    slots: Box<[Option<T>]>,
    size: usize,
}

impl<T> ValueArray<T> {
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            slots: buffer::alloc_empty(capacity)?,
            size: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots, which is also the readable extent.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Move `value` into `index`, returning the value it replaced.
    pub fn set(&mut self, index: usize, value: T) -> Result<Option<T>> {
        check_index(index, self.slots.len())?;
        let prev = self.slots[index].replace(value);
        if prev.is_none() {
            self.size += 1;
        }
        Ok(prev)
    }

    /// Read a slot of the occupied prefix.
    pub fn get(&self, index: usize) -> Result<Option<&T>> {
        check_index(index, self.size)?;
        Ok(self.slots[index].as_ref())
    }

    pub fn get_mut(&mut self, index: usize) -> Result<Option<&mut T>> {
        check_index(index, self.size)?;
        Ok(self.slots[index].as_mut())
    }

    /// Empty a slot and return its value. Any slot below capacity may be taken.
    pub fn take(&mut self, index: usize) -> Result<Option<T>> {
        check_index(index, self.slots.len())?;
        let prev = self.slots[index].take();
        if prev.is_some() {
            self.size -= 1;
        }
        Ok(prev)
    }

    /// Drop every stored value; capacity is kept.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.size = 0;
    }

    /// Occupied values of the prefix `[0, len)`, in index order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            it: self.slots[..self.size].iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            it: self.slots[..self.size].iter_mut(),
        }
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }
}

impl<T> Default for ValueArray<T> {
    fn default() -> Self {
        Self {
            slots: Box::default(),
            size: 0,
        }
    }
}

impl<T: Clone> Clone for ValueArray<T> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            size: self.size,
        }
    }
}

/// Equal when both have the same occupied count and the same slots
/// (including holes) across the occupied prefix.
impl<T: PartialEq> PartialEq for ValueArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.slots[..self.size] == other.slots[..other.size]
    }
}

impl<T: Eq> Eq for ValueArray<T> {}

pub struct Iter<'a, T> {
    it: core::slice::Iter<'a, Option<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.it.by_ref().find_map(Option::as_ref)
    }
}

pub struct IterMut<'a, T> {
    it: core::slice::IterMut<'a, Option<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        self.it.by_ref().find_map(Option::as_mut)
    }
}

impl<'a, T> IntoIterator for &'a ValueArray<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T: fmt::Display> fmt::Display for ValueArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("]")
    }
}

impl<T: fmt::Debug> fmt::Debug for ValueArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueArray")
            .field("capacity", &self.capacity())
            .field("len", &self.size)
            .field("slots", &&self.slots[..])
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CollectionError;
    use std::rc::Rc;

    /// Invariant: writing an empty slot grows `len`, overwriting does not.
    #[test]
    fn set_counts_only_new_occupancy() {
        let mut a: ValueArray<String> = ValueArray::new(3).unwrap();
        assert_eq!(a.set(0, "a".into()).unwrap(), None);
        assert_eq!(a.set(0, "b".into()).unwrap(), Some("a".to_string()));
        assert_eq!(a.len(), 1);
        assert_eq!(a.get(0).unwrap(), Some(&"b".to_string()));
    }

    /// Invariant: reads are bounded by `len`, not by capacity.
    #[test]
    fn reads_past_occupied_prefix_fail() {
        let mut a: ValueArray<i32> = ValueArray::new(4).unwrap();
        a.set(2, 9).unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(a.get(0).unwrap(), None);
        assert_eq!(
            a.get(2),
            Err(CollectionError::IndexOutOfRange { index: 2, len: 1 })
        );
        assert!(a.set(4, 1).is_err());
    }

    /// Invariant: replaced values are released exactly once.
    #[test]
    fn replacing_releases_previous_owner() {
        let first = Rc::new(1);
        let second = Rc::new(2);
        let mut a = ValueArray::new(1).unwrap();
        a.set(0, Rc::clone(&first)).unwrap();
        assert_eq!(Rc::strong_count(&first), 2);
        drop(a.set(0, Rc::clone(&second)).unwrap());
        assert_eq!(Rc::strong_count(&first), 1);
        drop(a);
        assert_eq!(Rc::strong_count(&second), 1);
    }

    #[test]
    fn take_and_clear_release_slots() {
        let mut a = ValueArray::new(3).unwrap();
        a.set(0, 'x').unwrap();
        a.set(1, 'y').unwrap();
        assert_eq!(a.take(0).unwrap(), Some('x'));
        assert_eq!(a.take(0).unwrap(), None);
        assert_eq!(a.len(), 1);
        a.clear();
        assert!(a.is_empty());
        assert_eq!(a.capacity(), 3);
    }

    #[test]
    fn equality_is_size_then_elementwise() {
        let mut a = ValueArray::new(3).unwrap();
        let mut b = ValueArray::new(5).unwrap();
        assert_eq!(a, a);
        a.set(0, 1).unwrap();
        b.set(0, 1).unwrap();
        assert_eq!(a, b);
        b.set(1, 2).unwrap();
        assert_ne!(a, b);
        a.set(1, 3).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn iteration_skips_holes_within_prefix() {
        let mut a = ValueArray::new(5).unwrap();
        a.set(0, 10).unwrap();
        a.set(2, 30).unwrap();
        a.set(1, 20).unwrap();
        assert_eq!(a.iter().copied().collect::<Vec<_>>(), vec![10, 20, 30]);
        for v in a.iter_mut() {
            *v += 1;
        }
        assert_eq!(a.to_string(), "[11, 21, 31]");
        assert!(a.contains(&21));
    }
}
