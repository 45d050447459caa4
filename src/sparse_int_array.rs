//! SparseIntArray: fixed-capacity `i32` storage with an assigned bitmap.
//!
//! A side [`FlagArray`] records which slots were explicitly written.
//! `len()` counts assigned slots only, and iteration, membership and
//! equality look at assigned slots only. Storing `0` still counts as an
//! assignment.

use crate::buffer;
use crate::error::{check_index, CollectionError, Result};
use crate::flag_array::FlagArray;
use core::fmt;

#[derive(Clone, Default)]
pub struct SparseIntArray {
    values: Box<[i32]>,
    assigned: FlagArray,
    size: usize,
}

impl SparseIntArray {
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            values: buffer::alloc_with(capacity, || 0)?,
            assigned: FlagArray::new(capacity)?,
            size: 0,
        })
    }

    /// Build an array whose capacity equals `values.len()`, every slot
    /// assigned in order. Convenient for weight vectors.
    pub fn from_values(values: &[i32]) -> Result<Self> {
        let mut arr = Self::new(values.len())?;
        for (i, &v) in values.iter().enumerate() {
            arr.set(i, v)?;
        }
        Ok(arr)
    }

    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    /// Number of distinct slots ever assigned.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn is_assigned(&self, index: usize) -> Result<bool> {
        self.assigned.get(index)
    }

    /// Store `value` at `index`.
    ///
    /// Values that do not fit a signed 32-bit integer are a
    /// `TypeMismatch`. Overwriting an assigned slot leaves `len()` unchanged.
    pub fn set<V: TryInto<i32>>(&mut self, index: usize, value: V) -> Result<()> {
        let value = value
            .try_into()
            .map_err(|_| CollectionError::TypeMismatch { expected: "i32" })?;
        check_index(index, self.values.len())?;
        if !self.assigned.get(index)? {
            self.assigned.set(index, true)?;
            self.size += 1;
        }
        self.values[index] = value;
        Ok(())
    }

    /// Read an assigned slot; unassigned slots fail with `NotAssigned`.
    pub fn get(&self, index: usize) -> Result<i32> {
        if self.assigned.get(index)? {
            Ok(self.values[index])
        } else {
            Err(CollectionError::NotAssigned { index })
        }
    }

    /// Read a slot, yielding `0` for an unassigned one. Bounds are still enforced.
    pub fn get_or_default(&self, index: usize) -> Result<i32> {
        match self.get(index) {
            Err(CollectionError::NotAssigned { .. }) => Ok(0),
            other => other,
        }
    }

    pub fn contains(&self, value: i32) -> bool {
        self.iter().any(|v| v == value)
    }

    /// Assigned values in index order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            arr: self,
            next: 0,
        }
    }
}

/// Iterator over the assigned values of a [`SparseIntArray`].
pub struct Iter<'a> {
    arr: &'a SparseIntArray,
    next: usize,
}

impl Iterator for Iter<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        while self.next < self.arr.values.len() {
            let i = self.next;
            self.next += 1;
            if let Ok(v) = self.arr.get(i) {
                return Some(v);
            }
        }
        None
    }
}

impl<'a> IntoIterator for &'a SparseIntArray {
    type Item = i32;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Two arrays are equal when they assign the same slots to the same
/// values; capacity is not compared.
impl PartialEq for SparseIntArray {
    fn eq(&self, other: &Self) -> bool {
        if self.size != other.size {
            return false;
        }
        let width = self.capacity().max(other.capacity());
        (0..width).all(|i| self.get(i).ok() == other.get(i).ok())
    }
}

impl Eq for SparseIntArray {}

impl fmt::Display for SparseIntArray {
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

impl fmt::Debug for SparseIntArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut m = f.debug_map();
        for i in 0..self.capacity() {
            if let Ok(v) = self.get(i) {
                m.entry(&i, &v);
            }
        }
        m.finish()
    }
}
