//! TextArray: fixed-capacity array of owned strings.
//!
//! `len()` tracks the highest written index plus one, not the number of
//! written slots, so an out-of-order write can leave unwritten slots
//! inside `[0, len)`. Those read back as the empty string.

use crate::buffer;
use crate::error::{check_index, CollectionError, Result};
use core::fmt;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct TextArray {
    slots: Box<[Option<Box<str>>]>,
    size: usize,
}

impl TextArray {
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            slots: buffer::alloc_empty(capacity)?,
            size: 0,
        })
    }

    /// Build an array sized exactly to `fields`, each stored in order.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self> {
        let mut arr = Self::new(fields.len())?;
        for f in fields {
            arr.append(f.as_ref())?;
        }
        Ok(arr)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Store an owned copy of `value`, dropping whatever text was there.
    pub fn set(&mut self, index: usize, value: &str) -> Result<()> {
        check_index(index, self.slots.len())?;
        self.slots[index] = Some(Box::from(value));
        self.size = self.size.max(index + 1);
        Ok(())
    }

    /// Read a slot. Any index below capacity is readable; unwritten slots
    /// yield `""`.
    pub fn get(&self, index: usize) -> Result<&str> {
        check_index(index, self.slots.len())?;
        Ok(self.slots[index].as_deref().unwrap_or(""))
    }

    /// Write at `len()` and advance it by one.
    pub fn append(&mut self, value: &str) -> Result<()> {
        if self.size == self.slots.len() {
            return Err(CollectionError::CapacityExceeded {
                capacity: self.slots.len(),
            });
        }
        self.set(self.size, value)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.iter().any(|s| s == value)
    }

    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.size = 0;
    }

    /// Written values of `[0, len)` in index order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.slots[..self.size].iter().filter_map(|s| s.as_deref())
    }
}

impl fmt::Display for TextArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, slot) in self.slots[..self.size].iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match slot {
                Some(s) => write!(f, "'{s}'")?,
                None => f.write_str("NULL")?,
            }
        }
        f.write_str("]")
    }
}

impl fmt::Debug for TextArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.slots[..self.size].iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwritten_slot_reads_empty() {
        let a = TextArray::new(10).unwrap();
        assert_eq!(a.get(0).unwrap(), "");
        assert_eq!(a.get(9).unwrap(), "");
        assert!(matches!(
            a.get(10),
            Err(CollectionError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn size_follows_highest_index() {
        let mut a = TextArray::new(5).unwrap();
        a.set(3, "d").unwrap();
        assert_eq!(a.len(), 4);
        a.set(1, "b").unwrap();
        assert_eq!(a.len(), 4);
        assert_eq!(a.get(0).unwrap(), "");
        assert_eq!(a.iter().collect::<Vec<_>>(), vec!["b", "d"]);
        assert_eq!(a.to_string(), "[NULL, 'b', NULL, 'd']");
    }

    #[test]
    fn append_stops_at_capacity() {
        let mut a = TextArray::new(2).unwrap();
        a.append("x").unwrap();
        a.append("y").unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(
            a.append("z"),
            Err(CollectionError::CapacityExceeded { capacity: 2 })
        );
        assert_eq!(a.get(1).unwrap(), "y");
    }

    #[test]
    fn append_continues_after_indexed_writes() {
        let mut a = TextArray::new(4).unwrap();
        a.set(1, "b").unwrap();
        a.append("c").unwrap();
        assert_eq!(a.get(2).unwrap(), "c");
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn stored_text_is_an_independent_copy() {
        let mut source = String::from("hello");
        let mut a = TextArray::new(1).unwrap();
        a.set(0, &source).unwrap();
        source.push_str(" world");
        assert_eq!(a.get(0).unwrap(), "hello");
        a.set(0, "bye").unwrap();
        assert_eq!(a.get(0).unwrap(), "bye");
        assert!(a.contains("bye"));
        assert!(!a.contains("hello"));
    }

    #[test]
    fn from_fields_fills_in_order() {
        let a = TextArray::from_fields(&["alpha", "beta"]).unwrap();
        assert_eq!(a.capacity(), 2);
        assert_eq!(a.to_string(), "['alpha', 'beta']");
    }
}
