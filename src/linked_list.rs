//! SinglyLinkedList: head/tail-tracked singly linked list.
//!
//! Nodes live in a generational [`SlotMap`] arena and link to each other
//! by key, so there are no raw pointers and no recursive `Box` chains to
//! unwind on drop. The arena's length doubles as the size counter.
//!
//! Costs: `append`, `front`, `back` are O(1); indexed access and
//! `remove_at` walk from the head and are O(n).

use crate::error::{check_index, CollectionError, Result};
use core::fmt;
use slotmap::{DefaultKey, SlotMap};

#[derive(Clone)]
struct Node<T> {
    value: T,
    next: Option<DefaultKey>,
}

#[derive(Clone)]
pub struct SinglyLinkedList<T> {
    nodes: SlotMap<DefaultKey, Node<T>>,
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
}

impl<T> SinglyLinkedList<T> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Attach `value` after the current tail.
    pub fn append(&mut self, value: T) {
        let k = self.nodes.insert(Node { value, next: None });
        match self.tail {
            Some(t) => {
                if let Some(n) = self.nodes.get_mut(t) {
                    n.next = Some(k);
                }
            }
            None => self.head = Some(k),
        }
        self.tail = Some(k);
    }

    // Walk from the head to the node at `index`.
    fn key_at(&self, index: usize) -> Option<DefaultKey> {
        let mut cur = self.head;
        for _ in 0..index {
            cur = self.nodes.get(cur?)?.next;
        }
        cur
    }

    fn out_of_range(&self, index: usize) -> CollectionError {
        CollectionError::IndexOutOfRange {
            index,
            len: self.len(),
        }
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        check_index(index, self.len())?;
        self.key_at(index)
            .and_then(|k| self.nodes.get(k))
            .map(|n| &n.value)
            .ok_or_else(|| self.out_of_range(index))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        check_index(index, self.len())?;
        let err = self.out_of_range(index);
        match self.key_at(index) {
            Some(k) => self.nodes.get_mut(k).map(|n| &mut n.value).ok_or(err),
            None => Err(err),
        }
    }

    /// Replace the value at `index`, returning the old one.
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        Ok(core::mem::replace(self.get_mut(index)?, value))
    }

    /// Unlink the node at `index` and return its value.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        check_index(index, self.len())?;
        let prev = match index {
            0 => None,
            _ => Some(
                self.key_at(index - 1)
                    .ok_or_else(|| self.out_of_range(index))?,
            ),
        };
        let target = match prev {
            Some(p) => self.nodes.get(p).and_then(|n| n.next),
            None => self.head,
        }
        .ok_or_else(|| self.out_of_range(index))?;
        let node = self
            .nodes
            .remove(target)
            .ok_or_else(|| self.out_of_range(index))?;
        match prev {
            Some(p) => {
                if let Some(n) = self.nodes.get_mut(p) {
                    n.next = node.next;
                }
            }
            None => self.head = node.next,
        }
        if self.tail == Some(target) {
            self.tail = prev;
        }
        Ok(node.value)
    }

    /// Index of the first value matching `pred`.
    pub fn position(&self, mut pred: impl FnMut(&T) -> bool) -> Option<usize> {
        self.iter().position(|v| pred(v))
    }

    /// Remove the first value matching `pred`, if any.
    pub fn remove_first(&mut self, pred: impl FnMut(&T) -> bool) -> Option<T> {
        let i = self.position(pred)?;
        self.remove_at(i).ok()
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|k| self.nodes.get(k)).map(|n| &n.value)
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|k| self.nodes.get(k)).map(|n| &n.value)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    /// Head-to-tail iteration; each call starts again at the head.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            cur: self.head,
            remaining: self.nodes.len(),
        }
    }
}

impl<T> Default for SinglyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Iter<'a, T> {
    nodes: &'a SlotMap<DefaultKey, Node<T>>,
    cur: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.nodes.get(self.cur?)?;
        self.cur = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a SinglyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> Extend<T> for SinglyLinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.append(v);
        }
    }
}

impl<T> FromIterator<T> for SinglyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T: PartialEq> PartialEq for SinglyLinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for SinglyLinkedList<T> {}

impl<T: fmt::Display> fmt::Display for SinglyLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("]")
    }
}

impl<T: fmt::Debug> fmt::Debug for SinglyLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits() -> SinglyLinkedList<i32> {
        (0..10).collect()
    }

    /// Invariant: removing from the middle relinks neighbours and shrinks by one.
    #[test]
    fn remove_middle_relinks() {
        let mut l = digits();
        assert_eq!(l.remove_at(5).unwrap(), 5);
        assert_eq!(
            l.iter().copied().collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4, 6, 7, 8, 9]
        );
        assert_eq!(l.len(), 9);
    }

    /// Invariant: head and tail stay correct when the ends are removed.
    #[test]
    fn remove_ends_fixes_head_and_tail() {
        let mut l = digits();
        l.remove_at(0).unwrap();
        assert_eq!(l.front(), Some(&1));
        l.remove_at(l.len() - 1).unwrap();
        assert_eq!(l.back(), Some(&8));
        l.append(42);
        assert_eq!(l.back(), Some(&42));
        assert_eq!(l.get(l.len() - 1).unwrap(), &42);
    }

    #[test]
    fn removing_only_node_empties_list() {
        let mut l = SinglyLinkedList::new();
        l.append("solo");
        assert_eq!(l.remove_at(0).unwrap(), "solo");
        assert!(l.is_empty());
        assert_eq!(l.front(), None);
        assert_eq!(l.back(), None);
        l.append("again");
        assert_eq!(l.front(), Some(&"again"));
        assert_eq!(l.back(), Some(&"again"));
    }

    #[test]
    fn indexed_access_is_bounds_checked() {
        let mut l = digits();
        assert_eq!(
            l.get(10),
            Err(CollectionError::IndexOutOfRange { index: 10, len: 10 })
        );
        assert!(l.set(10, 0).is_err());
        assert!(l.remove_at(10).is_err());
        assert!(SinglyLinkedList::<u8>::new().get(0).is_err());
        assert_eq!(l.set(3, 33).unwrap(), 3);
        assert_eq!(*l.get(3).unwrap(), 33);
    }

    #[test]
    fn iteration_restarts_from_head() {
        let l: SinglyLinkedList<_> = ["a", "b", "c"].into_iter().collect();
        let once: Vec<_> = l.iter().collect();
        let twice: Vec<_> = (&l).into_iter().collect();
        assert_eq!(once, twice);
        assert_eq!(l.iter().len(), 3);
        assert_eq!(l.to_string(), "[a -> b -> c]");
    }

    #[test]
    fn remove_first_takes_one_match() {
        let mut l: SinglyLinkedList<_> = [1, 2, 1, 3].into_iter().collect();
        assert_eq!(l.remove_first(|&v| v == 1), Some(1));
        assert_eq!(l.iter().copied().collect::<Vec<_>>(), vec![2, 1, 3]);
        assert_eq!(l.remove_first(|&v| v == 9), None);
        assert!(l.contains(&1));
        assert_eq!(l.position(|&v| v == 3), Some(2));
    }

    #[test]
    fn clones_are_independent() {
        let a = digits();
        let mut b = a.clone();
        b.set(0, 100).unwrap();
        assert_eq!(a.front(), Some(&0));
        assert_ne!(a, b);
        b.set(0, 0).unwrap();
        assert_eq!(a, b);
    }
}
