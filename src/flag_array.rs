//! FlagArray: fixed-capacity sequence of booleans.
//!
//! Every slot is always present (initialised to `false`), so `len()` is
//! the capacity rather than an occupancy count.

use crate::buffer;
use crate::error::{check_index, CollectionError, Result};
use core::fmt;

/// Conversion accepted by [`FlagArray::set`].
///
/// Booleans convert directly; integers convert only when they are `0` or
/// `1`, anything else is a `TypeMismatch`.
pub trait IntoFlag {
    fn into_flag(self) -> Result<bool>;
}

impl IntoFlag for bool {
    #[inline]
    fn into_flag(self) -> Result<bool> {
        Ok(self)
    }
}

macro_rules! int_into_flag {
    ($($t:ty),*) => {$(
        impl IntoFlag for $t {
            #[inline]
            fn into_flag(self) -> Result<bool> {
                match self {
                    0 => Ok(false),
                    1 => Ok(true),
                    _ => Err(CollectionError::TypeMismatch { expected: "bool or 0/1" }),
                }
            }
        }
    )*};
}

int_into_flag!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

#[derive(Clone, PartialEq, Eq)]
pub struct FlagArray {
    slots: Box<[bool]>,
}

impl FlagArray {
    /// Create an array of `capacity` flags, all `false`.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            slots: buffer::alloc_with(capacity, || false)?,
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Always equal to [`capacity`](Self::capacity).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<bool> {
        check_index(index, self.slots.len())?;
        Ok(self.slots[index])
    }

    /// Store a flag. The value is converted before the bounds check, so a
    /// bad value is reported as `TypeMismatch` even at a bad index.
    pub fn set<F: IntoFlag>(&mut self, index: usize, value: F) -> Result<()> {
        let flag = value.into_flag()?;
        check_index(index, self.slots.len())?;
        self.slots[index] = flag;
        Ok(())
    }

    /// Number of slots currently `true`.
    pub fn count_set(&self) -> usize {
        self.slots.iter().filter(|&&b| b).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.slots.iter().copied()
    }
}

impl Default for FlagArray {
    fn default() -> Self {
        Self {
            slots: Box::default(),
        }
    }
}

impl fmt::Display for FlagArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, b) in self.slots.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{b}")?;
        }
        f.write_str("]")
    }
}

impl fmt::Debug for FlagArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.slots.iter()).finish()
    }
}
