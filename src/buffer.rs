//! Fixed slot buffers backing the array containers.
//!
//! A buffer is reserved once with `try_reserve_exact` so an allocation
//! failure surfaces as `AllocationFailure` instead of aborting. The
//! returned boxed slice cannot grow, which keeps capacity immutable.

use crate::error::{CollectionError, Result};

/// Allocate `capacity` slots, each initialised by `fill`.
pub(crate) fn alloc_with<T>(capacity: usize, mut fill: impl FnMut() -> T) -> Result<Box<[T]>> {
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(capacity)
        .map_err(|_| CollectionError::AllocationFailure { capacity })?;
    slots.extend((0..capacity).map(|_| fill()));
    Ok(slots.into_boxed_slice())
}

/// Allocate `capacity` empty slots.
pub(crate) fn alloc_empty<T>(capacity: usize) -> Result<Box<[Option<T>]>> {
    alloc_with(capacity, || None)
}
