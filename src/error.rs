//! Error kinds shared by every container in the crate.

/// Failure raised by a container operation.
///
/// Composite containers (dictionary, graphs) pass the error of the
/// container they delegate to through unchanged, except where their own
/// contract names a distinct kind (a dictionary miss is `KeyNotFound`,
/// never the chain's `IndexOutOfRange`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    /// Index outside the readable or writable span of the container.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// Supplied value cannot be stored by this container.
    #[error("type mismatch: expected {expected}")]
    TypeMismatch { expected: &'static str },
    #[error("key not found")]
    KeyNotFound,
    /// Append or insert past the fixed capacity.
    #[error("capacity of {capacity} exceeded")]
    CapacityExceeded { capacity: usize },
    /// Read of a slot that was never assigned.
    #[error("index {index} has no assigned value")]
    NotAssigned { index: usize },
    #[error("failed to allocate {capacity} slots")]
    AllocationFailure { capacity: usize },
}

pub type Result<T> = core::result::Result<T, CollectionError>;

/// Bounds check shared by the indexed containers: `index` must lie in `[0, len)`.
#[inline]
pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(CollectionError::IndexOutOfRange { index, len })
    }
}
