//! Debug-only reentrancy guard.
//!
//! The dictionary calls into user code (`K: Eq`) while it walks a chain.
//! A key whose `eq` reaches back into the same dictionary would observe a
//! chain mid-scan, so every chain walk holds a guard. Debug builds panic
//! on nested entry; release builds compile the guard away.

#[cfg(debug_assertions)]
use core::cell::Cell;
use core::marker::PhantomData;

/// Per-container nesting tracker. Hold `let _g = self.reentrancy.enter();`
/// for the duration of a chain walk.
#[derive(Debug)]
pub struct DebugReentrancy {
    #[cfg(debug_assertions)]
    active: Cell<bool>,
    // Containers embedding this stay !Send + !Sync.
    _single_thread: PhantomData<*mut ()>,
}

impl DebugReentrancy {
    pub const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(false),
            _single_thread: PhantomData,
        }
    }

    /// Mark the start of a guarded walk. Panics in debug builds if a walk
    /// on the same container is already in progress.
    #[inline]
    pub fn enter(&self) -> ReentrancyGuard<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.active.replace(true),
                "reentrancy detected: container entered while a chain walk is in progress"
            );
            ReentrancyGuard { owner: self }
        }

        #[cfg(not(debug_assertions))]
        {
            ReentrancyGuard { _z: PhantomData }
        }
    }

    /// True while a guard from this tracker is alive (always false in release).
    pub fn is_active(&self) -> bool {
        #[cfg(debug_assertions)]
        {
            self.active.get()
        }
        #[cfg(not(debug_assertions))]
        {
            false
        }
    }
}

impl Default for DebugReentrancy {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII token returned by [`DebugReentrancy::enter`].
pub struct ReentrancyGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a DebugReentrancy,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<&'a ()>,
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        {
            let was = self.owner.active.replace(false);
            debug_assert!(was);
        }
    }
}
