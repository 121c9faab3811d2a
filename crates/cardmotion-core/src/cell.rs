#![forbid(unsafe_code)]

//! Value cells: the unit of state read and written during frame evaluation.
//!
//! # Design
//!
//! [`ValueCell<T>`] is a single-owner slot with a version counter. Writes that
//! do not change the value (by `PartialEq`) are no-ops, so the version can be
//! used for dirty-checking between frames.
//!
//! [`PendingCell<T>`] holds an external write until the next frame step takes
//! it. Only the latest write survives; [`take`](PendingCell::take) clears the
//! slot in the same call that returns the value.
//!
//! # Invariants
//!
//! 1. `version` increments by exactly 1 on each value-changing write.
//! 2. `set(v)` where `v == current` leaves the version untouched.
//! 3. A taken pending value is gone: a second `take()` returns `None` until
//!    another `put()`.

/// A versioned scalar slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueCell<T> {
    value: T,
    version: u64,
}

impl<T: Copy + PartialEq> ValueCell<T> {
    /// Create a cell holding `value` at version 0.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self { value, version: 0 }
    }

    /// Current value.
    #[inline]
    #[must_use]
    pub fn get(&self) -> T {
        self.value
    }

    /// Write a new value. Returns `true` if the value changed.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.version += 1;
        true
    }

    /// Number of value-changing writes so far.
    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }
}

impl<T: Copy + PartialEq + Default> Default for ValueCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// A queued external write, consumed by the next frame step.
#[derive(Debug, Clone)]
pub struct PendingCell<T> {
    slot: Option<T>,
}

impl<T> Default for PendingCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PendingCell<T> {
    /// Create an empty pending cell.
    #[must_use]
    pub const fn new() -> Self {
        Self { slot: None }
    }

    /// Queue a value, replacing any value not yet taken.
    pub fn put(&mut self, value: T) {
        self.slot = Some(value);
    }

    /// Take the queued value, leaving the cell empty.
    pub fn take(&mut self) -> Option<T> {
        self.slot.take()
    }

    /// Borrow the queued value without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.slot.as_ref()
    }
}
