//! Storage trait for slab-like containers with stable keys.
//!
//! Storage owns the nodes; lists only coordinate keys into it. A key stays
//! valid until its slot is explicitly removed, so nodes can move between
//! lists that share one storage without being reallocated.

use slab::Slab;

use crate::Key;

/// Slab-like storage with stable keys.
///
/// # Requirements
///
/// Implementations must provide:
/// - **Stable keys**: a key remains valid until explicitly removed
/// - **O(1)** insert, remove, get operations
/// - **No sentinel collisions**: `Key::NONE` is never handed out
///
/// # Implementations
///
/// - `slab::Slab<T>` - growable, insertion never fails
/// - [`BoundedSlab<T>`] - fixed capacity, insertion fails once full
pub trait Storage<T> {
    /// Key type for this storage.
    type Key: Key;

    /// Inserts a value, returning its stable key.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if the storage cannot take another value.
    fn try_insert(&mut self, value: T) -> Result<Self::Key, Full<T>>;

    /// Removes and returns the value at `key`, if present.
    fn remove(&mut self, key: Self::Key) -> Option<T>;

    /// Returns a reference to the value at `key`, if present.
    fn get(&self, key: Self::Key) -> Option<&T>;

    /// Returns a mutable reference to the value at `key`, if present.
    fn get_mut(&mut self, key: Self::Key) -> Option<&mut T>;

    /// Returns the number of occupied slots.
    fn len(&self) -> usize;

    /// Returns `true` if no slots are occupied.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Error returned when storage cannot take another value.
///
/// Carries the rejected value back so nothing is lost or leaked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("storage is full")]
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// Returns the value that could not be inserted.
    pub fn into_inner(self) -> T {
        self.0
    }
}

// =============================================================================
// slab::Slab - growable
// =============================================================================

impl<T> Storage<T> for Slab<T> {
    type Key = usize;

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<usize, Full<T>> {
        Ok(self.insert(value))
    }

    #[inline]
    fn remove(&mut self, key: usize) -> Option<T> {
        self.try_remove(key)
    }

    #[inline]
    fn get(&self, key: usize) -> Option<&T> {
        Slab::get(self, key)
    }

    #[inline]
    fn get_mut(&mut self, key: usize) -> Option<&mut T> {
        Slab::get_mut(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        Slab::len(self)
    }
}

// =============================================================================
// BoundedSlab - fixed capacity
// =============================================================================

/// Fixed-capacity storage backed by a pre-allocated `slab::Slab`.
///
/// The backing slab is allocated once up front and never grows. Inserting
/// into a full `BoundedSlab` fails with [`Full`] instead of reallocating,
/// which makes exhaustion an ordinary, recoverable condition.
///
/// # Example
///
/// ```
/// use lq_collections::{BoundedSlab, Storage};
///
/// let mut storage: BoundedSlab<u64> = BoundedSlab::with_capacity(2);
/// let a = storage.try_insert(1).unwrap();
/// storage.try_insert(2).unwrap();
///
/// assert!(storage.is_full());
/// assert_eq!(storage.try_insert(3).unwrap_err().into_inner(), 3);
///
/// storage.remove(a);
/// assert!(storage.try_insert(3).is_ok());
/// ```
#[derive(Debug)]
pub struct BoundedSlab<T> {
    slab: Slab<T>,
    capacity: usize,
}

impl<T> BoundedSlab<T> {
    /// Creates storage holding at most `capacity` values.
    ///
    /// A capacity of zero is allowed; every insertion then fails.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slab: Slab::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns the capacity.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if all slots are occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.slab.len() >= self.capacity
    }

    /// Returns the number of free slots.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity - self.slab.len()
    }

    /// Removes all values from storage.
    ///
    /// Lists still holding keys into this storage are left dangling; clear
    /// them first.
    pub fn clear(&mut self) {
        self.slab.clear();
    }
}

impl<T> Storage<T> for BoundedSlab<T> {
    type Key = usize;

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<usize, Full<T>> {
        if self.is_full() {
            return Err(Full(value));
        }
        Ok(self.slab.insert(value))
    }

    #[inline]
    fn remove(&mut self, key: usize) -> Option<T> {
        self.slab.try_remove(key)
    }

    #[inline]
    fn get(&self, key: usize) -> Option<&T> {
        self.slab.get(key)
    }

    #[inline]
    fn get_mut(&mut self, key: usize) -> Option<&mut T> {
        self.slab.get_mut(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.slab.len()
    }
}
