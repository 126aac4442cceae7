//! Circular doubly-linked list over external storage.
//!
//! Nodes live in user-provided storage wrapped in [`ListNode`]; the list
//! itself is only the sentinel. The sentinel holds the keys of the first and
//! last nodes and is addressed in node links by `K::NONE`, so the structure
//! is circular: the last node's `next` and the first node's `prev` both
//! point back at the sentinel, and an empty list's sentinel points at
//! itself in both directions. The sentinel never carries a payload.
//!
//! # Invariant
//!
//! For every linked node `n`: `next(prev(n)) == n` and `prev(next(n)) == n`,
//! where `next(NONE)`/`prev(NONE)` read the sentinel's first/last keys.
//! Every primitive below preserves this before returning.
//!
//! # Storage Invariant
//!
//! A list instance must always be used with the same storage instance.
//! Passing a different storage corrupts the list (links would resolve
//! against unrelated slots). This is the caller's responsibility, the same
//! discipline as the `slab` crate.
//!
//! # Example
//!
//! ```
//! use lq_collections::{List, ListStorage};
//!
//! let mut storage: ListStorage<u64> = ListStorage::new();
//! let mut list: List<u64, ListStorage<u64>> = List::new();
//!
//! list.push_back(&mut storage, 1).unwrap();
//! let b = list.push_back(&mut storage, 2).unwrap();
//! list.push_back(&mut storage, 3).unwrap();
//!
//! assert_eq!(list.len(&storage), 3);
//! assert_eq!(list.remove(&mut storage, b), Some(2));
//!
//! list.reverse(&mut storage);
//! let values: Vec<_> = list.iter(&storage).copied().collect();
//! assert_eq!(values, vec![3, 1]);
//! ```
//!
//! # Moving Runs Between Lists
//!
//! [`List::cut_front`] and [`List::splice_back`] move whole runs of nodes in
//! O(1) without touching the payloads. Ownership of the run transfers in one
//! step; no node is ever linked into two lists.
//!
//! ```
//! use lq_collections::{List, ListStorage};
//!
//! let mut storage: ListStorage<u64> = ListStorage::new();
//! let mut list: List<u64, ListStorage<u64>> = List::new();
//!
//! list.push_back(&mut storage, 1).unwrap();
//! let two = list.push_back(&mut storage, 2).unwrap();
//! list.push_back(&mut storage, 3).unwrap();
//!
//! let mut front = list.cut_front(&mut storage, two);
//! assert_eq!(front.len(&storage), 2);
//! assert_eq!(list.len(&storage), 1);
//!
//! list.splice_back(&mut storage, &mut front);
//! assert!(front.is_empty());
//! let values: Vec<_> = list.iter(&storage).copied().collect();
//! assert_eq!(values, vec![3, 1, 2]);
//! ```

use std::marker::PhantomData;

use crate::{Full, Key, Storage};

/// Growable list storage backed by `slab::Slab`.
pub type ListStorage<T> = slab::Slab<ListNode<T, usize>>;

/// Fixed-capacity list storage backed by [`BoundedSlab`](crate::BoundedSlab).
pub type BoundedListStorage<T> = crate::BoundedSlab<ListNode<T, usize>>;

/// A node in the linked list.
///
/// Wraps user data with prev/next links. Users interact with `&T` and
/// `&mut T` through the list's accessor methods.
#[derive(Debug)]
pub struct ListNode<T, K: Key = usize> {
    pub(crate) data: T,
    pub(crate) prev: K,
    pub(crate) next: K,
}

impl<T, K: Key> ListNode<T, K> {
    /// Creates a new unlinked node.
    #[inline]
    fn new(data: T) -> Self {
        Self {
            data,
            prev: K::NONE,
            next: K::NONE,
        }
    }

    /// Returns the payload.
    #[inline]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Consumes the node, returning the payload.
    #[inline]
    pub fn into_data(self) -> T {
        self.data
    }
}

/// A circular doubly-linked list over external storage.
///
/// The list value is the sentinel: it tracks the first and last keys and
/// nothing else. Length is not cached; [`List::len`] walks the list.
///
/// # Type Parameters
///
/// - `T`: Element type
/// - `S`: Storage type (e.g., [`ListStorage<T>`])
/// - `K`: Key type (default `usize`)
#[derive(Debug)]
pub struct List<T, S, K: Key = usize> {
    first: K,
    last: K,
    _marker: PhantomData<fn() -> (T, S)>,
}

impl<T, S, K: Key> Default for List<T, S, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S, K: Key> List<T, S, K> {
    /// Creates an empty list. The sentinel is self-linked.
    #[inline]
    pub const fn new() -> Self {
        Self {
            first: K::NONE,
            last: K::NONE,
            _marker: PhantomData,
        }
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    /// Returns `true` if the list holds exactly one node.
    #[inline]
    pub fn is_singular(&self) -> bool {
        self.first.is_some() && self.first == self.last
    }

    /// Returns the first node's key, or `None` if empty.
    #[inline]
    pub fn front_key(&self) -> Option<K> {
        self.first.into_option()
    }

    /// Returns the last node's key, or `None` if empty.
    #[inline]
    pub fn back_key(&self) -> Option<K> {
        self.last.into_option()
    }

    /// Returns `true` if `key` is the first node of this list.
    #[inline]
    pub fn is_head(&self, key: K) -> bool {
        self.first == key
    }

    /// Returns `true` if `key` is the last node of this list.
    #[inline]
    pub fn is_tail(&self, key: K) -> bool {
        self.last == key
    }
}

impl<T, S, K: Key> List<T, S, K>
where
    S: Storage<ListNode<T, K>, Key = K>,
{
    // ========================================================================
    // Link plumbing
    // ========================================================================

    #[inline]
    fn node(storage: &S, key: K) -> &ListNode<T, K> {
        storage.get(key).expect("list link points at a vacant slot")
    }

    #[inline]
    fn node_mut(storage: &mut S, key: K) -> &mut ListNode<T, K> {
        storage
            .get_mut(key)
            .expect("list link points at a vacant slot")
    }

    /// Successor of `at`, where `NONE` addresses the sentinel.
    #[inline]
    fn next_of(&self, storage: &S, at: K) -> K {
        if at.is_none() {
            self.first
        } else {
            Self::node(storage, at).next
        }
    }

    /// Predecessor of `at`, where `NONE` addresses the sentinel.
    #[inline]
    fn prev_of(&self, storage: &S, at: K) -> K {
        if at.is_none() {
            self.last
        } else {
            Self::node(storage, at).prev
        }
    }

    #[inline]
    fn set_next(&mut self, storage: &mut S, at: K, next: K) {
        if at.is_none() {
            self.first = next;
        } else {
            Self::node_mut(storage, at).next = next;
        }
    }

    #[inline]
    fn set_prev(&mut self, storage: &mut S, at: K, prev: K) {
        if at.is_none() {
            self.last = prev;
        } else {
            Self::node_mut(storage, at).prev = prev;
        }
    }

    /// Links `key` between two adjacent positions `prev` and `next`.
    #[inline]
    fn link_between(&mut self, storage: &mut S, key: K, prev: K, next: K) {
        let node = Self::node_mut(storage, key);
        node.prev = prev;
        node.next = next;
        self.set_prev(storage, next, key);
        self.set_next(storage, prev, key);
    }

    // ========================================================================
    // Size
    // ========================================================================

    /// Counts the nodes by traversal. O(n).
    pub fn len(&self, storage: &S) -> usize {
        let mut count = 0;
        let mut curr = self.first;
        while curr.is_some() {
            count += 1;
            curr = Self::node(storage, curr).next;
        }
        count
    }

    // ========================================================================
    // Insert operations (allocate + link)
    // ========================================================================

    /// Allocates a node for `value` and links it at the front.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if storage is full. The list is unchanged.
    #[inline]
    pub fn push_front(&mut self, storage: &mut S, value: T) -> Result<K, Full<T>> {
        let key = storage
            .try_insert(ListNode::new(value))
            .map_err(|e| Full(e.0.data))?;
        self.link_front(storage, key);
        Ok(key)
    }

    /// Allocates a node for `value` and links it at the back.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if storage is full. The list is unchanged.
    #[inline]
    pub fn push_back(&mut self, storage: &mut S, value: T) -> Result<K, Full<T>> {
        let key = storage
            .try_insert(ListNode::new(value))
            .map_err(|e| Full(e.0.data))?;
        self.link_back(storage, key);
        Ok(key)
    }

    // ========================================================================
    // Remove operations (unlink + release)
    // ========================================================================

    /// Removes and returns the front element.
    #[inline]
    pub fn pop_front(&mut self, storage: &mut S) -> Option<T> {
        let key = self.front_key()?;
        self.unlink(storage, key);
        storage.remove(key).map(ListNode::into_data)
    }

    /// Removes and returns the back element.
    #[inline]
    pub fn pop_back(&mut self, storage: &mut S) -> Option<T> {
        let key = self.back_key()?;
        self.unlink(storage, key);
        storage.remove(key).map(ListNode::into_data)
    }

    /// Removes an element by key.
    ///
    /// Returns `None` if the key is vacant.
    #[inline]
    pub fn remove(&mut self, storage: &mut S, key: K) -> Option<T> {
        storage.get(key)?;
        self.unlink(storage, key);
        storage.remove(key).map(ListNode::into_data)
    }

    /// Unlinks and releases every node. The sentinel is left self-linked.
    pub fn clear(&mut self, storage: &mut S) {
        let mut curr = self.first;
        while curr.is_some() {
            let next = Self::node(storage, curr).next;
            storage.remove(curr);
            curr = next;
        }
        self.first = K::NONE;
        self.last = K::NONE;
    }

    // ========================================================================
    // Link operations (relink only, no alloc/dealloc)
    // ========================================================================

    /// Links a detached node at the front of the list.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not valid in storage.
    #[inline]
    pub fn link_front(&mut self, storage: &mut S, key: K) {
        let first = self.first;
        self.link_between(storage, key, K::NONE, first);
    }

    /// Links a detached node at the back of the list.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not valid in storage.
    #[inline]
    pub fn link_back(&mut self, storage: &mut S, key: K) {
        let last = self.last;
        self.link_between(storage, key, last, K::NONE);
    }

    /// Links a detached node directly after `after`.
    ///
    /// # Panics
    ///
    /// Panics if `after` or `key` is not valid in storage.
    #[inline]
    pub fn link_after(&mut self, storage: &mut S, after: K, key: K) {
        let next = Self::node(storage, after).next;
        self.link_between(storage, key, after, next);
    }

    /// Links a detached node directly before `before`.
    ///
    /// # Panics
    ///
    /// Panics if `before` or `key` is not valid in storage.
    #[inline]
    pub fn link_before(&mut self, storage: &mut S, before: K, key: K) {
        let prev = Self::node(storage, before).prev;
        self.link_between(storage, key, prev, before);
    }

    /// Unlinks a node from the list without releasing it.
    ///
    /// The node stays in storage with cleared links and can be linked into
    /// any list sharing the storage. Returns `true` if the node was linked.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not valid in storage.
    #[inline]
    pub fn unlink(&mut self, storage: &mut S, key: K) -> bool {
        let node = Self::node(storage, key);
        let (prev, next) = (node.prev, node.next);

        if prev.is_none() && next.is_none() && self.first != key {
            return false;
        }

        self.set_next(storage, prev, next);
        self.set_prev(storage, next, prev);

        let node = Self::node_mut(storage, key);
        node.prev = K::NONE;
        node.next = K::NONE;
        true
    }

    // ========================================================================
    // Bulk operations
    // ========================================================================

    /// Moves every node of `other` to the back of this list. O(1).
    ///
    /// `other` is empty afterwards.
    pub fn splice_back(&mut self, storage: &mut S, other: &mut Self) {
        if other.is_empty() {
            return;
        }

        if self.is_empty() {
            self.first = other.first;
        } else {
            Self::node_mut(storage, self.last).next = other.first;
            Self::node_mut(storage, other.first).prev = self.last;
        }
        self.last = other.last;

        other.first = K::NONE;
        other.last = K::NONE;
    }

    /// Moves every node of `other` to the front of this list. O(1).
    ///
    /// `other` is empty afterwards.
    pub fn splice_front(&mut self, storage: &mut S, other: &mut Self) {
        if other.is_empty() {
            return;
        }

        if self.is_empty() {
            self.last = other.last;
        } else {
            Self::node_mut(storage, other.last).next = self.first;
            Self::node_mut(storage, self.first).prev = other.last;
        }
        self.first = other.first;

        other.first = K::NONE;
        other.last = K::NONE;
    }

    /// Cuts the run from the first node through `at` (inclusive) into a new
    /// list. O(1).
    ///
    /// `self` keeps the nodes after `at`. Both lists are well-formed on
    /// return.
    ///
    /// # Panics
    ///
    /// Panics if `at` is not valid in storage. `at` must be linked in this
    /// list.
    pub fn cut_front(&mut self, storage: &mut S, at: K) -> Self {
        let rest = Self::node(storage, at).next;

        let front = Self {
            first: self.first,
            last: at,
            _marker: PhantomData,
        };

        Self::node_mut(storage, at).next = K::NONE;
        if rest.is_some() {
            Self::node_mut(storage, rest).prev = K::NONE;
        }
        self.first = rest;
        if rest.is_none() {
            self.last = K::NONE;
        }

        front
    }

    /// Reverses the list in place by exchanging every node's links,
    /// sentinel included. O(n) time, O(1) space, no payload moves.
    pub fn reverse(&mut self, storage: &mut S) {
        let mut curr = self.first;
        while curr.is_some() {
            let node = Self::node_mut(storage, curr);
            core::mem::swap(&mut node.prev, &mut node.next);
            curr = node.prev;
        }
        core::mem::swap(&mut self.first, &mut self.last);
    }

    /// Returns the structural midpoint: the node at index `n / 2`.
    ///
    /// Found with a slow/fast walk, both starting at the first node, fast
    /// advancing two steps per step of slow. Returns `None` when empty.
    pub fn middle_key(&self, storage: &S) -> Option<K> {
        let mut slow = self.first;
        let mut fast = self.first;
        while fast.is_some() {
            let step = Self::node(storage, fast).next;
            if step.is_none() {
                break;
            }
            slow = Self::node(storage, slow).next;
            fast = Self::node(storage, step).next;
        }
        slow.into_option()
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns a reference to the element at the given key.
    #[inline]
    pub fn get<'a>(&self, storage: &'a S, key: K) -> Option<&'a T> {
        storage.get(key).map(ListNode::data)
    }

    /// Returns a mutable reference to the element at the given key.
    #[inline]
    pub fn get_mut<'a>(&mut self, storage: &'a mut S, key: K) -> Option<&'a mut T> {
        storage.get_mut(key).map(|node| &mut node.data)
    }

    /// Returns a reference to the front element.
    #[inline]
    pub fn front<'a>(&self, storage: &'a S) -> Option<&'a T> {
        self.get(storage, self.front_key()?)
    }

    /// Returns a reference to the back element.
    #[inline]
    pub fn back<'a>(&self, storage: &'a S) -> Option<&'a T> {
        self.get(storage, self.back_key()?)
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Returns the key of the node after `key`, or `None` at the tail.
    #[inline]
    pub fn next_key(&self, storage: &S, key: K) -> Option<K> {
        self.next_of(storage, key).into_option()
    }

    /// Returns the key of the node before `key`, or `None` at the head.
    #[inline]
    pub fn prev_key(&self, storage: &S, key: K) -> Option<K> {
        self.prev_of(storage, key).into_option()
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Returns an iterator over references to elements, front to back.
    #[inline]
    pub fn iter<'a>(&self, storage: &'a S) -> Iter<'a, T, S, K> {
        Iter {
            storage,
            front: self.first,
            back: self.last,
            _marker: PhantomData,
        }
    }

    /// Returns an iterator over keys, front to back.
    ///
    /// Collect the keys first when the list is modified during the walk.
    #[inline]
    pub fn keys<'a>(&self, storage: &'a S) -> Keys<'a, T, S, K> {
        Keys {
            storage,
            front: self.first,
            back: self.last,
            _marker: PhantomData,
        }
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over references to list elements.
pub struct Iter<'a, T, S, K: Key> {
    storage: &'a S,
    front: K,
    back: K,
    _marker: PhantomData<T>,
}

impl<'a, T: 'a, S, K: Key> Iterator for Iter<'a, T, S, K>
where
    S: Storage<ListNode<T, K>, Key = K>,
{
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front.is_none() {
            return None;
        }

        let node = List::<T, S, K>::node(self.storage, self.front);

        if self.front == self.back {
            self.front = K::NONE;
            self.back = K::NONE;
        } else {
            self.front = node.next;
        }

        Some(&node.data)
    }
}

impl<'a, T: 'a, S, K: Key> DoubleEndedIterator for Iter<'a, T, S, K>
where
    S: Storage<ListNode<T, K>, Key = K>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.back.is_none() {
            return None;
        }

        let node = List::<T, S, K>::node(self.storage, self.back);

        if self.front == self.back {
            self.front = K::NONE;
            self.back = K::NONE;
        } else {
            self.back = node.prev;
        }

        Some(&node.data)
    }
}

/// Iterator over keys in the list.
pub struct Keys<'a, T, S, K: Key> {
    storage: &'a S,
    front: K,
    back: K,
    _marker: PhantomData<T>,
}

impl<T, S, K: Key> Iterator for Keys<'_, T, S, K>
where
    S: Storage<ListNode<T, K>, Key = K>,
{
    type Item = K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let key = self.front.into_option()?;

        if self.front == self.back {
            self.front = K::NONE;
            self.back = K::NONE;
        } else {
            self.front = List::<T, S, K>::node(self.storage, key).next;
        }

        Some(key)
    }
}

impl<T, S, K: Key> DoubleEndedIterator for Keys<'_, T, S, K>
where
    S: Storage<ListNode<T, K>, Key = K>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let key = self.back.into_option()?;

        if self.front == self.back {
            self.front = K::NONE;
            self.back = K::NONE;
        } else {
            self.back = List::<T, S, K>::node(self.storage, key).prev;
        }

        Some(key)
    }
}
