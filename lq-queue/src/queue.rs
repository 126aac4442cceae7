//! String queue over a circular sentinel list.
//!
//! A [`Queue`] is a sentinel heading a list of string elements kept in
//! external storage. Queues that share one storage can exchange elements
//! without reallocating them, which is how sorting and k-way merging work:
//! they cut runs off into temporary queues, reorder links, and splice the
//! result back.
//!
//! # Example
//!
//! ```
//! use lq_queue::{Queue, QueueStorage};
//!
//! let mut storage = QueueStorage::new();
//! let mut queue: Queue = Queue::new();
//!
//! for word in ["banana", "apple", "cherry"] {
//!     queue.insert_tail(&mut storage, word).unwrap();
//! }
//!
//! queue.sort(&mut storage, false);
//! assert_eq!(queue.to_vec(&storage), ["apple", "banana", "cherry"]);
//!
//! queue.sort(&mut storage, true);
//! assert_eq!(queue.to_vec(&storage), ["cherry", "banana", "apple"]);
//! ```
//!
//! # Element Ownership
//!
//! Exactly one structure owns each element at any time: the storage slot
//! while it is linked into a queue, or the caller once it has been removed
//! as an [`Element`]. Operations that delete elements release them from
//! storage exactly once.

use core::cmp::Ordering;

use lq_collections::{BoundedListStorage, Key, List, ListNode, ListStorage, Storage};
use rand::Rng;
use rand_core::RngCore;

use crate::context::{self, QueueContext};
use crate::{Element, QueueError};

/// Growable element storage.
pub type QueueStorage = ListStorage<String>;

/// Fixed-capacity element storage. Insertions fail once it is full.
pub type BoundedQueueStorage = BoundedListStorage<String>;

/// A queue of owned strings.
///
/// # Type Parameters
///
/// - `S`: Storage type (e.g., [`QueueStorage`])
/// - `K`: Key type (default `usize`)
#[derive(Debug)]
pub struct Queue<S = QueueStorage, K: Key = usize> {
    pub(crate) list: List<String, S, K>,
}

impl<S, K: Key> Default for Queue<S, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, K: Key> Queue<S, K> {
    /// Creates an empty queue.
    ///
    /// The sentinel is the queue value itself, so creation never touches
    /// storage and cannot fail.
    #[inline]
    pub const fn new() -> Self {
        Self { list: List::new() }
    }

    /// Returns `true` if the queue holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns `true` if the queue holds exactly one element.
    #[inline]
    pub fn is_singular(&self) -> bool {
        self.list.is_singular()
    }
}

impl<S, K: Key> Queue<S, K>
where
    S: Storage<ListNode<String, K>, Key = K>,
{
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Releases every element, then the queue itself.
    pub fn free(mut self, storage: &mut S) {
        self.list.clear(storage);
    }

    // ========================================================================
    // Insert / remove
    // ========================================================================

    /// Copies `s` into a new element at the head.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::AllocationFailure`] if storage is full. The
    /// queue is unchanged and the copy is released.
    pub fn insert_head(&mut self, storage: &mut S, s: &str) -> Result<(), QueueError> {
        self.list
            .push_front(storage, s.to_owned())
            .map(drop)
            .map_err(|full| {
                tracing::debug!(len = s.len(), "insert_head rejected: storage full");
                full.into()
            })
    }

    /// Copies `s` into a new element at the tail.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::AllocationFailure`] if storage is full. The
    /// queue is unchanged and the copy is released.
    pub fn insert_tail(&mut self, storage: &mut S, s: &str) -> Result<(), QueueError> {
        self.list
            .push_back(storage, s.to_owned())
            .map(drop)
            .map_err(|full| {
                tracing::debug!(len = s.len(), "insert_tail rejected: storage full");
                full.into()
            })
    }

    /// Unlinks the head element and hands it to the caller.
    ///
    /// If `buf` is given, the value is also copied into it with
    /// [`Element::copy_to`] semantics. Returns `None` on an empty queue.
    pub fn remove_head(&mut self, storage: &mut S, buf: Option<&mut [u8]>) -> Option<Element> {
        let element = Element::new(self.list.pop_front(storage)?);
        if let Some(buf) = buf {
            element.copy_to(buf);
        }
        Some(element)
    }

    /// Unlinks the tail element and hands it to the caller.
    ///
    /// If `buf` is given, the value is also copied into it with
    /// [`Element::copy_to`] semantics. Returns `None` on an empty queue.
    pub fn remove_tail(&mut self, storage: &mut S, buf: Option<&mut [u8]>) -> Option<Element> {
        let element = Element::new(self.list.pop_back(storage)?);
        if let Some(buf) = buf {
            element.copy_to(buf);
        }
        Some(element)
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Counts the elements by traversal. O(n).
    #[inline]
    pub fn size(&self, storage: &S) -> usize {
        self.list.len(storage)
    }

    /// Returns the head value.
    #[inline]
    pub fn front<'a>(&self, storage: &'a S) -> Option<&'a str> {
        self.list.front(storage).map(String::as_str)
    }

    /// Returns the tail value.
    #[inline]
    pub fn back<'a>(&self, storage: &'a S) -> Option<&'a str> {
        self.list.back(storage).map(String::as_str)
    }

    /// Returns an iterator over the values, head to tail.
    #[inline]
    pub fn iter<'a>(
        &self,
        storage: &'a S,
    ) -> impl DoubleEndedIterator<Item = &'a str> + use<'a, S, K> {
        self.list.iter(storage).map(String::as_str)
    }

    /// Collects the values, head to tail.
    pub fn to_vec(&self, storage: &S) -> Vec<String> {
        self.list.iter(storage).cloned().collect()
    }

    // ========================================================================
    // Deletion
    // ========================================================================

    /// Deletes the middle element: index `n / 2` (0-based), as found by the
    /// slow/fast walk from the head.
    ///
    /// For an even length this is the upper of the two middle elements:
    /// `[a, b]` loses `b`, `[a, b, c, d]` loses `c`.
    ///
    /// Returns `false` on an empty queue.
    pub fn delete_mid(&mut self, storage: &mut S) -> bool {
        match self.list.middle_key(storage) {
            Some(mid) => self.list.remove(storage, mid).is_some(),
            None => false,
        }
    }

    /// Deletes every element that belongs to a run of equal values.
    ///
    /// The queue must already be sorted so equal values are adjacent; an
    /// unsorted queue only loses adjacent runs. All members of a run are
    /// deleted, not just the extras: `[a, a, b, c, c]` becomes `[b]`.
    ///
    /// Returns the number of elements deleted.
    pub fn delete_dup(&mut self, storage: &mut S) -> usize {
        let mut deleted = 0;
        let mut curr = self.list.front_key();

        while let Some(key) = curr {
            let mut duplicated = false;
            while let Some(next) = self.list.next_key(storage, key) {
                if self.list.get(storage, next) != self.list.get(storage, key) {
                    break;
                }
                self.list.remove(storage, next);
                deleted += 1;
                duplicated = true;
            }

            curr = self.list.next_key(storage, key);
            if duplicated {
                self.list.remove(storage, key);
                deleted += 1;
            }
        }

        deleted
    }

    /// Removes every element that has a strictly smaller element anywhere
    /// to its right, leaving a non-decreasing queue. Returns the new size.
    pub fn ascend(&mut self, storage: &mut S) -> usize {
        self.prune(storage, Ordering::Greater)
    }

    /// Removes every element that has a strictly greater element anywhere
    /// to its right, leaving a non-increasing queue. Returns the new size.
    pub fn descend(&mut self, storage: &mut S) -> usize {
        self.prune(storage, Ordering::Less)
    }

    /// Walks right to left comparing each element with its surviving right
    /// neighbor, which is always the extreme value seen so far.
    fn prune(&mut self, storage: &mut S, doomed: Ordering) -> usize {
        let mut curr = self
            .list
            .back_key()
            .and_then(|last| self.list.prev_key(storage, last));

        while let Some(key) = curr {
            curr = self.list.prev_key(storage, key);
            let Some(right) = self.list.next_key(storage, key) else {
                continue;
            };
            if self.list.get(storage, key).cmp(&self.list.get(storage, right)) == doomed {
                self.list.remove(storage, key);
            }
        }

        self.size(storage)
    }

    // ========================================================================
    // Reordering
    // ========================================================================

    /// Swaps every adjacent pair: 1st with 2nd, 3rd with 4th, and so on.
    /// An odd trailing element stays in place.
    pub fn swap(&mut self, storage: &mut S) {
        let mut curr = self.list.front_key();
        while let Some(first) = curr {
            let Some(second) = self.list.next_key(storage, first) else {
                break;
            };
            self.list.unlink(storage, second);
            self.list.link_before(storage, first, second);
            curr = self.list.next_key(storage, first);
        }
    }

    /// Reverses the queue in place by relinking. O(n), no value copies.
    #[inline]
    pub fn reverse(&mut self, storage: &mut S) {
        self.list.reverse(storage);
    }

    /// Reverses each consecutive block of `k` elements in place.
    ///
    /// Blocks keep their original order. A trailing block shorter than `k`
    /// is left as it is, so `k == 0` or `k` larger than the queue leaves
    /// the queue unchanged.
    ///
    /// ```
    /// use lq_queue::{Queue, QueueStorage};
    ///
    /// let mut storage = QueueStorage::new();
    /// let mut queue: Queue = Queue::new();
    /// for s in ["1", "2", "3", "4", "5"] {
    ///     queue.insert_tail(&mut storage, s).unwrap();
    /// }
    ///
    /// queue.reverse_k(&mut storage, 2);
    /// assert_eq!(queue.to_vec(&storage), ["2", "1", "4", "3", "5"]);
    /// ```
    pub fn reverse_k(&mut self, storage: &mut S, k: usize) {
        if k < 2 {
            return;
        }

        let mut done: List<String, S, K> = List::new();
        let mut count = 0;
        let mut curr = self.list.front_key();

        while let Some(key) = curr {
            curr = self.list.next_key(storage, key);
            count += 1;
            if count == k {
                let mut block = self.list.cut_front(storage, key);
                block.reverse(storage);
                done.splice_back(storage, &mut block);
                count = 0;
            }
        }

        self.list.splice_front(storage, &mut done);
    }

    // ========================================================================
    // Sorting
    // ========================================================================

    /// Stable sort by byte-wise string order, ascending unless `descending`.
    pub fn sort(&mut self, storage: &mut S, descending: bool) {
        if descending {
            self.sort_by(storage, |a, b| b.cmp(a));
        } else {
            self.sort_by(storage, |a, b| a.cmp(b));
        }
    }

    /// Stable sort under a caller-supplied comparator.
    ///
    /// Merge sort whose merge step is the k-way merge: the queue is cut at
    /// its structural midpoint, both halves are sorted recursively, and the
    /// two halves are merged as a two-queue chain with the left half first.
    /// Elements are relinked, never copied or reallocated.
    pub fn sort_by<F>(&mut self, storage: &mut S, mut cmp: F)
    where
        F: FnMut(&str, &str) -> Ordering,
    {
        tracing::trace!("sorting queue");
        self.sort_recursive(storage, &mut cmp);
    }

    fn sort_recursive<F>(&mut self, storage: &mut S, cmp: &mut F)
    where
        F: FnMut(&str, &str) -> Ordering,
    {
        if self.list.is_empty() || self.list.is_singular() {
            return;
        }

        let Some(split) = self
            .list
            .middle_key(storage)
            .and_then(|mid| self.list.prev_key(storage, mid))
        else {
            return;
        };

        let mut left = Queue {
            list: self.list.cut_front(storage, split),
        };
        left.sort_recursive(storage, cmp);
        self.sort_recursive(storage, cmp);

        {
            let mut chain = [
                QueueContext::new(&mut left, storage),
                QueueContext::new(self, storage),
            ];
            context::merge_queues_by(storage, &mut chain, &mut *cmp);
        }

        self.list.splice_back(storage, &mut left.list);
    }

    // ========================================================================
    // Shuffling
    // ========================================================================

    /// Shuffles the queue into a uniformly random permutation.
    ///
    /// Fisher-Yates over the list: with `i` elements still unshuffled at the
    /// front, one of them is picked uniformly by position and moved to the
    /// boundary just before the shuffled suffix, for `i` from the size down
    /// to 2.
    pub fn shuffle<R: RngCore>(&mut self, storage: &mut S, rng: &mut R) {
        let size = self.size(storage);
        if size < 2 {
            return;
        }

        // First element of the shuffled suffix; `None` is the sentinel.
        let mut boundary: Option<K> = None;

        for remaining in (2..=size).rev() {
            let steps = rng.random_range(0..remaining);
            let Some(mut key) = self.list.front_key() else {
                return;
            };
            for _ in 0..steps {
                match self.list.next_key(storage, key) {
                    Some(next) => key = next,
                    None => break,
                }
            }

            self.list.unlink(storage, key);
            match boundary {
                Some(at) => self.list.link_before(storage, at, key),
                None => self.list.link_back(storage, key),
            }
            boundary = Some(key);
        }
    }
}
