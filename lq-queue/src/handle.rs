//! Queue operations on a possibly absent handle.
//!
//! Every function mirrors a [`Queue`] method but takes `Option<&Queue>` or
//! `Option<&mut Queue>`. A `None` handle is never a fault: mutations do
//! nothing and queries return the neutral value (`false`, `0` or `None`).
//!
//! ```
//! use lq_queue::{Queue, QueueStorage, handle};
//!
//! let mut storage = QueueStorage::new();
//! let mut queue: Queue = Queue::new();
//!
//! assert!(handle::insert_tail(Some(&mut queue), &mut storage, "x"));
//! assert!(!handle::insert_tail(None::<&mut Queue>, &mut storage, "y"));
//!
//! assert_eq!(handle::size(Some(&queue), &storage), 1);
//! assert_eq!(handle::size(None::<&Queue>, &storage), 0);
//! ```

use core::cmp::Ordering;

use lq_collections::{Key, ListNode, Storage};
use rand_core::RngCore;

use crate::{Element, Queue};

/// Creates an empty queue. Always present, since creation cannot fail.
pub fn new<S, K: Key>() -> Option<Queue<S, K>> {
    Some(Queue::new())
}

/// Releases every element and the queue. No-op on `None`.
pub fn free<S, K>(queue: Option<Queue<S, K>>, storage: &mut S)
where
    K: Key,
    S: Storage<ListNode<String, K>, Key = K>,
{
    if let Some(queue) = queue {
        queue.free(storage);
    }
}

/// Inserts at the head. Returns `false` on `None` or allocation failure.
pub fn insert_head<S, K>(queue: Option<&mut Queue<S, K>>, storage: &mut S, s: &str) -> bool
where
    K: Key,
    S: Storage<ListNode<String, K>, Key = K>,
{
    queue.is_some_and(|q| q.insert_head(storage, s).is_ok())
}

/// Inserts at the tail. Returns `false` on `None` or allocation failure.
pub fn insert_tail<S, K>(queue: Option<&mut Queue<S, K>>, storage: &mut S, s: &str) -> bool
where
    K: Key,
    S: Storage<ListNode<String, K>, Key = K>,
{
    queue.is_some_and(|q| q.insert_tail(storage, s).is_ok())
}

/// Removes the head element. `None` on `None` or an empty queue, in which
/// case `buf` is untouched.
pub fn remove_head<S, K>(
    queue: Option<&mut Queue<S, K>>,
    storage: &mut S,
    buf: Option<&mut [u8]>,
) -> Option<Element>
where
    K: Key,
    S: Storage<ListNode<String, K>, Key = K>,
{
    queue?.remove_head(storage, buf)
}

/// Removes the tail element. `None` on `None` or an empty queue, in which
/// case `buf` is untouched.
pub fn remove_tail<S, K>(
    queue: Option<&mut Queue<S, K>>,
    storage: &mut S,
    buf: Option<&mut [u8]>,
) -> Option<Element>
where
    K: Key,
    S: Storage<ListNode<String, K>, Key = K>,
{
    queue?.remove_tail(storage, buf)
}

/// Element count, `0` on `None`.
pub fn size<S, K>(queue: Option<&Queue<S, K>>, storage: &S) -> usize
where
    K: Key,
    S: Storage<ListNode<String, K>, Key = K>,
{
    queue.map_or(0, |q| q.size(storage))
}

/// Deletes the middle element. `false` on `None` or an empty queue.
pub fn delete_mid<S, K>(queue: Option<&mut Queue<S, K>>, storage: &mut S) -> bool
where
    K: Key,
    S: Storage<ListNode<String, K>, Key = K>,
{
    queue.is_some_and(|q| q.delete_mid(storage))
}

/// Deletes every run of equal values. Returns `false` only on `None`.
pub fn delete_dup<S, K>(queue: Option<&mut Queue<S, K>>, storage: &mut S) -> bool
where
    K: Key,
    S: Storage<ListNode<String, K>, Key = K>,
{
    queue.map(|q| q.delete_dup(storage)).is_some()
}

/// Swaps adjacent pairs. No-op on `None`.
pub fn swap<S, K>(queue: Option<&mut Queue<S, K>>, storage: &mut S)
where
    K: Key,
    S: Storage<ListNode<String, K>, Key = K>,
{
    if let Some(q) = queue {
        q.swap(storage);
    }
}

/// Reverses the queue. No-op on `None`.
pub fn reverse<S, K>(queue: Option<&mut Queue<S, K>>, storage: &mut S)
where
    K: Key,
    S: Storage<ListNode<String, K>, Key = K>,
{
    if let Some(q) = queue {
        q.reverse(storage);
    }
}

/// Reverses each full block of `k`. No-op on `None`.
pub fn reverse_k<S, K>(queue: Option<&mut Queue<S, K>>, storage: &mut S, k: usize)
where
    K: Key,
    S: Storage<ListNode<String, K>, Key = K>,
{
    if let Some(q) = queue {
        q.reverse_k(storage, k);
    }
}

/// Prunes to a non-decreasing queue. Returns the new size, `0` on `None`.
pub fn ascend<S, K>(queue: Option<&mut Queue<S, K>>, storage: &mut S) -> usize
where
    K: Key,
    S: Storage<ListNode<String, K>, Key = K>,
{
    queue.map_or(0, |q| q.ascend(storage))
}

/// Prunes to a non-increasing queue. Returns the new size, `0` on `None`.
pub fn descend<S, K>(queue: Option<&mut Queue<S, K>>, storage: &mut S) -> usize
where
    K: Key,
    S: Storage<ListNode<String, K>, Key = K>,
{
    queue.map_or(0, |q| q.descend(storage))
}

/// Sorts by string order. No-op on `None`.
pub fn sort<S, K>(queue: Option<&mut Queue<S, K>>, storage: &mut S, descending: bool)
where
    K: Key,
    S: Storage<ListNode<String, K>, Key = K>,
{
    if let Some(q) = queue {
        q.sort(storage, descending);
    }
}

/// Sorts under `cmp`. No-op on `None`.
pub fn sort_by<S, K, F>(queue: Option<&mut Queue<S, K>>, storage: &mut S, cmp: F)
where
    K: Key,
    S: Storage<ListNode<String, K>, Key = K>,
    F: FnMut(&str, &str) -> Ordering,
{
    if let Some(q) = queue {
        q.sort_by(storage, cmp);
    }
}

/// Shuffles the queue. No-op on `None`.
pub fn shuffle<S, K, R>(queue: Option<&mut Queue<S, K>>, storage: &mut S, rng: &mut R)
where
    K: Key,
    S: Storage<ListNode<String, K>, Key = K>,
    R: RngCore,
{
    if let Some(q) = queue {
        q.shuffle(storage, rng);
    }
}
