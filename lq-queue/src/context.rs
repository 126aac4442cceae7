//! K-way merge of independently sorted queues.
//!
//! A merge runs over a chain of [`QueueContext`]s, each borrowing one sorted
//! queue and caching its size. All queues in a chain must share the storage
//! passed to the merge. When the merge returns, the first context's queue
//! holds every element, the others are empty, and the cached sizes agree
//! with the queues again.
//!
//! Two strategies produce the same order:
//!
//! | Function | Cost | Approach |
//! |----------|------|----------|
//! | [`merge_queues`] / [`merge_queues_by`] | O(n·k) | scan every front, take the best |
//! | [`merge_queues_balanced`] / [`merge_queues_balanced_by`] | O(n log k) | merge halves of the chain pairwise |
//!
//! In both, ties go to the context that comes first in the chain, so a
//! merge of stable runs is stable.
//!
//! # Example
//!
//! ```
//! use lq_queue::{Queue, QueueContext, QueueStorage, merge_queues};
//!
//! let mut storage = QueueStorage::new();
//! let mut a: Queue = Queue::new();
//! let mut b: Queue = Queue::new();
//! for s in ["ant", "cat"] {
//!     a.insert_tail(&mut storage, s).unwrap();
//! }
//! for s in ["bee", "dog"] {
//!     b.insert_tail(&mut storage, s).unwrap();
//! }
//!
//! let mut chain = [
//!     QueueContext::new(&mut a, &storage),
//!     QueueContext::new(&mut b, &storage),
//! ];
//! assert_eq!(merge_queues(&mut storage, &mut chain, false), 4);
//! assert_eq!(chain[0].size(), 4);
//! assert_eq!(chain[1].size(), 0);
//!
//! assert_eq!(a.to_vec(&storage), ["ant", "bee", "cat", "dog"]);
//! assert!(b.is_empty());
//! ```

use core::cmp::Ordering;

use lq_collections::{Key, List, ListNode, Storage, sort};

use crate::Queue;

/// One queue taking part in a merge, with its cached size.
#[derive(Debug)]
pub struct QueueContext<'q, S, K: Key = usize> {
    queue: &'q mut Queue<S, K>,
    size: usize,
}

impl<'q, S, K: Key> QueueContext<'q, S, K>
where
    S: Storage<ListNode<String, K>, Key = K>,
{
    /// Wraps `queue`, counting its elements once.
    pub fn new(queue: &'q mut Queue<S, K>, storage: &S) -> Self {
        let size = queue.size(storage);
        Self { queue, size }
    }

    /// Cached element count.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The wrapped queue.
    #[inline]
    pub fn queue(&self) -> &Queue<S, K> {
        self.queue
    }
}

#[inline]
fn value<S, K: Key>(storage: &S, key: K) -> &str
where
    S: Storage<ListNode<String, K>, Key = K>,
{
    storage
        .get(key)
        .expect("queue link points at a vacant slot")
        .data()
}

/// Merges the sorted queues of `chain` into the first one by string order,
/// ascending unless `descending`. Returns the number of elements moved.
pub fn merge_queues<S, K>(
    storage: &mut S,
    chain: &mut [QueueContext<'_, S, K>],
    descending: bool,
) -> usize
where
    K: Key,
    S: Storage<ListNode<String, K>, Key = K>,
{
    if descending {
        merge_queues_by(storage, chain, |a, b| b.cmp(a))
    } else {
        merge_queues_by(storage, chain, |a, b| a.cmp(b))
    }
}

/// Selection k-way merge under `cmp`.
///
/// Each step scans the front of every non-empty queue, detaches the least
/// one (the earliest context on ties) and appends it to the result. Once
/// every queue is drained the result is spliced into `chain[0]`. Returns the
/// number of elements moved; an empty chain moves nothing.
pub fn merge_queues_by<S, K, F>(
    storage: &mut S,
    chain: &mut [QueueContext<'_, S, K>],
    mut cmp: F,
) -> usize
where
    K: Key,
    S: Storage<ListNode<String, K>, Key = K>,
    F: FnMut(&str, &str) -> Ordering,
{
    if chain.is_empty() {
        return 0;
    }
    tracing::trace!(contexts = chain.len(), "k-way merge");

    let mut merged: List<String, S, K> = List::new();
    let mut total = 0;

    loop {
        let mut best: Option<(usize, K)> = None;
        for (i, ctx) in chain.iter().enumerate() {
            let Some(key) = ctx.queue.list.front_key() else {
                continue;
            };
            match best {
                Some((_, at)) if cmp(value(storage, key), value(storage, at)) != Ordering::Less => {}
                _ => best = Some((i, key)),
            }
        }

        let Some((i, key)) = best else {
            break;
        };
        chain[i].queue.list.unlink(storage, key);
        merged.link_back(storage, key);
        total += 1;
    }

    for ctx in chain.iter_mut() {
        ctx.size = 0;
    }
    chain[0].queue.list.splice_back(storage, &mut merged);
    chain[0].size = total;

    tracing::trace!(total, "k-way merge done");
    total
}

/// Balanced counterpart of [`merge_queues`].
pub fn merge_queues_balanced<S, K>(
    storage: &mut S,
    chain: &mut [QueueContext<'_, S, K>],
    descending: bool,
) -> usize
where
    K: Key,
    S: Storage<ListNode<String, K>, Key = K>,
{
    if descending {
        merge_queues_balanced_by(storage, chain, |a, b| b.cmp(a))
    } else {
        merge_queues_balanced_by(storage, chain, |a, b| a.cmp(b))
    }
}

/// Divide-and-conquer k-way merge under `cmp`.
///
/// Splits the chain at its midpoint, merges each half into its first
/// context, then merges the two results with the left one winning ties.
/// The resulting order is identical to [`merge_queues_by`].
pub fn merge_queues_balanced_by<S, K, F>(
    storage: &mut S,
    chain: &mut [QueueContext<'_, S, K>],
    mut cmp: F,
) -> usize
where
    K: Key,
    S: Storage<ListNode<String, K>, Key = K>,
    F: FnMut(&str, &str) -> Ordering,
{
    tracing::trace!(contexts = chain.len(), "balanced k-way merge");
    balanced_recursive(storage, chain, &mut cmp);
    let total = chain.first().map_or(0, QueueContext::size);
    tracing::trace!(total, "balanced k-way merge done");
    total
}

fn balanced_recursive<S, K, F>(storage: &mut S, chain: &mut [QueueContext<'_, S, K>], cmp: &mut F)
where
    K: Key,
    S: Storage<ListNode<String, K>, Key = K>,
    F: FnMut(&str, &str) -> Ordering,
{
    if chain.len() < 2 {
        return;
    }

    let (left, right) = chain.split_at_mut(chain.len() / 2);
    balanced_recursive(storage, left, cmp);
    balanced_recursive(storage, right, cmp);

    let (a, b) = (&mut left[0], &mut right[0]);
    sort::merge(storage, &mut a.queue.list, &mut b.queue.list, |x, y| {
        cmp(x, y)
    });
    a.size += b.size;
    b.size = 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QueueStorage;

    fn build(storage: &mut QueueStorage, values: &[&str]) -> Queue {
        let mut queue = Queue::new();
        for v in values {
            queue.insert_tail(storage, v).unwrap();
        }
        queue
    }

    #[test]
    fn context_caches_size() {
        let mut storage = QueueStorage::new();
        let mut queue = build(&mut storage, &["a", "b", "c"]);

        let ctx = QueueContext::new(&mut queue, &storage);
        assert_eq!(ctx.size(), 3);
        assert_eq!(ctx.queue().front(&storage), Some("a"));
    }

    #[test]
    fn merge_three_queues() {
        let mut storage = QueueStorage::new();
        let mut a = build(&mut storage, &["a", "d", "g"]);
        let mut b = build(&mut storage, &["b", "e"]);
        let mut c = build(&mut storage, &["c", "f", "h"]);

        {
            let mut chain = [
                QueueContext::new(&mut a, &storage),
                QueueContext::new(&mut b, &storage),
                QueueContext::new(&mut c, &storage),
            ];
            assert_eq!(merge_queues(&mut storage, &mut chain, false), 8);
            let sizes: Vec<_> = chain.iter().map(QueueContext::size).collect();
            assert_eq!(sizes, [8, 0, 0]);
        }

        assert_eq!(a.to_vec(&storage), ["a", "b", "c", "d", "e", "f", "g", "h"]);
        assert!(b.is_empty());
        assert!(c.is_empty());
        assert_eq!(storage.len(), 8);
    }

    #[test]
    fn merge_descending() {
        let mut storage = QueueStorage::new();
        let mut a = build(&mut storage, &["z", "m", "a"]);
        let mut b = build(&mut storage, &["y", "b"]);

        {
            let mut chain = [
                QueueContext::new(&mut a, &storage),
                QueueContext::new(&mut b, &storage),
            ];
            assert_eq!(merge_queues(&mut storage, &mut chain, true), 5);
        }

        assert_eq!(a.to_vec(&storage), ["z", "y", "m", "b", "a"]);
    }

    #[test]
    fn merge_into_empty_first_queue() {
        let mut storage = QueueStorage::new();
        let mut a: Queue = Queue::new();
        let mut b = build(&mut storage, &["x", "y"]);

        {
            let mut chain = [
                QueueContext::new(&mut a, &storage),
                QueueContext::new(&mut b, &storage),
            ];
            assert_eq!(merge_queues(&mut storage, &mut chain, false), 2);
        }

        assert_eq!(a.to_vec(&storage), ["x", "y"]);
        assert!(b.is_empty());
    }

    #[test]
    fn merge_empty_chain() {
        let mut storage = QueueStorage::new();
        let mut chain: [QueueContext<'_, QueueStorage>; 0] = [];
        assert_eq!(merge_queues(&mut storage, &mut chain, false), 0);
        assert_eq!(merge_queues_balanced(&mut storage, &mut chain, false), 0);
    }

    #[test]
    fn merge_single_context() {
        let mut storage = QueueStorage::new();
        let mut a = build(&mut storage, &["a", "b"]);

        {
            let mut chain = [QueueContext::new(&mut a, &storage)];
            assert_eq!(merge_queues(&mut storage, &mut chain, false), 2);
            assert_eq!(merge_queues_balanced(&mut storage, &mut chain, false), 2);
        }

        assert_eq!(a.to_vec(&storage), ["a", "b"]);
    }

    #[test]
    fn ties_favor_earlier_context() {
        let mut storage = QueueStorage::new();
        let mut a = build(&mut storage, &["k1", "k3"]);
        let mut b = build(&mut storage, &["k2"]);
        let mut c = build(&mut storage, &["k4", "z"]);

        {
            let mut chain = [
                QueueContext::new(&mut a, &storage),
                QueueContext::new(&mut b, &storage),
                QueueContext::new(&mut c, &storage),
            ];
            merge_queues_by(&mut storage, &mut chain, |x, y| x[..1].cmp(&y[..1]));
        }

        assert_eq!(a.to_vec(&storage), ["k1", "k3", "k2", "k4", "z"]);
    }

    #[test]
    fn balanced_matches_selection() {
        let inputs: [&[&str]; 5] = [
            &["a", "c", "c", "x"],
            &[],
            &["b", "c", "d"],
            &["a", "a"],
            &["c", "y", "z"],
        ];

        let run = |balanced: bool| {
            let mut storage = QueueStorage::new();
            let mut queues: Vec<Queue> = inputs.iter().map(|v| build(&mut storage, v)).collect();
            // Tag by source so tie order is visible.
            let tags: Vec<Vec<usize>> = queues
                .iter()
                .map(|q| q.list.keys(&storage).collect())
                .collect();

            let total = {
                let mut chain: Vec<_> = queues
                    .iter_mut()
                    .map(|q| QueueContext::new(q, &storage))
                    .collect();
                if balanced {
                    merge_queues_balanced(&mut storage, &mut chain, false)
                } else {
                    merge_queues(&mut storage, &mut chain, false)
                }
            };

            let keys: Vec<usize> = queues[0].list.keys(&storage).collect();
            let sources: Vec<usize> = keys
                .iter()
                .map(|k| tags.iter().position(|t| t.contains(k)).unwrap())
                .collect();
            (total, queues[0].to_vec(&storage), sources)
        };

        let selection = run(false);
        let balanced = run(true);
        assert_eq!(selection.0, 12);
        assert_eq!(selection, balanced);
        assert_eq!(selection.2, [0, 3, 3, 2, 0, 0, 2, 4, 2, 0, 4, 4]);
    }

    #[test]
    fn balanced_updates_sizes() {
        let mut storage = QueueStorage::new();
        let mut a = build(&mut storage, &["b"]);
        let mut b = build(&mut storage, &["a", "c"]);
        let mut c = build(&mut storage, &["d"]);
        let mut d = build(&mut storage, &["e", "f"]);

        {
            let mut chain = [
                QueueContext::new(&mut a, &storage),
                QueueContext::new(&mut b, &storage),
                QueueContext::new(&mut c, &storage),
                QueueContext::new(&mut d, &storage),
            ];
            assert_eq!(merge_queues_balanced(&mut storage, &mut chain, false), 6);
            let sizes: Vec<_> = chain.iter().map(QueueContext::size).collect();
            assert_eq!(sizes, [6, 0, 0, 0]);
        }

        assert_eq!(a.to_vec(&storage), ["a", "b", "c", "d", "e", "f"]);
    }
}
