//! Comparator-driven merge and merge sort over a [`List`].
//!
//! Both operations relink nodes in place: no payload is copied or moved and
//! no node is allocated, so a list sorted inside full bounded storage stays
//! inside it. Recursion depth of [`merge_sort`] is O(log n).
//!
//! # Example
//!
//! ```
//! use lq_collections::{List, ListStorage, sort};
//!
//! let mut storage: ListStorage<(u32, char)> = ListStorage::new();
//! let mut list: List<(u32, char), ListStorage<(u32, char)>> = List::new();
//! for pair in [(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')] {
//!     list.push_back(&mut storage, pair).unwrap();
//! }
//!
//! // Only the number participates; equal numbers keep their order.
//! sort::merge_sort(&mut storage, &mut list, |x, y| x.0.cmp(&y.0));
//!
//! let letters: String = list.iter(&storage).map(|p| p.1).collect();
//! assert_eq!(letters, "bdac");
//! ```

use core::cmp::Ordering;

use crate::{Key, List, ListNode, Storage};

#[inline]
fn payload<T, S, K: Key>(storage: &S, key: K) -> &T
where
    S: Storage<ListNode<T, K>, Key = K>,
{
    &storage
        .get(key)
        .expect("list link points at a vacant slot")
        .data
}

/// Merges two sorted lists into `a`. `b` ends empty.
///
/// Repeatedly takes the lesser front node; on a tie the node from `a` is
/// taken first, which is what makes [`merge_sort`] stable. Whatever remains
/// of either list once the other runs dry is spliced on in one step.
pub fn merge<T, S, K, F>(storage: &mut S, a: &mut List<T, S, K>, b: &mut List<T, S, K>, mut cmp: F)
where
    K: Key,
    S: Storage<ListNode<T, K>, Key = K>,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut merged = List::new();

    while let (Some(x), Some(y)) = (a.front_key(), b.front_key()) {
        if cmp(payload(storage, x), payload(storage, y)) != Ordering::Greater {
            a.unlink(storage, x);
            merged.link_back(storage, x);
        } else {
            b.unlink(storage, y);
            merged.link_back(storage, y);
        }
    }

    merged.splice_back(storage, a);
    merged.splice_back(storage, b);
    *a = merged;
}

/// Stable merge sort of `list` under `cmp`.
///
/// Splits at the structural midpoint, sorts both halves recursively and
/// merges them with the left half winning ties. Empty and single-node lists
/// are returned untouched.
pub fn merge_sort<T, S, K, F>(storage: &mut S, list: &mut List<T, S, K>, mut cmp: F)
where
    K: Key,
    S: Storage<ListNode<T, K>, Key = K>,
    F: FnMut(&T, &T) -> Ordering,
{
    sort_recursive(storage, list, &mut cmp);
}

fn sort_recursive<T, S, K, F>(storage: &mut S, list: &mut List<T, S, K>, cmp: &mut F)
where
    K: Key,
    S: Storage<ListNode<T, K>, Key = K>,
    F: FnMut(&T, &T) -> Ordering,
{
    if list.is_empty() || list.is_singular() {
        return;
    }

    // Two or more nodes: the midpoint is at index >= 1, so it has a
    // predecessor and both halves are non-empty.
    let Some(split) = list
        .middle_key(storage)
        .and_then(|mid| list.prev_key(storage, mid))
    else {
        return;
    };

    let mut left = list.cut_front(storage, split);
    sort_recursive(storage, &mut left, cmp);
    sort_recursive(storage, list, cmp);

    merge(storage, &mut left, list, &mut *cmp);
    list.splice_back(storage, &mut left);
}

/// Returns `true` if no adjacent pair of `list` is out of order under `cmp`.
pub fn is_sorted_by<T, S, K, F>(storage: &S, list: &List<T, S, K>, mut cmp: F) -> bool
where
    K: Key,
    S: Storage<ListNode<T, K>, Key = K>,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut iter = list.iter(storage);
    let Some(mut prev) = iter.next() else {
        return true;
    };
    for curr in iter {
        if cmp(prev, curr) == Ordering::Greater {
            return false;
        }
        prev = curr;
    }
    true
}
