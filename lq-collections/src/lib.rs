//! Circular linked lists over external storage, with in-place merge sort.
//!
//! The key idea: separate storage from structure.
//!
//! ```text
//! Storage (Slab)  - owns the nodes, hands out stable keys
//! List            - the sentinel; coordinates keys, owns nothing
//! sort            - relinks nodes, never allocates
//! ```
//!
//! Because a list is only a sentinel (first/last keys), creating a
//! temporary list is free. Algorithms cut a run off into a stack-local
//! list, work on it, and splice it back, all in O(1) per step and without
//! touching the payloads.
//!
//! # Quick Start
//!
//! ```
//! use lq_collections::{List, ListStorage, sort};
//!
//! let mut storage: ListStorage<&str> = ListStorage::new();
//! let mut list: List<&str, ListStorage<&str>> = List::new();
//!
//! for word in ["cherry", "apple", "banana"] {
//!     list.push_back(&mut storage, word).unwrap();
//! }
//!
//! sort::merge_sort(&mut storage, &mut list, |a, b| a.cmp(b));
//!
//! let words: Vec<_> = list.iter(&storage).copied().collect();
//! assert_eq!(words, ["apple", "banana", "cherry"]);
//! ```
//!
//! # Critical Invariant: Same Storage Instance
//!
//! All operations on a list must use the same storage instance. Lists
//! that exchange nodes (splice, cut, relink) must share it as well.
//!
//! # Storage Options
//!
//! | Storage | Capacity | Insert | Use Case |
//! |---------|----------|--------|----------|
//! | `slab::Slab` ([`ListStorage`]) | Growable | Never fails | Default choice |
//! | [`BoundedSlab`] ([`BoundedListStorage`]) | Fixed | Fails with [`Full`] | Memory ceilings, exhaustion testing |

#![warn(missing_docs)]

pub mod key;
pub mod list;
pub mod sort;
pub mod storage;

pub use key::Key;
pub use list::{BoundedListStorage, Iter, Keys, List, ListNode, ListStorage};
pub use storage::{BoundedSlab, Full, Storage};
