//! A string queue over a circular linked list, with in-place reordering,
//! stable sort and k-way merge.
//!
//! Elements live in slab storage owned by the caller; a [`Queue`] is just
//! the sentinel of a circular list of keys into that storage. Every
//! algorithm works by relinking: values are copied once on insertion and
//! never again until they are removed.
//!
//! # Quick Start
//!
//! ```
//! use lq_queue::{Queue, QueueStorage};
//!
//! let mut storage = QueueStorage::new();
//! let mut queue: Queue = Queue::new();
//!
//! for s in ["a", "a", "b", "c", "c", "d"] {
//!     queue.insert_tail(&mut storage, s).unwrap();
//! }
//!
//! // Every member of a run of equal values goes.
//! assert_eq!(queue.delete_dup(&mut storage), 4);
//! assert_eq!(queue.to_vec(&storage), ["b", "d"]);
//!
//! let head = queue.remove_head(&mut storage, None).unwrap();
//! assert_eq!(head.value(), "b");
//! assert_eq!(queue.size(&storage), 1);
//! ```
//!
//! # Storage
//!
//! | Storage | Insert | Use Case |
//! |---------|--------|----------|
//! | [`QueueStorage`] | Never fails | Default choice |
//! | [`BoundedQueueStorage`] | Fails with [`QueueError::AllocationFailure`] once full | Memory ceilings, exhaustion testing |
//!
//! Queues that exchange elements (sorting halves, merge chains) must share
//! one storage instance.
//!
//! # Modules
//!
//! - [`queue`]: the queue and its operations
//! - [`context`]: k-way merge over a chain of sorted queues
//! - [`handle`]: the same operations on an optional queue handle
//! - [`element`]: values handed back by removal

#![warn(missing_docs)]

pub mod context;
pub mod element;
pub mod error;
pub mod handle;
pub mod queue;

pub use context::{
    QueueContext, merge_queues, merge_queues_balanced, merge_queues_balanced_by, merge_queues_by,
};
pub use element::Element;
pub use error::QueueError;
pub use queue::{BoundedQueueStorage, Queue, QueueStorage};
