//! Property-based tests for the queue using proptest.
//!
//! Each property runs the queue against a plain `Vec`/`VecDeque` model.

use std::collections::VecDeque;

use lq_collections::BoundedSlab;
use lq_queue::{
    BoundedQueueStorage, Queue, QueueContext, QueueStorage, merge_queues, merge_queues_balanced,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

const PROPTEST_CASES: u32 = 128;

fn build(storage: &mut QueueStorage, values: &[String]) -> Queue {
    let mut queue = Queue::new();
    for v in values {
        queue.insert_tail(storage, v).unwrap();
    }
    queue
}

/// Short strings over a small alphabet, so duplicates and ties are common.
fn word() -> impl Strategy<Value = String> {
    "[a-d]{0,3}"
}

fn words(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(word(), 0..max)
}

#[derive(Debug, Clone)]
enum Op {
    InsertHead(String),
    InsertTail(String),
    RemoveHead,
    RemoveTail,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        word().prop_map(Op::InsertHead),
        word().prop_map(Op::InsertTail),
        Just(Op::RemoveHead),
        Just(Op::RemoveTail),
    ]
}

fn dedup_runs(values: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < values.len() {
        let mut j = i + 1;
        while j < values.len() && values[j] == values[i] {
            j += 1;
        }
        if j - i == 1 {
            out.push(values[i].clone());
        }
        i = j;
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

    /// Size equals successful insertions minus removals, and failed
    /// insertions leave the queue untouched.
    #[test]
    fn size_accounting(
        capacity in 0usize..16,
        ops in prop::collection::vec(op(), 0..64),
    ) {
        let mut storage: BoundedQueueStorage = BoundedSlab::with_capacity(capacity);
        let mut queue: Queue<BoundedQueueStorage> = Queue::new();
        let mut model: VecDeque<String> = VecDeque::new();

        for op in ops {
            match op {
                Op::InsertHead(s) => {
                    let full = model.len() == capacity;
                    prop_assert_eq!(queue.insert_head(&mut storage, &s).is_err(), full);
                    if !full {
                        model.push_front(s);
                    }
                }
                Op::InsertTail(s) => {
                    let full = model.len() == capacity;
                    prop_assert_eq!(queue.insert_tail(&mut storage, &s).is_err(), full);
                    if !full {
                        model.push_back(s);
                    }
                }
                Op::RemoveHead => {
                    let got = queue.remove_head(&mut storage, None).map(|e| e.into_value());
                    prop_assert_eq!(got, model.pop_front());
                }
                Op::RemoveTail => {
                    let got = queue.remove_tail(&mut storage, None).map(|e| e.into_value());
                    prop_assert_eq!(got, model.pop_back());
                }
            }

            prop_assert_eq!(queue.size(&storage), model.len());
            prop_assert_eq!(storage.remaining(), capacity - model.len());
        }

        prop_assert_eq!(queue.to_vec(&storage), Vec::from(model));
    }

    /// Reversing twice restores the original order.
    #[test]
    fn reverse_is_involution(values in words(40)) {
        let mut storage = QueueStorage::new();
        let mut queue = build(&mut storage, &values);

        queue.reverse(&mut storage);
        let mut reversed = values.clone();
        reversed.reverse();
        prop_assert_eq!(queue.to_vec(&storage), reversed);

        queue.reverse(&mut storage);
        prop_assert_eq!(queue.to_vec(&storage), values);
    }

    /// Sorting orders the queue, keeps its contents, and is idempotent.
    #[test]
    fn sort_orders_and_is_idempotent(values in words(60), descending in any::<bool>()) {
        let mut storage = QueueStorage::new();
        let mut queue = build(&mut storage, &values);

        queue.sort(&mut storage, descending);
        let once = queue.to_vec(&storage);

        let mut expected = values.clone();
        expected.sort();
        if descending {
            expected.reverse();
        }
        prop_assert_eq!(&once, &expected);

        queue.sort(&mut storage, descending);
        prop_assert_eq!(queue.to_vec(&storage), once);
        prop_assert_eq!(storage.len(), values.len());
    }

    /// Elements that compare equal keep their original relative order.
    #[test]
    fn sort_is_stable(keys in prop::collection::vec(0u8..4, 0..60)) {
        let tagged: Vec<String> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| format!("{k}:{i:03}"))
            .collect();

        let mut storage = QueueStorage::new();
        let mut queue = build(&mut storage, &tagged);
        queue.sort_by(&mut storage, |a, b| a[..1].cmp(&b[..1]));

        let mut expected = tagged.clone();
        expected.sort_by(|a, b| a[..1].cmp(&b[..1]));
        prop_assert_eq!(queue.to_vec(&storage), expected);
    }

    /// The k-way merge of sorted queues is a sorted permutation of their
    /// union, and both merge strategies agree.
    #[test]
    fn k_way_merge_is_sorted_permutation(
        mut runs in prop::collection::vec(words(12), 1..6),
        descending in any::<bool>(),
        balanced in any::<bool>(),
    ) {
        for run in &mut runs {
            run.sort();
            if descending {
                run.reverse();
            }
        }

        let mut storage = QueueStorage::new();
        let mut queues: Vec<Queue> = runs.iter().map(|r| build(&mut storage, r)).collect();

        let total = {
            let mut chain: Vec<_> = queues
                .iter_mut()
                .map(|q| QueueContext::new(q, &storage))
                .collect();
            if balanced {
                merge_queues_balanced(&mut storage, &mut chain, descending)
            } else {
                merge_queues(&mut storage, &mut chain, descending)
            }
        };

        let mut expected: Vec<String> = runs.concat();
        expected.sort();
        if descending {
            expected.reverse();
        }

        prop_assert_eq!(total, expected.len());
        prop_assert_eq!(queues[0].to_vec(&storage), expected);
        for queue in &queues[1..] {
            prop_assert!(queue.is_empty());
        }
    }

    /// Full blocks of `k` are reversed and a short tail is kept as is.
    #[test]
    fn reverse_k_matches_chunks(values in words(40), k in 0usize..8) {
        let mut storage = QueueStorage::new();
        let mut queue = build(&mut storage, &values);
        queue.reverse_k(&mut storage, k);

        let expected: Vec<String> = if k < 2 {
            values.clone()
        } else {
            values
                .chunks(k)
                .flat_map(|chunk| {
                    let mut chunk = chunk.to_vec();
                    if chunk.len() == k {
                        chunk.reverse();
                    }
                    chunk
                })
                .collect()
        };
        prop_assert_eq!(queue.to_vec(&storage), expected);
    }

    /// Adjacent pairs swap; an odd tail stays.
    #[test]
    fn swap_matches_pairs(values in words(40)) {
        let mut storage = QueueStorage::new();
        let mut queue = build(&mut storage, &values);
        queue.swap(&mut storage);

        let mut expected = values.clone();
        for pair in expected.chunks_mut(2) {
            pair.reverse();
        }
        prop_assert_eq!(queue.to_vec(&storage), expected);
    }

    /// Deleting duplicates from a sorted queue keeps exactly the values that
    /// occur once.
    #[test]
    fn delete_dup_keeps_singletons(mut values in words(40)) {
        values.sort();
        let mut storage = QueueStorage::new();
        let mut queue = build(&mut storage, &values);

        let expected = dedup_runs(&values);
        let deleted = queue.delete_dup(&mut storage);

        prop_assert_eq!(deleted, values.len() - expected.len());
        prop_assert_eq!(queue.to_vec(&storage), expected);
        prop_assert_eq!(storage.len(), queue.size(&storage));
    }

    /// The middle element (index n / 2) is the one that goes.
    #[test]
    fn delete_mid_removes_middle(values in words(40)) {
        let mut storage = QueueStorage::new();
        let mut queue = build(&mut storage, &values);

        let removed = queue.delete_mid(&mut storage);
        let mut expected = values.clone();
        if !expected.is_empty() {
            expected.remove(values.len() / 2);
        }

        prop_assert_eq!(removed, !values.is_empty());
        prop_assert_eq!(queue.to_vec(&storage), expected);
    }

    /// Ascend and descend leave monotonic queues made of the elements with
    /// no strictly smaller / greater element to their right.
    #[test]
    fn ascend_and_descend_prune(values in words(40)) {
        let mut storage = QueueStorage::new();

        let keep = |i: usize, ascending: bool| {
            values[i + 1..].iter().all(|later| {
                if ascending { later >= &values[i] } else { later <= &values[i] }
            })
        };

        let mut up = build(&mut storage, &values);
        let expected_up: Vec<String> = (0..values.len())
            .filter(|&i| keep(i, true))
            .map(|i| values[i].clone())
            .collect();
        prop_assert_eq!(up.ascend(&mut storage), expected_up.len());
        prop_assert_eq!(up.to_vec(&storage), expected_up);

        let mut down = build(&mut storage, &values);
        let expected_down: Vec<String> = (0..values.len())
            .filter(|&i| keep(i, false))
            .map(|i| values[i].clone())
            .collect();
        prop_assert_eq!(down.descend(&mut storage), expected_down.len());
        prop_assert_eq!(down.to_vec(&storage), expected_down);
    }

    /// Shuffling only permutes.
    #[test]
    fn shuffle_is_permutation(values in words(40), seed in any::<u64>()) {
        let mut storage = QueueStorage::new();
        let mut queue = build(&mut storage, &values);
        queue.shuffle(&mut storage, &mut SmallRng::seed_from_u64(seed));

        let mut got = queue.to_vec(&storage);
        let mut expected = values.clone();
        got.sort();
        expected.sort();
        prop_assert_eq!(got, expected);
    }
}
