#![allow(dead_code)]

use std::collections::BTreeMap;

use balanced_forest::{BalanceOps, BalancedMap, KeyNode, Node};
use forest_util::TraceOp;
use simplelog::{Config, LevelFilter, TestLogger};

/// Demo insert order: a run of duplicates plus an ascending tail.
pub const DEMO_KEYS: [i64; 14] = [2, 3, 7, 10, 10, 10, 10, 23, 9, 102, 109, 111, 112, 113];

pub fn init_logger() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

pub fn contents<O: BalanceOps<i64>>(map: &BalancedMap<i64, O>) -> Vec<(i64, u64)> {
    map.iter().map(|(k, c)| (*k, c)).collect()
}

pub fn keys<O: BalanceOps<i64>>(map: &BalancedMap<i64, O>) -> Vec<i64> {
    map.iter().map(|(k, _)| *k).collect()
}

/// `(key, left key, right key)` for every node, in pre-order.
pub fn shape<O: BalanceOps<i64>>(map: &BalancedMap<i64, O>) -> Vec<(i64, Option<i64>, Option<i64>)> {
    let arena = map.arena();
    let key_at = |i: Option<u32>| i.map(|i| *arena[i as usize].key());
    let mut out = Vec::new();
    let mut stack: Vec<u32> = map.root_index().into_iter().collect();
    while let Some(i) = stack.pop() {
        let node = &arena[i as usize];
        out.push((*node.key(), key_at(node.l()), key_at(node.r())));
        stack.extend(node.r());
        stack.extend(node.l());
    }
    out
}

/// Replays `ops` against a fresh map and a `BTreeMap` model, validating
/// after every step.
pub fn replay<O: BalanceOps<i64>>(ops: &[TraceOp]) -> BalancedMap<i64, O> {
    let mut map: BalancedMap<i64, O> = BalancedMap::new();
    let mut model: BTreeMap<i64, u64> = BTreeMap::new();

    for (step, op) in ops.iter().enumerate() {
        match *op {
            TraceOp::Insert(k) => {
                let expected = model.entry(k).or_insert(0);
                *expected += 1;
                assert_eq!(map.insert(k), *expected, "step {step} ({op:?})");
            }
            TraceOp::Delete(k) => {
                assert_eq!(map.delete(&k), model.remove(&k).is_some(), "step {step} ({op:?})");
            }
        }
        if let Err(err) = map.validate() {
            panic!("trace failure at step {step} ({op:?}): {err}\n{}", map.print());
        }
    }

    let want: Vec<(i64, u64)> = model.into_iter().collect();
    assert_eq!(contents(&map), want);
    map
}

/// Inserts `0..n` ascending, validating after each step.
pub fn ladder<O: BalanceOps<i64>>(n: i64) -> BalancedMap<i64, O> {
    let mut map: BalancedMap<i64, O> = BalancedMap::new();
    for i in 0..n {
        assert_eq!(map.insert(i), 1);
        if let Err(err) = map.validate() {
            panic!("ladder failure at {i}: {err}");
        }
    }
    map
}

pub fn height_bound(n: usize) -> usize {
    (2.0 * ((n + 1) as f64).log2()).floor() as usize
}

pub fn demo_round_trip<O: BalanceOps<i64>>() {
    let mut map: BalancedMap<i64, O> = DEMO_KEYS.into_iter().collect();
    map.validate().unwrap();

    assert_eq!(map.min(), Some((&2, 1)));
    assert_eq!(map.max(), Some((&113, 1)));
    assert_eq!(map.find(&99), None);
    assert_eq!(map.find(&9), Some(1));
    assert_eq!(map.find(&10), Some(4));
    assert_eq!(map.len(), 11);
    assert_eq!(map.total(), 14);

    for k in [9, 10, 2, 3] {
        assert!(map.delete(&k));
        map.validate().unwrap();
    }
    for k in [4, 3, 10] {
        assert_eq!(map.insert(k), 1);
        map.validate().unwrap();
    }
    assert!(map.delete(&111));

    assert_eq!(map.find(&9), None);
    assert!(map.validate().is_ok());
    assert_eq!(keys(&map), vec![3, 4, 7, 10, 23, 102, 109, 112, 113]);
    assert_eq!(map.find(&10), Some(1));
    assert_eq!(map.total(), 9);
}

pub fn duplicate_keeps_shape<O: BalanceOps<i64>>() {
    let mut map: BalancedMap<i64, O> = (0..40).map(|i| (i * 37) % 101).collect();
    let before = shape(&map);
    let root = map.root_index();
    let len = map.len();

    for k in [37, 0, 12, 37] {
        map.insert((k * 37) % 101);
    }

    assert_eq!(shape(&map), before);
    assert_eq!(map.root_index(), root);
    assert_eq!(map.len(), len);
    assert_eq!(map.total(), len as u64 + 4);
    assert_eq!(map.find(&((37 * 37) % 101)), Some(3));
    map.validate().unwrap();
}

pub fn ladder_insert_delete<O: BalanceOps<i64>>(n: i64, step: usize) {
    let mut map = ladder::<O>(n);
    assert_eq!(map.len(), n as usize);
    assert!(map.height() <= height_bound(n as usize));

    for i in (0..n).step_by(step) {
        assert!(map.delete(&i));
        if let Err(err) = map.validate() {
            panic!("delete failure at {i}: {err}");
        }
    }

    for i in 0..n {
        if i as usize % step == 0 {
            assert_eq!(map.find(&i), None);
        } else {
            assert_eq!(map.find(&i), Some(1));
        }
    }
}

pub fn delete_everything<O: BalanceOps<i64>>(inserted: &[i64], deleted: &[i64]) {
    let mut map: BalancedMap<i64, O> = inserted.iter().copied().collect();
    map.validate().unwrap();

    for (step, k) in deleted.iter().enumerate() {
        let present = map.contains(k);
        assert_eq!(map.delete(k), present);
        assert_eq!(map.find(k), None);
        if let Err(err) = map.validate() {
            panic!("delete failure at step {step} (key {k}): {err}\n{}", map.print());
        }
    }

    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert_eq!(map.total(), 0);
    assert_eq!(map.min(), None);
    assert_eq!(map.max(), None);
    assert_eq!(map.height(), 0);
    assert!(map.arena().is_empty());
}

pub fn iteration<O: BalanceOps<i64>>() {
    let mut map: BalancedMap<i64, O> = BalancedMap::new();
    assert_eq!(map.iter().next(), None);

    for k in [5, 1, 4, 1, 3, 9] {
        map.insert(k);
    }

    let forward: Vec<(i64, u64)> = map.iter().map(|(k, c)| (*k, c)).collect();
    assert_eq!(forward, vec![(1, 2), (3, 1), (4, 1), (5, 1), (9, 1)]);

    // Restartable: a second walk yields the same sequence.
    assert_eq!(contents(&map), forward);

    let backward: Vec<i64> = map.iter().rev().map(|(k, _)| *k).collect();
    assert_eq!(backward, vec![9, 5, 4, 3, 1]);

    let mut it = map.iter();
    assert_eq!(it.len(), 5);
    assert_eq!(it.next().map(|(k, _)| *k), Some(1));
    assert_eq!(it.next_back().map(|(k, _)| *k), Some(9));
    assert_eq!(it.len(), 3);
    let middle: Vec<i64> = it.map(|(k, _)| *k).collect();
    assert_eq!(middle, vec![3, 4, 5]);

    let mut via_ref = Vec::new();
    for (k, _) in &map {
        via_ref.push(*k);
    }
    assert_eq!(via_ref, vec![1, 3, 4, 5, 9]);
}

pub fn misc_api<O: BalanceOps<i64>>() {
    let mut map: BalancedMap<i64, O> = BalancedMap::default();
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert_eq!(map.min(), None);
    assert_eq!(map.max(), None);
    assert_eq!(map.floor(&10), None);
    assert_eq!(map.ceiling(&10), None);
    assert!(!map.contains(&10));
    assert!(!map.delete(&10));
    assert_eq!(map.remove_one(&10), None);
    assert!(map.validate().is_ok());

    map.insert(10);
    map.insert(5);
    map.insert(20);
    map.insert(20);

    assert!(!map.is_empty());
    assert_eq!(map.len(), 3);
    assert_eq!(map.total(), 4);
    assert!(map.root_index().is_some());

    assert_eq!(map.floor(&4), None);
    assert_eq!(map.floor(&5), Some((&5, 1)));
    assert_eq!(map.floor(&19), Some((&10, 1)));
    assert_eq!(map.floor(&21), Some((&20, 2)));
    assert_eq!(map.ceiling(&4), Some((&5, 1)));
    assert_eq!(map.ceiling(&11), Some((&20, 2)));
    assert_eq!(map.ceiling(&21), None);

    assert_eq!(map.remove_one(&20), Some(1));
    assert_eq!(map.find(&20), Some(1));
    assert_eq!(map.remove_one(&20), Some(0));
    assert_eq!(map.find(&20), None);
    assert_eq!(map.max(), Some((&10, 1)));
    map.validate().unwrap();

    assert!(map.delete(&10));
    assert!(!map.delete(&10));
    assert_eq!(map.len(), 1);

    let dump = map.print();
    assert!(dump.starts_with("Node["));
    assert!(dump.contains("5 × 1"));

    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.total(), 0);
    assert_eq!(map.min(), None);
    assert_eq!(map.print(), "∅");
}

pub fn custom_comparator<O: BalanceOps<i64>>() {
    let mut map = BalancedMap::<i64, O, _>::with_comparator(|a: &i64, b: &i64| b.cmp(a) as i32);
    for k in [1, 3, 2, 5, 4, 3] {
        map.insert(k);
    }

    assert_eq!(map.iter().map(|(k, _)| *k).collect::<Vec<_>>(), vec![5, 4, 3, 2, 1]);
    assert_eq!(map.min(), Some((&5, 1)));
    assert_eq!(map.max(), Some((&1, 1)));
    assert_eq!(map.find(&3), Some(2));
    map.validate().unwrap();

    assert!(map.delete(&4));
    map.validate().unwrap();
    assert_eq!(map.iter().map(|(k, _)| *k).collect::<Vec<_>>(), vec![5, 3, 2, 1]);
}

pub fn slot_reuse<O: BalanceOps<i64>>() {
    let mut map: BalancedMap<i64, O> = (0..10).collect();
    assert_eq!(map.arena().len(), 10);

    for k in [2, 5, 7] {
        assert!(map.delete(&k));
    }
    assert_eq!(map.arena().len(), 10);

    for k in [100, 200, 300] {
        map.insert(k);
    }
    assert_eq!(map.arena().len(), 10);
    map.validate().unwrap();

    map.insert(400);
    assert_eq!(map.arena().len(), 11);
    assert_eq!(keys(&map), vec![0, 1, 3, 4, 6, 8, 9, 100, 200, 300, 400]);
}

pub fn string_keys<O: BalanceOps<String>>() {
    let mut map: BalancedMap<String, O> = BalancedMap::new();
    for word in ["pear", "apple", "fig", "apple", "kiwi"] {
        map.insert(word.to_string());
    }
    map.validate().unwrap();

    let words: Vec<(String, u64)> = map.iter().map(|(k, c)| (k.clone(), c)).collect();
    assert_eq!(
        words,
        vec![
            ("apple".to_string(), 2),
            ("fig".to_string(), 1),
            ("kiwi".to_string(), 1),
            ("pear".to_string(), 1),
        ]
    );

    assert!(map.delete(&"fig".to_string()));
    assert_eq!(map.find(&"fig".to_string()), None);
    map.validate().unwrap();
}
