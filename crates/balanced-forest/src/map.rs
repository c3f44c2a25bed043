use std::fmt::Debug;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use log::{debug, trace};

use crate::error::ValidationError;
use crate::print::print;
use crate::types::{default_comparator, KeyNode, Node};
use crate::util::{find, find_or_next_higher, find_or_next_lower, first, height, last, next, prev};

/// Result of a strategy-level removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Removal {
    /// Root of the tree after rebalancing.
    pub root: Option<u32>,
    /// Arena slot that was unlinked and may be reused.
    pub freed: u32,
}

/// Balancing strategy plugged into [`BalancedMap`].
///
/// The map owns the arena and performs the key descent for inserts; a
/// strategy only links the new node under its parent and repairs its own
/// invariants afterwards.
pub trait BalanceOps<K> {
    type Node: KeyNode<K>;

    /// Fresh, unlinked node holding `key` with multiplicity 1.
    fn new_node(key: K) -> Self::Node;

    /// Makes `node` the root of an empty tree.
    fn insert_root(arena: &mut [Self::Node], node: u32) -> Option<u32>;

    /// Links `node` as the left child of `parent` (which has none) and
    /// rebalances. Returns the new root.
    fn insert_left(arena: &mut [Self::Node], root: Option<u32>, node: u32, parent: u32)
        -> Option<u32>;

    /// Mirror of [`BalanceOps::insert_left`].
    fn insert_right(arena: &mut [Self::Node], root: Option<u32>, node: u32, parent: u32)
        -> Option<u32>;

    /// Deletes the key held by `node`, which must be linked under `root`.
    fn remove<C: Fn(&K, &K) -> i32>(
        arena: &mut [Self::Node],
        root: Option<u32>,
        node: u32,
        comparator: &C,
    ) -> Removal;

    /// Checks every invariant of the strategy.
    fn assert_valid<C: Fn(&K, &K) -> i32>(
        arena: &[Self::Node],
        root: Option<u32>,
        comparator: &C,
    ) -> Result<(), ValidationError>;

    /// Balance metadata shown by the debug printer (color, height).
    fn describe(node: &Self::Node) -> String;
}

/// Arena-backed ordered multiset.
///
/// Each distinct key occupies one node carrying its multiplicity. The
/// balancing strategy `O` is chosen at the type level; see
/// [`crate::RbTree`], [`crate::AvlTree`] and [`crate::LlrbTree`].
pub struct BalancedMap<K, O, C = fn(&K, &K) -> i32>
where
    O: BalanceOps<K>,
    C: Fn(&K, &K) -> i32,
{
    arena: Vec<O::Node>,
    free: Vec<u32>,
    root: Option<u32>,
    min: Option<u32>,
    max: Option<u32>,
    comparator: C,
    len: usize,
    total: u64,
    _ops: PhantomData<O>,
}

impl<K, O> BalancedMap<K, O, fn(&K, &K) -> i32>
where
    K: Ord,
    O: BalanceOps<K>,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K, O> Default for BalancedMap<K, O, fn(&K, &K) -> i32>
where
    K: Ord,
    O: BalanceOps<K>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, O, C> BalancedMap<K, O, C>
where
    O: BalanceOps<K>,
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Vec::new(),
            free: Vec::new(),
            root: None,
            min: None,
            max: None,
            comparator,
            len: 0,
            total: 0,
            _ops: PhantomData,
        }
    }

    pub fn root_index(&self) -> Option<u32> {
        self.root
    }

    pub fn arena(&self) -> &[O::Node] {
        &self.arena
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    fn alloc(&mut self, key: K) -> u32 {
        let node = O::new_node(key);
        let idx = match self.free.pop() {
            Some(slot) => {
                self.arena[slot as usize] = node;
                slot
            }
            None => {
                self.arena.push(node);
                (self.arena.len() - 1) as u32
            }
        };
        self.len += 1;
        self.total += 1;
        trace!("allocated node {idx}");
        idx
    }

    fn bump(&mut self, idx: u32) -> u64 {
        let node = &mut self.arena[idx as usize];
        let count = node.count() + 1;
        node.set_count(count);
        self.total += 1;
        count
    }

    /// Inserts one occurrence of `key` and returns its multiplicity.
    ///
    /// A duplicate only bumps the counter; the tree shape is untouched.
    pub fn insert(&mut self, key: K) -> u64 {
        let Some(root) = self.root else {
            let idx = self.alloc(key);
            self.root = O::insert_root(&mut self.arena, idx);
            self.min = self.root;
            self.max = self.root;
            return 1;
        };

        if let Some(max) = self.max {
            let max_cmp = (self.comparator)(&key, self.arena[max as usize].key());
            if max_cmp == 0 {
                return self.bump(max);
            }
            if max_cmp > 0 {
                let idx = self.alloc(key);
                self.root = O::insert_right(&mut self.arena, Some(root), idx, max);
                self.max = Some(idx);
                return 1;
            }
        }

        if let Some(min) = self.min {
            let min_cmp = (self.comparator)(&key, self.arena[min as usize].key());
            if min_cmp == 0 {
                return self.bump(min);
            }
            if min_cmp < 0 {
                let idx = self.alloc(key);
                self.root = O::insert_left(&mut self.arena, Some(root), idx, min);
                self.min = Some(idx);
                return 1;
            }
        }

        let mut curr = root;
        loop {
            let cmp = (self.comparator)(&key, self.arena[curr as usize].key());
            if cmp == 0 {
                return self.bump(curr);
            }
            let child = if cmp < 0 {
                self.arena[curr as usize].l()
            } else {
                self.arena[curr as usize].r()
            };
            if let Some(child) = child {
                curr = child;
                continue;
            }
            let idx = self.alloc(key);
            self.root = if cmp < 0 {
                O::insert_left(&mut self.arena, self.root, idx, curr)
            } else {
                O::insert_right(&mut self.arena, self.root, idx, curr)
            };
            return 1;
        }
    }

    /// Removes the node holding `key` regardless of its multiplicity.
    /// Returns `false` when the key is absent.
    pub fn delete(&mut self, key: &K) -> bool {
        let Some(node) = find(&self.arena, self.root, key, &self.comparator) else {
            return false;
        };

        let count = self.arena[node as usize].count();
        let removal = O::remove(&mut self.arena, self.root, node, &self.comparator);
        trace!("removed node {node}, freed slot {}", removal.freed);

        self.root = removal.root;
        self.free.push(removal.freed);
        self.len -= 1;
        self.total -= count;

        if self.root.is_none() {
            self.arena.clear();
            self.free.clear();
            self.min = None;
            self.max = None;
        } else {
            self.min = first(&self.arena, self.root);
            self.max = last(&self.arena, self.root);
        }

        true
    }

    /// Removes one occurrence of `key`, deleting the node when its
    /// multiplicity reaches zero. Returns the remaining multiplicity, or
    /// `None` when the key is absent.
    pub fn remove_one(&mut self, key: &K) -> Option<u64> {
        let node = find(&self.arena, self.root, key, &self.comparator)?;
        let count = self.arena[node as usize].count();
        if count > 1 {
            self.arena[node as usize].set_count(count - 1);
            self.total -= 1;
            return Some(count - 1);
        }
        self.delete(key);
        Some(0)
    }

    /// Multiplicity of `key`, if present.
    pub fn find(&self, key: &K) -> Option<u64> {
        find(&self.arena, self.root, key, &self.comparator).map(|i| self.arena[i as usize].count())
    }

    pub fn contains(&self, key: &K) -> bool {
        find(&self.arena, self.root, key, &self.comparator).is_some()
    }

    fn entry(&self, idx: Option<u32>) -> Option<(&K, u64)> {
        idx.map(|i| {
            let node = &self.arena[i as usize];
            (node.key(), node.count())
        })
    }

    pub fn min(&self) -> Option<(&K, u64)> {
        self.entry(self.min)
    }

    pub fn max(&self) -> Option<(&K, u64)> {
        self.entry(self.max)
    }

    /// Greatest key less than or equal to `key`.
    pub fn floor(&self, key: &K) -> Option<(&K, u64)> {
        self.entry(find_or_next_lower(&self.arena, self.root, key, &self.comparator))
    }

    /// Least key greater than or equal to `key`.
    pub fn ceiling(&self, key: &K) -> Option<(&K, u64)> {
        self.entry(find_or_next_higher(&self.arena, self.root, key, &self.comparator))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Sum of all multiplicities.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn height(&self) -> usize {
        height(&self.arena, self.root)
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.free.clear();
        self.root = None;
        self.min = None;
        self.max = None;
        self.len = 0;
        self.total = 0;
    }

    /// Ascending `(key, multiplicity)` pairs.
    pub fn iter(&self) -> Iter<'_, K, O::Node> {
        Iter {
            arena: &self.arena,
            front: self.min,
            back: self.max,
            remaining: self.len,
            _k: PhantomData,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        O::assert_valid(&self.arena, self.root, &self.comparator).inspect_err(|err| {
            debug!("validation failed: {err}");
        })
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Multi-line dump of the tree shape.
    pub fn print(&self) -> String
    where
        K: Debug,
    {
        print::<K, O::Node, _>(&self.arena, self.root, "", &O::describe)
    }
}

impl<K, O> FromIterator<K> for BalancedMap<K, O, fn(&K, &K) -> i32>
where
    K: Ord,
    O: BalanceOps<K>,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, O, C> Extend<K> for BalancedMap<K, O, C>
where
    O: BalanceOps<K>,
    C: Fn(&K, &K) -> i32,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K, O, C> IntoIterator for &'a BalancedMap<K, O, C>
where
    O: BalanceOps<K>,
    C: Fn(&K, &K) -> i32,
{
    type Item = (&'a K, u64);
    type IntoIter = Iter<'a, K, O::Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over a [`BalancedMap`].
pub struct Iter<'a, K, N> {
    arena: &'a [N],
    front: Option<u32>,
    back: Option<u32>,
    remaining: usize,
    _k: PhantomData<K>,
}

impl<'a, K: 'a, N: KeyNode<K>> Iterator for Iter<'a, K, N> {
    type Item = (&'a K, u64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let i = self.front?;
        self.remaining -= 1;
        self.front = next(self.arena, i);
        let node = &self.arena[i as usize];
        Some((node.key(), node.count()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: 'a, N: KeyNode<K>> DoubleEndedIterator for Iter<'a, K, N> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let i = self.back?;
        self.remaining -= 1;
        self.back = prev(self.arena, i);
        let node = &self.arena[i as usize];
        Some((node.key(), node.count()))
    }
}

impl<'a, K: 'a, N: KeyNode<K>> ExactSizeIterator for Iter<'a, K, N> {}

impl<'a, K: 'a, N: KeyNode<K>> FusedIterator for Iter<'a, K, N> {}
