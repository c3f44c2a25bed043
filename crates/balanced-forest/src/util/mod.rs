//! Strategy-independent helpers over the `p` / `l` / `r` links.
//!
//! Every balancing strategy reuses these for traversal, key search, the
//! structural half of a rotation and the checks `validate()` shares.

pub mod swap;

use crate::error::ValidationError;
use crate::types::{KeyNode, Node};

pub use swap::swap_payload;

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

/// Points whichever child link of `parent` referenced `old` at `new`.
/// A `None` parent means `old` was the root and nothing is relinked.
pub(crate) fn replace_child<N: Node>(
    arena: &mut [N],
    parent: Option<u32>,
    old: u32,
    new: Option<u32>,
) {
    if let Some(p) = parent {
        if get_l(arena, p) == Some(old) {
            set_l(arena, p, new);
        } else {
            set_r(arena, p, new);
        }
    }
    if let Some(n) = new {
        set_p(arena, n, parent);
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    fn child<N: Node>(self, arena: &[N], idx: u32) -> Option<u32> {
        match self {
            Side::Left => get_l(arena, idx),
            Side::Right => get_r(arena, idx),
        }
    }

    #[inline]
    fn other(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Follows `side` links from `root` as far as they go.
fn extreme<N: Node>(arena: &[N], root: Option<u32>, side: Side) -> Option<u32> {
    let mut curr = root?;
    while let Some(child) = side.child(arena, curr) {
        curr = child;
    }
    Some(curr)
}

/// Neighbor of `curr` in the in-order walk; `Side::Right` steps forward.
fn step<N: Node>(arena: &[N], mut curr: u32, side: Side) -> Option<u32> {
    if let Some(c) = side.child(arena, curr) {
        return extreme(arena, Some(c), side.other());
    }
    while let Some(p) = get_p(arena, curr) {
        if side.child(arena, p) != Some(curr) {
            return Some(p);
        }
        curr = p;
    }
    None
}

pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    extreme(arena, root, Side::Left)
}

pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    extreme(arena, root, Side::Right)
}

/// In-order successor.
pub fn next<N: Node>(arena: &[N], curr: u32) -> Option<u32> {
    step(arena, curr, Side::Right)
}

/// In-order predecessor.
pub fn prev<N: Node>(arena: &[N], curr: u32) -> Option<u32> {
    step(arena, curr, Side::Left)
}

/// Nodes on the longest root-to-leaf path; `0` for an empty tree.
pub fn height<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |i| {
        1 + height(arena, get_l(arena, i)).max(height(arena, get_r(arena, i)))
    })
}

/// Exact match for `key`, or failing that the closest node on `side` of it
/// (`Side::Left` for the next lower key).
fn find_bound<K, N, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    comparator: &C,
    side: Side,
) -> Option<u32>
where
    N: KeyNode<K>,
    C: Fn(&K, &K) -> i32,
{
    let mut curr = root;
    let mut best = None;
    while let Some(i) = curr {
        let cmp = comparator(key, arena[i as usize].key());
        let go = match cmp {
            0 => return Some(i),
            c if c < 0 => Side::Left,
            _ => Side::Right,
        };
        if go != side {
            best = Some(i);
        }
        curr = go.child(arena, i);
    }
    best
}

/// Node holding `key`.
pub fn find<K, N, C>(arena: &[N], root: Option<u32>, key: &K, comparator: &C) -> Option<u32>
where
    N: KeyNode<K>,
    C: Fn(&K, &K) -> i32,
{
    let mut curr = root;
    while let Some(i) = curr {
        curr = match comparator(key, arena[i as usize].key()) {
            0 => return Some(i),
            c if c < 0 => get_l(arena, i),
            _ => get_r(arena, i),
        };
    }
    None
}

/// Greatest node whose key is `<= key`.
pub fn find_or_next_lower<K, N, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    comparator: &C,
) -> Option<u32>
where
    N: KeyNode<K>,
    C: Fn(&K, &K) -> i32,
{
    find_bound(arena, root, key, comparator, Side::Left)
}

/// Least node whose key is `>= key`.
pub fn find_or_next_higher<K, N, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    comparator: &C,
) -> Option<u32>
where
    N: KeyNode<K>,
    C: Fn(&K, &K) -> i32,
{
    find_bound(arena, root, key, comparator, Side::Right)
}

/// Left rotation around `n`; returns the new subtree root (the old right
/// child). Links only: colors and heights are the caller's business.
pub fn rotate_left<N: Node>(arena: &mut [N], n: u32) -> u32 {
    let Some(x) = get_r(arena, n) else {
        return n;
    };
    let xl = get_l(arena, x);
    set_r(arena, n, xl);
    if let Some(xl) = xl {
        set_p(arena, xl, Some(n));
    }

    let p = get_p(arena, n);
    replace_child(arena, p, n, Some(x));
    set_l(arena, x, Some(n));
    set_p(arena, n, Some(x));
    log::trace!("rotate_left at {n}, new subtree root {x}");
    x
}

/// Right rotation around `n`; returns the new subtree root (the old left
/// child).
pub fn rotate_right<N: Node>(arena: &mut [N], n: u32) -> u32 {
    let Some(x) = get_l(arena, n) else {
        return n;
    };
    let xr = get_r(arena, x);
    set_l(arena, n, xr);
    if let Some(xr) = xr {
        set_p(arena, xr, Some(n));
    }

    let p = get_p(arena, n);
    replace_child(arena, p, n, Some(x));
    set_r(arena, x, Some(n));
    set_p(arena, n, Some(x));
    log::trace!("rotate_right at {n}, new subtree root {x}");
    x
}

/// Checks the parts of `validate()` every strategy shares: the root has no
/// parent, child links point back, multiplicities are positive and the
/// in-order walk is strictly ascending.
pub fn assert_search_tree<K, N, C>(
    arena: &[N],
    root: Option<u32>,
    comparator: &C,
) -> Result<(), ValidationError>
where
    N: KeyNode<K>,
    C: Fn(&K, &K) -> i32,
{
    let Some(root) = root else {
        return Ok(());
    };
    if get_p(arena, root).is_some() {
        return Err(ValidationError::RootHasParent(root));
    }

    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if arena[node as usize].count() == 0 {
            return Err(ValidationError::ZeroMultiplicity(node));
        }
        for child in [get_l(arena, node), get_r(arena, node)].into_iter().flatten() {
            if get_p(arena, child) != Some(node) {
                return Err(ValidationError::BrokenParentLink {
                    parent: node,
                    child,
                });
            }
            stack.push(child);
        }
    }

    let mut curr = first(arena, Some(root));
    let mut prev_node: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev_node {
            if comparator(arena[prev as usize].key(), arena[i as usize].key()) >= 0 {
                return Err(ValidationError::OrderViolated(i));
            }
        }
        prev_node = Some(i);
        curr = next(arena, i);
    }

    Ok(())
}
