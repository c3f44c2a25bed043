use crate::error::ValidationError;
use crate::map::Removal;
use crate::red_black::util::{assert_red_black_tree, color_of, set_color};
use crate::red_black::RbNodeLike;
use crate::types::Color;
use crate::util::{first, get_l, get_p, get_r, rotate_left, rotate_right, set_l, set_p, set_r, swap_payload};

#[inline]
fn is_red<K, N>(arena: &[N], node: Option<u32>) -> bool
where
    N: RbNodeLike<K>,
{
    color_of(arena, node).is_red()
}

/// Flips the color of `node` and of its children.
pub fn color_flip<K, N>(arena: &mut [N], node: u32)
where
    N: RbNodeLike<K>,
{
    for i in [Some(node), get_l(arena, node), get_r(arena, node)].into_iter().flatten() {
        let flipped = arena[i as usize].color().flip();
        arena[i as usize].set_color(flipped);
    }
}

/// Left rotation that hands `node`'s color to the new subtree root and
/// paints `node` red.
pub fn llrb_rotate_left<K, N>(arena: &mut [N], node: u32) -> u32
where
    N: RbNodeLike<K>,
{
    let x = rotate_left(arena, node);
    if x != node {
        let color = arena[node as usize].color();
        arena[x as usize].set_color(color);
        arena[node as usize].set_color(Color::Red);
    }
    x
}

/// Mirror of [`llrb_rotate_left`].
pub fn llrb_rotate_right<K, N>(arena: &mut [N], node: u32) -> u32
where
    N: RbNodeLike<K>,
{
    let x = rotate_right(arena, node);
    if x != node {
        let color = arena[node as usize].color();
        arena[x as usize].set_color(color);
        arena[node as usize].set_color(Color::Red);
    }
    x
}

/// Borrows a red link from the right sibling so the left descent never ends
/// on a lone black node.
///
/// After the double rotation a second `color_flip` re-blackens both children
/// of the new subtree root; without it the borrowed red link stays split
/// across them and the next `balance` sees a double red.
pub fn move_red_left<K, N>(arena: &mut [N], mut node: u32) -> u32
where
    N: RbNodeLike<K>,
{
    color_flip(arena, node);
    if let Some(r) = get_r(arena, node) {
        if is_red(arena, get_l(arena, r)) {
            llrb_rotate_right(arena, r);
            node = llrb_rotate_left(arena, node);
            color_flip(arena, node);
        }
    }
    node
}

/// Mirror of [`move_red_left`] for the right descent.
pub fn move_red_right<K, N>(arena: &mut [N], mut node: u32) -> u32
where
    N: RbNodeLike<K>,
{
    color_flip(arena, node);
    if let Some(l) = get_l(arena, node) {
        if is_red(arena, get_l(arena, l)) {
            node = llrb_rotate_right(arena, node);
            color_flip(arena, node);
        }
    }
    node
}

/// Restores the left-leaning shape at `node` and returns the subtree root.
pub fn balance<K, N>(arena: &mut [N], mut node: u32) -> u32
where
    N: RbNodeLike<K>,
{
    if is_red(arena, get_r(arena, node)) && !is_red(arena, get_l(arena, node)) {
        node = llrb_rotate_left(arena, node);
    }
    let l = get_l(arena, node);
    if is_red(arena, l) && is_red(arena, l.and_then(|l| get_l(arena, l))) {
        node = llrb_rotate_right(arena, node);
    }
    if is_red(arena, get_l(arena, node)) && is_red(arena, get_r(arena, node)) {
        color_flip(arena, node);
    }
    node
}

fn link_left<K, N>(arena: &mut [N], node: u32, child: Option<u32>)
where
    N: RbNodeLike<K>,
{
    set_l(arena, node, child);
    if let Some(c) = child {
        set_p(arena, c, Some(node));
    }
}

fn link_right<K, N>(arena: &mut [N], node: u32, child: Option<u32>)
where
    N: RbNodeLike<K>,
{
    set_r(arena, node, child);
    if let Some(c) = child {
        set_p(arena, c, Some(node));
    }
}

pub fn insert_root<K, N>(arena: &mut [N], n: u32) -> Option<u32>
where
    N: RbNodeLike<K>,
{
    set_p(arena, n, None);
    arena[n as usize].set_color(Color::Black);
    Some(n)
}

pub fn insert_left<K, N>(arena: &mut [N], n: u32, p: u32) -> Option<u32>
where
    N: RbNodeLike<K>,
{
    link_left(arena, p, Some(n));
    arena[n as usize].set_color(Color::Red);
    fix_after_insert(arena, p)
}

pub fn insert_right<K, N>(arena: &mut [N], n: u32, p: u32) -> Option<u32>
where
    N: RbNodeLike<K>,
{
    link_right(arena, p, Some(n));
    arena[n as usize].set_color(Color::Red);
    fix_after_insert(arena, p)
}

/// Applies [`balance`] on every node from `start` up to the root, which is
/// what the recursive insertion does while unwinding.
fn fix_after_insert<K, N>(arena: &mut [N], start: u32) -> Option<u32>
where
    N: RbNodeLike<K>,
{
    let mut top = start;
    let mut curr = Some(start);
    while let Some(h) = curr {
        top = balance(arena, h);
        curr = get_p(arena, top);
    }
    arena[top as usize].set_color(Color::Black);
    Some(top)
}

/// Removes the minimum of the subtree at `node`, recording its slot in
/// `freed`. Returns the new subtree root.
pub fn delete_min<K, N>(arena: &mut [N], mut node: u32, freed: &mut u32) -> Option<u32>
where
    N: RbNodeLike<K>,
{
    let Some(l) = get_l(arena, node) else {
        *freed = node;
        set_p(arena, node, None);
        return None;
    };

    if !is_red(arena, Some(l)) && !is_red(arena, get_l(arena, l)) {
        node = move_red_left(arena, node);
    }
    if let Some(left) = get_l(arena, node) {
        let sub = delete_min(arena, left, freed);
        link_left(arena, node, sub);
    }
    Some(balance(arena, node))
}

/// Top-down deletion of slot `target` from the subtree at `node`.
fn delete_node<K, N, C>(
    arena: &mut [N],
    mut node: u32,
    target: u32,
    comparator: &C,
    freed: &mut u32,
) -> Option<u32>
where
    N: RbNodeLike<K>,
    C: Fn(&K, &K) -> i32,
{
    let goes_left =
        node != target && comparator(arena[target as usize].key(), arena[node as usize].key()) < 0;

    if goes_left {
        if let Some(l) = get_l(arena, node) {
            if !is_red(arena, Some(l)) && !is_red(arena, get_l(arena, l)) {
                node = move_red_left(arena, node);
            }
            if let Some(left) = get_l(arena, node) {
                let sub = delete_node(arena, left, target, comparator, freed);
                link_left(arena, node, sub);
            }
        }
    } else {
        if is_red(arena, get_l(arena, node)) {
            node = llrb_rotate_right(arena, node);
        }

        if node == target && get_r(arena, node).is_none() {
            *freed = node;
            set_p(arena, node, None);
            return None;
        }

        if let Some(r) = get_r(arena, node) {
            if !is_red(arena, Some(r)) && !is_red(arena, get_l(arena, r)) {
                node = move_red_right(arena, node);
            }
            if let Some(right) = get_r(arena, node) {
                let sub = if node == target {
                    if let Some(min) = first(arena, Some(right)) {
                        swap_payload(arena, node, min);
                    }
                    delete_min(arena, right, freed)
                } else {
                    delete_node(arena, right, target, comparator, freed)
                };
                link_right(arena, node, sub);
            }
        }
    }

    Some(balance(arena, node))
}

/// Removes slot `target`, which must be linked under `root`.
///
/// Before descending the root is painted red when both of its children are
/// black, so the node finally spliced out is never a lone black link.
pub fn remove<K, N, C>(arena: &mut [N], root: Option<u32>, target: u32, comparator: &C) -> Removal
where
    N: RbNodeLike<K>,
    C: Fn(&K, &K) -> i32,
{
    let Some(top) = root else {
        return Removal {
            root: None,
            freed: target,
        };
    };

    if !is_red(arena, get_l(arena, top)) && !is_red(arena, get_r(arena, top)) {
        set_color(arena, Some(top), Color::Red);
    }

    let mut freed = target;
    let root = delete_node(arena, top, target, comparator, &mut freed);
    if let Some(r) = root {
        set_p(arena, r, None);
        set_color(arena, Some(r), Color::Black);
    }
    Removal { root, freed }
}

fn assert_left_leaning<K, N>(arena: &[N], root: Option<u32>) -> Result<(), ValidationError>
where
    N: RbNodeLike<K>,
{
    let mut stack: Vec<u32> = root.into_iter().collect();
    while let Some(node) = stack.pop() {
        let r = get_r(arena, node);
        if is_red(arena, r) {
            return Err(ValidationError::RightLeaningRed(node));
        }
        stack.extend(get_l(arena, node));
        stack.extend(r);
    }
    Ok(())
}

pub fn assert_llrb_tree<K, N, C>(
    arena: &[N],
    root: Option<u32>,
    comparator: &C,
) -> Result<(), ValidationError>
where
    N: RbNodeLike<K>,
    C: Fn(&K, &K) -> i32,
{
    assert_red_black_tree(arena, root, comparator)?;
    assert_left_leaning(arena, root)
}
