use crate::error::ValidationError;
use crate::map::Removal;
use crate::util::{
    assert_search_tree, get_l, get_p, get_r, replace_child, rotate_left, rotate_right, set_l,
    set_p, set_r, swap_payload,
};

use super::types::AvlNodeLike;

#[inline]
fn height_of<K, N>(arena: &[N], i: Option<u32>) -> u32
where
    N: AvlNodeLike<K>,
{
    i.map_or(0, |i| arena[i as usize].height())
}

#[inline]
fn update_height<K, N>(arena: &mut [N], n: u32)
where
    N: AvlNodeLike<K>,
{
    let h = 1 + height_of(arena, get_l(arena, n)).max(height_of(arena, get_r(arena, n)));
    arena[n as usize].set_height(h);
}

/// `height(left) - height(right)`.
#[inline]
pub(crate) fn balance_factor<K, N>(arena: &[N], n: u32) -> i64
where
    N: AvlNodeLike<K>,
{
    i64::from(height_of(arena, get_l(arena, n))) - i64::from(height_of(arena, get_r(arena, n)))
}

fn l_rotate<K, N>(arena: &mut [N], n: u32) -> u32
where
    N: AvlNodeLike<K>,
{
    let top = rotate_left(arena, n);
    update_height(arena, n);
    update_height(arena, top);
    top
}

fn r_rotate<K, N>(arena: &mut [N], n: u32) -> u32
where
    N: AvlNodeLike<K>,
{
    let top = rotate_right(arena, n);
    update_height(arena, n);
    update_height(arena, top);
    top
}

/// Restores the balance of `n`, whose height is already up to date, and
/// returns the root of its subtree.
fn rebalance<K, N>(arena: &mut [N], n: u32) -> u32
where
    N: AvlNodeLike<K>,
{
    let bf = balance_factor(arena, n);
    if bf > 1 {
        if let Some(l) = get_l(arena, n) {
            if balance_factor(arena, l) < 0 {
                l_rotate(arena, l);
            }
        }
        return r_rotate(arena, n);
    }
    if bf < -1 {
        if let Some(r) = get_r(arena, n) {
            if balance_factor(arena, r) > 0 {
                r_rotate(arena, r);
            }
        }
        return l_rotate(arena, n);
    }
    n
}

/// Walks from `start` to the root refreshing heights and rotating where a
/// balance factor reached ±2. Stops early once a subtree's height is the
/// same as before the mutation.
fn retrace<K, N>(arena: &mut [N], mut root: Option<u32>, start: Option<u32>) -> Option<u32>
where
    N: AvlNodeLike<K>,
{
    let mut curr = start;
    while let Some(n) = curr {
        let old = arena[n as usize].height();
        update_height(arena, n);
        let top = rebalance(arena, n);
        let parent = get_p(arena, top);
        if parent.is_none() {
            root = Some(top);
        }
        if arena[top as usize].height() == old {
            break;
        }
        curr = parent;
    }
    root
}

pub fn insert_root<K, N>(arena: &mut [N], n: u32) -> Option<u32>
where
    N: AvlNodeLike<K>,
{
    set_p(arena, n, None);
    arena[n as usize].set_height(1);
    Some(n)
}

pub fn insert_left<K, N>(arena: &mut [N], root: Option<u32>, n: u32, p: u32) -> Option<u32>
where
    N: AvlNodeLike<K>,
{
    set_l(arena, p, Some(n));
    set_p(arena, n, Some(p));
    arena[n as usize].set_height(1);
    retrace(arena, root, Some(p))
}

pub fn insert_right<K, N>(arena: &mut [N], root: Option<u32>, n: u32, p: u32) -> Option<u32>
where
    N: AvlNodeLike<K>,
{
    set_r(arena, p, Some(n));
    set_p(arena, n, Some(p));
    arena[n as usize].set_height(1);
    retrace(arena, root, Some(p))
}

/// Removes node `n`, taking the in-order successor's payload first when `n`
/// has two children. Every ancestor of the spliced slot is rebalanced.
pub fn remove<K, N>(arena: &mut [N], root: Option<u32>, mut n: u32) -> Removal
where
    N: AvlNodeLike<K>,
{
    if let (Some(_), Some(r)) = (get_l(arena, n), get_r(arena, n)) {
        let mut successor = r;
        while let Some(l) = get_l(arena, successor) {
            successor = l;
        }
        swap_payload(arena, n, successor);
        n = successor;
    }

    let child = get_l(arena, n).or(get_r(arena, n));
    let p = get_p(arena, n);
    replace_child(arena, p, n, child);
    set_p(arena, n, None);
    set_l(arena, n, None);
    set_r(arena, n, None);

    let root = match p {
        Some(_) => retrace(arena, root, p),
        None => child,
    };
    Removal { root, freed: n }
}

fn check_heights<K, N>(arena: &[N], node: Option<u32>) -> Result<u32, ValidationError>
where
    N: AvlNodeLike<K>,
{
    let Some(i) = node else {
        return Ok(0);
    };
    let lh = check_heights(arena, get_l(arena, i))?;
    let rh = check_heights(arena, get_r(arena, i))?;

    let expected = 1 + lh.max(rh);
    let stored = arena[i as usize].height();
    if stored != expected {
        return Err(ValidationError::HeightMismatch {
            node: i,
            stored,
            expected,
        });
    }

    let factor = i64::from(lh) - i64::from(rh);
    if !(-1..=1).contains(&factor) {
        return Err(ValidationError::BalanceViolated { node: i, factor });
    }
    Ok(expected)
}

pub fn assert_avl_tree<K, N, C>(
    arena: &[N],
    root: Option<u32>,
    comparator: &C,
) -> Result<(), ValidationError>
where
    N: AvlNodeLike<K>,
    C: Fn(&K, &K) -> i32,
{
    assert_search_tree(arena, root, comparator)?;
    check_heights(arena, root)?;
    Ok(())
}
