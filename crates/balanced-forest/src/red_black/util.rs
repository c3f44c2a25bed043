use crate::error::ValidationError;
use crate::map::Removal;
use crate::types::Color;
use crate::util::{
    assert_search_tree, get_l, get_p, get_r, replace_child, rotate_left, rotate_right, set_l,
    set_p, set_r, swap_payload,
};

use super::types::RbNodeLike;

/// Color of an optional node; absent children count as black.
#[inline]
pub(crate) fn color_of<K, N>(arena: &[N], i: Option<u32>) -> Color
where
    N: RbNodeLike<K>,
{
    i.map_or(Color::Black, |i| arena[i as usize].color())
}

#[inline]
pub(crate) fn set_color<K, N>(arena: &mut [N], i: Option<u32>, color: Color)
where
    N: RbNodeLike<K>,
{
    if let Some(i) = i {
        arena[i as usize].set_color(color);
    }
}

fn l_rotate<K, N>(arena: &mut [N], root: Option<u32>, n: u32) -> Option<u32>
where
    N: RbNodeLike<K>,
{
    let top = rotate_left(arena, n);
    if get_p(arena, top).is_none() {
        Some(top)
    } else {
        root
    }
}

fn r_rotate<K, N>(arena: &mut [N], root: Option<u32>, n: u32) -> Option<u32>
where
    N: RbNodeLike<K>,
{
    let top = rotate_right(arena, n);
    if get_p(arena, top).is_none() {
        Some(top)
    } else {
        root
    }
}

pub fn insert_root<K, N>(arena: &mut [N], n: u32) -> Option<u32>
where
    N: RbNodeLike<K>,
{
    set_p(arena, n, None);
    set_color(arena, Some(n), Color::Black);
    Some(n)
}

pub fn insert_left<K, N>(arena: &mut [N], root: Option<u32>, n: u32, p: u32) -> Option<u32>
where
    N: RbNodeLike<K>,
{
    set_l(arena, p, Some(n));
    set_p(arena, n, Some(p));
    set_color(arena, Some(n), Color::Red);
    fix_after_insert(arena, root, n)
}

pub fn insert_right<K, N>(arena: &mut [N], root: Option<u32>, n: u32, p: u32) -> Option<u32>
where
    N: RbNodeLike<K>,
{
    set_r(arena, p, Some(n));
    set_p(arena, n, Some(p));
    set_color(arena, Some(n), Color::Red);
    fix_after_insert(arena, root, n)
}

fn fix_after_insert<K, N>(arena: &mut [N], mut root: Option<u32>, mut n: u32) -> Option<u32>
where
    N: RbNodeLike<K>,
{
    while let Some(mut p) = get_p(arena, n) {
        if color_of(arena, Some(p)).is_black() {
            break;
        }
        let Some(g) = get_p(arena, p) else {
            break;
        };

        let parent_is_left = get_l(arena, g) == Some(p);
        let uncle = if parent_is_left {
            get_r(arena, g)
        } else {
            get_l(arena, g)
        };

        if color_of(arena, uncle).is_red() {
            set_color(arena, Some(p), Color::Black);
            set_color(arena, uncle, Color::Black);
            set_color(arena, Some(g), Color::Red);
            n = g;
            continue;
        }

        if parent_is_left {
            if get_r(arena, p) == Some(n) {
                root = l_rotate(arena, root, p);
                p = n;
            }
            set_color(arena, Some(p), Color::Black);
            set_color(arena, Some(g), Color::Red);
            root = r_rotate(arena, root, g);
        } else {
            if get_l(arena, p) == Some(n) {
                root = r_rotate(arena, root, p);
                p = n;
            }
            set_color(arena, Some(p), Color::Black);
            set_color(arena, Some(g), Color::Red);
            root = l_rotate(arena, root, g);
        }
        break;
    }

    set_color(arena, root, Color::Black);
    root
}

/// Removes node `n`.
///
/// A node with two children first takes its in-order successor's key and
/// multiplicity; the successor's slot is the one spliced out and reported as
/// freed.
pub fn remove<K, N>(arena: &mut [N], mut root: Option<u32>, mut n: u32) -> Removal
where
    N: RbNodeLike<K>,
{
    if let (Some(_), Some(r)) = (get_l(arena, n), get_r(arena, n)) {
        let mut successor = r;
        while let Some(l) = get_l(arena, successor) {
            successor = l;
        }
        swap_payload(arena, n, successor);
        n = successor;
    }

    let replacement = get_l(arena, n).or(get_r(arena, n));
    let p = get_p(arena, n);
    let black = color_of(arena, Some(n)).is_black();

    match replacement {
        Some(c) => {
            replace_child(arena, p, n, Some(c));
            if p.is_none() {
                root = Some(c);
            }
            set_p(arena, n, None);
            set_l(arena, n, None);
            set_r(arena, n, None);
            if black {
                root = fix_after_delete(arena, root, c);
            }
        }
        None if p.is_none() => {
            root = None;
        }
        None => {
            // The leaf stands in for the missing subtree while fixing up.
            if black {
                root = fix_after_delete(arena, root, n);
            }
            let p = get_p(arena, n);
            replace_child(arena, p, n, None);
            set_p(arena, n, None);
        }
    }

    Removal { root, freed: n }
}

fn fix_after_delete<K, N>(arena: &mut [N], mut root: Option<u32>, mut x: u32) -> Option<u32>
where
    N: RbNodeLike<K>,
{
    while Some(x) != root && color_of(arena, Some(x)).is_black() {
        let Some(p) = get_p(arena, x) else {
            break;
        };

        if get_l(arena, p) == Some(x) {
            let mut sib = get_r(arena, p);
            if color_of(arena, sib).is_red() {
                set_color(arena, sib, Color::Black);
                set_color(arena, Some(p), Color::Red);
                root = l_rotate(arena, root, p);
                sib = get_r(arena, p);
            }

            let sl = sib.and_then(|s| get_l(arena, s));
            let sr = sib.and_then(|s| get_r(arena, s));
            if color_of(arena, sl).is_black() && color_of(arena, sr).is_black() {
                set_color(arena, sib, Color::Red);
                x = p;
                continue;
            }

            if color_of(arena, sr).is_black() {
                set_color(arena, sl, Color::Black);
                set_color(arena, sib, Color::Red);
                if let Some(s) = sib {
                    root = r_rotate(arena, root, s);
                }
                sib = get_r(arena, p);
            }

            let parent_color = color_of(arena, Some(p));
            set_color(arena, sib, parent_color);
            set_color(arena, Some(p), Color::Black);
            let far = sib.and_then(|s| get_r(arena, s));
            set_color(arena, far, Color::Black);
            root = l_rotate(arena, root, p);
        } else {
            let mut sib = get_l(arena, p);
            if color_of(arena, sib).is_red() {
                set_color(arena, sib, Color::Black);
                set_color(arena, Some(p), Color::Red);
                root = r_rotate(arena, root, p);
                sib = get_l(arena, p);
            }

            let sl = sib.and_then(|s| get_l(arena, s));
            let sr = sib.and_then(|s| get_r(arena, s));
            if color_of(arena, sl).is_black() && color_of(arena, sr).is_black() {
                set_color(arena, sib, Color::Red);
                x = p;
                continue;
            }

            if color_of(arena, sl).is_black() {
                set_color(arena, sr, Color::Black);
                set_color(arena, sib, Color::Red);
                if let Some(s) = sib {
                    root = l_rotate(arena, root, s);
                }
                sib = get_l(arena, p);
            }

            let parent_color = color_of(arena, Some(p));
            set_color(arena, sib, parent_color);
            set_color(arena, Some(p), Color::Black);
            let far = sib.and_then(|s| get_l(arena, s));
            set_color(arena, far, Color::Black);
            root = r_rotate(arena, root, p);
        }
        break;
    }

    set_color(arena, Some(x), Color::Black);
    set_color(arena, root, Color::Black);
    root
}

/// Black height of the subtree at `node`, checking the no-double-red rule
/// on the way.
pub(crate) fn black_height<K, N>(arena: &[N], node: Option<u32>) -> Result<usize, ValidationError>
where
    N: RbNodeLike<K>,
{
    let Some(i) = node else {
        return Ok(0);
    };

    let l = get_l(arena, i);
    let r = get_r(arena, i);
    let color = color_of(arena, Some(i));
    if color.is_red() && (color_of(arena, l).is_red() || color_of(arena, r).is_red()) {
        return Err(ValidationError::DoubleRed(i));
    }

    let left = black_height(arena, l)?;
    let right = black_height(arena, r)?;
    if left != right {
        return Err(ValidationError::BlackHeightMismatch {
            node: i,
            left,
            right,
        });
    }

    Ok(left + usize::from(color.is_black()))
}

pub fn assert_red_black_tree<K, N, C>(
    arena: &[N],
    root: Option<u32>,
    comparator: &C,
) -> Result<(), ValidationError>
where
    N: RbNodeLike<K>,
    C: Fn(&K, &K) -> i32,
{
    assert_search_tree(arena, root, comparator)?;
    let Some(root) = root else {
        return Ok(());
    };
    if color_of(arena, Some(root)).is_red() {
        return Err(ValidationError::RootNotBlack(root));
    }
    black_height(arena, Some(root))?;
    Ok(())
}
