//! Left-leaning red-black (2-3 variant) strategy.
//!
//! Shares [`RbNode`] with the classic strategy but keeps every red link on
//! the left. Insertion splits 4-nodes on the way back up; deletion pushes a
//! red link down ahead of the descent.

pub mod util;

pub use util::assert_llrb_tree;

use crate::error::ValidationError;
use crate::map::{BalanceOps, BalancedMap, Removal};
use crate::red_black::RbNode;

/// Left-leaning red-black [`BalanceOps`].
pub struct LlrbOps;

impl<K> BalanceOps<K> for LlrbOps {
    type Node = RbNode<K>;

    fn new_node(key: K) -> RbNode<K> {
        RbNode::new(key)
    }

    fn insert_root(arena: &mut [RbNode<K>], node: u32) -> Option<u32> {
        util::insert_root(arena, node)
    }

    fn insert_left(
        arena: &mut [RbNode<K>],
        _root: Option<u32>,
        node: u32,
        parent: u32,
    ) -> Option<u32> {
        util::insert_left(arena, node, parent)
    }

    fn insert_right(
        arena: &mut [RbNode<K>],
        _root: Option<u32>,
        node: u32,
        parent: u32,
    ) -> Option<u32> {
        util::insert_right(arena, node, parent)
    }

    fn remove<C: Fn(&K, &K) -> i32>(
        arena: &mut [RbNode<K>],
        root: Option<u32>,
        node: u32,
        comparator: &C,
    ) -> Removal {
        util::remove(arena, root, node, comparator)
    }

    fn assert_valid<C: Fn(&K, &K) -> i32>(
        arena: &[RbNode<K>],
        root: Option<u32>,
        comparator: &C,
    ) -> Result<(), ValidationError> {
        util::assert_llrb_tree(arena, root, comparator)
    }

    fn describe(node: &RbNode<K>) -> String {
        if node.color.is_black() {
            "black".to_string()
        } else {
            "red".to_string()
        }
    }
}

/// Ordered multiset balanced as a left-leaning red-black tree.
pub type LlrbTree<K, C = fn(&K, &K) -> i32> = BalancedMap<K, LlrbOps, C>;
