//! Classic (CLR) red-black tree strategy.
//!
//! Insertion recolors while the uncle is red and otherwise finishes with at
//! most two rotations. Deletion repairs a double-black deficiency bottom-up
//! with at most three rotations.

pub mod types;
pub mod util;

pub use types::{RbNode, RbNodeLike};
pub use util::assert_red_black_tree;

use crate::error::ValidationError;
use crate::map::{BalanceOps, BalancedMap, Removal};

/// Red-black [`BalanceOps`].
pub struct RbOps;

impl<K> BalanceOps<K> for RbOps {
    type Node = RbNode<K>;

    fn new_node(key: K) -> RbNode<K> {
        RbNode::new(key)
    }

    fn insert_root(arena: &mut [RbNode<K>], node: u32) -> Option<u32> {
        util::insert_root(arena, node)
    }

    fn insert_left(
        arena: &mut [RbNode<K>],
        root: Option<u32>,
        node: u32,
        parent: u32,
    ) -> Option<u32> {
        util::insert_left(arena, root, node, parent)
    }

    fn insert_right(
        arena: &mut [RbNode<K>],
        root: Option<u32>,
        node: u32,
        parent: u32,
    ) -> Option<u32> {
        util::insert_right(arena, root, node, parent)
    }

    fn remove<C: Fn(&K, &K) -> i32>(
        arena: &mut [RbNode<K>],
        root: Option<u32>,
        node: u32,
        _comparator: &C,
    ) -> Removal {
        util::remove(arena, root, node)
    }

    fn assert_valid<C: Fn(&K, &K) -> i32>(
        arena: &[RbNode<K>],
        root: Option<u32>,
        comparator: &C,
    ) -> Result<(), ValidationError> {
        util::assert_red_black_tree(arena, root, comparator)
    }

    fn describe(node: &RbNode<K>) -> String {
        if node.color.is_black() {
            "black".to_string()
        } else {
            "red".to_string()
        }
    }
}

/// Ordered multiset balanced as a red-black tree.
pub type RbTree<K, C = fn(&K, &K) -> i32> = BalancedMap<K, RbOps, C>;
