//! AVL (height-balanced) strategy.
//!
//! Every node stores its height. After a mutation the path to the root is
//! retraced: a node whose balance factor reaches ±2 gets a single or double
//! rotation. Insertion needs at most one of those; deletion may rotate at
//! every level.

pub mod types;
pub mod util;

pub use types::{AvlNode, AvlNodeLike};
pub use util::assert_avl_tree;

use crate::error::ValidationError;
use crate::map::{BalanceOps, BalancedMap, Removal};

/// AVL [`BalanceOps`].
pub struct AvlOps;

impl<K> BalanceOps<K> for AvlOps {
    type Node = AvlNode<K>;

    fn new_node(key: K) -> AvlNode<K> {
        AvlNode::new(key)
    }

    fn insert_root(arena: &mut [AvlNode<K>], node: u32) -> Option<u32> {
        util::insert_root(arena, node)
    }

    fn insert_left(
        arena: &mut [AvlNode<K>],
        root: Option<u32>,
        node: u32,
        parent: u32,
    ) -> Option<u32> {
        util::insert_left(arena, root, node, parent)
    }

    fn insert_right(
        arena: &mut [AvlNode<K>],
        root: Option<u32>,
        node: u32,
        parent: u32,
    ) -> Option<u32> {
        util::insert_right(arena, root, node, parent)
    }

    fn remove<C: Fn(&K, &K) -> i32>(
        arena: &mut [AvlNode<K>],
        root: Option<u32>,
        node: u32,
        _comparator: &C,
    ) -> Removal {
        util::remove(arena, root, node)
    }

    fn assert_valid<C: Fn(&K, &K) -> i32>(
        arena: &[AvlNode<K>],
        root: Option<u32>,
        comparator: &C,
    ) -> Result<(), ValidationError> {
        util::assert_avl_tree(arena, root, comparator)
    }

    fn describe(node: &AvlNode<K>) -> String {
        format!("[h={}]", node.height)
    }
}

/// Ordered multiset balanced as an AVL tree.
pub type AvlTree<K, C = fn(&K, &K) -> i32> = BalancedMap<K, AvlOps, C>;
