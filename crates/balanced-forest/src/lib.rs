//! Arena-based self-balancing binary search trees.
//!
//! Each tree is an ordered multiset: a distinct key is stored once, with a
//! multiplicity counter bumped by duplicate inserts. All strategies share
//! the [`BalancedMap`] front end and differ only in how they rebalance.
//!
//! Nodes are kept in a `Vec` owned by the map; every link is an
//! `Option<u32>` index into it, and parent links are maintained by every
//! rotation. Slots released by deletion are recycled.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] / [`KeyNode`] traits, [`Color`] |
//! [`util`] | traversal, key search, rotations, shared checks |
//! [`map`] | [`BalancedMap`], the [`BalanceOps`] strategy trait |
//! [`red_black`] | classic red-black strategy ([`RbTree`]) |
//! [`avl`] | height-balanced strategy ([`AvlTree`]) |
//! [`llrb`] | left-leaning red-black strategy ([`LlrbTree`]) |
//!
//! # Example
//!
//! ```
//! use balanced_forest::RbTree;
//!
//! let mut tree = RbTree::<i64>::new();
//! for k in [7, 3, 9, 3] {
//!     tree.insert(k);
//! }
//! assert_eq!(tree.find(&3), Some(2));
//! assert_eq!(tree.min(), Some((&3, 2)));
//! assert!(tree.delete(&3));
//! assert_eq!(tree.find(&3), None);
//! assert!(tree.validate().is_ok());
//! ```

pub mod avl;
pub mod error;
pub mod llrb;
pub mod map;
pub mod print;
pub mod red_black;
pub mod sort;
pub mod types;
pub mod util;

pub use avl::{AvlNode, AvlOps, AvlTree};
pub use error::ValidationError;
pub use llrb::{LlrbOps, LlrbTree};
pub use map::{BalanceOps, BalancedMap, Iter, Removal};
pub use red_black::{RbNode, RbOps, RbTree};
pub use sort::tree_sort;
pub use types::{default_comparator, Color, KeyNode, Node};

/// Default ordered multiset: the red-black strategy.
pub type OrderedMap<K, C = fn(&K, &K) -> i32> = RbTree<K, C>;
