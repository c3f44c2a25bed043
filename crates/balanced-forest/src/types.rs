//! Node trait definitions.
//!
//! Nodes live in a [`Vec`]-backed arena owned by the map. Every "pointer" is
//! an `Option<u32>` index into that arena, and all tree-manipulation
//! functions take the arena plus indices.

/// Structural links (`p`, `l`, `r`).
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Key plus multiplicity payload carried by every map node.
pub trait KeyNode<K>: Node {
    fn key(&self) -> &K;

    /// Number of logical insertions of [`KeyNode::key`]; always `>= 1` for a
    /// linked node.
    fn count(&self) -> u64;

    fn set_count(&mut self, count: u64);

    /// Exchanges key and multiplicity with `other`, leaving links and
    /// balance metadata in place.
    fn swap_payload(&mut self, other: &mut Self);
}

/// Link color for the red-black family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    #[inline]
    pub fn is_red(self) -> bool {
        self == Color::Red
    }

    #[inline]
    pub fn is_black(self) -> bool {
        self == Color::Black
    }

    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

/// Default comparator derived from [`Ord`].
pub fn default_comparator<K: Ord>(a: &K, b: &K) -> i32 {
    a.cmp(b) as i32
}
