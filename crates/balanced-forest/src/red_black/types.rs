use crate::types::{Color, KeyNode, Node};

/// Red-black tree node.
#[derive(Clone, Debug)]
pub struct RbNode<K> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: K,
    /// Multiplicity of `k`.
    pub c: u64,
    pub color: Color,
}

impl<K> RbNode<K> {
    /// New nodes are always red.
    pub fn new(k: K) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
            c: 1,
            color: Color::Red,
        }
    }
}

impl<K> Node for RbNode<K> {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

impl<K> KeyNode<K> for RbNode<K> {
    fn key(&self) -> &K {
        &self.k
    }

    fn count(&self) -> u64 {
        self.c
    }

    fn set_count(&mut self, count: u64) {
        self.c = count;
    }

    fn swap_payload(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.k, &mut other.k);
        std::mem::swap(&mut self.c, &mut other.c);
    }
}

/// Node behavior shared by the red-black family.
pub trait RbNodeLike<K>: KeyNode<K> {
    fn color(&self) -> Color;
    fn set_color(&mut self, color: Color);
}

impl<K> RbNodeLike<K> for RbNode<K> {
    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}
