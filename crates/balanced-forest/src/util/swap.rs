use crate::types::KeyNode;

/// Exchanges key and multiplicity of nodes `x` and `y`; tree links and
/// balance metadata stay with their slots.
///
/// Deletion of a node with two children uses this to move its in-order
/// successor's payload up, so the successor's slot is the one spliced out.
pub fn swap_payload<K, N: KeyNode<K>>(arena: &mut [N], x: u32, y: u32) {
    if x == y {
        return;
    }
    let (lo, hi) = if x < y { (x, y) } else { (y, x) };
    let (head, tail) = arena.split_at_mut(hi as usize);
    head[lo as usize].swap_payload(&mut tail[0]);
}
