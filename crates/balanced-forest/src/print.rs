use std::fmt::Debug;

use crate::types::KeyNode;

/// Debug printer shared by all strategies.
///
/// Each node prints as `Node[idx] <meta> { key × count }`, followed by its
/// `L=` and `R=` subtrees indented by two spaces per level.
pub fn print<K, N, F>(arena: &[N], node: Option<u32>, tab: &str, describe: &F) -> String
where
    K: Debug,
    N: KeyNode<K>,
    F: Fn(&N) -> String,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let child_tab = format!("{tab}  ");
            let left = print::<K, N, F>(arena, n.l(), &child_tab, describe);
            let right = print::<K, N, F>(arena, n.r(), &child_tab, describe);
            format!(
                "Node[{i}] {} {{ {:?} × {} }}\n{tab}L={left}\n{tab}R={right}",
                describe(n),
                n.key(),
                n.count()
            )
        }
    }
}
