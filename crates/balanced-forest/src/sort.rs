use crate::map::{BalanceOps, BalancedMap};

/// Sorts `values` ascending by inserting them into a [`BalancedMap`] with
/// strategy `O` and expanding the in-order walk by multiplicity.
///
/// ```
/// use balanced_forest::{tree_sort, RbOps};
///
/// assert_eq!(tree_sort::<RbOps, _>(&[3, 1, 2, 1]), vec![1, 1, 2, 3]);
/// ```
pub fn tree_sort<O, K>(values: &[K]) -> Vec<K>
where
    O: BalanceOps<K>,
    K: Ord + Clone,
{
    let map: BalancedMap<K, O> = values.iter().cloned().collect();
    let mut out = Vec::with_capacity(values.len());
    for (key, count) in map.iter() {
        for _ in 0..count {
            out.push(key.clone());
        }
    }
    out
}
