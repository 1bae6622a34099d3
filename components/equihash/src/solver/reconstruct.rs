//! Recovery of leaf indices from the collision tree.

use super::tree::CollisionTree;
use crate::verify::distinct_indices;

/// Resolves the back-reference `r` of a generation-`depth` value into its `2^depth` leaf
/// indices, written to `sol` in canonical order.
///
/// Returns `false` if two subtrees anywhere below `r` share a leaf.
pub(crate) fn resolve(tree: &CollisionTree, depth: u32, r: u32, sol: &mut [u32]) -> bool {
    if depth == 0 {
        sol[0] = r;
        true
    } else {
        let [a, b] = tree.get(r);
        resolve_pair(tree, depth, a, b, sol)
    }
}

/// Resolves a generation-`depth` merge of the generation-`depth - 1` values referenced by
/// `a` and `b`, without requiring the merge to be recorded in the tree.
pub(crate) fn resolve_pair(
    tree: &CollisionTree,
    depth: u32,
    a: u32,
    b: u32,
    sol: &mut [u32],
) -> bool {
    debug_assert_eq!(sol.len(), 1 << depth);
    let (left, right) = sol.split_at_mut(sol.len() / 2);

    if !resolve(tree, depth - 1, a, left) || !resolve(tree, depth - 1, b, right) {
        return false;
    }
    if !distinct_indices(left, right) {
        return false;
    }
    // The half with the smaller first index goes first; this makes the encoding unique.
    if left[0] > right[0] {
        left.swap_with_slice(right);
    }
    true
}
