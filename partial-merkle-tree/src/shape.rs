//! Tree shape arithmetic shared by the builder and the verifier.
//!
//! Height 0 is the leaf row and the root sits at [`tree_height`]. Both
//! traversals must ask these functions, and only these, whether a node has a
//! right child, otherwise they fall out of lock-step.

use std::ops::Range;

/// Number of nodes at `height` in a tree over `num_transactions` leaves:
/// `ceil(num_transactions / 2^height)`.
///
/// Evaluated in 64-bit integers so any `u32` leaf count and any height up to
/// 32 is exact.
pub fn tree_width(num_transactions: u32, height: u32) -> u32 {
    debug_assert!(height <= 32);
    ((num_transactions as u64 + (1u64 << height) - 1) >> height) as u32
}

/// Height of the root: `ceil(log2(num_transactions))`, `0` for a single
/// leaf (and, degenerately, for zero leaves).
pub fn tree_height(num_transactions: u32) -> u32 {
    if num_transactions <= 1 {
        return 0;
    }
    u32::BITS - (num_transactions - 1).leading_zeros()
}

/// Whether the node at `(height, pos)` has a right child. Leaves have none.
pub fn has_right_child(num_transactions: u32, height: u32, pos: u32) -> bool {
    if height == 0 {
        return false;
    }
    2 * pos as u64 + 1 < tree_width(num_transactions, height - 1) as u64
}

/// Leaf indices covered by the node at `(height, pos)`.
pub fn leaf_range(num_transactions: u32, height: u32, pos: u32) -> Range<u64> {
    let start = (pos as u64) << height;
    let end = ((pos as u64 + 1) << height).min(num_transactions as u64);
    start..end.max(start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_height() {
        assert_eq!(tree_height(1), 0);
        assert_eq!(tree_height(2), 1);
        assert_eq!(tree_height(3), 2);
        assert_eq!(tree_height(4), 2);
        assert_eq!(tree_height(5), 3);
        assert_eq!(tree_height(1024), 10);
        assert_eq!(tree_height(1025), 11);
        assert_eq!(tree_height(u32::MAX), 32);
    }

    #[test]
    fn test_tree_width_rows() {
        // 5 leaves: 5, 3, 2, 1
        assert_eq!(tree_width(5, 0), 5);
        assert_eq!(tree_width(5, 1), 3);
        assert_eq!(tree_width(5, 2), 2);
        assert_eq!(tree_width(5, 3), 1);
    }

    #[test]
    fn test_tree_width_at_extremes() {
        for n in [1u32, 2, 3, 7, 8, 9, 1000, 16_666, u32::MAX - 1, u32::MAX] {
            assert_eq!(tree_width(n, 0), n);
            assert_eq!(tree_width(n, tree_height(n)), 1, "root row of {n} leaves");
        }
    }

    #[test]
    fn test_has_right_child() {
        // 3 leaves: root has both children, (1, 1) only a left one.
        assert!(has_right_child(3, 2, 0));
        assert!(has_right_child(3, 1, 0));
        assert!(!has_right_child(3, 1, 1));
        assert!(!has_right_child(3, 0, 2));
        // single leaf tree
        assert!(!has_right_child(1, 0, 0));
    }

    #[test]
    fn test_leaf_range() {
        assert_eq!(leaf_range(3, 2, 0), 0..3);
        assert_eq!(leaf_range(3, 1, 0), 0..2);
        assert_eq!(leaf_range(3, 1, 1), 2..3);
        assert_eq!(leaf_range(3, 0, 1), 1..2);
        assert_eq!(leaf_range(u32::MAX, 32, 0), 0..u32::MAX as u64);
    }
}
