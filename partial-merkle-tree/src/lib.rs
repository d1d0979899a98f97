//! Partial Merkle trees: compact proofs that a subset of a block's
//! transactions is committed to by the block's Merkle root.
//!
//! A [`PartialMerkleTree`] carries a depth-first traversal of the binary
//! Merkle tree over `num_transactions` leaves. Each visited node contributes
//! one flag bit (`1` = descended into, `0` = pruned) and every pruned node or
//! leaf contributes its hash. Because the tree shape is a pure function of
//! the leaf count ([`tree_width`], [`tree_height`]), the builder and the
//! verifier walk the same nodes in the same order and the stream needs no
//! explicit shape descriptor.
//!
//! Node hashes are `SHA256(SHA256(left || right))`. A node without a right
//! child is hashed with itself. The verifier rejects internal nodes whose two
//! children are equal, which closes the duplicate-transaction ambiguity in
//! this tree layout.
//!
//! # Example
//!
//! ```
//! use partial_merkle_tree::{PartialMerkleTree, hash256};
//!
//! let leaves = [[1u8; 32], [2u8; 32], [3u8; 32]];
//! let proof = PartialMerkleTree::build(&leaves, &[[2u8; 32]]).unwrap();
//!
//! let expected_root = hash256(&hash256(&leaves[0], &leaves[1]), &hash256(&leaves[2], &leaves[2]));
//! assert_eq!(proof.merkle_root(), &expected_root);
//! assert_eq!(proof.verify().unwrap(), vec![[2u8; 32]]);
//! ```

#![warn(missing_docs)]

mod bits;
mod build;
mod error;
mod hash;
mod limits;
mod proof;
mod shape;
mod verify;

#[cfg(test)]
pub(crate) mod test_utils;

pub use bits::{FlagReader, pack_flags, unpack_flags};
pub use error::{PartialMerkleTreeError, Result};
pub use hash::{Hash, hash_from_display_hex, hash_to_display_hex, hash256};
pub use limits::{DEFAULT_MAX_TRANSACTIONS, VerifyLimits};
pub use pmt_costs::{CostContext, CostResult, CostsExt, OperationCost};
pub use proof::PartialMerkleTree;
pub use shape::{has_right_child, leaf_range, tree_height, tree_width};
pub use verify::ExtractedMatches;
