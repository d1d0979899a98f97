//! Proof construction.

use std::collections::BTreeSet;

use pmt_costs::{CostResult, CostsExt, OperationCost, cost_return_on_error_no_add};

use crate::{
    Hash, PartialMerkleTree, PartialMerkleTreeError, Result, bits::pack_flags, hash256,
    shape::{has_right_child, leaf_range, tree_height},
};

/// Depth-first walk over the full leaf set that records the flag and hash
/// streams.
struct TreeBuilder<'a> {
    leaves: &'a [Hash],
    matches: &'a [bool],
    num_transactions: u32,
    bits: Vec<bool>,
    hashes: Vec<Hash>,
    cost: OperationCost,
}

impl<'a> TreeBuilder<'a> {
    fn new(leaves: &'a [Hash], matches: &'a [bool], num_transactions: u32) -> Self {
        Self {
            leaves,
            matches,
            num_transactions,
            bits: Vec::new(),
            hashes: Vec::new(),
            cost: OperationCost::default(),
        }
    }

    /// Hash of the subtree rooted at `(height, pos)`. Leaves are returned
    /// as-is; a missing right child is replaced by the left one.
    fn node_hash(&mut self, height: u32, pos: u32) -> Hash {
        if height == 0 {
            return self.leaves[pos as usize];
        }
        let left = self.node_hash(height - 1, pos * 2);
        let right = if has_right_child(self.num_transactions, height, pos) {
            self.node_hash(height - 1, pos * 2 + 1)
        } else {
            left
        };
        self.cost.hash_node_calls += 1;
        hash256(&left, &right)
    }

    /// Pre-order visit: emit one flag per node, and a hash wherever the walk
    /// stops descending. Returns the node's hash, so every internal node is
    /// hashed exactly once whether or not it was pruned.
    fn visit(&mut self, height: u32, pos: u32) -> Hash {
        let parent_of_match = leaf_range(self.num_transactions, height, pos)
            .any(|leaf| self.matches[leaf as usize]);
        self.bits.push(parent_of_match);

        if height == 0 || !parent_of_match {
            let hash = self.node_hash(height, pos);
            self.hashes.push(hash);
            return hash;
        }

        let left = self.visit(height - 1, pos * 2);
        let right = if has_right_child(self.num_transactions, height, pos) {
            self.visit(height - 1, pos * 2 + 1)
        } else {
            left
        };
        self.cost.hash_node_calls += 1;
        hash256(&left, &right)
    }
}

/// Leaf count of a build request, once the inputs line up.
fn checked_leaf_count(leaves: &[Hash], matches: &[bool]) -> Result<u32> {
    if leaves.is_empty() {
        return Err(PartialMerkleTreeError::EmptyTree);
    }
    if matches.len() != leaves.len() {
        return Err(PartialMerkleTreeError::MatchCountMismatch {
            leaves: leaves.len(),
            matches: matches.len(),
        });
    }
    u32::try_from(leaves.len()).map_err(|_| PartialMerkleTreeError::TooManyTransactions {
        count: leaves.len() as u64,
        limit: u32::MAX as u64,
    })
}

impl PartialMerkleTree {
    /// Build a proof revealing every leaf of `leaves` that also appears in
    /// `include`. Members of `include` absent from `leaves` are ignored.
    pub fn build(leaves: &[Hash], include: &[Hash]) -> Result<Self> {
        Self::build_with_cost(leaves, include).unwrap()
    }

    /// [`build`](Self::build), also reporting the hashing work done.
    pub fn build_with_cost(
        leaves: &[Hash],
        include: &[Hash],
    ) -> CostResult<Self, PartialMerkleTreeError> {
        let include: BTreeSet<&Hash> = include.iter().collect();
        let matches: Vec<bool> = leaves.iter().map(|leaf| include.contains(leaf)).collect();
        Self::build_from_matches_with_cost(leaves, &matches)
    }

    /// Build a proof from an explicit match vector, one flag per leaf.
    pub fn build_from_matches(leaves: &[Hash], matches: &[bool]) -> Result<Self> {
        Self::build_from_matches_with_cost(leaves, matches).unwrap()
    }

    /// [`build_from_matches`](Self::build_from_matches), also reporting the
    /// hashing work done.
    pub fn build_from_matches_with_cost(
        leaves: &[Hash],
        matches: &[bool],
    ) -> CostResult<Self, PartialMerkleTreeError> {
        let cost = OperationCost::default();
        let num_transactions =
            cost_return_on_error_no_add!(cost, checked_leaf_count(leaves, matches));

        let height = tree_height(num_transactions);
        let mut builder = TreeBuilder::new(leaves, matches, num_transactions);
        let merkle_root = builder.visit(height, 0);

        let TreeBuilder {
            bits,
            hashes,
            mut cost,
            ..
        } = builder;
        cost.flag_bits += bits.len() as u32;
        cost.proof_hashes += hashes.len() as u32;

        tracing::debug!(
            num_transactions,
            matched = matches.iter().filter(|m| **m).count(),
            flag_bits = bits.len(),
            hashes = hashes.len(),
            "built partial merkle tree"
        );

        Ok(PartialMerkleTree {
            flags: pack_flags(&bits),
            hashes,
            num_transactions,
            merkle_root,
        })
        .wrap_with_cost(cost)
    }
}
