//! Proof verification.
//!
//! Pure function of the proof: replays the builder's traversal, consuming
//! one flag per visited node and one hash per pruned node or leaf, then
//! checks that both streams were used up and that the rebuilt root matches.

use pmt_costs::{
    CostResult, CostsExt, OperationCost, cost_return_on_error, cost_return_on_error_no_add,
};

use crate::{
    Hash, PartialMerkleTree, PartialMerkleTreeError, Result, VerifyLimits, bits::FlagReader,
    hash256,
    shape::{has_right_child, tree_height},
};

/// Leaves recovered from a proof together with the root its traversal
/// produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedMatches {
    /// Root rebuilt from the flag and hash streams.
    pub merkle_root: Hash,
    /// Matched leaves as `(leaf_index, hash)`, in leaf order.
    pub matches: Vec<(u32, Hash)>,
}

impl ExtractedMatches {
    /// Matched leaf hashes in leaf order.
    pub fn hashes(&self) -> Vec<Hash> {
        self.matches.iter().map(|(_, hash)| *hash).collect()
    }

    /// Positions of the matched leaves in the full leaf sequence.
    pub fn indices(&self) -> Vec<u32> {
        self.matches.iter().map(|(index, _)| *index).collect()
    }
}

/// Replays the traversal over a proof's streams.
struct TreeExtractor<'a> {
    num_transactions: u32,
    flags: FlagReader<'a>,
    hashes: &'a [Hash],
    hashes_used: usize,
    matches: Vec<(u32, Hash)>,
    cost: OperationCost,
}

impl<'a> TreeExtractor<'a> {
    fn new(proof: &'a PartialMerkleTree) -> Self {
        Self {
            num_transactions: proof.num_transactions,
            flags: FlagReader::new(&proof.flags),
            hashes: &proof.hashes,
            hashes_used: 0,
            matches: Vec::new(),
            cost: OperationCost::default(),
        }
    }

    fn next_hash(&mut self) -> Result<Hash> {
        let hash = *self.hashes.get(self.hashes_used).ok_or(
            PartialMerkleTreeError::HashesExhausted {
                hashes_available: self.hashes.len(),
            },
        )?;
        self.hashes_used += 1;
        Ok(hash)
    }

    fn extract(&mut self, height: u32, pos: u32) -> Result<Hash> {
        let parent_of_match = self.flags.next_bit()?;

        if height == 0 || !parent_of_match {
            let hash = self.next_hash()?;
            if height == 0 && parent_of_match {
                self.matches.push((pos, hash));
            }
            return Ok(hash);
        }

        let left = self.extract(height - 1, pos * 2)?;
        let right = if has_right_child(self.num_transactions, height, pos) {
            let right = self.extract(height - 1, pos * 2 + 1)?;
            if left == right {
                tracing::trace!(
                    height,
                    pos,
                    hash = %hex::encode(left),
                    "rejecting identical sibling hashes"
                );
                return Err(PartialMerkleTreeError::DuplicateChildHash {
                    hash: left,
                    height,
                    position: pos,
                });
            }
            right
        } else {
            left
        };
        self.cost.hash_node_calls += 1;
        Ok(hash256(&left, &right))
    }

    /// Run the walk from the root and apply the stream consumption checks.
    fn run(mut self) -> CostResult<ExtractedMatches, PartialMerkleTreeError> {
        let height = tree_height(self.num_transactions);
        let walked = self.extract(height, 0);

        let mut cost = self.cost;
        cost.flag_bits += self.flags.bits_used() as u32;
        cost.proof_hashes += self.hashes_used as u32;

        let merkle_root = match walked {
            Ok(root) => root,
            Err(e) => return Err(e).wrap_with_cost(cost),
        };
        if let Err(e) = self.flags.finish() {
            return Err(e).wrap_with_cost(cost);
        }
        if self.hashes_used != self.hashes.len() {
            return Err(PartialMerkleTreeError::UnconsumedHashes {
                used: self.hashes_used,
                provided: self.hashes.len(),
            })
            .wrap_with_cost(cost);
        }

        Ok(ExtractedMatches {
            merkle_root,
            matches: self.matches,
        })
        .wrap_with_cost(cost)
    }
}

impl PartialMerkleTree {
    /// Verify the proof against its declared root with
    /// [`VerifyLimits::default`].
    ///
    /// Returns the matched leaf hashes in leaf order.
    pub fn verify(&self) -> Result<Vec<Hash>> {
        self.verify_with_limits(&VerifyLimits::default())
    }

    /// Verify the proof against its declared root under `limits`.
    pub fn verify_with_limits(&self, limits: &VerifyLimits) -> Result<Vec<Hash>> {
        self.verify_with_cost(limits).unwrap()
    }

    /// [`verify_with_limits`](Self::verify_with_limits), also reporting the
    /// work done, including on failure.
    pub fn verify_with_cost(
        &self,
        limits: &VerifyLimits,
    ) -> CostResult<Vec<Hash>, PartialMerkleTreeError> {
        let mut cost = OperationCost::default();

        let extracted = match self
            .extract_matches_with_cost(limits)
            .unwrap_add_cost(&mut cost)
        {
            Ok(extracted) => extracted,
            Err(e) => {
                tracing::debug!(
                    num_transactions = self.num_transactions,
                    error = %e,
                    "partial merkle tree rejected"
                );
                return Err(e).wrap_with_cost(cost);
            }
        };

        if extracted.merkle_root != self.merkle_root {
            let e = PartialMerkleTreeError::RootMismatch {
                calculated: extracted.merkle_root,
                declared: self.merkle_root,
            };
            tracing::debug!(
                num_transactions = self.num_transactions,
                error = %e,
                "partial merkle tree rejected"
            );
            return Err(e).wrap_with_cost(cost);
        }

        tracing::debug!(
            num_transactions = self.num_transactions,
            matched = extracted.matches.len(),
            "verified partial merkle tree"
        );
        Ok(extracted.hashes()).wrap_with_cost(cost)
    }

    /// Replay the proof and return the root it produces together with the
    /// matched leaves and their indices, without comparing against
    /// [`merkle_root`](Self::merkle_root).
    ///
    /// All structural checks still apply. Use this when the expected root
    /// comes from elsewhere, such as a block header.
    pub fn extract_matches(&self) -> Result<ExtractedMatches> {
        self.extract_matches_with_cost(&VerifyLimits::default())
            .unwrap()
    }

    /// [`extract_matches`](Self::extract_matches) under `limits`, also
    /// reporting the work done.
    pub fn extract_matches_with_cost(
        &self,
        limits: &VerifyLimits,
    ) -> CostResult<ExtractedMatches, PartialMerkleTreeError> {
        let mut cost = OperationCost::default();

        cost_return_on_error_no_add!(cost, limits.check(self.num_transactions));

        let extracted = cost_return_on_error!(&mut cost, TreeExtractor::new(self).run());
        Ok(extracted).wrap_with_cost(cost)
    }
}
