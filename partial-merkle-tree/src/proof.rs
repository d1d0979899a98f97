//! The partial Merkle tree proof value and its encoding.

use bincode::{Decode, Encode};

use crate::{Hash, PartialMerkleTreeError, Result};

/// Largest encoded proof accepted by [`PartialMerkleTree::decode_from_slice`].
const MAX_ENCODED_PROOF_BYTES: usize = 32 * 1024 * 1024;

/// A proof that the leaves flagged in a depth-first traversal belong to the
/// tree whose root is `merkle_root`.
///
/// Produced by [`PartialMerkleTree::build`] and checked by
/// [`PartialMerkleTree::verify`]. The value is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartialMerkleTree {
    /// Traversal flags, packed least significant bit first.
    pub(crate) flags: Vec<u8>,
    /// Hashes of pruned nodes and leaves, in traversal order.
    pub(crate) hashes: Vec<Hash>,
    /// Number of leaves in the full tree.
    pub(crate) num_transactions: u32,
    /// Root the traversal must reproduce.
    pub(crate) merkle_root: Hash,
}

impl PartialMerkleTree {
    /// Assemble a proof from parts received out of band. Nothing is checked
    /// until [`verify`](Self::verify).
    pub fn new(flags: Vec<u8>, hashes: Vec<Hash>, num_transactions: u32, merkle_root: Hash) -> Self {
        Self {
            flags,
            hashes,
            num_transactions,
            merkle_root,
        }
    }

    /// Packed traversal flags.
    pub fn flags(&self) -> &[u8] {
        &self.flags
    }

    /// Pruned hashes in traversal order.
    pub fn hashes(&self) -> &[Hash] {
        &self.hashes
    }

    /// Number of leaves in the full tree.
    pub fn num_transactions(&self) -> u32 {
        self.num_transactions
    }

    /// Declared Merkle root.
    pub fn merkle_root(&self) -> &Hash {
        &self.merkle_root
    }

    /// Split the proof into `(flags, hashes, num_transactions, merkle_root)`.
    pub fn into_parts(self) -> (Vec<u8>, Vec<Hash>, u32, Hash) {
        (
            self.flags,
            self.hashes,
            self.num_transactions,
            self.merkle_root,
        )
    }

    /// Encode to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_no_limit();
        bincode::encode_to_vec(self, config)
            .map_err(|e| PartialMerkleTreeError::InvalidData(format!("encode error: {}", e)))
    }

    /// Decode from bytes using bincode.
    ///
    /// Rejects trailing bytes and proofs over zero transactions; everything
    /// else is left to [`verify`](Self::verify).
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<MAX_ENCODED_PROOF_BYTES>();
        let (proof, read): (Self, usize) = bincode::decode_from_slice(bytes, config)
            .map_err(|e| PartialMerkleTreeError::InvalidData(format!("decode error: {}", e)))?;
        if read != bytes.len() {
            return Err(PartialMerkleTreeError::InvalidData(format!(
                "{} trailing bytes after proof",
                bytes.len() - read
            )));
        }
        if proof.num_transactions == 0 {
            return Err(PartialMerkleTreeError::InvalidData(
                "proof declares zero transactions".into(),
            ));
        }
        Ok(proof)
    }
}
