use sha2::{Digest, Sha256};

use crate::{PartialMerkleTreeError, Result};

/// A 32-byte node or leaf hash in internal byte order.
pub type Hash = [u8; 32];

/// Compute the parent hash of two nodes: `SHA256(SHA256(left || right))`.
///
/// A node without a right sibling is hashed as `hash256(left, left)`.
pub fn hash256(left: &Hash, right: &Hash) -> Hash {
    let inner = Sha256::new().chain_update(left).chain_update(right).finalize();
    Sha256::digest(inner).into()
}

/// Parse a hash printed in display order (byte-reversed hex, as block
/// explorers print transaction ids) into internal byte order.
pub fn hash_from_display_hex(display_hex: &str) -> Result<Hash> {
    let mut hash: Hash = [0u8; 32];
    hex::decode_to_slice(display_hex.trim(), &mut hash)
        .map_err(|e| PartialMerkleTreeError::InvalidData(format!("invalid hash hex: {}", e)))?;
    hash.reverse();
    Ok(hash)
}

/// Format an internal-order hash as display-order hex.
pub fn hash_to_display_hex(hash: &Hash) -> String {
    let mut reversed = *hash;
    reversed.reverse();
    hex::encode(reversed)
}
