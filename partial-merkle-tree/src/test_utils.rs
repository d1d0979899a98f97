//! Fixtures shared by the unit tests.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{Hash, hash_from_display_hex, hash256};

/// Transaction ids of Bitcoin block 100000, display order.
pub(crate) const BLOCK_100000_TXIDS: [&str; 4] = [
    "8c14f0db3df150123e6f3dbbf30f8b955a8249b62ac1d1ff16284aefa3d06d87",
    "fff2525b8931402dd09222c50775608f75787bd2b87e56995a7bdd30f79702c4",
    "6359f0868171b1d194cbee1af2f16ea598ae8fad666d9b012c8ed2b79a236ec4",
    "e9a66845e05d5abc0ad04ec80f774a7e585c6e8db975962d069a522137b80c1d",
];

/// Merkle root of Bitcoin block 100000, display order.
pub(crate) const BLOCK_100000_MERKLE_ROOT: &str =
    "f3e94742aca4b5ef85488dc37c06c3282295ffec960994b2c0d5ac2a25a95766";

pub(crate) fn block_100000_leaves() -> Vec<Hash> {
    BLOCK_100000_TXIDS
        .iter()
        .map(|txid| hash_from_display_hex(txid).expect("valid txid"))
        .collect()
}

/// Distinct leaf for index `i`.
pub(crate) fn leaf(i: u32) -> Hash {
    let mut hash = [0xa5u8; 32];
    hash[..4].copy_from_slice(&i.to_le_bytes());
    hash
}

pub(crate) fn leaves(count: u32) -> Vec<Hash> {
    (0..count).map(leaf).collect()
}

pub(crate) fn random_leaves(count: usize, seed: u64) -> Vec<Hash> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| rng.r#gen::<Hash>()).collect()
}

pub(crate) fn random_matches(count: usize, seed: u64) -> Vec<bool> {
    let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed);
    (0..count).map(|_| rng.gen_bool(0.1)).collect()
}

/// Root computed row by row with pairwise hashing, duplicating the last
/// node of odd rows. Independent of the traversal code.
pub(crate) fn reference_merkle_root(leaves: &[Hash]) -> Hash {
    let mut row = leaves.to_vec();
    while row.len() > 1 {
        row = row
            .chunks(2)
            .map(|pair| hash256(&pair[0], pair.get(1).unwrap_or(&pair[0])))
            .collect();
    }
    row[0]
}

pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
