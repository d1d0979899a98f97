//! Flag bit packing, least significant bit first within each byte.

use crate::{PartialMerkleTreeError, Result};

/// Pack traversal flags into bytes. Bit `i` lands in byte `i / 8` at bit
/// `i % 8`; unused high bits of the last byte are zero.
pub fn pack_flags(bits: &[bool]) -> Vec<u8> {
    let mut bytes = vec![0u8; bits.len().div_ceil(8)];
    for (i, _) in bits.iter().enumerate().filter(|(_, bit)| **bit) {
        bytes[i / 8] |= 1 << (i % 8);
    }
    bytes
}

/// Unpack every bit of `bytes`, eight per byte, least significant first.
pub fn unpack_flags(bytes: &[u8]) -> Vec<bool> {
    bytes
        .iter()
        .flat_map(|byte| (0..8).map(move |j| (byte >> j) & 1 == 1))
        .collect()
}

/// Sequential reader over a packed flag stream, reading bits in place.
#[derive(Debug, Clone)]
pub struct FlagReader<'a> {
    bytes: &'a [u8],
    used: usize,
}

impl<'a> FlagReader<'a> {
    /// Start reading at the first bit of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, used: 0 }
    }

    /// Read the next bit, or fail if the stream is exhausted.
    pub fn next_bit(&mut self) -> Result<bool> {
        let byte = self.bytes.get(self.used / 8).ok_or(
            PartialMerkleTreeError::FlagBitsExhausted {
                bits_available: self.bytes.len() * 8,
            },
        )?;
        let bit = (byte >> (self.used % 8)) & 1 == 1;
        self.used += 1;
        Ok(bit)
    }

    /// Number of bits read so far.
    pub fn bits_used(&self) -> usize {
        self.used
    }

    /// Check that the stream held nothing beyond the bits read: no whole
    /// unread bytes, and no set bits after the last read bit of the final
    /// byte.
    pub fn finish(&self) -> Result<()> {
        let unconsumed = PartialMerkleTreeError::UnconsumedFlagBits {
            bits_used: self.used,
            flag_bytes: self.bytes.len(),
        };
        if self.bytes.len() != self.used.div_ceil(8) {
            return Err(unconsumed);
        }
        let tail = self.used % 8;
        if tail != 0 && self.bytes[self.bytes.len() - 1] >> tail != 0 {
            return Err(unconsumed);
        }
        Ok(())
    }
}
