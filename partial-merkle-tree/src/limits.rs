use crate::{PartialMerkleTreeError, Result};

/// Default cap on the declared transaction count of a proof: the most
/// transactions a 4,000,000 weight unit block can hold at 240 weight units
/// each.
pub const DEFAULT_MAX_TRANSACTIONS: u32 = 4_000_000 / 240;

/// Bounds applied to a proof before it is traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyLimits {
    /// Largest accepted `num_transactions`.
    pub max_transactions: u32,
}

impl VerifyLimits {
    /// Limits that accept any representable leaf count.
    pub fn unbounded() -> Self {
        Self {
            max_transactions: u32::MAX,
        }
    }

    /// Override the transaction cap.
    pub fn with_max_transactions(mut self, max_transactions: u32) -> Self {
        self.max_transactions = max_transactions;
        self
    }

    /// Accept a declared leaf count, or report why it cannot be traversed.
    pub fn check(&self, num_transactions: u32) -> Result<()> {
        if num_transactions == 0 {
            return Err(PartialMerkleTreeError::EmptyTree);
        }
        if num_transactions > self.max_transactions {
            return Err(PartialMerkleTreeError::TooManyTransactions {
                count: num_transactions as u64,
                limit: self.max_transactions as u64,
            });
        }
        Ok(())
    }
}

impl Default for VerifyLimits {
    fn default() -> Self {
        Self {
            max_transactions: DEFAULT_MAX_TRANSACTIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_bounds() {
        let limits = VerifyLimits::default();
        assert_eq!(limits.check(0), Err(PartialMerkleTreeError::EmptyTree));
        assert_eq!(limits.check(1), Ok(()));
        assert_eq!(limits.check(DEFAULT_MAX_TRANSACTIONS), Ok(()));
        assert_eq!(
            limits.check(DEFAULT_MAX_TRANSACTIONS + 1),
            Err(PartialMerkleTreeError::TooManyTransactions {
                count: 16_667,
                limit: 16_666,
            })
        );
        assert_eq!(VerifyLimits::unbounded().check(u32::MAX), Ok(()));
    }
}
