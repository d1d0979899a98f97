#![deny(missing_docs)]
//! Cost accounting for partial Merkle tree operations.
//!
//! Building and verifying a partial Merkle tree is pure computation, so the
//! resources worth tracking are the number of node hashes evaluated and the
//! size of the flag and hash streams touched along the way. Operations
//! return their value wrapped in a [`CostContext`] so callers can meter
//! proof work without a second pass.

mod context;

use std::ops::AddAssign;

pub use context::{CostContext, CostResult, CostsExt};

/// Resources consumed by a single operation.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct OperationCost {
    /// How many times an internal node was hashed (one double SHA-256 each).
    pub hash_node_calls: u32,
    /// How many traversal flag bits were written or read.
    pub flag_bits: u32,
    /// How many 32-byte hashes were appended to or consumed from a proof.
    pub proof_hashes: u32,
}

impl AddAssign for OperationCost {
    fn add_assign(&mut self, rhs: Self) {
        self.hash_node_calls += rhs.hash_node_calls;
        self.flag_bits += rhs.flag_bits;
        self.proof_hashes += rhs.proof_hashes;
    }
}

/// Unwraps a `CostResult`, adding its cost to the accumulator, and returns
/// early with the accumulated cost on error.
#[macro_export]
macro_rules! cost_return_on_error {
    ( &mut $cost:ident, $($body:tt)+ ) => {
        {
            use $crate::CostsExt;
            let result_with_cost = { $($body)+ };
            let result = result_with_cost.unwrap_add_cost(&mut $cost);
            match result {
                Ok(x) => x,
                Err(e) => return Err(e).wrap_with_cost($cost),
            }
        }
    };
}

/// Like [`cost_return_on_error!`] but for a plain `Result`: nothing is added
/// to the accumulator, the cost gathered so far is returned on error.
#[macro_export]
macro_rules! cost_return_on_error_no_add {
    ( $cost:ident, $($body:tt)+ ) => {
        {
            use $crate::CostsExt;
            let result = { $($body)+ };
            match result {
                Ok(x) => x,
                Err(e) => return Err(e).wrap_with_cost($cost),
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_assign_costs() {
        let mut cost = OperationCost {
            flag_bits: 1,
            ..Default::default()
        };
        cost += OperationCost {
            hash_node_calls: 1,
            flag_bits: 7,
            proof_hashes: 2,
        };
        assert_eq!(
            cost,
            OperationCost {
                hash_node_calls: 1,
                flag_bits: 8,
                proof_hashes: 2,
            }
        );
    }

    fn step(fail: bool, flag_bits: u32) -> CostResult<u32, &'static str> {
        let cost = OperationCost {
            flag_bits,
            ..Default::default()
        };
        if fail {
            Err("step failed").wrap_with_cost(cost)
        } else {
            Ok(7).wrap_with_cost(cost)
        }
    }

    fn run_steps(fail: bool) -> CostResult<u32, &'static str> {
        let mut cost = OperationCost::default();
        let first = cost_return_on_error!(&mut cost, step(false, 2));
        let second = cost_return_on_error!(&mut cost, step(fail, 4));
        Ok(first + second).wrap_with_cost(cost)
    }

    #[test]
    fn test_cost_return_on_error_keeps_accumulated_cost() {
        let ok = run_steps(false);
        assert_eq!(ok.value, Ok(14));
        assert_eq!(ok.cost.flag_bits, 6);

        let err = run_steps(true);
        assert_eq!(err.value, Err("step failed"));
        assert_eq!(err.cost.flag_bits, 6);
    }

    fn check_positive(value: i32) -> CostResult<i32, &'static str> {
        let cost = OperationCost {
            proof_hashes: 1,
            ..Default::default()
        };
        let checked = cost_return_on_error_no_add!(
            cost,
            if value > 0 { Ok(value) } else { Err("not positive") }
        );
        Ok(checked * 2).wrap_with_cost(cost)
    }

    #[test]
    fn test_cost_return_on_error_no_add() {
        assert_eq!(check_positive(4).value, Ok(8));
        let err = check_positive(-1);
        assert_eq!(err.value, Err("not positive"));
        assert_eq!(err.cost.proof_hashes, 1);
    }
}
