use crate::OperationCost;

/// Operation result paired with the cost of producing it.
#[must_use]
#[derive(Debug, Eq, PartialEq)]
pub struct CostContext<T> {
    /// Wrapped operation's return value.
    pub value: T,
    /// Cost of the operation.
    pub cost: OperationCost,
}

impl<T> CostContext<T> {
    /// Take the wrapped value out, adding its cost to `acc_cost`.
    pub fn unwrap_add_cost(self, acc_cost: &mut OperationCost) -> T {
        *acc_cost += self.cost;
        self.value
    }

    /// Take the wrapped value out, dropping cost data.
    pub fn unwrap(self) -> T {
        self.value
    }
}

/// `Result` wrapped into a `CostContext`.
pub type CostResult<T, E> = CostContext<Result<T, E>>;

/// Extension trait to attach costs to any value.
pub trait CostsExt {
    /// Wraps the value into a `CostContext` with the provided cost.
    fn wrap_with_cost(self, cost: OperationCost) -> CostContext<Self>
    where
        Self: Sized,
    {
        CostContext { value: self, cost }
    }
}

impl<T> CostsExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_add_cost_accumulates() {
        let mut acc = OperationCost {
            hash_node_calls: 3,
            ..Default::default()
        };
        let value = 75
            .wrap_with_cost(OperationCost {
                hash_node_calls: 7,
                ..Default::default()
            })
            .unwrap_add_cost(&mut acc);
        assert_eq!(value, 75);
        assert_eq!(acc.hash_node_calls, 10);
    }
}
