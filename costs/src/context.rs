use crate::OperationCost;

/// An operation's return value together with the cost of producing it.
#[must_use]
#[derive(Debug, Eq, PartialEq)]
pub struct CostContext<T> {
    /// Wrapped operation's return value.
    pub value: T,
    /// Cost of the operation.
    pub cost: OperationCost,
}

impl<T> CostContext<T> {
    /// Take the value out, adding its cost to `acc_cost`.
    pub fn unwrap_add_cost(self, acc_cost: &mut OperationCost) -> T {
        *acc_cost += self.cost;
        self.value
    }

    /// Take the value out, dropping the cost.
    pub fn unwrap(self) -> T {
        self.value
    }

    /// Borrow the cost.
    pub fn cost(&self) -> &OperationCost {
        &self.cost
    }

    /// Borrow the value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Map the value, keeping the cost.
    pub fn map<B>(self, f: impl FnOnce(T) -> B) -> CostContext<B> {
        CostContext {
            value: f(self.value),
            cost: self.cost,
        }
    }

    /// Add previously accumulated cost.
    pub fn add_cost(mut self, cost: OperationCost) -> Self {
        self.cost += cost;
        self
    }
}

/// `Result` wrapped into a `CostContext`.
pub type CostResult<T, E> = CostContext<Result<T, E>>;

impl<T, E> CostResult<T, E> {
    /// Map the `Ok` value, keeping the cost.
    pub fn map_ok<B>(self, f: impl FnOnce(T) -> B) -> CostResult<B, E> {
        self.map(|result| result.map(f))
    }

    /// Map the `Err` value, keeping the cost.
    pub fn map_err<B>(self, f: impl FnOnce(E) -> B) -> CostResult<T, B> {
        self.map(|result| result.map_err(f))
    }

    /// The cost, if the operation succeeded.
    pub fn cost_as_result(self) -> Result<OperationCost, E> {
        self.value.map(|_| self.cost)
    }
}

/// Wraps any value into a `CostContext`.
pub trait CostsExt {
    /// Wrap `self` with the given cost.
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
    fn test_map_ok_keeps_cost() {
        let initial: CostResult<u32, ()> =
            Ok(75).wrap_with_cost(OperationCost::with_hash_node_calls(3));
        let mapped = initial.map_ok(|x| x + 25);
        assert_eq!(mapped.cost.hash_node_calls, 3);
        assert_eq!(mapped.value, Ok(100));
    }

    #[test]
    fn test_map_ok_on_err_is_skipped() {
        let initial: CostResult<u32, &str> =
            Err("full").wrap_with_cost(OperationCost::with_node_writes(2));
        let mut executed = false;
        let mapped = initial.map_ok(|x| {
            executed = true;
            x + 1
        });
        assert!(!executed);
        assert_eq!(mapped.cost, OperationCost::with_node_writes(2));
        assert_eq!(mapped.value, Err("full"));
    }

    #[test]
    fn test_cost_as_result() {
        let ok: CostResult<(), &str> =
            Ok(()).wrap_with_cost(OperationCost::with_hash_node_calls(9));
        assert_eq!(ok.cost_as_result(), Ok(OperationCost::with_hash_node_calls(9)));

        let err: CostResult<(), &str> =
            Err("bad").wrap_with_cost(OperationCost::with_hash_node_calls(9));
        assert_eq!(err.cost_as_result(), Err("bad"));
    }

    #[test]
    fn test_unwrap_add_cost_and_add_cost() {
        let mut acc = OperationCost::with_hash_node_calls(1);
        let ctx = 5u8
            .wrap_with_cost(OperationCost::with_hash_node_calls(2))
            .add_cost(OperationCost::with_node_writes(4));
        assert_eq!(ctx.cost().node_writes, 4);
        assert_eq!(*ctx.value(), 5);
        assert_eq!(ctx.unwrap_add_cost(&mut acc), 5);
        assert_eq!(
            acc,
            OperationCost {
                hash_node_calls: 3,
                node_writes: 4,
            }
        );
    }
}
