#![deny(missing_docs)]
//! Cost accounting shared by the incremental Merkle tree engines.
//!
//! Tree operations report how much work they did alongside their result, so
//! callers (tests, benches) can observe the asymptotic behaviour of an
//! operation rather than only its wall-clock time.

use std::ops::{Add, AddAssign};

mod context;

pub use context::{CostContext, CostResult, CostsExt};

/// Work performed by a tree operation.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct OperationCost {
    /// How many times the tree's hash function was invoked.
    pub hash_node_calls: u32,
    /// How many node slots (leaves included) were written across all levels.
    pub node_writes: u32,
}

impl OperationCost {
    /// Build a cost with only `hash_node_calls` set.
    pub fn with_hash_node_calls(hash_node_calls: u32) -> Self {
        OperationCost {
            hash_node_calls,
            ..Default::default()
        }
    }

    /// Build a cost with only `node_writes` set.
    pub fn with_node_writes(node_writes: u32) -> Self {
        OperationCost {
            node_writes,
            ..Default::default()
        }
    }

    /// `true` when the operation did no hashing and wrote nothing.
    pub fn is_nothing(&self) -> bool {
        self.hash_node_calls == 0 && self.node_writes == 0
    }
}

impl Add for OperationCost {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        OperationCost {
            hash_node_calls: self.hash_node_calls + rhs.hash_node_calls,
            node_writes: self.node_writes + rhs.node_writes,
        }
    }
}

impl AddAssign for OperationCost {
    fn add_assign(&mut self, rhs: Self) {
        self.hash_node_calls += rhs.hash_node_calls;
        self.node_writes += rhs.node_writes;
    }
}

/// Like `?` for `CostResult`: adds the inner cost to the accumulator, unwraps
/// `Ok`, and on `Err` returns early carrying everything accumulated so far.
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

/// Like `cost_return_on_error!` but for a plain `Result`: nothing is added,
/// the early return carries the cost accumulated so far.
#[macro_export]
macro_rules! cost_return_on_error_no_add {
    ( &$cost:ident, $($body:tt)+ ) => {
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
