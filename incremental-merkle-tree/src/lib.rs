//! Incremental Merkle trees over a pluggable field hash.
//!
//! Two independent engines share one capability contract
//! ([`IncrementalMerkleTree`]):
//!
//! - [`FixedImt`]: arity-k tree of fixed depth. Unused leaf slots are
//!   padded with a zero value, so every internal node always hashes exactly
//!   `k` children. Growing past `k^depth` leaves means rebuilding one level
//!   deeper with [`FixedImt::grow`].
//! - [`LeanImt`]: binary tree whose depth is `ceil(log2(leaf count))`.
//!   There is no padding: a node without a sibling is promoted to its parent
//!   unchanged, without hashing. Leaf values are unique.
//!
//! Node hashes live in per-depth sequences, leaves at depth 0. Every
//! operation that hashes returns a [`CostResult`] so callers can see how
//! many hash invocations and node writes it took.
//!
//! Proofs ([`FixedProof`], [`LeanProof`]) are value snapshots of an
//! authentication path; they verify standalone against the root they were
//! generated for, or against a tree's current root through the tree.

#![warn(missing_docs)]

mod error;
mod field;
mod fixed;
mod hash;
mod lean;
pub(crate) mod levels;
mod proof;
mod tree;


pub use error::{ImtError, Result};
pub use field::{Blake3FieldHasher, FieldElement, MODULUS_HEX};
pub use fixed::{DEFAULT_ARITY, FixedImt, FixedImtConfig, MAX_DEPTH};
pub use hash::HashFunction;
pub use imt_costs::{CostContext, CostResult, CostsExt, OperationCost};
pub use lean::LeanImt;
pub use proof::{FixedProof, FixedProofLevel, LeanProof, LeanProofStep, NodeSide};
pub use tree::IncrementalMerkleTree;
