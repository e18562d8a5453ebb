use std::hash::Hash;

use imt_costs::CostResult;

use crate::{FixedImt, FixedProof, HashFunction, ImtError, LeanImt, LeanProof, Result};

/// Operations both tree engines provide.
///
/// Engine-specific operations (fixed-tree growth and deletion, lean-tree
/// membership lookups) stay inherent.
pub trait IncrementalMerkleTree {
    /// Node and leaf type.
    type Node;
    /// Membership proof produced by [`IncrementalMerkleTree::generate_proof`].
    type Proof;

    fn leaf_count(&self) -> usize;

    fn depth(&self) -> usize;

    /// Current root, `None` only for an empty lean tree.
    fn root(&self) -> Option<&Self::Node>;

    fn leaves(&self) -> &[Self::Node];

    fn insert(&mut self, leaf: Self::Node) -> CostResult<(), ImtError>;

    fn insert_many(&mut self, leaves: Vec<Self::Node>) -> CostResult<(), ImtError>;

    fn update(&mut self, index: usize, leaf: Self::Node) -> CostResult<(), ImtError>;

    fn generate_proof(&self, index: usize) -> Result<Self::Proof>;

    /// Check a proof against the current root.
    fn verify_proof(&self, proof: &Self::Proof) -> CostResult<bool, ImtError>;
}

impl<N, H> IncrementalMerkleTree for FixedImt<N, H>
where
    N: Clone + PartialEq,
    H: HashFunction<N>,
{
    type Node = N;
    type Proof = FixedProof<N>;

    fn leaf_count(&self) -> usize {
        FixedImt::leaf_count(self)
    }

    fn depth(&self) -> usize {
        FixedImt::depth(self)
    }

    fn root(&self) -> Option<&N> {
        Some(FixedImt::root(self))
    }

    fn leaves(&self) -> &[N] {
        FixedImt::leaves(self)
    }

    fn insert(&mut self, leaf: N) -> CostResult<(), ImtError> {
        FixedImt::insert(self, leaf)
    }

    fn insert_many(&mut self, leaves: Vec<N>) -> CostResult<(), ImtError> {
        FixedImt::insert_many(self, leaves)
    }

    fn update(&mut self, index: usize, leaf: N) -> CostResult<(), ImtError> {
        FixedImt::update(self, index, leaf)
    }

    fn generate_proof(&self, index: usize) -> Result<FixedProof<N>> {
        self.create_proof(index)
    }

    fn verify_proof(&self, proof: &FixedProof<N>) -> CostResult<bool, ImtError> {
        FixedImt::verify_proof(self, proof)
    }
}

impl<N, H> IncrementalMerkleTree for LeanImt<N, H>
where
    N: Clone + Eq + Hash,
    H: HashFunction<N>,
{
    type Node = N;
    type Proof = LeanProof<N>;

    fn leaf_count(&self) -> usize {
        self.size()
    }

    fn depth(&self) -> usize {
        LeanImt::depth(self)
    }

    fn root(&self) -> Option<&N> {
        LeanImt::root(self)
    }

    fn leaves(&self) -> &[N] {
        LeanImt::leaves(self)
    }

    fn insert(&mut self, leaf: N) -> CostResult<(), ImtError> {
        LeanImt::insert(self, leaf)
    }

    fn insert_many(&mut self, leaves: Vec<N>) -> CostResult<(), ImtError> {
        LeanImt::insert_many(self, leaves)
    }

    fn update(&mut self, index: usize, leaf: N) -> CostResult<(), ImtError> {
        LeanImt::update(self, index, leaf)
    }

    fn generate_proof(&self, index: usize) -> Result<LeanProof<N>> {
        LeanImt::generate_proof(self, index)
    }

    fn verify_proof(&self, proof: &LeanProof<N>) -> CostResult<bool, ImtError> {
        LeanImt::verify_proof(self, proof)
    }
}
