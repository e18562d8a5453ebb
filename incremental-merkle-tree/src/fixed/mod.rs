//! Fixed-depth, fixed-arity incremental Merkle tree with zero padding.

mod config;

pub use config::{DEFAULT_ARITY, FixedImtConfig, MAX_DEPTH};
use imt_costs::{CostResult, CostsExt, OperationCost, cost_return_on_error_no_add};
use tracing::{debug, trace};

use crate::{
    FixedProof, FixedProofLevel, HashFunction, ImtError, Result, hash::hash_counted,
    levels::Levels,
};

/// An arity-k Merkle tree of fixed depth D holding up to `k^D` leaves.
///
/// Leaves are appended left to right. Every slot never written is treated as
/// the configured zero value, so an internal node always hashes exactly `k`
/// children. Only the nodes on paths of real leaves are stored; missing
/// subtrees are represented by the precomputed zero chain.
///
/// The depth never changes in place. [`FixedImt::grow`] rebuilds the same
/// leaves into a tree one level deeper.
#[derive(Debug, Clone)]
pub struct FixedImt<N, H> {
    hasher: H,
    config: FixedImtConfig<N>,
    capacity: usize,
    /// `zeroes[l]` is the root of an empty subtree of height `l`.
    zeroes: Vec<N>,
    levels: Levels<N>,
    root: N,
}

impl<N, H> FixedImt<N, H>
where
    N: Clone + PartialEq,
    H: HashFunction<N>,
{
    /// Empty tree. Its root is the zero chain's value at `depth`.
    pub fn new(hasher: H, config: FixedImtConfig<N>) -> CostResult<Self, ImtError> {
        Self::with_leaves(hasher, config, Vec::new())
    }

    /// Tree holding `leaves`, built bottom-up in one pass.
    pub fn with_leaves(
        hasher: H,
        config: FixedImtConfig<N>,
        leaves: Vec<N>,
    ) -> CostResult<Self, ImtError> {
        let mut cost = OperationCost::default();
        let capacity = cost_return_on_error_no_add!(&cost, config.validate());
        if leaves.len() > capacity {
            return Err(ImtError::CapacityExceeded {
                capacity,
                count: 0,
                requested: leaves.len(),
            })
            .wrap_with_cost(cost);
        }

        let mut zeroes = Vec::with_capacity(config.depth + 1);
        zeroes.push(config.zero.clone());
        for level in 0..config.depth {
            let children = vec![zeroes[level].clone(); config.arity];
            zeroes.push(hash_counted(&hasher, &children, &mut cost));
        }

        let mut levels = Levels::new(config.depth);
        levels.extend_leaves(leaves, &mut cost);
        let mut tree = FixedImt {
            root: zeroes[config.depth].clone(),
            hasher,
            config,
            capacity,
            zeroes,
            levels,
        };
        tree.rehash_from(0, &mut cost);
        Ok(tree).wrap_with_cost(cost)
    }

    pub fn depth(&self) -> usize {
        self.config.depth
    }

    pub fn arity(&self) -> usize {
        self.config.arity
    }

    /// Maximum number of leaves, `arity^depth`.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn zero_value(&self) -> &N {
        &self.config.zero
    }

    pub fn config(&self) -> &FixedImtConfig<N> {
        &self.config
    }

    /// Empty-subtree roots by height, `zeroes()[0]` being the zero value.
    pub fn zeroes(&self) -> &[N] {
        &self.zeroes
    }

    pub fn root(&self) -> &N {
        &self.root
    }

    pub fn leaf_count(&self) -> usize {
        self.levels.leaves().len()
    }

    /// Leaves in insertion order, deleted ones reading as the zero value.
    pub fn leaves(&self) -> &[N] {
        self.levels.leaves()
    }

    /// Stored nodes at `level` (0 = leaves, `depth` = root).
    pub fn nodes(&self, level: usize) -> &[N] {
        self.levels.level(level)
    }

    /// Node at `(level, index)`. Unstored positions inside the tree read as
    /// the zero chain value for that level; positions outside it are `None`.
    pub fn node(&self, level: usize, index: usize) -> Option<&N> {
        if level > self.depth() || index >= self.capacity / self.arity().pow(level as u32) {
            return None;
        }
        self.levels.get(level, index).or(Some(&self.zeroes[level]))
    }

    /// Index of the first leaf equal to `leaf`.
    pub fn index_of(&self, leaf: &N) -> Option<usize> {
        self.levels.leaves().iter().position(|candidate| candidate == leaf)
    }

    /// Append one leaf, rehashing its path to the root.
    ///
    /// Costs exactly `depth` hash invocations.
    pub fn insert(&mut self, leaf: N) -> CostResult<(), ImtError> {
        let cost = OperationCost::default();
        let count = self.leaf_count();
        if count >= self.capacity {
            return Err(ImtError::CapacityExceeded {
                capacity: self.capacity,
                count,
                requested: 1,
            })
            .wrap_with_cost(cost);
        }
        self.write_leaf(count, leaf)
    }

    /// Append all of `leaves`, recomputing every affected parent once.
    ///
    /// The batch is rejected as a whole when it does not fit; the tree is
    /// then left untouched. An empty batch is a no-op.
    pub fn insert_many(&mut self, leaves: Vec<N>) -> CostResult<(), ImtError> {
        let mut cost = OperationCost::default();
        if leaves.is_empty() {
            return Ok(()).wrap_with_cost(cost);
        }
        let count = self.leaf_count();
        if leaves.len() > self.capacity - count {
            debug!(
                count,
                requested = leaves.len(),
                capacity = self.capacity,
                "rejecting batch that overflows fixed tree"
            );
            return Err(ImtError::CapacityExceeded {
                capacity: self.capacity,
                count,
                requested: leaves.len(),
            })
            .wrap_with_cost(cost);
        }
        trace!(start = count, len = leaves.len(), "inserting batch into fixed tree");
        self.levels.extend_leaves(leaves, &mut cost);
        self.rehash_from(count, &mut cost);
        Ok(()).wrap_with_cost(cost)
    }

    /// Replace the leaf at `index`. The leaf count does not change.
    pub fn update(&mut self, index: usize, leaf: N) -> CostResult<(), ImtError> {
        let cost = OperationCost::default();
        let count = self.leaf_count();
        if index >= count {
            return Err(ImtError::IndexOutOfRange {
                index,
                leaf_count: count,
            })
            .wrap_with_cost(cost);
        }
        self.write_leaf(index, leaf)
    }

    /// Overwrite the leaf at `index` with the zero value. The slot stays
    /// occupied, so the leaf count does not change.
    pub fn delete(&mut self, index: usize) -> CostResult<(), ImtError> {
        self.update(index, self.config.zero.clone())
    }

    /// Authentication path of the leaf at `index` against the current root.
    pub fn create_proof(&self, index: usize) -> Result<FixedProof<N>> {
        let count = self.leaf_count();
        let Some(leaf) = self.levels.leaves().get(index) else {
            return Err(ImtError::IndexOutOfRange {
                index,
                leaf_count: count,
            });
        };

        let arity = self.arity();
        let mut path = Vec::with_capacity(self.depth());
        let mut current = index;
        for level in 0..self.depth() {
            let position = current % arity;
            let start = current - position;
            let siblings = (start..start + arity)
                .filter(|&i| i != current)
                .map(|i| {
                    self.levels
                        .get(level, i)
                        .unwrap_or(&self.zeroes[level])
                        .clone()
                })
                .collect();
            path.push(FixedProofLevel { siblings, position });
            current /= arity;
        }

        Ok(FixedProof {
            root: self.root.clone(),
            leaf: leaf.clone(),
            leaf_index: index,
            path,
        })
    }

    /// Check `proof` against this tree's current root.
    ///
    /// A proof generated before a later mutation no longer verifies here, even
    /// though it still verifies standalone against its own recorded root.
    pub fn verify_proof(&self, proof: &FixedProof<N>) -> CostResult<bool, ImtError> {
        let cost = OperationCost::default();
        if proof.path.len() != self.depth() {
            debug!(
                levels = proof.path.len(),
                depth = self.depth(),
                "rejecting fixed proof of wrong depth"
            );
            return Err(ImtError::InvalidProofShape(format!(
                "proof has {} levels, tree depth is {}",
                proof.path.len(),
                self.depth()
            )))
            .wrap_with_cost(cost);
        }
        proof
            .compute_root(&self.hasher, self.arity())
            .map_ok(|computed| {
                let valid = computed == self.root && proof.root == self.root;
                if !valid {
                    debug!(
                        leaf_index = proof.leaf_index,
                        "fixed proof does not match the current root"
                    );
                }
                valid
            })
    }

    /// Rebuild the current leaves into a new tree one level deeper.
    ///
    /// The old root reappears as the leftmost node just below the new root,
    /// since every added subtree is zero padding.
    pub fn grow(&self) -> CostResult<Self, ImtError>
    where
        H: Clone,
    {
        let config = self.config.deeper();
        debug!(
            from_depth = self.depth(),
            to_depth = config.depth,
            leaves = self.leaf_count(),
            "rebuilding fixed tree one level deeper"
        );
        Self::with_leaves(self.hasher.clone(), config, self.levels.leaves().to_vec())
    }

    /// Store `leaf` at `index` and rehash its path.
    fn write_leaf(&mut self, index: usize, leaf: N) -> CostResult<(), ImtError> {
        let mut cost = OperationCost::default();
        let arity = self.arity();
        self.levels.set(0, index, leaf, &mut cost);
        let mut current = index;
        for level in 0..self.depth() {
            let parent = current / arity;
            let node = self.parent_node(level, parent, &mut cost);
            self.levels.set(level + 1, parent, node, &mut cost);
            current = parent;
        }
        self.refresh_root();
        Ok(()).wrap_with_cost(cost)
    }

    /// Recompute every parent from leaf `start` rightwards, level by level.
    fn rehash_from(&mut self, start: usize, cost: &mut OperationCost) {
        let arity = self.arity();
        let mut first = start;
        for level in 0..self.depth() {
            let first_parent = first / arity;
            let parents = self.levels.len(level).div_ceil(arity);
            for parent in first_parent..parents {
                let node = self.parent_node(level, parent, cost);
                self.levels.set(level + 1, parent, node, cost);
            }
            first = first_parent;
        }
        self.refresh_root();
    }

    fn parent_node(&self, level: usize, parent: usize, cost: &mut OperationCost) -> N {
        let children =
            self.levels
                .padded_children(level, parent, self.arity(), &self.zeroes[level]);
        hash_counted(&self.hasher, &children, cost)
    }

    fn refresh_root(&mut self) {
        let depth = self.depth();
        self.root = self
            .levels
            .get(depth, 0)
            .unwrap_or(&self.zeroes[depth])
            .clone();
    }
}
