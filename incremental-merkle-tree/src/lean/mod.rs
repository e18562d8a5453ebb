//! Lean incremental Merkle tree: binary, no padding, dynamic depth.

#[cfg(test)]
mod tests;

use std::{collections::HashMap, hash::Hash};

use imt_costs::{CostResult, CostsExt, OperationCost};
use tracing::{debug, trace};

use crate::{
    HashFunction, ImtError, LeanProof, LeanProofStep, NodeSide, Result, hash::hash_counted,
    levels::Levels,
};

/// `ceil(log2(n))`, with 0 for `n <= 1`.
fn ceil_log2(n: usize) -> usize {
    if n <= 1 {
        0
    } else {
        (usize::BITS - (n - 1).leading_zeros()) as usize
    }
}

/// A binary Merkle tree of unique leaves whose depth is
/// `ceil(log2(leaf count))`.
///
/// A node with no right sibling is carried to its parent level unchanged,
/// so there are no zero values and no hashing of padding. An empty tree has
/// no root.
#[derive(Debug, Clone)]
pub struct LeanImt<N, H> {
    hasher: H,
    levels: Levels<N>,
    /// Leaf value to leaf index.
    indices: HashMap<N, usize>,
}

impl<N, H> LeanImt<N, H>
where
    N: Clone + Eq + Hash,
    H: HashFunction<N>,
{
    pub fn new(hasher: H) -> Self {
        LeanImt {
            hasher,
            levels: Levels::new(0),
            indices: HashMap::new(),
        }
    }

    /// Tree holding `leaves`, built with one batch insertion.
    pub fn with_leaves(hasher: H, leaves: Vec<N>) -> CostResult<Self, ImtError> {
        let mut tree = Self::new(hasher);
        let inserted = tree.insert_many(leaves);
        inserted.map_ok(|()| tree)
    }

    /// Number of hashing levels above the leaves.
    pub fn depth(&self) -> usize {
        self.levels.depth()
    }

    pub fn size(&self) -> usize {
        self.levels.leaves().len()
    }

    /// `None` while the tree is empty.
    pub fn root(&self) -> Option<&N> {
        if self.size() == 0 {
            return None;
        }
        self.levels.get(self.depth(), 0)
    }

    pub fn leaves(&self) -> &[N] {
        self.levels.leaves()
    }

    /// Stored nodes at `level` (0 = leaves, `depth` = root).
    pub fn nodes(&self, level: usize) -> &[N] {
        self.levels.level(level)
    }

    pub fn node(&self, level: usize, index: usize) -> Option<&N> {
        self.levels.get(level, index)
    }

    pub fn has(&self, leaf: &N) -> bool {
        self.indices.contains_key(leaf)
    }

    pub fn index_of(&self, leaf: &N) -> Option<usize> {
        self.indices.get(leaf).copied()
    }

    /// Append one leaf.
    ///
    /// Hashes once per level where the new node is a right child, at most
    /// `depth` times. Fails with [`ImtError::DuplicateLeaf`] if the value is
    /// already present.
    pub fn insert(&mut self, leaf: N) -> CostResult<(), ImtError> {
        let mut cost = OperationCost::default();
        if let Some(&index) = self.indices.get(&leaf) {
            debug!(index, "rejecting duplicate leaf");
            return Err(ImtError::DuplicateLeaf { index }).wrap_with_cost(cost);
        }

        let index = self.size();
        if ceil_log2(index + 1) > self.depth() {
            self.levels.push_level();
        }
        self.indices.insert(leaf.clone(), index);
        self.levels.set(0, index, leaf, &mut cost);
        self.rehash_path(index, &mut cost);
        Ok(()).wrap_with_cost(cost)
    }

    /// Append all of `leaves`, computing every new or changed parent once.
    ///
    /// Every leaf is checked for uniqueness, against the tree and within the
    /// batch, before anything is written. An empty batch is a no-op.
    pub fn insert_many(&mut self, leaves: Vec<N>) -> CostResult<(), ImtError> {
        let mut cost = OperationCost::default();
        if leaves.is_empty() {
            return Ok(()).wrap_with_cost(cost);
        }

        let size = self.size();
        {
            let mut batch: HashMap<&N, usize> = HashMap::with_capacity(leaves.len());
            for (offset, leaf) in leaves.iter().enumerate() {
                let existing = self
                    .indices
                    .get(leaf)
                    .copied()
                    .or_else(|| batch.get(leaf).map(|first| size + first));
                if let Some(index) = existing {
                    debug!(
                        index,
                        offset,
                        len = leaves.len(),
                        "rejecting batch with duplicate leaf"
                    );
                    return Err(ImtError::DuplicateLeaf { index }).wrap_with_cost(cost);
                }
                batch.insert(leaf, offset);
            }
        }

        trace!(start = size, len = leaves.len(), "inserting batch into lean tree");
        for (offset, leaf) in leaves.iter().enumerate() {
            self.indices.insert(leaf.clone(), size + offset);
        }
        self.levels.extend_leaves(leaves, &mut cost);

        let depth = ceil_log2(self.size());
        while self.depth() < depth {
            self.levels.push_level();
        }

        let mut first_parent = size >> 1;
        for level in 0..depth {
            let parents = self.levels.len(level).div_ceil(2);
            for parent in first_parent..parents {
                let node = self.parent_node(level, parent, &mut cost);
                self.levels.set(level + 1, parent, node, &mut cost);
            }
            first_parent >>= 1;
        }
        Ok(()).wrap_with_cost(cost)
    }

    /// Replace the leaf at `index`.
    ///
    /// Writing a value that another index already holds fails with
    /// [`ImtError::DuplicateLeaf`]; rewriting the same value in place is
    /// allowed.
    pub fn update(&mut self, index: usize, leaf: N) -> CostResult<(), ImtError> {
        let mut cost = OperationCost::default();
        let Some(old) = self.levels.leaves().get(index).cloned() else {
            return Err(ImtError::IndexOutOfRange {
                index,
                leaf_count: self.size(),
            })
            .wrap_with_cost(cost);
        };
        if let Some(&existing) = self.indices.get(&leaf) {
            if existing != index {
                debug!(index, existing, "rejecting update to a duplicate leaf");
                return Err(ImtError::DuplicateLeaf { index: existing }).wrap_with_cost(cost);
            }
        }

        self.indices.remove(&old);
        self.indices.insert(leaf.clone(), index);
        self.levels.set(0, index, leaf, &mut cost);
        self.rehash_path(index, &mut cost);
        Ok(()).wrap_with_cost(cost)
    }

    /// Authentication path of the leaf at `index` against the current root.
    pub fn generate_proof(&self, index: usize) -> Result<LeanProof<N>> {
        let (Some(root), Some(leaf)) = (self.root(), self.levels.leaves().get(index)) else {
            return Err(ImtError::IndexOutOfRange {
                index,
                leaf_count: self.size(),
            });
        };

        let mut path = Vec::with_capacity(self.depth());
        let mut current = index;
        for level in 0..self.depth() {
            let side = if current & 1 == 1 {
                NodeSide::Right
            } else {
                NodeSide::Left
            };
            path.push(LeanProofStep {
                sibling: self.levels.get(level, current ^ 1).cloned(),
                side,
            });
            current >>= 1;
        }

        Ok(LeanProof {
            root: root.clone(),
            leaf: leaf.clone(),
            leaf_index: index,
            path,
        })
    }

    /// Check `proof` against this tree's current root.
    pub fn verify_proof(&self, proof: &LeanProof<N>) -> CostResult<bool, ImtError> {
        let cost = OperationCost::default();
        if proof.path.len() != self.depth() {
            debug!(
                levels = proof.path.len(),
                depth = self.depth(),
                "rejecting lean proof of wrong depth"
            );
            return Err(ImtError::InvalidProofShape(format!(
                "proof has {} levels, tree depth is {}",
                proof.path.len(),
                self.depth()
            )))
            .wrap_with_cost(cost);
        }
        proof.compute_root(&self.hasher).map_ok(|computed| {
            let valid = self.root() == Some(&computed) && Some(&proof.root) == self.root();
            if !valid {
                debug!(
                    leaf_index = proof.leaf_index,
                    "lean proof does not match the current root"
                );
            }
            valid
        })
    }

    /// Recompute the parents above leaf `index`, up to the root.
    fn rehash_path(&mut self, index: usize, cost: &mut OperationCost) {
        let mut current = index;
        for level in 0..self.depth() {
            let parent = current >> 1;
            let node = self.parent_node(level, parent, cost);
            self.levels.set(level + 1, parent, node, cost);
            current = parent;
        }
    }

    /// Hash of both children of `parent`, or the lone left child unchanged.
    fn parent_node(&self, level: usize, parent: usize, cost: &mut OperationCost) -> N {
        match self.levels.present_children(level, parent) {
            [left] => left.clone(),
            children => hash_counted(&self.hasher, children, cost),
        }
    }
}
