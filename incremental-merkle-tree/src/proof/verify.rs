use imt_costs::{CostResult, CostsExt, OperationCost};

use super::{FixedProof, LeanProof, NodeSide};
use crate::{HashFunction, ImtError, hash::hash_counted};

impl<N: Clone + PartialEq> FixedProof<N> {
    /// Fold the leaf up the path, returning the root it implies.
    ///
    /// Fails with [`ImtError::InvalidProofShape`] when a level does not have
    /// `arity - 1` siblings, or its position disagrees with `leaf_index`.
    pub fn compute_root<H: HashFunction<N>>(
        &self,
        hasher: &H,
        arity: usize,
    ) -> CostResult<N, ImtError> {
        let mut cost = OperationCost::default();
        if arity < 2 {
            return Err(ImtError::InvalidProofShape(format!("arity {} is below 2", arity)))
                .wrap_with_cost(cost);
        }

        let mut node = self.leaf.clone();
        let mut index = self.leaf_index;
        for (level, step) in self.path.iter().enumerate() {
            if step.siblings.len() != arity - 1 {
                return Err(ImtError::InvalidProofShape(format!(
                    "level {} has {} siblings, arity {} needs {}",
                    level,
                    step.siblings.len(),
                    arity,
                    arity - 1
                )))
                .wrap_with_cost(cost);
            }
            if step.position != index % arity {
                return Err(ImtError::InvalidProofShape(format!(
                    "level {} position {} disagrees with leaf index {}",
                    level, step.position, self.leaf_index
                )))
                .wrap_with_cost(cost);
            }

            let mut children = Vec::with_capacity(arity);
            children.extend_from_slice(&step.siblings[..step.position]);
            children.push(node);
            children.extend_from_slice(&step.siblings[step.position..]);
            node = hash_counted(hasher, &children, &mut cost);
            index /= arity;
        }

        if index != 0 {
            return Err(ImtError::InvalidProofShape(format!(
                "leaf index {} does not fit in {} levels",
                self.leaf_index,
                self.path.len()
            )))
            .wrap_with_cost(cost);
        }
        Ok(node).wrap_with_cost(cost)
    }

    /// `true` when the path leads from `leaf` to the recorded `root`.
    pub fn verify<H: HashFunction<N>>(
        &self,
        hasher: &H,
        arity: usize,
    ) -> CostResult<bool, ImtError> {
        self.compute_root(hasher, arity)
            .map_ok(|computed| computed == self.root)
    }
}

impl<N: Clone + PartialEq> LeanProof<N> {
    /// Fold the leaf up the path, returning the root it implies.
    ///
    /// Fails with [`ImtError::InvalidProofShape`] when a step's side disagrees
    /// with `leaf_index`, or a right-side step has no sibling.
    pub fn compute_root<H: HashFunction<N>>(&self, hasher: &H) -> CostResult<N, ImtError> {
        let mut cost = OperationCost::default();
        let mut node = self.leaf.clone();
        let mut index = self.leaf_index;
        for (level, step) in self.path.iter().enumerate() {
            let expected = if index & 1 == 1 {
                NodeSide::Right
            } else {
                NodeSide::Left
            };
            if step.side != expected {
                return Err(ImtError::InvalidProofShape(format!(
                    "level {} claims side {:?}, leaf index {} implies {:?}",
                    level, step.side, self.leaf_index, expected
                )))
                .wrap_with_cost(cost);
            }

            node = match (&step.sibling, step.side) {
                (Some(sibling), NodeSide::Left) => {
                    hash_counted(hasher, &[node, sibling.clone()], &mut cost)
                }
                (Some(sibling), NodeSide::Right) => {
                    hash_counted(hasher, &[sibling.clone(), node], &mut cost)
                }
                (None, NodeSide::Left) => node,
                (None, NodeSide::Right) => {
                    return Err(ImtError::InvalidProofShape(format!(
                        "level {} is a right child without a left sibling",
                        level
                    )))
                    .wrap_with_cost(cost);
                }
            };
            index >>= 1;
        }

        if index != 0 {
            return Err(ImtError::InvalidProofShape(format!(
                "leaf index {} does not fit in {} levels",
                self.leaf_index,
                self.path.len()
            )))
            .wrap_with_cost(cost);
        }
        Ok(node).wrap_with_cost(cost)
    }

    /// `true` when the path leads from `leaf` to the recorded `root`.
    pub fn verify<H: HashFunction<N>>(&self, hasher: &H) -> CostResult<bool, ImtError> {
        self.compute_root(hasher).map_ok(|computed| computed == self.root)
    }
}
