//! Per-depth node storage shared by both tree engines.

use std::borrow::Cow;

use imt_costs::OperationCost;

/// Node hashes of every depth of a tree, leaves at depth 0.
///
/// A level only ever grows by appending at its end or is overwritten in
/// place, so `level(0)` is always the leaf sequence in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Levels<N> {
    nodes: Vec<Vec<N>>,
}

impl<N: Clone> Levels<N> {
    /// Empty storage with levels `0..=depth`.
    pub(crate) fn new(depth: usize) -> Self {
        Levels {
            nodes: (0..=depth).map(|_| Vec::new()).collect(),
        }
    }

    /// Index of the top level.
    pub(crate) fn depth(&self) -> usize {
        self.nodes.len() - 1
    }

    pub(crate) fn push_level(&mut self) {
        self.nodes.push(Vec::new());
    }

    /// Nodes stored at `level`; empty above the top level.
    pub(crate) fn level(&self, level: usize) -> &[N] {
        self.nodes.get(level).map_or(&[], Vec::as_slice)
    }

    pub(crate) fn leaves(&self) -> &[N] {
        self.level(0)
    }

    pub(crate) fn get(&self, level: usize, index: usize) -> Option<&N> {
        self.nodes.get(level).and_then(|nodes| nodes.get(index))
    }

    pub(crate) fn len(&self, level: usize) -> usize {
        self.level(level).len()
    }

    /// Write `node` at `(level, index)`. `index` may be at most the level's
    /// current length, in which case the node is appended.
    pub(crate) fn set(&mut self, level: usize, index: usize, node: N, cost: &mut OperationCost) {
        let nodes = &mut self.nodes[level];
        debug_assert!(
            index <= nodes.len(),
            "write at {index} leaves a gap in level {level} of length {}",
            nodes.len()
        );
        if index < nodes.len() {
            nodes[index] = node;
        } else {
            nodes.push(node);
        }
        cost.node_writes += 1;
    }

    /// Append `leaves` to level 0.
    pub(crate) fn extend_leaves(&mut self, leaves: Vec<N>, cost: &mut OperationCost) {
        cost.node_writes += leaves.len() as u32;
        self.nodes[0].extend(leaves);
    }

    /// The `arity` children of `parent` at `level`. Slots past the end of the
    /// level are filled with `pad`; a full group is borrowed as is.
    pub(crate) fn padded_children(
        &self,
        level: usize,
        parent: usize,
        arity: usize,
        pad: &N,
    ) -> Cow<'_, [N]> {
        let nodes = self.level(level);
        let start = parent * arity;
        let end = start + arity;
        if end <= nodes.len() {
            return Cow::Borrowed(&nodes[start..end]);
        }
        let mut children = Vec::with_capacity(arity);
        children.extend_from_slice(&nodes[start.min(nodes.len())..]);
        children.resize(arity, pad.clone());
        Cow::Owned(children)
    }

    /// The one or two stored children of binary `parent` at `level`.
    pub(crate) fn present_children(&self, level: usize, parent: usize) -> &[N] {
        let nodes = self.level(level);
        let start = (parent * 2).min(nodes.len());
        let end = (start + 2).min(nodes.len());
        &nodes[start..end]
    }
}
