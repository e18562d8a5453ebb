use imt_costs::OperationCost;

/// A deterministic, side-effect-free hash of an ordered sequence of nodes
/// into one node.
///
/// Trees call it with the children of one parent, in position order. Any
/// `Fn(&[N]) -> N` closure is a `HashFunction<N>`.
pub trait HashFunction<N> {
    /// Hash `inputs` into a single node.
    fn hash(&self, inputs: &[N]) -> N;
}

impl<N, F> HashFunction<N> for F
where
    F: Fn(&[N]) -> N,
{
    fn hash(&self, inputs: &[N]) -> N {
        self(inputs)
    }
}

/// Hash `inputs`, counting the call in `cost`.
pub(crate) fn hash_counted<N, H: HashFunction<N>>(
    hasher: &H,
    inputs: &[N],
    cost: &mut OperationCost,
) -> N {
    cost.hash_node_calls += 1;
    hasher.hash(inputs)
}
