use thiserror::Error;

/// Alias for `core::result::Result<T, ImtError>`.
pub type Result<T> = core::result::Result<T, ImtError>;

/// Errors from incremental Merkle tree operations.
///
/// A proof that is well formed but does not match a root is not an error;
/// verification reports it as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImtError {
    /// The index does not address an existing leaf.
    #[error("index {index} is out of range (leaf count {leaf_count})")]
    IndexOutOfRange {
        /// Requested leaf index.
        index: usize,
        /// Leaf count at the time of the call.
        leaf_count: usize,
    },
    /// A fixed tree has no room for the requested leaves.
    #[error("tree is full (capacity {capacity}, count {count}, requested {requested})")]
    CapacityExceeded {
        /// `arity^depth`.
        capacity: usize,
        /// Leaves already stored.
        count: usize,
        /// Leaves the rejected call tried to add.
        requested: usize,
    },
    /// A lean tree already holds this leaf value.
    #[error("leaf value already present at index {index}")]
    DuplicateLeaf {
        /// Index of the colliding leaf. For a collision inside a batch this is
        /// the index the earlier batch member would have been given.
        index: usize,
    },
    /// The proof is structurally malformed for the tree or arity it is
    /// checked against.
    #[error("invalid proof shape: {0}")]
    InvalidProofShape(String),
    /// Construction parameters were rejected.
    #[error("invalid tree parameters: {0}")]
    InvalidParameters(String),
    /// A proof could not be encoded or decoded.
    #[error("proof encoding error: {0}")]
    Encoding(String),
}
