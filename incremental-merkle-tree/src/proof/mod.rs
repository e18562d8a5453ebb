//! Membership proofs for both tree engines.
//!
//! A proof is a snapshot: it records the root it was generated against, and
//! the standalone `verify` checks it against that root only. Trees check a
//! proof against their current root with `verify_proof`.

mod verify;


use bincode::{Decode, Encode};

use crate::{ImtError, Result};

/// Upper bound on the size of a proof accepted by the decoders.
const MAX_PROOF_BYTES: usize = 16 * 1024 * 1024;

/// Siblings of one path node in an arity-k tree.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct FixedProofLevel<N> {
    /// The other `arity - 1` children of the parent, in position order.
    pub siblings: Vec<N>,
    /// Where the path node sits among its parent's children.
    pub position: usize,
}

/// Authentication path of one leaf in a [`FixedImt`](crate::FixedImt).
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct FixedProof<N> {
    /// Root the proof was generated against.
    pub root: N,
    pub leaf: N,
    pub leaf_index: usize,
    /// One entry per level, leaves first.
    pub path: Vec<FixedProofLevel<N>>,
}

/// Side of its parent a path node is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub enum NodeSide {
    /// Even index; a present sibling hashes to its right.
    Left,
    /// Odd index; the sibling hashes to its left and always exists.
    Right,
}

/// One level of a [`LeanProof`].
///
/// `sibling` is `None` where the path node had no sibling and was promoted to
/// its parent without hashing.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct LeanProofStep<N> {
    pub sibling: Option<N>,
    pub side: NodeSide,
}

/// Authentication path of one leaf in a [`LeanImt`](crate::LeanImt).
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct LeanProof<N> {
    /// Root the proof was generated against.
    pub root: N,
    pub leaf: N,
    pub leaf_index: usize,
    /// One step per level, leaves first.
    pub path: Vec<LeanProofStep<N>>,
}

fn encode_proof<P: Encode>(proof: &P) -> Result<Vec<u8>> {
    let config = bincode::config::standard()
        .with_big_endian()
        .with_no_limit();
    bincode::encode_to_vec(proof, config)
        .map_err(|e| ImtError::Encoding(format!("failed to encode proof: {}", e)))
}

fn decode_proof<P: Decode<()>>(bytes: &[u8]) -> Result<P> {
    let config = bincode::config::standard()
        .with_big_endian()
        .with_limit::<MAX_PROOF_BYTES>();
    let (proof, read) = bincode::decode_from_slice(bytes, config)
        .map_err(|e| ImtError::Encoding(format!("failed to decode proof: {}", e)))?;
    if read != bytes.len() {
        return Err(ImtError::Encoding(format!(
            "{} trailing bytes after proof",
            bytes.len() - read
        )));
    }
    Ok(proof)
}

impl<N: Encode> FixedProof<N> {
    /// Serialize with bincode (big-endian, variable-length integers).
    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        encode_proof(self)
    }
}

impl<N: Decode<()>> FixedProof<N> {
    /// Inverse of [`FixedProof::encode_to_vec`]. Trailing bytes are an error.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self> {
        decode_proof(bytes)
    }
}

impl<N: Encode> LeanProof<N> {
    /// Serialize with bincode (big-endian, variable-length integers).
    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        encode_proof(self)
    }
}

impl<N: Decode<()>> LeanProof<N> {
    /// Inverse of [`LeanProof::encode_to_vec`]. Trailing bytes are an error.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self> {
        decode_proof(bytes)
    }
}
