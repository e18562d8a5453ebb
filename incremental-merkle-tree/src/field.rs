//! BN254 scalar field elements and a Blake3-based hash over them.

use std::{fmt, sync::LazyLock};

use bincode::{Decode, Encode, de::Decoder, error::DecodeError};
use num_bigint::BigUint;

use crate::HashFunction;

/// Big-endian hex of the BN254 scalar field modulus `r`.
pub const MODULUS_HEX: &str = "30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001";

const MODULUS_BYTES: [u8; 32] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x28, 0x33, 0xe8, 0x48, 0x79, 0xb9, 0x70, 0x91, 0x43, 0xe1, 0xf5, 0x93, 0xf0, 0x00, 0x00, 0x01,
];

static MODULUS: LazyLock<BigUint> = LazyLock::new(|| BigUint::from_bytes_be(&MODULUS_BYTES));

/// Prefix byte of every node hash preimage.
const NODE_DOMAIN_TAG: u8 = 0x01;

/// An element of the BN254 scalar field, stored as 32 canonical big-endian
/// bytes (always strictly below the modulus).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Encode)]
pub struct FieldElement([u8; 32]);

impl FieldElement {
    /// The additive identity, the usual zero value of a tree.
    pub const ZERO: FieldElement = FieldElement([0u8; 32]);

    /// Wrap `bytes` if they encode a value below the modulus.
    pub fn from_canonical_bytes(bytes: [u8; 32]) -> Option<Self> {
        // Lexicographic order on big-endian arrays is numeric order.
        (bytes < MODULUS_BYTES).then_some(FieldElement(bytes))
    }

    /// Interpret `bytes` as a big-endian integer and reduce it modulo `r`.
    pub fn from_be_bytes_mod_order(bytes: &[u8]) -> Self {
        Self::from_biguint(&BigUint::from_bytes_be(bytes))
    }

    /// Reduce `value` modulo `r`.
    pub fn from_biguint(value: &BigUint) -> Self {
        let reduced = value % &*MODULUS;
        let digits = reduced.to_bytes_be();
        let mut bytes = [0u8; 32];
        bytes[32 - digits.len()..].copy_from_slice(&digits);
        FieldElement(bytes)
    }

    /// The element as an unsigned integer.
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.0)
    }

    /// Canonical big-endian bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// `true` for the additive identity.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&value.to_be_bytes());
        FieldElement(bytes)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_biguint())
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement(0x{})", hex::encode(self.0))
    }
}

impl<Context> Decode<Context> for FieldElement {
    fn decode<D: Decoder<Context = Context>>(decoder: &mut D) -> Result<Self, DecodeError> {
        let bytes = <[u8; 32]>::decode(decoder)?;
        FieldElement::from_canonical_bytes(bytes).ok_or_else(|| {
            DecodeError::OtherString(format!(
                "field element 0x{} is not below the modulus",
                hex::encode(bytes)
            ))
        })
    }
}

bincode::impl_borrow_decode!(FieldElement);

/// Hashes field elements with Blake3 and reduces the digest modulo `r`.
///
/// The preimage is a domain tag, the input count as a big-endian `u32`, then
/// every input's canonical bytes, so inputs of different arity never collide
/// structurally.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3FieldHasher;

impl HashFunction<FieldElement> for Blake3FieldHasher {
    fn hash(&self, inputs: &[FieldElement]) -> FieldElement {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&[NODE_DOMAIN_TAG]);
        hasher.update(&(inputs.len() as u32).to_be_bytes());
        for input in inputs {
            hasher.update(input.as_bytes());
        }
        FieldElement::from_be_bytes_mod_order(hasher.finalize().as_bytes())
    }
}
