use crate::{ImtError, Result};

/// Deepest fixed tree that can be built.
pub const MAX_DEPTH: usize = 32;

/// Arity used by [`FixedImtConfig::new`].
pub const DEFAULT_ARITY: usize = 2;

/// Construction parameters of a [`FixedImt`](super::FixedImt).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedImtConfig<N> {
    /// Number of hashing levels between the leaves and the root.
    pub depth: usize,
    /// Children per internal node.
    pub arity: usize,
    /// Value padding every unused leaf slot.
    pub zero: N,
}

impl<N> FixedImtConfig<N> {
    /// Binary tree of the given depth.
    pub fn new(depth: usize, zero: N) -> Self {
        FixedImtConfig {
            depth,
            arity: DEFAULT_ARITY,
            zero,
        }
    }

    pub fn with_arity(mut self, arity: usize) -> Self {
        self.arity = arity;
        self
    }

    /// Check the parameters and return the leaf capacity `arity^depth`.
    pub fn validate(&self) -> Result<usize> {
        if self.arity < 2 {
            return Err(ImtError::InvalidParameters(format!(
                "arity must be at least 2, got {}",
                self.arity
            )));
        }
        if self.depth > MAX_DEPTH {
            return Err(ImtError::InvalidParameters(format!(
                "depth {} exceeds the maximum of {}",
                self.depth, MAX_DEPTH
            )));
        }
        u32::try_from(self.depth)
            .ok()
            .and_then(|depth| self.arity.checked_pow(depth))
            .ok_or_else(|| {
                ImtError::InvalidParameters(format!(
                    "capacity {}^{} does not fit in usize",
                    self.arity, self.depth
                ))
            })
    }

    /// The same parameters one level deeper.
    pub fn deeper(&self) -> Self
    where
        N: Clone,
    {
        FixedImtConfig {
            depth: self.depth + 1,
            arity: self.arity,
            zero: self.zero.clone(),
        }
    }
}
