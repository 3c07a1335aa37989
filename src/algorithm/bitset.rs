use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset of adjacency condition indices
///
/// Bit `i` set means condition `i` of the model is still a candidate.
/// Iteration follows model order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateSet {
    bits: BitVec,
}

impl CandidateSet {
    /// Create a set with no candidates
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
        }
    }

    /// Create a set containing every condition index
    pub fn all(capacity: usize) -> Self {
        Self {
            bits: bitvec![1; capacity],
        }
    }

    /// Number of condition indices the set can hold
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a condition index, ignoring out-of-range values
    pub fn insert(&mut self, index: usize) {
        if index < self.bits.len() {
            self.bits.set(index, true);
        }
    }

    /// Test membership
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Keep only the indices for which `keep` returns true
    ///
    /// Builds the result separately so the predicate never observes a
    /// partially filtered set.
    #[must_use]
    pub fn filtered<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(usize) -> bool,
    {
        let mut result = Self::new(self.capacity());
        for index in self.bits.iter_ones() {
            if keep(index) {
                result.insert(index);
            }
        }
        result
    }

    /// Remove every index
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Test if no candidates are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count candidates in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate candidate indices in model order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all candidate indices as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CandidateSet({} candidates: {:?})",
            self.count(),
            self.to_vec()
        )
    }
}
