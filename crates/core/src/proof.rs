//! Membership proofs and their verification.
//!
//! A verifier needs only the transaction, the proof and the block root; it
//! never sees the tree the proof was extracted from.

use crate::hash::{hash_pair, Digest};
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};

/// Sibling digests from a leaf up to (not including) the root.
///
/// Index 0 is the deepest sibling. Serializes as a plain array of hex strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerkleProof {
    siblings: Vec<Digest>,
}

impl MerkleProof {
    pub fn new(siblings: Vec<Digest>) -> Self {
        Self { siblings }
    }

    pub fn siblings(&self) -> &[Digest] {
        &self.siblings
    }

    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Digest> {
        self.siblings.iter()
    }

    pub fn into_inner(self) -> Vec<Digest> {
        self.siblings
    }

    /// Fold the proof over a leaf digest, returning the root it implies.
    pub fn compute_root(&self, leaf: Digest) -> Digest {
        self.siblings
            .iter()
            .fold(leaf, |current, sibling| hash_pair(&current, sibling))
    }
}

impl From<Vec<Digest>> for MerkleProof {
    fn from(siblings: Vec<Digest>) -> Self {
        Self::new(siblings)
    }
}

impl<'a> IntoIterator for &'a MerkleProof {
    type Item = &'a Digest;
    type IntoIter = std::slice::Iter<'a, Digest>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Check that `tx` belongs to the block whose Merkle root is `root`.
///
/// A mismatch is a normal `false`, never an error.
pub fn verify_transaction(tx: &Transaction, proof: &MerkleProof, root: &Digest) -> bool {
    proof.compute_root(tx.hash()) == *root
}
