//! SHA-256 hashing utilities for transactions and Merkle nodes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest as _, Sha256};
use std::fmt;
use std::str::FromStr;

/// Payload hashed to produce the padding leaves of a Merkle tree.
pub const DUMMY_PAYLOAD: &[u8] = b"DUMMY";

/// A SHA-256 digest.
///
/// The canonical text form is 64 lowercase hex characters. That text is what
/// gets hashed when two digests are combined, and what a proof carries on the
/// wire.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Digest(pub [u8; 32]);

impl Digest {
    /// Convert to a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut arr = [0u8; 32];
        hex::decode_to_slice(s, &mut arr)?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", &self.to_hex()[..8])
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Digest {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Digest::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Hash arbitrary data using SHA-256.
pub fn hash(data: &[u8]) -> Digest {
    Digest(Sha256::digest(data).into())
}

/// Combine two digests into their parent digest.
///
/// Each side is hashed independently from its hex text and the two results are
/// XORed byte by byte. This is not a hash of the concatenation, and the order
/// of the arguments does not change the result.
pub fn hash_pair(left: &Digest, right: &Digest) -> Digest {
    let l = hash(left.to_hex().as_bytes());
    let r = hash(right.to_hex().as_bytes());

    let mut out = [0u8; 32];
    for (byte, (a, b)) in out.iter_mut().zip(l.0.iter().zip(r.0.iter())) {
        *byte = a ^ b;
    }
    Digest(out)
}

/// The leaf digest used to pad a tree up to a power-of-two leaf count.
pub fn dummy_leaf() -> Digest {
    hash(DUMMY_PAYLOAD)
}
