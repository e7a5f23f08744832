//! Hash algorithm selection for ECDSA message digestion.
//!
//! A [HashAlgorithm] is a plain descriptor, like a [crate::curve::Curve]:
//! naming one does not guarantee a backend can digest with it. The bundled
//! [Digester] serves the SHA-1 and SHA-2 families; descriptors it does not
//! recognize drive the unsupported-algorithm path in signer and verifier
//! construction.

use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use std::fmt;

/// Identity of a message digest algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashAlgorithm {
    /// Lowercase algorithm name, e.g. `"sha256"`.
    pub name: &'static str,
    /// Digest output length in bytes.
    pub digest_size: usize,
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

pub const SHA1: HashAlgorithm = HashAlgorithm {
    name: "sha1",
    digest_size: 20,
};
pub const SHA224: HashAlgorithm = HashAlgorithm {
    name: "sha224",
    digest_size: 28,
};
pub const SHA256: HashAlgorithm = HashAlgorithm {
    name: "sha256",
    digest_size: 32,
};
pub const SHA384: HashAlgorithm = HashAlgorithm {
    name: "sha384",
    digest_size: 48,
};
pub const SHA512: HashAlgorithm = HashAlgorithm {
    name: "sha512",
    digest_size: 64,
};

/// Streaming digest over accumulated message bytes.
///
/// Multiplexes the supported algorithms behind one update/finalize surface
/// so signers and verifiers can hash incrementally regardless of the hash
/// the caller selected.
pub enum Digester {
    Sha1(Sha1),
    Sha224(Sha224),
    Sha256(Sha256),
    Sha384(Sha384),
    Sha512(Sha512),
}

impl Digester {
    /// Returns a digester for `algorithm`, or `None` when the algorithm is
    /// not recognized.
    pub fn new(algorithm: &HashAlgorithm) -> Option<Self> {
        match algorithm.name {
            "sha1" => Some(Self::Sha1(Sha1::new())),
            "sha224" => Some(Self::Sha224(Sha224::new())),
            "sha256" => Some(Self::Sha256(Sha256::new())),
            "sha384" => Some(Self::Sha384(Sha384::new())),
            "sha512" => Some(Self::Sha512(Sha512::new())),
            _ => None,
        }
    }

    /// Whether `algorithm` can be digested.
    pub fn supported(algorithm: &HashAlgorithm) -> bool {
        matches!(
            algorithm.name,
            "sha1" | "sha224" | "sha256" | "sha384" | "sha512"
        )
    }

    /// Append message bytes.
    pub fn update(&mut self, data: &[u8]) {
        match self {
            Self::Sha1(digest) => digest.update(data),
            Self::Sha224(digest) => digest.update(data),
            Self::Sha256(digest) => digest.update(data),
            Self::Sha384(digest) => digest.update(data),
            Self::Sha512(digest) => digest.update(data),
        }
    }

    /// Hash all recorded bytes.
    pub fn finalize(self) -> Vec<u8> {
        match self {
            Self::Sha1(digest) => digest.finalize().to_vec(),
            Self::Sha224(digest) => digest.finalize().to_vec(),
            Self::Sha256(digest) => digest.finalize().to_vec(),
            Self::Sha384(digest) => digest.finalize().to_vec(),
            Self::Sha512(digest) => digest.finalize().to_vec(),
        }
    }
}
