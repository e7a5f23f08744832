//! Represent elliptic curve key material, negotiate curve and algorithm
//! support, and sign and verify ECDSA signatures over pluggable backends.
//!
//! Key material starts as raw numbers ([numbers::PublicNumbers] /
//! [numbers::PrivateNumbers]) bound to a named [curve::Curve] and is
//! materialized into usable key objects by a backend. Backends advertise
//! which curves and signature algorithms they can serve through
//! [EllipticCurveBackend]; requests outside that set fail closed with a
//! distinct error before any key material is touched. Signing and
//! verification are streaming: feed message bytes with `update` and finish
//! with `finalize`/`verify`. Signature bytes are the deterministic (r, s)
//! encoding from [ecdsa::encode_signature].
//!
//! Backends that predate capability queries implement [KeyLoader] directly
//! and keep working: number objects route materialization straight to them,
//! without probing and without any validation guarantee on the result.
//!
//! # Example
//! ```rust
//! use eckeys::{
//!     curve, hash, software::SoftwareBackend, Ecdsa, PrivateKey, PublicKey, Signer, Verifier,
//! };
//! use rand::rngs::OsRng;
//!
//! let backend = SoftwareBackend::new();
//! let key = eckeys::generate_private_key(&curve::SECP256R1, &backend, &mut OsRng).unwrap();
//!
//! // Sign a message
//! let mut signer = key.signer(Ecdsa::new(hash::SHA256)).unwrap();
//! signer.update(b"hello, world!");
//! let signature = signer.finalize().unwrap();
//!
//! // Verify the signature
//! let mut verifier = key
//!     .public_key()
//!     .verifier(&signature, Ecdsa::new(hash::SHA256))
//!     .unwrap();
//! verifier.update(b"hello, world!");
//! verifier.verify().unwrap();
//! ```

pub mod curve;
pub mod ecdsa;
mod error;
pub mod hash;
pub mod numbers;
pub mod software;

pub use ecdsa::{decode_signature, encode_signature, Ecdsa};
pub use error::Error;

use curve::Curve;
use numbers::{PrivateNumbers, PublicNumbers};
use rand::{CryptoRng, Rng};

/// Accumulates a message and produces an ECDSA signature over its digest.
///
/// Single-use: finalizing consumes the signer, so a context cannot be
/// updated after finalization or finalized twice.
pub trait Signer {
    /// Append message bytes. May be called repeatedly; the concatenation of
    /// all updates is signed as one message.
    fn update(&mut self, data: &[u8]);

    /// Digest the accumulated message and sign it, returning the encoded
    /// (r, s) pair.
    fn finalize(self) -> Result<Vec<u8>, Error>;
}

/// Accumulates a message and checks a supplied signature over its digest.
///
/// Single-use, like [Signer].
pub trait Verifier {
    /// Append message bytes.
    fn update(&mut self, data: &[u8]);

    /// Digest the accumulated message and check the signature against it.
    ///
    /// Success is silent. A cryptographically invalid signature fails with
    /// [Error::InvalidSignature]; one that cannot even be decoded fails with
    /// [Error::MalformedSignature].
    fn verify(self) -> Result<(), Error>;
}

/// A materialized elliptic curve private key.
pub trait PrivateKey {
    type PublicKey: PublicKey;
    type Signer: Signer;

    /// The curve the key was constructed on.
    fn curve(&self) -> &Curve;

    /// The corresponding public key.
    fn public_key(&self) -> Self::PublicKey;

    /// Begin a streaming signing operation.
    ///
    /// Fails with [Error::UnsupportedAlgorithm] when `algorithm` is not
    /// recognized for this backend and curve combination.
    fn signer(&self, algorithm: Ecdsa) -> Result<Self::Signer, Error>;
}

/// A [PrivateKey] that can round-trip its raw numbers.
///
/// This is an optional capability: backends that cannot expose numeric key
/// material simply do not implement it, and callers that need the
/// round-trip state the bound explicitly.
pub trait PrivateKeyWithNumbers: PrivateKey {
    fn private_numbers(&self) -> PrivateNumbers;
}

/// A materialized elliptic curve public key.
pub trait PublicKey {
    type Verifier: Verifier;

    /// The curve the key was constructed on.
    fn curve(&self) -> &Curve;

    /// Begin a streaming verification of `signature`.
    ///
    /// Fails with [Error::UnsupportedAlgorithm] when `algorithm` is not
    /// recognized for this backend and curve combination.
    fn verifier(&self, signature: &[u8], algorithm: Ecdsa) -> Result<Self::Verifier, Error>;
}

/// A [PublicKey] that can round-trip its raw numbers.
pub trait PublicKeyWithNumbers: PublicKey {
    fn public_numbers(&self) -> PublicNumbers;
}

/// A cryptographic engine that reports and serves curve and algorithm
/// support.
///
/// Implementations validate numbers at materialization time: a point not on
/// the curve, a negative coordinate or scalar, or a scalar outside
/// `[1, n-1]` fails with [Error::InvalidKey]. Requests for a curve the
/// backend does not serve fail with [Error::UnsupportedCurve].
pub trait EllipticCurveBackend {
    type PrivateKey: PrivateKey;
    type PublicKey: PublicKey;

    /// Whether keys can be generated and materialized on `curve`.
    fn supports_curve(&self, curve: &Curve) -> bool;

    /// Whether `algorithm` can be used for signatures over `curve`.
    fn supports_signature_algorithm(&self, algorithm: &Ecdsa, curve: &Curve) -> bool;

    /// Generate a fresh private key on `curve` using the supplied RNG.
    fn generate_private_key<R: Rng + CryptoRng>(
        &self,
        curve: &Curve,
        rng: &mut R,
    ) -> Result<Self::PrivateKey, Error>;

    /// Materialize and validate a private key from raw numbers.
    fn private_key_from_numbers(&self, numbers: &PrivateNumbers)
        -> Result<Self::PrivateKey, Error>;

    /// Materialize and validate a public key from raw numbers.
    fn public_key_from_numbers(&self, numbers: &PublicNumbers) -> Result<Self::PublicKey, Error>;
}

/// Materializes key objects from raw numbers.
///
/// Every [EllipticCurveBackend] gets this contract for free, with
/// curve-support probing layered in front of materialization. Backends that
/// predate capability queries implement it directly instead; the values
/// such a backend returns are opaque and carry no validation guarantee.
pub trait KeyLoader {
    type PrivateKey;
    type PublicKey;

    fn load_private_key(&self, numbers: &PrivateNumbers) -> Result<Self::PrivateKey, Error>;

    fn load_public_key(&self, numbers: &PublicNumbers) -> Result<Self::PublicKey, Error>;
}

impl<B: EllipticCurveBackend> KeyLoader for B {
    type PrivateKey = B::PrivateKey;
    type PublicKey = B::PublicKey;

    fn load_private_key(&self, numbers: &PrivateNumbers) -> Result<Self::PrivateKey, Error> {
        let curve = numbers.public_numbers().curve();
        if !self.supports_curve(curve) {
            return Err(Error::UnsupportedCurve(curve.name));
        }
        self.private_key_from_numbers(numbers)
    }

    fn load_public_key(&self, numbers: &PublicNumbers) -> Result<Self::PublicKey, Error> {
        let curve = numbers.curve();
        if !self.supports_curve(curve) {
            return Err(Error::UnsupportedCurve(curve.name));
        }
        self.public_key_from_numbers(numbers)
    }
}

/// Generate a fresh private key on `curve` through `backend`.
///
/// Fails with [Error::UnsupportedCurve] before touching the backend when
/// the backend does not support the curve.
pub fn generate_private_key<B: EllipticCurveBackend, R: Rng + CryptoRng>(
    curve: &Curve,
    backend: &B,
    rng: &mut R,
) -> Result<B::PrivateKey, Error> {
    if !backend.supports_curve(curve) {
        return Err(Error::UnsupportedCurve(curve.name));
    }
    backend.generate_private_key(curve, rng)
}
