//! Software backend over the RustCrypto curve crates.
//!
//! Serves secp256r1, secp384r1, secp521r1, and secp256k1 with every hash
//! [crate::hash::Digester] can digest. Messages are hashed incrementally and
//! the digest is signed or checked through the engines' prehash interfaces,
//! so hash choice and curve choice stay independent. Registered curves
//! outside this set are reported unsupported through the capability queries
//! rather than surfacing an engine error.
//!
//! Signatures are deterministic per RFC 6979 and are not low-S normalized;
//! verification accepts both halves of the order, matching the FIPS 186
//! verification vectors.

use crate::{
    curve::Curve,
    ecdsa::{decode_signature, encode_signature, Ecdsa},
    hash::Digester,
    numbers::{PrivateNumbers, PublicNumbers},
    EllipticCurveBackend, Error,
};
use num_bigint::{BigInt, BigUint, Sign};
use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use rand::{CryptoRng, Rng};
use zeroize::Zeroizing;

const SUPPORTED_CURVES: &[&str] = &["secp256r1", "secp384r1", "secp521r1", "secp256k1"];

/// Capability-queried backend executing ECDSA with the RustCrypto engines.
#[derive(Clone, Copy, Debug, Default)]
pub struct SoftwareBackend;

impl SoftwareBackend {
    pub fn new() -> Self {
        Self
    }
}

impl EllipticCurveBackend for SoftwareBackend {
    type PrivateKey = PrivateKey;
    type PublicKey = PublicKey;

    fn supports_curve(&self, curve: &Curve) -> bool {
        SUPPORTED_CURVES.contains(&curve.name)
    }

    fn supports_signature_algorithm(&self, algorithm: &Ecdsa, curve: &Curve) -> bool {
        self.supports_curve(curve) && Digester::supported(&algorithm.hash)
    }

    fn generate_private_key<R: Rng + CryptoRng>(
        &self,
        curve: &Curve,
        rng: &mut R,
    ) -> Result<PrivateKey, Error> {
        let engine = SigningEngine::generate(curve, rng)?;
        Ok(PrivateKey {
            curve: *curve,
            engine,
        })
    }

    fn private_key_from_numbers(&self, numbers: &PrivateNumbers) -> Result<PrivateKey, Error> {
        let engine = SigningEngine::from_numbers(numbers)?;
        Ok(PrivateKey {
            curve: *numbers.public_numbers().curve(),
            engine,
        })
    }

    fn public_key_from_numbers(&self, numbers: &PublicNumbers) -> Result<PublicKey, Error> {
        let engine = VerifyingEngine::from_numbers(numbers)?;
        Ok(PublicKey {
            curve: *numbers.curve(),
            engine,
        })
    }
}

/// Private key materialized by [SoftwareBackend].
#[derive(Clone)]
pub struct PrivateKey {
    curve: Curve,
    engine: SigningEngine,
}

impl core::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("curve", &self.curve)
            .finish_non_exhaustive()
    }
}

impl crate::PrivateKey for PrivateKey {
    type PublicKey = PublicKey;
    type Signer = Signer;

    fn curve(&self) -> &Curve {
        &self.curve
    }

    fn public_key(&self) -> PublicKey {
        PublicKey {
            curve: self.curve,
            engine: self.engine.verifying(),
        }
    }

    fn signer(&self, algorithm: Ecdsa) -> Result<Signer, Error> {
        let digest = Digester::new(&algorithm.hash)
            .ok_or(Error::UnsupportedAlgorithm(algorithm.hash.name))?;
        Ok(Signer {
            engine: self.engine.clone(),
            digest,
        })
    }
}

impl crate::PrivateKeyWithNumbers for PrivateKey {
    fn private_numbers(&self) -> PrivateNumbers {
        let (x, y) = self.engine.verifying().coordinates();
        PrivateNumbers::new(
            self.engine.private_value(),
            PublicNumbers::new(x, y, self.curve),
        )
    }
}

/// Public key materialized by [SoftwareBackend].
#[derive(Clone)]
pub struct PublicKey {
    curve: Curve,
    engine: VerifyingEngine,
}

impl core::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PublicKey")
            .field("curve", &self.curve)
            .finish_non_exhaustive()
    }
}

impl crate::PublicKey for PublicKey {
    type Verifier = Verifier;

    fn curve(&self) -> &Curve {
        &self.curve
    }

    fn verifier(&self, signature: &[u8], algorithm: Ecdsa) -> Result<Verifier, Error> {
        let digest = Digester::new(&algorithm.hash)
            .ok_or(Error::UnsupportedAlgorithm(algorithm.hash.name))?;
        Ok(Verifier {
            engine: self.engine.clone(),
            digest,
            signature: signature.to_vec(),
        })
    }
}

impl crate::PublicKeyWithNumbers for PublicKey {
    fn public_numbers(&self) -> PublicNumbers {
        let (x, y) = self.engine.coordinates();
        PublicNumbers::new(x, y, self.curve)
    }
}

/// Streaming ECDSA signer bound to one message.
pub struct Signer {
    engine: SigningEngine,
    digest: Digester,
}

impl crate::Signer for Signer {
    fn update(&mut self, data: &[u8]) {
        self.digest.update(data);
    }

    fn finalize(self) -> Result<Vec<u8>, Error> {
        let digest = self.digest.finalize();
        let (r, s) = self.engine.sign_prehash(&digest)?;
        Ok(encode_signature(&r, &s))
    }
}

/// Streaming ECDSA verifier bound to one message and signature.
pub struct Verifier {
    engine: VerifyingEngine,
    digest: Digester,
    signature: Vec<u8>,
}

impl crate::Verifier for Verifier {
    fn update(&mut self, data: &[u8]) {
        self.digest.update(data);
    }

    fn verify(self) -> Result<(), Error> {
        let (r, s) = decode_signature(&self.signature)?;
        let digest = self.digest.finalize();
        self.engine.verify_prehash(&digest, &r, &s)
    }
}

/// Byte width of a field element on `curve`.
fn field_width(curve: &Curve) -> usize {
    (curve.key_size as usize + 7) / 8
}

/// Left-pads a non-negative value to the curve's field width.
fn field_element(value: &BigInt, width: usize) -> Result<Zeroizing<Vec<u8>>, Error> {
    if value.sign() == Sign::Minus {
        return Err(Error::InvalidKey("negative value"));
    }
    let magnitude = value.magnitude().to_bytes_be();
    if magnitude.len() > width {
        return Err(Error::InvalidKey("value exceeds the field size"));
    }
    let mut out = Zeroizing::new(vec![0u8; width]);
    out[width - magnitude.len()..].copy_from_slice(&magnitude);
    Ok(out)
}

/// Left-pads a signature scalar to the field width; a wider value cannot
/// belong to any signature over the curve.
fn signature_scalar(value: &BigUint, width: usize) -> Result<Vec<u8>, Error> {
    let bytes = value.to_bytes_be();
    if bytes.len() > width {
        return Err(Error::InvalidSignature);
    }
    let mut out = vec![0u8; width];
    out[width - bytes.len()..].copy_from_slice(&bytes);
    Ok(out)
}

fn coordinate<T: AsRef<[u8]>>(bytes: Option<&T>) -> BigInt {
    bytes
        .map(|bytes| BigInt::from_bytes_be(Sign::Plus, bytes.as_ref()))
        .unwrap_or_default()
}

/// Per-curve signing handle.
#[derive(Clone)]
enum SigningEngine {
    P256(p256::ecdsa::SigningKey),
    P384(p384::ecdsa::SigningKey),
    P521(p521::ecdsa::SigningKey),
    K256(k256::ecdsa::SigningKey),
}

impl SigningEngine {
    fn generate<R: Rng + CryptoRng>(curve: &Curve, rng: &mut R) -> Result<Self, Error> {
        match curve.name {
            "secp256r1" => Ok(Self::P256(p256::ecdsa::SigningKey::random(rng))),
            "secp384r1" => Ok(Self::P384(p384::ecdsa::SigningKey::random(rng))),
            "secp521r1" => Ok(Self::P521(p521::ecdsa::SigningKey::random(rng))),
            "secp256k1" => Ok(Self::K256(k256::ecdsa::SigningKey::random(rng))),
            _ => Err(Error::UnsupportedCurve(curve.name)),
        }
    }

    fn from_numbers(numbers: &PrivateNumbers) -> Result<Self, Error> {
        let public = numbers.public_numbers();
        let curve = public.curve();
        let scalar = field_element(numbers.private_value(), field_width(curve))?;
        let engine = match curve.name {
            "secp256r1" => Self::P256(
                p256::ecdsa::SigningKey::from_bytes(p256::FieldBytes::from_slice(&scalar))
                    .map_err(|_| Error::InvalidKey("scalar out of range"))?,
            ),
            "secp384r1" => Self::P384(
                p384::ecdsa::SigningKey::from_bytes(p384::FieldBytes::from_slice(&scalar))
                    .map_err(|_| Error::InvalidKey("scalar out of range"))?,
            ),
            "secp521r1" => Self::P521(
                p521::ecdsa::SigningKey::from_bytes(p521::FieldBytes::from_slice(&scalar))
                    .map_err(|_| Error::InvalidKey("scalar out of range"))?,
            ),
            "secp256k1" => Self::K256(
                k256::ecdsa::SigningKey::from_bytes(k256::FieldBytes::from_slice(&scalar))
                    .map_err(|_| Error::InvalidKey("scalar out of range"))?,
            ),
            _ => return Err(Error::UnsupportedCurve(curve.name)),
        };
        // The supplied point must be the one the scalar generates.
        let supplied = VerifyingEngine::from_numbers(public)?;
        if engine.verifying().sec1_bytes() != supplied.sec1_bytes() {
            return Err(Error::InvalidKey("public point does not match the private scalar"));
        }
        Ok(engine)
    }

    fn verifying(&self) -> VerifyingEngine {
        match self {
            Self::P256(key) => VerifyingEngine::P256(key.verifying_key().clone()),
            Self::P384(key) => VerifyingEngine::P384(key.verifying_key().clone()),
            Self::P521(key) => VerifyingEngine::P521(p521::ecdsa::VerifyingKey::from(key)),
            Self::K256(key) => VerifyingEngine::K256(key.verifying_key().clone()),
        }
    }

    fn private_value(&self) -> BigInt {
        let bytes = Zeroizing::new(match self {
            Self::P256(key) => key.to_bytes().to_vec(),
            Self::P384(key) => key.to_bytes().to_vec(),
            Self::P521(key) => key.to_bytes().to_vec(),
            Self::K256(key) => key.to_bytes().to_vec(),
        });
        BigInt::from_bytes_be(Sign::Plus, &bytes)
    }

    fn sign_prehash(&self, digest: &[u8]) -> Result<(BigUint, BigUint), Error> {
        let bytes = match self {
            Self::P256(key) => {
                let signature: p256::ecdsa::Signature =
                    key.sign_prehash(digest).map_err(|_| Error::SigningFailure)?;
                signature.to_bytes().to_vec()
            }
            Self::P384(key) => {
                let signature: p384::ecdsa::Signature =
                    key.sign_prehash(digest).map_err(|_| Error::SigningFailure)?;
                signature.to_bytes().to_vec()
            }
            Self::P521(key) => {
                let signature: p521::ecdsa::Signature =
                    key.sign_prehash(digest).map_err(|_| Error::SigningFailure)?;
                signature.to_bytes().to_vec()
            }
            Self::K256(key) => {
                let signature: k256::ecdsa::Signature =
                    key.sign_prehash(digest).map_err(|_| Error::SigningFailure)?;
                signature.to_bytes().to_vec()
            }
        };
        let (r, s) = bytes.split_at(bytes.len() / 2);
        Ok((BigUint::from_bytes_be(r), BigUint::from_bytes_be(s)))
    }
}

/// Per-curve verifying handle.
#[derive(Clone)]
enum VerifyingEngine {
    P256(p256::ecdsa::VerifyingKey),
    P384(p384::ecdsa::VerifyingKey),
    P521(p521::ecdsa::VerifyingKey),
    K256(k256::ecdsa::VerifyingKey),
}

impl VerifyingEngine {
    fn from_numbers(numbers: &PublicNumbers) -> Result<Self, Error> {
        let curve = numbers.curve();
        let width = field_width(curve);
        let x = field_element(numbers.x(), width)?;
        let y = field_element(numbers.y(), width)?;
        match curve.name {
            "secp256r1" => {
                let point = p256::EncodedPoint::from_affine_coordinates(
                    p256::FieldBytes::from_slice(&x),
                    p256::FieldBytes::from_slice(&y),
                    false,
                );
                Ok(Self::P256(
                    p256::ecdsa::VerifyingKey::from_encoded_point(&point)
                        .map_err(|_| Error::InvalidKey("point is not on the curve"))?,
                ))
            }
            "secp384r1" => {
                let point = p384::EncodedPoint::from_affine_coordinates(
                    p384::FieldBytes::from_slice(&x),
                    p384::FieldBytes::from_slice(&y),
                    false,
                );
                Ok(Self::P384(
                    p384::ecdsa::VerifyingKey::from_encoded_point(&point)
                        .map_err(|_| Error::InvalidKey("point is not on the curve"))?,
                ))
            }
            "secp521r1" => {
                let point = p521::EncodedPoint::from_affine_coordinates(
                    p521::FieldBytes::from_slice(&x),
                    p521::FieldBytes::from_slice(&y),
                    false,
                );
                Ok(Self::P521(
                    p521::ecdsa::VerifyingKey::from_encoded_point(&point)
                        .map_err(|_| Error::InvalidKey("point is not on the curve"))?,
                ))
            }
            "secp256k1" => {
                let point = k256::EncodedPoint::from_affine_coordinates(
                    k256::FieldBytes::from_slice(&x),
                    k256::FieldBytes::from_slice(&y),
                    false,
                );
                Ok(Self::K256(
                    k256::ecdsa::VerifyingKey::from_encoded_point(&point)
                        .map_err(|_| Error::InvalidKey("point is not on the curve"))?,
                ))
            }
            _ => Err(Error::UnsupportedCurve(curve.name)),
        }
    }

    fn sec1_bytes(&self) -> Vec<u8> {
        match self {
            Self::P256(key) => key.to_encoded_point(false).as_bytes().to_vec(),
            Self::P384(key) => key.to_encoded_point(false).as_bytes().to_vec(),
            Self::P521(key) => key.to_encoded_point(false).as_bytes().to_vec(),
            Self::K256(key) => key.to_encoded_point(false).as_bytes().to_vec(),
        }
    }

    fn coordinates(&self) -> (BigInt, BigInt) {
        // A materialized key is never the point at infinity, so both affine
        // coordinates are present.
        match self {
            Self::P256(key) => {
                let point = key.to_encoded_point(false);
                (coordinate(point.x()), coordinate(point.y()))
            }
            Self::P384(key) => {
                let point = key.to_encoded_point(false);
                (coordinate(point.x()), coordinate(point.y()))
            }
            Self::P521(key) => {
                let point = key.to_encoded_point(false);
                (coordinate(point.x()), coordinate(point.y()))
            }
            Self::K256(key) => {
                let point = key.to_encoded_point(false);
                (coordinate(point.x()), coordinate(point.y()))
            }
        }
    }

    fn verify_prehash(&self, digest: &[u8], r: &BigUint, s: &BigUint) -> Result<(), Error> {
        match self {
            Self::P256(key) => {
                let r = signature_scalar(r, 32)?;
                let s = signature_scalar(s, 32)?;
                let signature = p256::ecdsa::Signature::from_scalars(
                    p256::FieldBytes::clone_from_slice(&r),
                    p256::FieldBytes::clone_from_slice(&s),
                )
                .map_err(|_| Error::InvalidSignature)?;
                key.verify_prehash(digest, &signature)
                    .map_err(|_| Error::InvalidSignature)
            }
            Self::P384(key) => {
                let r = signature_scalar(r, 48)?;
                let s = signature_scalar(s, 48)?;
                let signature = p384::ecdsa::Signature::from_scalars(
                    p384::FieldBytes::clone_from_slice(&r),
                    p384::FieldBytes::clone_from_slice(&s),
                )
                .map_err(|_| Error::InvalidSignature)?;
                key.verify_prehash(digest, &signature)
                    .map_err(|_| Error::InvalidSignature)
            }
            Self::P521(key) => {
                let r = signature_scalar(r, 66)?;
                let s = signature_scalar(s, 66)?;
                let signature = p521::ecdsa::Signature::from_scalars(
                    p521::FieldBytes::clone_from_slice(&r),
                    p521::FieldBytes::clone_from_slice(&s),
                )
                .map_err(|_| Error::InvalidSignature)?;
                key.verify_prehash(digest, &signature)
                    .map_err(|_| Error::InvalidSignature)
            }
            Self::K256(key) => {
                let r = signature_scalar(r, 32)?;
                let s = signature_scalar(s, 32)?;
                let signature = k256::ecdsa::Signature::from_scalars(
                    k256::FieldBytes::clone_from_slice(&r),
                    k256::FieldBytes::clone_from_slice(&s),
                )
                .map_err(|_| Error::InvalidSignature)?;
                key.verify_prehash(digest, &signature)
                    .map_err(|_| Error::InvalidSignature)
            }
        }
    }
}
