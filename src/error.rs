use thiserror::Error;

/// Errors that can occur when resolving curves, materializing keys, or
/// signing and verifying messages.
///
/// Unsupported-feature failures ([Error::UnsupportedCurve],
/// [Error::UnsupportedAlgorithm]) are distinct from invalid-data failures
/// ([Error::InvalidKey], [Error::InvalidSignature]) so callers can tell
/// "retry with a different backend or curve" apart from "this material is
/// wrong".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The name is not present in the curve registry.
    #[error("unknown curve: {0}")]
    UnknownCurve(String),
    /// The backend cannot generate or materialize keys for the curve.
    #[error("unsupported elliptic curve: {0}")]
    UnsupportedCurve(&'static str),
    /// The signature algorithm is not recognized for the backend and curve
    /// combination.
    #[error("unsupported signature algorithm: {0}")]
    UnsupportedAlgorithm(&'static str),
    /// The supplied numbers are well-typed but cryptographically invalid.
    #[error("invalid key: {0}")]
    InvalidKey(&'static str),
    /// The signature does not verify under the public key.
    #[error("invalid signature")]
    InvalidSignature,
    /// The signature bytes are not a valid encoding of an (r, s) pair.
    #[error("malformed signature: {0}")]
    MalformedSignature(&'static str),
    /// The backend failed to complete a signing operation.
    #[error("signing failure")]
    SigningFailure,
}
