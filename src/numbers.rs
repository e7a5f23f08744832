//! Raw numeric key material, prior to backend materialization.
//!
//! Numbers objects are value types: an affine point (and, for private keys,
//! a scalar) bound to a curve identity. They hold no backend resources and
//! carry no cryptographic guarantee by themselves. Whether the integers
//! actually describe a usable key is decided when a backend materializes
//! them; a point off the curve, a negative coordinate, or a scalar outside
//! `[1, n-1]` fails there with [Error::InvalidKey].

use crate::{curve::Curve, Error, KeyLoader};
use num_bigint::BigInt;

/// The affine coordinates of a public point, bound to a curve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicNumbers {
    x: BigInt,
    y: BigInt,
    curve: Curve,
}

impl PublicNumbers {
    pub fn new(x: BigInt, y: BigInt, curve: Curve) -> Self {
        Self { x, y, curve }
    }

    pub fn x(&self) -> &BigInt {
        &self.x
    }

    pub fn y(&self) -> &BigInt {
        &self.y
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Materialize a public key through `loader`.
    pub fn public_key<L: KeyLoader>(&self, loader: &L) -> Result<L::PublicKey, Error> {
        loader.load_public_key(self)
    }
}

/// A private scalar together with its public numbers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivateNumbers {
    private_value: BigInt,
    public_numbers: PublicNumbers,
}

impl PrivateNumbers {
    pub fn new(private_value: BigInt, public_numbers: PublicNumbers) -> Self {
        Self {
            private_value,
            public_numbers,
        }
    }

    pub fn private_value(&self) -> &BigInt {
        &self.private_value
    }

    pub fn public_numbers(&self) -> &PublicNumbers {
        &self.public_numbers
    }

    /// Materialize a private key through `loader`.
    pub fn private_key<L: KeyLoader>(&self, loader: &L) -> Result<L::PrivateKey, Error> {
        loader.load_private_key(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve;

    fn public(x: i32, y: i32, curve: Curve) -> PublicNumbers {
        PublicNumbers::new(BigInt::from(x), BigInt::from(y), curve)
    }

    #[test]
    fn test_accessors() {
        let numbers = PrivateNumbers::new(BigInt::from(1), public(2, 3, curve::SECP192R1));
        assert_eq!(*numbers.private_value(), BigInt::from(1));
        assert_eq!(*numbers.public_numbers().x(), BigInt::from(2));
        assert_eq!(*numbers.public_numbers().y(), BigInt::from(3));
        assert_eq!(numbers.public_numbers().curve().name, "secp192r1");
    }

    #[test]
    fn test_public_numbers_eq() {
        assert_eq!(public(1, 2, curve::SECP192R1), public(1, 2, curve::SECP192R1));
    }

    #[test]
    fn test_public_numbers_ne() {
        let reference = public(1, 2, curve::SECP192R1);
        assert_ne!(reference, public(1, 2, curve::SECP384R1));
        assert_ne!(reference, public(1, 3, curve::SECP192R1));
        assert_ne!(reference, public(2, 2, curve::SECP192R1));
    }

    #[test]
    fn test_private_numbers_eq() {
        let private = PrivateNumbers::new(BigInt::from(1), public(1, 2, curve::SECP192R1));
        assert_eq!(
            private,
            PrivateNumbers::new(BigInt::from(1), public(1, 2, curve::SECP192R1))
        );
    }

    #[test]
    fn test_private_numbers_ne() {
        let private = PrivateNumbers::new(BigInt::from(1), public(1, 2, curve::SECP192R1));
        assert_ne!(
            private,
            PrivateNumbers::new(BigInt::from(2), public(1, 2, curve::SECP192R1))
        );
        assert_ne!(
            private,
            PrivateNumbers::new(BigInt::from(1), public(2, 2, curve::SECP192R1))
        );
        assert_ne!(
            private,
            PrivateNumbers::new(BigInt::from(1), public(1, 3, curve::SECP192R1))
        );
        assert_ne!(
            private,
            PrivateNumbers::new(BigInt::from(1), public(1, 2, curve::SECP521R1))
        );
    }

    #[test]
    fn test_negative_values_are_representable() {
        // Construction mirrors the permissiveness of raw integers; rejection
        // happens at materialization.
        let numbers = public(-1, 2, curve::SECP256R1);
        assert!(numbers.x().sign() == num_bigint::Sign::Minus);
    }
}
