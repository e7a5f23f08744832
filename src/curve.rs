//! Named curve descriptors and the process-wide curve registry.
//!
//! The registry is a read-only table initialized at compile time. Entries
//! are plain descriptors; whether a curve can actually be used is decided by
//! the backend through its capability queries, not by the registry.

use crate::Error;
use std::fmt;

/// Identity of a set of elliptic curve domain parameters.
///
/// Fields are public so callers can describe curves the registry does not
/// carry (a backend is free to support them, or to report them unsupported).
/// Two descriptors denote the same curve iff their names match.
#[derive(Clone, Copy, Debug, Eq)]
pub struct Curve {
    /// Canonical lowercase SEC 2 name, e.g. `"secp256r1"`.
    pub name: &'static str,
    /// Bit length of the curve order.
    pub key_size: u32,
}

impl PartialEq for Curve {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

pub const SECT571K1: Curve = Curve { name: "sect571k1", key_size: 571 };
pub const SECT409K1: Curve = Curve { name: "sect409k1", key_size: 409 };
pub const SECT283K1: Curve = Curve { name: "sect283k1", key_size: 283 };
pub const SECT233K1: Curve = Curve { name: "sect233k1", key_size: 233 };
pub const SECT163K1: Curve = Curve { name: "sect163k1", key_size: 163 };
pub const SECT571R1: Curve = Curve { name: "sect571r1", key_size: 570 };
pub const SECT409R1: Curve = Curve { name: "sect409r1", key_size: 409 };
pub const SECT283R1: Curve = Curve { name: "sect283r1", key_size: 283 };
pub const SECT233R1: Curve = Curve { name: "sect233r1", key_size: 233 };
pub const SECT163R2: Curve = Curve { name: "sect163r2", key_size: 163 };
pub const SECP521R1: Curve = Curve { name: "secp521r1", key_size: 521 };
pub const SECP384R1: Curve = Curve { name: "secp384r1", key_size: 384 };
pub const SECP256R1: Curve = Curve { name: "secp256r1", key_size: 256 };
pub const SECP256K1: Curve = Curve { name: "secp256k1", key_size: 256 };
pub const SECP224R1: Curve = Curve { name: "secp224r1", key_size: 224 };
pub const SECP192R1: Curve = Curve { name: "secp192r1", key_size: 192 };

const REGISTERED: &[Curve] = &[
    SECT571K1, SECT409K1, SECT283K1, SECT233K1, SECT163K1, SECT571R1, SECT409R1, SECT283R1,
    SECT233R1, SECT163R2, SECP521R1, SECP384R1, SECP256R1, SECP256K1, SECP224R1, SECP192R1,
];

/// Every registered curve, in registration order.
pub fn all() -> &'static [Curve] {
    REGISTERED
}

/// Look up a registered curve by its canonical name.
pub fn resolve(name: &str) -> Result<Curve, Error> {
    REGISTERED
        .iter()
        .copied()
        .find(|curve| curve.name == name)
        .ok_or_else(|| Error::UnknownCurve(name.to_string()))
}
