//! ECDSA algorithm selection and the deterministic (r, s) signature
//! encoding.
//!
//! A signature is the integer pair (r, s). The wire form is the ASN.1 DER
//! `SEQUENCE { INTEGER r, INTEGER s }` convention used by RFC 6979 and ANSI
//! X9.62: integers are minimal-form big-endian with a leading zero octet
//! when the high bit is set, and lengths use the long form once the body
//! exceeds 127 bytes (P-521 signatures do). The encoding carries no curve or
//! hash identity and [decode_signature] inverts [encode_signature] exactly
//! for every non-negative pair.

use crate::{hash::HashAlgorithm, Error};
use num_bigint::BigUint;

/// ECDSA signature algorithm descriptor: the hash used to digest the
/// message.
///
/// Curve identity is supplied by the key the descriptor is handed to; two
/// descriptors are equal iff they select the same hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ecdsa {
    /// The hash applied to the accumulated message before signing.
    pub hash: HashAlgorithm,
}

impl Ecdsa {
    pub fn new(hash: HashAlgorithm) -> Self {
        Self { hash }
    }
}

/// Encode an (r, s) pair as a DER SEQUENCE of two INTEGERs.
pub fn encode_signature(r: &BigUint, s: &BigUint) -> Vec<u8> {
    let r = der_integer(r);
    let s = der_integer(s);
    let mut out = Vec::with_capacity(4 + r.len() + s.len());
    out.push(0x30);
    push_length(&mut out, r.len() + s.len());
    out.extend_from_slice(&r);
    out.extend_from_slice(&s);
    out
}

/// Decode a DER SEQUENCE of two INTEGERs back into the (r, s) pair.
///
/// Decoding is strict: redundant leading octets, negative integers, length
/// mismatches, and trailing bytes all fail with
/// [Error::MalformedSignature].
pub fn decode_signature(data: &[u8]) -> Result<(BigUint, BigUint), Error> {
    let (&tag, rest) = data
        .split_first()
        .ok_or(Error::MalformedSignature("empty input"))?;
    if tag != 0x30 {
        return Err(Error::MalformedSignature("expected SEQUENCE"));
    }
    let (length, rest) = take_length(rest)?;
    if rest.len() != length {
        return Err(Error::MalformedSignature("length mismatch"));
    }
    let (r, rest) = take_integer(rest)?;
    let (s, rest) = take_integer(rest)?;
    if !rest.is_empty() {
        return Err(Error::MalformedSignature("trailing bytes"));
    }
    Ok((r, s))
}

fn der_integer(value: &BigUint) -> Vec<u8> {
    let mut bytes = value.to_bytes_be();
    if bytes[0] & 0x80 != 0 {
        bytes.insert(0, 0x00);
    }
    let mut out = Vec::with_capacity(2 + bytes.len());
    out.push(0x02);
    push_length(&mut out, bytes.len());
    out.extend_from_slice(&bytes);
    out
}

fn push_length(out: &mut Vec<u8>, length: usize) {
    if length < 0x80 {
        out.push(length as u8);
        return;
    }
    let bytes = length.to_be_bytes();
    let skip = bytes.iter().take_while(|byte| **byte == 0).count();
    out.push(0x80 | (bytes.len() - skip) as u8);
    out.extend_from_slice(&bytes[skip..]);
}

fn take_length(data: &[u8]) -> Result<(usize, &[u8]), Error> {
    let (&first, rest) = data
        .split_first()
        .ok_or(Error::MalformedSignature("truncated length"))?;
    if first < 0x80 {
        return Ok((first as usize, rest));
    }
    let count = (first & 0x7f) as usize;
    if count == 0 || count > std::mem::size_of::<usize>() {
        return Err(Error::MalformedSignature("unsupported length form"));
    }
    if rest.len() < count {
        return Err(Error::MalformedSignature("truncated length"));
    }
    let (bytes, rest) = rest.split_at(count);
    if bytes[0] == 0 {
        return Err(Error::MalformedSignature("non-minimal length"));
    }
    let mut length = 0usize;
    for byte in bytes {
        length = (length << 8) | *byte as usize;
    }
    if length < 0x80 {
        return Err(Error::MalformedSignature("non-minimal length"));
    }
    Ok((length, rest))
}

fn take_integer(data: &[u8]) -> Result<(BigUint, &[u8]), Error> {
    let (&tag, rest) = data
        .split_first()
        .ok_or(Error::MalformedSignature("truncated integer"))?;
    if tag != 0x02 {
        return Err(Error::MalformedSignature("expected INTEGER"));
    }
    let (length, rest) = take_length(rest)?;
    if length == 0 {
        return Err(Error::MalformedSignature("empty integer"));
    }
    if rest.len() < length {
        return Err(Error::MalformedSignature("truncated integer"));
    }
    let (bytes, rest) = rest.split_at(length);
    if bytes[0] & 0x80 != 0 {
        return Err(Error::MalformedSignature("negative integer"));
    }
    if length > 1 && bytes[0] == 0 && bytes[1] & 0x80 == 0 {
        return Err(Error::MalformedSignature("non-minimal integer"));
    }
    Ok((BigUint::from_bytes_be(bytes), rest))
}
