//! HMAC-SHA256 payload signing and verification.
//!
//! Signatures cover the exact transmitted payload bytes and travel as
//! `sha256=<hex>` in the signature header. Receivers recompute the digest
//! over the bytes they received and compare in constant time.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Prefix on every signature value.
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Signs `payload` with `secret`, returning `sha256=<hex>`.
#[must_use]
pub fn sign(payload: &[u8], secret: &[u8]) -> String {
    let digest = digest(payload, secret);
    format!("{SIGNATURE_PREFIX}{}", hex::encode(digest))
}

/// Verifies a presented signature against `payload` and `secret`.
///
/// A wrong prefix, bad hex, or wrong digest length is simply a failed
/// verification, never an error. The digest comparison visits all 32
/// bytes regardless of where the first mismatch sits.
#[must_use]
pub fn verify(payload: &[u8], signature: &str, secret: &[u8]) -> bool {
    let Some(hex_digest) = signature.strip_prefix(SIGNATURE_PREFIX) else {
        return false;
    };
    let Ok(presented) = hex::decode(hex_digest) else {
        return false;
    };

    let expected = digest(payload, secret);
    if presented.len() != expected.len() {
        return false;
    }
    presented.as_slice().ct_eq(expected.as_slice()).into()
}

fn digest(payload: &[u8], secret: &[u8]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload);
    mac.finalize().into_bytes().into()
}
