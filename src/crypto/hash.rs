//! Blake2b hashing primitives.
//!
//! Everything in this crate that hashes does so with Blake2b: derivation
//! preimages and pre-signing digests use the 256-bit variant, the SS58
//! address checksum uses the 512-bit variant. The widths are fixed by the
//! network wire format and cannot be swapped for another hash.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Blake2b512, Digest};

/// Blake2b with a 256-bit output
type Blake2b256 = Blake2b<U32>;

/// Compute the 32-byte Blake2b-256 digest of `data`
#[must_use]
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Blake2b256::digest(data));
    out
}

/// Compute the 64-byte Blake2b-512 digest of `data`
#[must_use]
pub fn blake2b_512(data: &[u8]) -> [u8; 64] {
    let mut out = [0u8; 64];
    out.copy_from_slice(&Blake2b512::digest(data));
    out
}
