//! SS58 address encoding.
//!
//! An address is `base58(prefix-bytes ++ key-bytes ++ checksum)` where the
//! checksum is the first two bytes of `Blake2b-512("SS58PRE" ++ payload)`.
//! Network prefixes 0–63 pack into one byte; 64–16383 into two, with the
//! high bits of the first byte marking the two-byte form. The layout is
//! shared with every other wallet on the network and must stay bit-exact.

use thiserror::Error;

use crate::crypto::blake2b_512;

/// Checksum length for the 32- and 33-byte key bodies used here
const CHECKSUM_LEN: usize = 2;

/// Domain prefix mixed into every address checksum
const CHECKSUM_TAG: &[u8] = b"SS58PRE";

/// SS58 decode errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// Not valid base-58
    #[error("invalid base58 character in address")]
    BadBase58,
    /// Decoded payload has an impossible length
    #[error("address has invalid length")]
    BadLength,
    /// Checksum bytes do not match the payload
    #[error("address checksum mismatch")]
    BadChecksum,
    /// First byte is in the reserved range, or the prefix is out of range
    #[error("invalid or reserved network prefix")]
    InvalidPrefix,
}

/// An SS58 network prefix ("address format").
///
/// A registry of well-known values is maintained ecosystem-wide; only the
/// handful this client talks to are named here.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Ss58AddressFormat(u16);

impl Ss58AddressFormat {
    /// Polkadot relay chain
    pub const POLKADOT: Self = Self(0);
    /// Kusama relay chain
    pub const KUSAMA: Self = Self(2);
    /// Generic substrate, the default for development chains
    pub const SUBSTRATE: Self = Self(42);

    /// Create a format from a raw prefix.
    ///
    /// # Errors
    /// `InvalidPrefix` if the value does not fit the two-byte packing
    /// (16384 and up).
    pub const fn new(prefix: u16) -> Result<Self, AddressError> {
        if prefix < 0x4000 {
            Ok(Self(prefix))
        } else {
            Err(AddressError::InvalidPrefix)
        }
    }

    /// The raw prefix value
    #[must_use]
    pub const fn prefix(self) -> u16 {
        self.0
    }
}

impl Default for Ss58AddressFormat {
    fn default() -> Self {
        Self::SUBSTRATE
    }
}

fn ss58hash(data: &[u8]) -> [u8; 64] {
    let mut preimage = Vec::with_capacity(CHECKSUM_TAG.len() + data.len());
    preimage.extend_from_slice(CHECKSUM_TAG);
    preimage.extend_from_slice(data);
    blake2b_512(&preimage)
}

/// Encode key bytes as an SS58 address under the given network prefix.
#[must_use]
pub fn encode(format: Ss58AddressFormat, key: &[u8]) -> String {
    let ident = format.prefix();
    let mut data = match ident {
        0..=63 => vec![ident as u8],
        _ => {
            // Two-byte form: the low 6 bits of the prefix land in the
            // first byte under the 0b01 marker, the rest in the second.
            let first = ((ident & 0b0000_0000_1111_1100) >> 2) as u8;
            let second = ((ident >> 8) as u8) | (((ident & 0b0000_0000_0000_0011) as u8) << 6);
            vec![first | 0b0100_0000, second]
        }
    };
    data.extend_from_slice(key);
    let checksum = ss58hash(&data);
    data.extend_from_slice(&checksum[..CHECKSUM_LEN]);
    bs58::encode(data).into_string()
}

/// Decode an SS58 address into its network prefix and key bytes.
///
/// # Errors
/// `BadBase58` for invalid characters, `BadLength` unless the body is 32
/// or 33 bytes, `BadChecksum` on mismatch, `InvalidPrefix` for the
/// reserved first-byte range.
pub fn decode(address: &str) -> Result<(u16, Vec<u8>), AddressError> {
    let data = bs58::decode(address)
        .into_vec()
        .map_err(|_| AddressError::BadBase58)?;
    if data.is_empty() {
        return Err(AddressError::BadLength);
    }
    let (prefix_len, ident) = match data[0] {
        0..=63 => (1, u16::from(data[0])),
        64..=127 => {
            if data.len() < 2 {
                return Err(AddressError::BadLength);
            }
            let lower = (data[0] << 2) | (data[1] >> 6);
            let upper = data[1] & 0b0011_1111;
            (2, u16::from(lower) | (u16::from(upper) << 8))
        }
        _ => return Err(AddressError::InvalidPrefix),
    };
    if data.len() < prefix_len + CHECKSUM_LEN {
        return Err(AddressError::BadLength);
    }
    let body_len = data.len() - prefix_len - CHECKSUM_LEN;
    if body_len != 32 && body_len != 33 {
        return Err(AddressError::BadLength);
    }
    let checksum_start = data.len() - CHECKSUM_LEN;
    let expected = ss58hash(&data[..checksum_start]);
    if data[checksum_start..] != expected[..CHECKSUM_LEN] {
        return Err(AddressError::BadChecksum);
    }
    Ok((ident, data[prefix_len..checksum_start].to_vec()))
}
