//! A single segment of a derivation path.

use codec::Encode;

use crate::crypto::blake2b_256;

/// Chain-code width in bytes. Junction payloads are always reduced to
/// exactly this many bytes before they reach a derivation engine.
pub const JUNCTION_ID_LEN: usize = 32;

/// One segment of a derivation path.
///
/// The payload is SCALE-encoded and then either zero-padded (when it fits)
/// or Blake2b-256-hashed (when it does not) into a fixed 32-byte chain
/// code. This reduction is part of the network wire format.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum DeriveJunction {
    /// Soft junction: child public keys are derivable from the parent's
    Soft([u8; JUNCTION_ID_LEN]),
    /// Hard junction: one-way, requires the secret
    Hard([u8; JUNCTION_ID_LEN]),
}

impl DeriveJunction {
    fn compute_chain_code<T: Encode>(index: T) -> [u8; JUNCTION_ID_LEN] {
        let mut chain_code = [0u8; JUNCTION_ID_LEN];
        index.using_encoded(|data| {
            if data.len() > JUNCTION_ID_LEN {
                chain_code = blake2b_256(data);
            } else {
                chain_code[..data.len()].copy_from_slice(data);
            }
        });
        chain_code
    }

    /// Create a soft junction from any encodable index
    #[must_use]
    pub fn soft<T: Encode>(index: T) -> Self {
        Self::Soft(Self::compute_chain_code(index))
    }

    /// Create a hard junction from any encodable index
    #[must_use]
    pub fn hard<T: Encode>(index: T) -> Self {
        Self::soft(index).harden()
    }

    /// Make this junction hard, keeping its chain code
    #[must_use]
    pub const fn harden(self) -> Self {
        match self {
            Self::Soft(chain_code) | Self::Hard(chain_code) => Self::Hard(chain_code),
        }
    }

    /// Make this junction soft, keeping its chain code
    #[must_use]
    pub const fn soften(self) -> Self {
        match self {
            Self::Soft(chain_code) | Self::Hard(chain_code) => Self::Soft(chain_code),
        }
    }

    /// The 32-byte chain code
    #[must_use]
    pub const fn chain_code(self) -> [u8; JUNCTION_ID_LEN] {
        match self {
            Self::Soft(chain_code) | Self::Hard(chain_code) => chain_code,
        }
    }

    /// Whether this is a hard junction
    #[must_use]
    pub const fn is_hard(self) -> bool {
        matches!(self, Self::Hard(_))
    }

    /// Whether this is a soft junction
    #[must_use]
    pub const fn is_soft(self) -> bool {
        matches!(self, Self::Soft(_))
    }
}

impl From<&str> for DeriveJunction {
    /// A body that parses as a decimal `u32` becomes a numeric index;
    /// anything else (non-numeric, or too large) is treated as a string.
    /// Always soft; callers harden for `//` segments.
    fn from(index: &str) -> Self {
        index.parse::<u32>().map_or_else(|_| Self::soft(index), Self::soft)
    }
}

impl From<u32> for DeriveJunction {
    fn from(index: u32) -> Self {
        Self::soft(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_index_is_little_endian() {
        let junction = DeriveJunction::from(1u32);
        let mut expected = [0u8; JUNCTION_ID_LEN];
        expected[0] = 1;
        assert_eq!(junction.chain_code(), expected);
    }

    #[test]
    fn test_string_index_is_scale_encoded_and_padded() {
        // "Alice" encodes as a compact length (5 << 2 = 0x14) plus the
        // UTF-8 bytes, zero-padded to 32.
        let junction = DeriveJunction::from("Alice");
        let mut expected = [0u8; JUNCTION_ID_LEN];
        expected[0] = 0x14;
        expected[1..6].copy_from_slice(b"Alice");
        assert_eq!(junction.chain_code(), expected);
    }

    #[test]
    fn test_decimal_body_prefers_numeric() {
        assert_eq!(DeriveJunction::from("1"), DeriveJunction::from(1u32));
        // Too large for u32: falls back to the string rule.
        assert_ne!(
            DeriveJunction::from("4294967296"),
            DeriveJunction::from(0u32)
        );
    }

    #[test]
    fn test_long_index_is_hashed() {
        let long = "a".repeat(64);
        let junction = DeriveJunction::from(long.as_str());
        let expected = long.as_str().using_encoded(blake2b_256);
        assert_eq!(junction.chain_code(), expected);
    }

    #[test]
    fn test_harden_and_soften_keep_chain_code() {
        let soft = DeriveJunction::from("Alice");
        let hard = soft.harden();
        assert!(hard.is_hard());
        assert_eq!(soft.chain_code(), hard.chain_code());
        assert_eq!(hard.soften(), soft);
    }

    #[test]
    fn test_hard_and_soft_compare_unequal() {
        let soft = DeriveJunction::from("Alice");
        assert_ne!(soft, soft.harden());
    }
}
