//! Ed25519 signatures.
//!
//! Hard derivation only: each junction hashes a domain-tagged preimage of
//! the parent seed and the chain code into a fresh seed. Soft junctions are
//! rejected, since ed25519 has no public-offset derivation.
//!
//! Messages are reduced to a Blake2b-256 digest before signing; the
//! underlying primitive here operates over fixed-size digests.

use codec::Encode;
use ed25519_dalek::{Signer as DalekSigner, SigningKey, Verifier as DalekVerifier, VerifyingKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::hash::blake2b_256;
use super::pair::Pair as PairT;
use super::{CryptoError, CryptoResult};
use crate::derive::{DeriveError, DeriveJunction};

/// Domain tag for hard derivation preimages
const HDKD_TAG: &str = "Ed25519HDKD";

/// Seed length in bytes
pub const SEED_LEN: usize = 32;
/// Public key length in bytes
pub const PUBLIC_LEN: usize = 32;
/// Signature length in bytes
pub const SIGNATURE_LEN: usize = 64;

/// An ed25519 public key
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Public([u8; PUBLIC_LEN]);

impl Public {
    /// Create from raw bytes
    ///
    /// # Errors
    /// Returns an error if the bytes are not a valid curve point.
    pub fn from_bytes(bytes: [u8; PUBLIC_LEN]) -> CryptoResult<Self> {
        VerifyingKey::from_bytes(&bytes).map_err(|e| CryptoError::BadPublicKey(e.to_string()))?;
        Ok(Self(bytes))
    }

    /// Get underlying bytes (unchecked; validated again on use)
    #[must_use]
    pub const fn from_bytes_unchecked(bytes: [u8; PUBLIC_LEN]) -> Self {
        Self(bytes)
    }

    /// Get underlying bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; PUBLIC_LEN] {
        &self.0
    }

    /// Convert to hex string
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Public {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Public({}..)", &self.to_hex()[..16])
    }
}

impl fmt::Display for Public {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for Public {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Public {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Public {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        if bytes.len() != PUBLIC_LEN {
            return Err(serde::de::Error::custom("public key must be 32 bytes"));
        }
        let mut arr = [0u8; PUBLIC_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

/// A 64-byte ed25519 signature
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; SIGNATURE_LEN]);

impl Signature {
    /// Create from raw bytes
    #[must_use]
    pub const fn from_bytes(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    /// Get underlying bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    /// Convert to hex string
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sig({}..)", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        if bytes.len() != SIGNATURE_LEN {
            return Err(serde::de::Error::custom("signature must be 64 bytes"));
        }
        let mut arr = [0u8; SIGNATURE_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

/// An ed25519 key pair
#[derive(Clone)]
pub struct Pair(SigningKey);

impl Pair {
    /// Create a pair from a 32-byte seed.
    #[must_use]
    pub fn from_seed(seed: &[u8; SEED_LEN]) -> Self {
        Self(SigningKey::from_bytes(seed))
    }

    /// The 32-byte seed this pair was built from.
    #[must_use]
    pub fn seed(&self) -> [u8; SEED_LEN] {
        self.0.to_bytes()
    }

    /// Hard derivation: hash a domain-tagged preimage of seed and chain
    /// code into a fresh seed.
    #[must_use]
    pub fn derive_hard(&self, chain_code: [u8; 32]) -> Self {
        let seed = (HDKD_TAG, self.seed(), chain_code).using_encoded(blake2b_256);
        Self::from_seed(&seed)
    }
}

impl PairT for Pair {
    type Public = Public;
    type Signature = Signature;

    const SEED_LENGTH: usize = SEED_LEN;

    fn from_seed_slice(seed: &[u8]) -> CryptoResult<Self> {
        if seed.len() != SEED_LEN {
            return Err(CryptoError::BadSeedLength {
                expected: SEED_LEN,
                got: seed.len(),
            });
        }
        let mut arr = [0u8; SEED_LEN];
        arr.copy_from_slice(seed);
        Ok(Self::from_seed(&arr))
    }

    fn public(&self) -> Public {
        Public(self.0.verifying_key().to_bytes())
    }

    fn sign(&self, message: &[u8]) -> Signature {
        Signature(self.0.sign(&blake2b_256(message)).to_bytes())
    }

    fn verify(public: &Public, message: &[u8], signature: &Signature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&public.0) else {
            return false;
        };
        let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
        verifying_key.verify(&blake2b_256(message), &sig).is_ok()
    }

    fn to_raw_vec(&self) -> Vec<u8> {
        self.seed().to_vec()
    }

    fn derive_junction(&self, junction: DeriveJunction) -> Result<Self, DeriveError> {
        match junction {
            DeriveJunction::Hard(cc) => Ok(self.derive_hard(cc)),
            DeriveJunction::Soft(_) => Err(DeriveError::SoftDeriveNotSupported),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_from_hex(s: &str) -> [u8; SEED_LEN] {
        let bytes = hex::decode(s).unwrap();
        let mut seed = [0u8; SEED_LEN];
        seed.copy_from_slice(&bytes);
        seed
    }

    #[test]
    fn test_seed_vector() {
        // RFC 8032 TEST 1 key pair.
        let seed =
            seed_from_hex("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
        let pair = Pair::from_seed(&seed);
        assert_eq!(
            pair.public().to_hex(),
            "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"
        );
    }

    #[test]
    fn test_sign_verify() {
        let pair = Pair::from_seed(&[1u8; SEED_LEN]);
        let message = b"test message";
        let signature = pair.sign(message);
        assert!(Pair::verify(&pair.public(), message, &signature));
    }

    #[test]
    fn test_signatures_deterministic() {
        let pair = Pair::from_seed(&[1u8; SEED_LEN]);
        assert_eq!(
            pair.sign(b"deterministic").as_bytes(),
            pair.sign(b"deterministic").as_bytes()
        );
    }

    #[test]
    fn test_wrong_message_fails() {
        let pair = Pair::from_seed(&[1u8; SEED_LEN]);
        let signature = pair.sign(b"original");
        assert!(!Pair::verify(&pair.public(), b"tampered", &signature));
    }

    #[test]
    fn test_tampered_signature_fails() {
        let pair = Pair::from_seed(&[1u8; SEED_LEN]);
        let message = b"message";
        let mut bytes = *pair.sign(message).as_bytes();
        bytes[0] ^= 0x80;
        assert!(!Pair::verify(&pair.public(), message, &Signature::from_bytes(bytes)));
    }

    #[test]
    fn test_wrong_key_fails() {
        let signer = Pair::from_seed(&[1u8; SEED_LEN]);
        let other = Pair::from_seed(&[2u8; SEED_LEN]);
        let signature = signer.sign(b"message");
        assert!(!Pair::verify(&other.public(), b"message", &signature));
    }

    #[test]
    fn test_hard_derivation_diverges() {
        let pair = Pair::from_seed(&[1u8; SEED_LEN]);
        let a = pair.derive_hard([1u8; 32]);
        let b = pair.derive_hard([2u8; 32]);
        assert_ne!(a.public(), b.public());
        assert_ne!(a.public(), pair.public());
    }

    #[test]
    fn test_soft_junction_rejected() {
        let pair = Pair::from_seed(&[1u8; SEED_LEN]);
        assert!(matches!(
            pair.derive_junction(DeriveJunction::Soft([0u8; 32])),
            Err(DeriveError::SoftDeriveNotSupported)
        ));
    }

    #[test]
    fn test_seed_roundtrip() {
        let pair = Pair::from_seed(&[9u8; SEED_LEN]);
        let restored = Pair::from_seed_slice(&pair.to_raw_vec()).unwrap();
        assert_eq!(pair.public(), restored.public());
    }

    #[test]
    fn test_bad_seed_length() {
        assert!(matches!(
            Pair::from_seed_slice(&[0u8; 16]),
            Err(CryptoError::BadSeedLength { expected: 32, got: 16 })
        ));
    }
}
