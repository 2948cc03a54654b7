//! ECDSA signatures over secp256k1.
//!
//! Hard derivation only, with the same preimage scheme as ed25519 but a
//! `Secp256k1HDKD` domain tag; the digest is accepted as the new private
//! scalar after re-validation. Signatures are 65 bytes: `r ‖ s ‖ recovery
//! id`, so the signing account can be recovered from the signature itself.
//!
//! Messages are reduced to a Blake2b-256 digest before signing.

use codec::Encode;
use k256::ecdsa::{RecoveryId, Signature as RecoverableSignature, SigningKey, VerifyingKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::hash::blake2b_256;
use super::pair::Pair as PairT;
use super::{CryptoError, CryptoResult};
use crate::derive::{DeriveError, DeriveJunction};

/// Domain tag for hard derivation preimages
const HDKD_TAG: &str = "Secp256k1HDKD";

/// Seed length in bytes (the private scalar)
pub const SEED_LEN: usize = 32;
/// Public key length in bytes (a compressed SEC1 point)
pub const PUBLIC_LEN: usize = 33;
/// Signature length in bytes (r ‖ s ‖ recovery id)
pub const SIGNATURE_LEN: usize = 65;

/// A compressed secp256k1 public key
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Public([u8; PUBLIC_LEN]);

impl Public {
    /// Create from raw bytes
    ///
    /// # Errors
    /// Returns an error if the bytes are not a valid compressed SEC1 point.
    pub fn from_bytes(bytes: [u8; PUBLIC_LEN]) -> CryptoResult<Self> {
        VerifyingKey::from_sec1_bytes(&bytes)
            .map_err(|e| CryptoError::BadPublicKey(e.to_string()))?;
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
            return Err(serde::de::Error::custom("public key must be 33 bytes"));
        }
        let mut arr = [0u8; PUBLIC_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

/// A 65-byte recoverable ECDSA signature
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
            return Err(serde::de::Error::custom("signature must be 65 bytes"));
        }
        let mut arr = [0u8; SIGNATURE_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

/// A secp256k1 key pair
#[derive(Clone)]
pub struct Pair(SigningKey);

impl Pair {
    /// Create a pair from a 32-byte private scalar.
    ///
    /// # Errors
    /// Returns `BadPrivateKey` if the scalar is zero or not below the
    /// curve order.
    pub fn from_seed(seed: &[u8; SEED_LEN]) -> CryptoResult<Self> {
        SigningKey::from_slice(seed)
            .map(Self)
            .map_err(|e| CryptoError::BadPrivateKey(e.to_string()))
    }

    /// The 32-byte private scalar of this pair.
    #[must_use]
    pub fn seed(&self) -> [u8; SEED_LEN] {
        let mut seed = [0u8; SEED_LEN];
        seed.copy_from_slice(&self.0.to_bytes());
        seed
    }

    /// Hard derivation: hash a domain-tagged preimage of scalar and chain
    /// code, re-validated as the new private scalar.
    ///
    /// # Errors
    /// Returns `BadPrivateKey` in the (cryptographically negligible) case
    /// that the digest is not a valid scalar.
    pub fn derive_hard(&self, chain_code: [u8; 32]) -> CryptoResult<Self> {
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
        Self::from_seed(&arr)
    }

    fn public(&self) -> Public {
        let point = self.0.verifying_key().to_encoded_point(true);
        let mut bytes = [0u8; PUBLIC_LEN];
        bytes.copy_from_slice(point.as_bytes());
        Public(bytes)
    }

    fn sign(&self, message: &[u8]) -> Signature {
        let digest = blake2b_256(message);
        let (signature, recovery_id) = self
            .0
            .sign_prehash_recoverable(&digest)
            .expect("a valid key signing a 32-byte digest cannot fail");
        let mut bytes = [0u8; SIGNATURE_LEN];
        bytes[..64].copy_from_slice(&signature.to_bytes());
        bytes[64] = recovery_id.to_byte();
        Signature(bytes)
    }

    fn verify(public: &Public, message: &[u8], signature: &Signature) -> bool {
        let digest = blake2b_256(message);
        let Ok(sig) = RecoverableSignature::from_slice(&signature.0[..64]) else {
            return false;
        };
        let Some(recovery_id) = RecoveryId::from_byte(signature.0[64]) else {
            return false;
        };
        match VerifyingKey::recover_from_prehash(&digest, &sig, recovery_id) {
            Ok(recovered) => recovered.to_encoded_point(true).as_bytes() == public.0.as_slice(),
            Err(_) => false,
        }
    }

    fn to_raw_vec(&self) -> Vec<u8> {
        self.seed().to_vec()
    }

    fn derive_junction(&self, junction: DeriveJunction) -> Result<Self, DeriveError> {
        match junction {
            DeriveJunction::Hard(cc) => Ok(self.derive_hard(cc)?),
            DeriveJunction::Soft(_) => Err(DeriveError::SoftDeriveNotSupported),
        }
    }
}
