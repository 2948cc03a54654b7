//! Schnorr signatures over Ristretto ("sr25519").
//!
//! The default account scheme of the target networks. Unlike ed25519 and
//! ecdsa it supports *soft* derivation: a child key whose public key can be
//! computed from the parent public key alone, without ever seeing a secret.
//!
//! All signatures commit to the `b"substrate"` signing context and sign the
//! raw message (the underlying primitive accepts variable-length input).

use schnorrkel::derive::{ChainCode, Derivation};
use schnorrkel::{ExpansionMode, Keypair, MiniSecretKey, SecretKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::pair::Pair as PairT;
use super::{CryptoError, CryptoResult};
use crate::derive::{DeriveError, DeriveJunction};

/// Context tag every sr25519 signature in the ecosystem commits to
const SIGNING_CTX: &[u8] = b"substrate";

/// Seed length in bytes (a mini secret key)
pub const SEED_LEN: usize = 32;
/// Public key length in bytes (a compressed Ristretto point)
pub const PUBLIC_LEN: usize = 32;
/// Signature length in bytes
pub const SIGNATURE_LEN: usize = 64;

/// An sr25519 public key
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Public([u8; PUBLIC_LEN]);

impl Public {
    /// Create from raw bytes
    ///
    /// # Errors
    /// Returns an error if the bytes are not a valid compressed Ristretto
    /// point.
    pub fn from_bytes(bytes: [u8; PUBLIC_LEN]) -> CryptoResult<Self> {
        schnorrkel::PublicKey::from_bytes(&bytes)
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

    /// Soft-derive a child public key without any secret material.
    ///
    /// This is the public half of soft derivation: the same chain code
    /// applied to the matching secret pair yields a pair whose public key
    /// equals the result of this call.
    ///
    /// # Errors
    /// Returns an error if the stored bytes are not a valid point.
    pub fn derive_soft(&self, chain_code: [u8; 32]) -> CryptoResult<Self> {
        let public = schnorrkel::PublicKey::from_bytes(&self.0)
            .map_err(|e| CryptoError::BadPublicKey(e.to_string()))?;
        let (derived, _) = public.derived_key_simple(ChainCode(chain_code), &[]);
        Ok(Self(derived.to_bytes()))
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

/// A 64-byte sr25519 signature
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

/// An sr25519 key pair
#[derive(Clone)]
pub struct Pair(Keypair);

impl Pair {
    /// Create a pair from a 32-byte mini-secret seed.
    ///
    /// # Panics
    /// Never panics; every 32-byte string is a valid mini secret.
    #[must_use]
    pub fn from_seed(seed: &[u8; SEED_LEN]) -> Self {
        let mini = MiniSecretKey::from_bytes(seed).expect("32 bytes is a valid mini secret");
        Self(mini.expand_to_keypair(ExpansionMode::Ed25519))
    }

    /// Hard derivation: an unlinkable child pair.
    ///
    /// The child public key bears no computable relation to the parent's.
    #[must_use]
    pub fn derive_hard(&self, chain_code: [u8; 32]) -> Self {
        let (mini, _) = self
            .0
            .secret
            .hard_derive_mini_secret_key(Some(ChainCode(chain_code)), b"");
        Self(mini.expand_to_keypair(ExpansionMode::Ed25519))
    }

    /// Soft derivation: a child linkable to the parent public key.
    #[must_use]
    pub fn derive_soft(&self, chain_code: [u8; 32]) -> Self {
        let (derived, _) = self.0.derived_key_simple(ChainCode(chain_code), &[]);
        Self(derived)
    }
}

impl PairT for Pair {
    type Public = Public;
    type Signature = Signature;

    const SEED_LENGTH: usize = SEED_LEN;

    /// Accepts a 32-byte mini secret or the 64-byte expanded ed25519-format
    /// secret used for raw key interchange.
    fn from_seed_slice(seed: &[u8]) -> CryptoResult<Self> {
        match seed.len() {
            SEED_LEN => {
                let mut arr = [0u8; SEED_LEN];
                arr.copy_from_slice(seed);
                Ok(Self::from_seed(&arr))
            }
            64 => {
                let secret = SecretKey::from_ed25519_bytes(seed)
                    .map_err(|e| CryptoError::BadPrivateKey(e.to_string()))?;
                Ok(Self(secret.to_keypair()))
            }
            got => Err(CryptoError::BadSeedLength {
                expected: SEED_LEN,
                got,
            }),
        }
    }

    fn public(&self) -> Public {
        Public(self.0.public.to_bytes())
    }

    fn sign(&self, message: &[u8]) -> Signature {
        Signature(self.0.sign_simple(SIGNING_CTX, message).to_bytes())
    }

    fn verify(public: &Public, message: &[u8], signature: &Signature) -> bool {
        match (
            schnorrkel::PublicKey::from_bytes(&public.0),
            schnorrkel::Signature::from_bytes(&signature.0),
        ) {
            (Ok(pk), Ok(sig)) => pk.verify_simple(SIGNING_CTX, message, &sig).is_ok(),
            _ => false,
        }
    }

    fn to_raw_vec(&self) -> Vec<u8> {
        self.0.secret.to_ed25519_bytes().to_vec()
    }

    fn derive_junction(&self, junction: DeriveJunction) -> Result<Self, DeriveError> {
        Ok(match junction {
            DeriveJunction::Soft(cc) => self.derive_soft(cc),
            DeriveJunction::Hard(cc) => self.derive_hard(cc),
        })
    }
}
