//! The key-pair capability contract and its scheme-tagged sum types.
//!
//! Exactly three signature schemes exist; a closed enum dispatches on the
//! scheme tag rather than on open-ended runtime type checks. Each scheme
//! module implements the [`Pair`] trait, and [`KeyPair`] / [`PublicKey`] /
//! [`Signature`] wrap the three implementations behind one tag.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use zeroize::Zeroizing;

use super::{ecdsa, ed25519, mnemonic, sr25519, CryptoError, CryptoResult};
use crate::address::{self, AddressError, Ss58AddressFormat};
use crate::derive::{DeriveError, DeriveJunction, PathError, SecretUri};

/// Errors from interpreting a secret URI end to end
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SecretStringError {
    /// The derivation path grammar was malformed
    #[error(transparent)]
    Path(#[from] PathError),
    /// The base secret could not produce a key pair
    #[error(transparent)]
    Crypto(#[from] CryptoError),
    /// A junction could not be applied
    #[error(transparent)]
    Derive(#[from] DeriveError),
}

/// The capability contract shared by the three key-pair schemes.
///
/// `verify` is total: it reports `false` for malformed or mismatched
/// input and never errors, so it is safe to call on untrusted wire data.
pub trait Pair: Clone + Sized {
    /// Scheme-specific public key
    type Public;
    /// Scheme-specific signature
    type Signature;

    /// Required seed length in bytes
    const SEED_LENGTH: usize;

    /// Create a pair from a seed slice.
    ///
    /// # Errors
    /// `BadSeedLength` unless the slice is exactly [`Self::SEED_LENGTH`]
    /// bytes (sr25519 additionally accepts the 64-byte expanded secret);
    /// `BadPrivateKey` if the bytes are rejected by the curve.
    fn from_seed_slice(seed: &[u8]) -> CryptoResult<Self>;

    /// The public key for this pair
    fn public(&self) -> Self::Public;

    /// Sign a message
    fn sign(&self, message: &[u8]) -> Self::Signature;

    /// Verify a signature. Total: never errors on malformed input.
    fn verify(public: &Self::Public, message: &[u8], signature: &Self::Signature) -> bool;

    /// The raw secret bytes, for persistence or interchange
    fn to_raw_vec(&self) -> Vec<u8>;

    /// Apply a single derivation junction.
    ///
    /// # Errors
    /// `SoftDeriveNotSupported` for soft junctions on schemes without
    /// soft derivation; scheme errors if the derived secret is invalid.
    fn derive_junction(&self, junction: DeriveJunction) -> Result<Self, DeriveError>;

    /// Apply a derivation path left to right. An empty path is identity.
    ///
    /// # Errors
    /// Fails on the first junction that cannot be applied.
    fn derive<I: IntoIterator<Item = DeriveJunction>>(&self, path: I) -> Result<Self, DeriveError> {
        let mut pair = self.clone();
        for junction in path {
            pair = pair.derive_junction(junction)?;
        }
        Ok(pair)
    }

    /// Create a pair from a mnemonic phrase and optional password.
    ///
    /// # Errors
    /// Fails if the phrase is not valid BIP39.
    fn from_phrase(phrase: &str, password: Option<&str>) -> CryptoResult<Self> {
        let seed = Zeroizing::new(mnemonic::seed_from_phrase(phrase, password)?);
        Self::from_seed_slice(&seed[..Self::SEED_LENGTH])
    }

    /// Create a pair from a fresh random seed drawn from `rng`.
    fn generate_with_rng<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        loop {
            let mut seed = Zeroizing::new(vec![0u8; Self::SEED_LENGTH]);
            rng.fill_bytes(&mut seed);
            // Rejection-sample: ecdsa refuses the rare invalid scalar.
            if let Ok(pair) = Self::from_seed_slice(&seed) {
                return pair;
            }
        }
    }

    /// Create a pair from a fresh random seed drawn from the OS generator.
    fn generate() -> Self {
        Self::generate_with_rng(&mut OsRng)
    }

    /// Generate a new 12-word phrase and the pair derived from it.
    ///
    /// # Errors
    /// Fails only if the freshly generated phrase cannot be re-parsed.
    fn generate_with_phrase(password: Option<&str>) -> CryptoResult<(Self, String)> {
        let phrase = mnemonic::generate_mnemonic(12)?.to_string();
        let pair = Self::from_phrase(&phrase, password)?;
        Ok((pair, phrase))
    }

    /// Interpret a secret URI: base secret, junctions, optional password.
    ///
    /// # Errors
    /// Propagates parse, construction, and derivation failures.
    fn from_string(s: &str) -> Result<Self, SecretStringError> {
        Self::from_string_with_password(s, None)
    }

    /// Like [`Pair::from_string`], with a password override.
    ///
    /// An explicit `password_override` wins over a `///password` embedded
    /// in the URI. The password only affects mnemonic bases; a `0x` raw
    /// seed ignores it.
    ///
    /// # Errors
    /// Propagates parse, construction, and derivation failures.
    fn from_string_with_password(
        s: &str,
        password_override: Option<&str>,
    ) -> Result<Self, SecretStringError> {
        let uri: SecretUri = s.parse()?;
        let password = password_override.or(uri.password.as_deref());
        let root = if let Some(stripped) = uri.phrase.strip_prefix("0x") {
            let seed = Zeroizing::new(
                hex::decode(stripped).map_err(|e| CryptoError::BadHex(e.to_string()))?,
            );
            Self::from_seed_slice(&seed)?
        } else {
            Self::from_phrase(&uri.phrase, password)?
        };
        Ok(root.derive(uri.junctions.iter().copied())?)
    }
}

/// Signature scheme tag
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Schnorr over Ristretto
    Sr25519,
    /// Ed25519
    Ed25519,
    /// ECDSA over secp256k1
    Ecdsa,
}

impl Scheme {
    /// Canonical lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sr25519 => "sr25519",
            Self::Ed25519 => "ed25519",
            Self::Ecdsa => "ecdsa",
        }
    }

    /// Public key length in bytes for this scheme
    #[must_use]
    pub const fn public_len(self) -> usize {
        match self {
            Self::Sr25519 | Self::Ed25519 => 32,
            Self::Ecdsa => ecdsa::PUBLIC_LEN,
        }
    }

    /// Signature length in bytes for this scheme
    #[must_use]
    pub const fn signature_len(self) -> usize {
        match self {
            Self::Sr25519 | Self::Ed25519 => 64,
            Self::Ecdsa => ecdsa::SIGNATURE_LEN,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A scheme-tagged key pair
#[derive(Clone)]
pub enum KeyPair {
    /// Schnorr over Ristretto
    Sr25519(sr25519::Pair),
    /// Ed25519
    Ed25519(ed25519::Pair),
    /// ECDSA over secp256k1
    Ecdsa(ecdsa::Pair),
}

impl KeyPair {
    /// Create a pair of the given scheme from a seed slice.
    ///
    /// # Errors
    /// See [`Pair::from_seed_slice`].
    pub fn from_seed(scheme: Scheme, seed: &[u8]) -> CryptoResult<Self> {
        Ok(match scheme {
            Scheme::Sr25519 => Self::Sr25519(sr25519::Pair::from_seed_slice(seed)?),
            Scheme::Ed25519 => Self::Ed25519(ed25519::Pair::from_seed_slice(seed)?),
            Scheme::Ecdsa => Self::Ecdsa(ecdsa::Pair::from_seed_slice(seed)?),
        })
    }

    /// Create a pair of the given scheme from a mnemonic phrase.
    ///
    /// # Errors
    /// See [`Pair::from_phrase`].
    pub fn from_phrase(scheme: Scheme, phrase: &str, password: Option<&str>) -> CryptoResult<Self> {
        Ok(match scheme {
            Scheme::Sr25519 => Self::Sr25519(sr25519::Pair::from_phrase(phrase, password)?),
            Scheme::Ed25519 => Self::Ed25519(ed25519::Pair::from_phrase(phrase, password)?),
            Scheme::Ecdsa => Self::Ecdsa(ecdsa::Pair::from_phrase(phrase, password)?),
        })
    }

    /// Interpret a secret URI as a pair of the given scheme.
    ///
    /// # Errors
    /// See [`Pair::from_string`].
    pub fn from_string(scheme: Scheme, s: &str) -> Result<Self, SecretStringError> {
        Self::from_string_with_password(scheme, s, None)
    }

    /// Like [`KeyPair::from_string`], with a password override.
    ///
    /// # Errors
    /// See [`Pair::from_string_with_password`].
    pub fn from_string_with_password(
        scheme: Scheme,
        s: &str,
        password_override: Option<&str>,
    ) -> Result<Self, SecretStringError> {
        Ok(match scheme {
            Scheme::Sr25519 => {
                Self::Sr25519(sr25519::Pair::from_string_with_password(s, password_override)?)
            }
            Scheme::Ed25519 => {
                Self::Ed25519(ed25519::Pair::from_string_with_password(s, password_override)?)
            }
            Scheme::Ecdsa => {
                Self::Ecdsa(ecdsa::Pair::from_string_with_password(s, password_override)?)
            }
        })
    }

    /// Create a pair of the given scheme from a fresh random seed.
    #[must_use]
    pub fn generate(scheme: Scheme) -> Self {
        Self::generate_with_rng(scheme, &mut OsRng)
    }

    /// Create a pair of the given scheme from a seed drawn from `rng`.
    pub fn generate_with_rng<R: CryptoRng + RngCore>(scheme: Scheme, rng: &mut R) -> Self {
        match scheme {
            Scheme::Sr25519 => Self::Sr25519(sr25519::Pair::generate_with_rng(rng)),
            Scheme::Ed25519 => Self::Ed25519(ed25519::Pair::generate_with_rng(rng)),
            Scheme::Ecdsa => Self::Ecdsa(ecdsa::Pair::generate_with_rng(rng)),
        }
    }

    /// Generate a new 12-word phrase and the pair derived from it.
    ///
    /// # Errors
    /// See [`Pair::generate_with_phrase`].
    pub fn generate_with_phrase(
        scheme: Scheme,
        password: Option<&str>,
    ) -> CryptoResult<(Self, String)> {
        Ok(match scheme {
            Scheme::Sr25519 => {
                let (pair, phrase) = sr25519::Pair::generate_with_phrase(password)?;
                (Self::Sr25519(pair), phrase)
            }
            Scheme::Ed25519 => {
                let (pair, phrase) = ed25519::Pair::generate_with_phrase(password)?;
                (Self::Ed25519(pair), phrase)
            }
            Scheme::Ecdsa => {
                let (pair, phrase) = ecdsa::Pair::generate_with_phrase(password)?;
                (Self::Ecdsa(pair), phrase)
            }
        })
    }

    /// The scheme tag of this pair
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        match self {
            Self::Sr25519(_) => Scheme::Sr25519,
            Self::Ed25519(_) => Scheme::Ed25519,
            Self::Ecdsa(_) => Scheme::Ecdsa,
        }
    }

    /// The tagged public key of this pair
    #[must_use]
    pub fn public(&self) -> PublicKey {
        match self {
            Self::Sr25519(pair) => PublicKey::Sr25519(pair.public()),
            Self::Ed25519(pair) => PublicKey::Ed25519(pair.public()),
            Self::Ecdsa(pair) => PublicKey::Ecdsa(pair.public()),
        }
    }

    /// Sign a message, producing a tagged signature
    #[must_use]
    pub fn sign(&self, message: &[u8]) -> Signature {
        match self {
            Self::Sr25519(pair) => Signature::Sr25519(pair.sign(message)),
            Self::Ed25519(pair) => Signature::Ed25519(pair.sign(message)),
            Self::Ecdsa(pair) => Signature::Ecdsa(pair.sign(message)),
        }
    }

    /// The raw secret bytes, for persistence or interchange
    #[must_use]
    pub fn to_raw_vec(&self) -> Vec<u8> {
        match self {
            Self::Sr25519(pair) => pair.to_raw_vec(),
            Self::Ed25519(pair) => pair.to_raw_vec(),
            Self::Ecdsa(pair) => pair.to_raw_vec(),
        }
    }

    /// Apply a derivation path left to right.
    ///
    /// # Errors
    /// Fails on the first junction the scheme cannot apply.
    pub fn derive<I: IntoIterator<Item = DeriveJunction>>(
        &self,
        path: I,
    ) -> Result<Self, DeriveError> {
        Ok(match self {
            Self::Sr25519(pair) => Self::Sr25519(pair.derive(path)?),
            Self::Ed25519(pair) => Self::Ed25519(pair.derive(path)?),
            Self::Ecdsa(pair) => Self::Ecdsa(pair.derive(path)?),
        })
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret material.
        write!(f, "KeyPair({}, {:?})", self.scheme(), self.public())
    }
}

/// Verify a tagged signature against a tagged public key.
///
/// Total: returns `false` on scheme mismatch or malformed bytes, never
/// errors, so it is safe on untrusted wire data.
#[must_use]
pub fn verify(public: &PublicKey, message: &[u8], signature: &Signature) -> bool {
    match (public, signature) {
        (PublicKey::Sr25519(p), Signature::Sr25519(s)) => sr25519::Pair::verify(p, message, s),
        (PublicKey::Ed25519(p), Signature::Ed25519(s)) => ed25519::Pair::verify(p, message, s),
        (PublicKey::Ecdsa(p), Signature::Ecdsa(s)) => ecdsa::Pair::verify(p, message, s),
        _ => false,
    }
}

/// A scheme-tagged public key
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum PublicKey {
    /// Schnorr over Ristretto
    Sr25519(sr25519::Public),
    /// Ed25519
    Ed25519(ed25519::Public),
    /// ECDSA over secp256k1 (compressed)
    Ecdsa(ecdsa::Public),
}

impl PublicKey {
    /// The scheme tag of this key
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        match self {
            Self::Sr25519(_) => Scheme::Sr25519,
            Self::Ed25519(_) => Scheme::Ed25519,
            Self::Ecdsa(_) => Scheme::Ecdsa,
        }
    }

    /// The canonical key bytes (32 bytes, or 33 for ecdsa)
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Sr25519(public) => public.as_bytes().as_slice(),
            Self::Ed25519(public) => public.as_bytes().as_slice(),
            Self::Ecdsa(public) => public.as_bytes().as_slice(),
        }
    }

    /// Convert to hex string
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }

    /// Render as an SS58 address with the default (substrate generic)
    /// network prefix.
    #[must_use]
    pub fn to_ss58check(&self) -> String {
        self.to_ss58check_with_version(Ss58AddressFormat::default())
    }

    /// Render as an SS58 address with an explicit network prefix.
    #[must_use]
    pub fn to_ss58check_with_version(&self, format: Ss58AddressFormat) -> String {
        address::encode(format, self.as_bytes())
    }

    /// Parse an SS58 address into a key of the given scheme.
    ///
    /// # Errors
    /// Base-58, checksum, and length failures from the address codec;
    /// `BadLength` if the body does not match the scheme's key size.
    pub fn from_ss58check(
        scheme: Scheme,
        address: &str,
    ) -> Result<(Self, Ss58AddressFormat), AddressError> {
        let (prefix, body) = address::decode(address)?;
        if body.len() != scheme.public_len() {
            return Err(AddressError::BadLength);
        }
        let public = match scheme {
            Scheme::Sr25519 => {
                let mut arr = [0u8; sr25519::PUBLIC_LEN];
                arr.copy_from_slice(&body);
                Self::Sr25519(sr25519::Public::from_bytes_unchecked(arr))
            }
            Scheme::Ed25519 => {
                let mut arr = [0u8; ed25519::PUBLIC_LEN];
                arr.copy_from_slice(&body);
                Self::Ed25519(ed25519::Public::from_bytes_unchecked(arr))
            }
            Scheme::Ecdsa => {
                let mut arr = [0u8; ecdsa::PUBLIC_LEN];
                arr.copy_from_slice(&body);
                Self::Ecdsa(ecdsa::Public::from_bytes_unchecked(arr))
            }
        };
        Ok((public, Ss58AddressFormat::new(prefix)?))
    }

    /// Soft-derive a child public key without any secret material.
    ///
    /// Only sr25519 supports this, and only for soft junctions: hard
    /// derivation needs the secret, and the other schemes have no public
    /// derivation at all.
    ///
    /// # Errors
    /// `HardDeriveRequiresSecret` for hard junctions on an sr25519 key;
    /// `SoftDeriveNotSupported` for ed25519/ecdsa keys.
    pub fn derive<I: IntoIterator<Item = DeriveJunction>>(
        &self,
        path: I,
    ) -> Result<Self, DeriveError> {
        match self {
            Self::Sr25519(public) => {
                let mut acc = *public;
                for junction in path {
                    match junction {
                        DeriveJunction::Soft(cc) => acc = acc.derive_soft(cc)?,
                        DeriveJunction::Hard(_) => {
                            return Err(DeriveError::HardDeriveRequiresSecret)
                        }
                    }
                }
                Ok(Self::Sr25519(acc))
            }
            Self::Ed25519(_) | Self::Ecdsa(_) => Err(DeriveError::SoftDeriveNotSupported),
        }
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ss58check())
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// A scheme-tagged signature
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Signature {
    /// Schnorr over Ristretto
    Sr25519(sr25519::Signature),
    /// Ed25519
    Ed25519(ed25519::Signature),
    /// ECDSA over secp256k1 (recoverable)
    Ecdsa(ecdsa::Signature),
}

impl Signature {
    /// The scheme tag of this signature
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        match self {
            Self::Sr25519(_) => Scheme::Sr25519,
            Self::Ed25519(_) => Scheme::Ed25519,
            Self::Ecdsa(_) => Scheme::Ecdsa,
        }
    }

    /// The raw signature bytes (64 bytes, or 65 for ecdsa)
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Sr25519(signature) => signature.as_bytes().as_slice(),
            Self::Ed25519(signature) => signature.as_bytes().as_slice(),
            Self::Ecdsa(signature) => signature.as_bytes().as_slice(),
        }
    }

    /// Rebuild a tagged signature from raw bytes.
    ///
    /// # Errors
    /// `BadSignature` unless the slice is exactly the scheme's signature
    /// length.
    pub fn from_bytes(scheme: Scheme, bytes: &[u8]) -> CryptoResult<Self> {
        if bytes.len() != scheme.signature_len() {
            return Err(CryptoError::BadSignature(format!(
                "expected {} bytes for {scheme}, got {}",
                scheme.signature_len(),
                bytes.len()
            )));
        }
        Ok(match scheme {
            Scheme::Sr25519 => {
                let mut arr = [0u8; sr25519::SIGNATURE_LEN];
                arr.copy_from_slice(bytes);
                Self::Sr25519(sr25519::Signature::from_bytes(arr))
            }
            Scheme::Ed25519 => {
                let mut arr = [0u8; ed25519::SIGNATURE_LEN];
                arr.copy_from_slice(bytes);
                Self::Ed25519(ed25519::Signature::from_bytes(arr))
            }
            Scheme::Ecdsa => {
                let mut arr = [0u8; ecdsa::SIGNATURE_LEN];
                arr.copy_from_slice(bytes);
                Self::Ecdsa(ecdsa::Signature::from_bytes(arr))
            }
        })
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::DEV_PHRASE;
    use proptest::prelude::*;

    const SCHEMES: [Scheme; 3] = [Scheme::Sr25519, Scheme::Ed25519, Scheme::Ecdsa];

    #[test]
    fn test_from_seed_deterministic() {
        let seed = [3u8; 32];
        for scheme in SCHEMES {
            let a = KeyPair::from_seed(scheme, &seed).unwrap();
            let b = KeyPair::from_seed(scheme, &seed).unwrap();
            assert_eq!(a.public(), b.public());
        }
    }

    #[test]
    fn test_random_pairs_differ() {
        for scheme in SCHEMES {
            let a = KeyPair::generate(scheme);
            let b = KeyPair::generate(scheme);
            assert_ne!(a.public(), b.public());
        }
    }

    #[test]
    fn test_generate_with_phrase_reproducible() {
        for scheme in SCHEMES {
            let (pair, phrase) = KeyPair::generate_with_phrase(scheme, None).unwrap();
            let rebuilt = KeyPair::from_phrase(scheme, &phrase, None).unwrap();
            assert_eq!(pair.public(), rebuilt.public());
        }
    }

    #[test]
    fn test_sign_verify_all_schemes() {
        for scheme in SCHEMES {
            let pair = KeyPair::from_seed(scheme, &[1u8; 32]).unwrap();
            let signature = pair.sign(b"payload");
            assert!(verify(&pair.public(), b"payload", &signature));
            assert!(!verify(&pair.public(), b"other", &signature));
        }
    }

    #[test]
    fn test_scheme_mismatch_verifies_false() {
        let sr = KeyPair::from_seed(Scheme::Sr25519, &[1u8; 32]).unwrap();
        let ed = KeyPair::from_seed(Scheme::Ed25519, &[1u8; 32]).unwrap();
        let signature = sr.sign(b"payload");
        assert!(!verify(&ed.public(), b"payload", &signature));
    }

    #[test]
    fn test_hex_seed_uri() {
        let pair = KeyPair::from_string(
            Scheme::Sr25519,
            "0x9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60",
        )
        .unwrap();
        assert_eq!(
            pair.public().to_hex(),
            "44a996beb1eef7bdcab976ab6d2ca26104834164ecf28fb375600576fcc6eb0f"
        );
    }

    #[test]
    fn test_default_phrase_when_base_empty() {
        let implicit = KeyPair::from_string(Scheme::Sr25519, "//Alice").unwrap();
        let explicit =
            KeyPair::from_string(Scheme::Sr25519, &format!("{DEV_PHRASE}//Alice")).unwrap();
        assert_eq!(implicit.public(), explicit.public());
    }

    #[test]
    fn test_dev_hard_alice_vector() {
        let pair = KeyPair::from_string(Scheme::Sr25519, "//Alice").unwrap();
        assert_eq!(
            pair.public().to_hex(),
            "d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d"
        );
    }

    #[test]
    fn test_dev_soft_alice_vector() {
        let pair = KeyPair::from_string(Scheme::Sr25519, "/Alice").unwrap();
        assert_eq!(
            pair.public().to_hex(),
            "d6c71059dbbe9ad2b0ed3f289738b800836eb425544ce694825285b958ca755e"
        );
    }

    #[test]
    fn test_junctions_accumulate_in_order() {
        let chained = KeyPair::from_string(Scheme::Sr25519, "//A//B").unwrap();
        let stepwise = KeyPair::from_string(Scheme::Sr25519, "//A")
            .unwrap()
            .derive([DeriveJunction::from("B").harden()])
            .unwrap();
        assert_eq!(chained.public(), stepwise.public());
        let reversed = KeyPair::from_string(Scheme::Sr25519, "//B//A").unwrap();
        assert_ne!(chained.public(), reversed.public());
    }

    #[test]
    fn test_password_override_matches_embedded() {
        let embedded = KeyPair::from_string_with_password(
            Scheme::Sr25519,
            "//Alice///password",
            Some("password"),
        )
        .unwrap();
        let explicit = KeyPair::from_string_with_password(
            Scheme::Sr25519,
            &format!("{DEV_PHRASE}//Alice"),
            Some("password"),
        )
        .unwrap();
        assert_eq!(embedded.public(), explicit.public());

        let unsalted = KeyPair::from_string(Scheme::Sr25519, "//Alice").unwrap();
        assert_ne!(embedded.public(), unsalted.public());
    }

    #[test]
    fn test_override_wins_over_embedded() {
        let overridden = KeyPair::from_string_with_password(
            Scheme::Sr25519,
            "//Alice///wrong",
            Some("password"),
        )
        .unwrap();
        let direct =
            KeyPair::from_string_with_password(Scheme::Sr25519, "//Alice", Some("password"))
                .unwrap();
        assert_eq!(overridden.public(), direct.public());
    }

    #[test]
    fn test_password_ignored_for_hex_seed() {
        let uri = "0x9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";
        let plain = KeyPair::from_string(Scheme::Sr25519, uri).unwrap();
        let salted =
            KeyPair::from_string_with_password(Scheme::Sr25519, uri, Some("password")).unwrap();
        assert_eq!(plain.public(), salted.public());
    }

    #[test]
    fn test_address_matches_implicit_dev_phrase() {
        let derived = KeyPair::from_string(Scheme::Sr25519, &format!("{DEV_PHRASE}/Alice"))
            .unwrap();
        let implicit = KeyPair::from_string(Scheme::Sr25519, "/Alice").unwrap();
        assert_eq!(
            derived.public().to_ss58check(),
            implicit.public().to_ss58check()
        );
    }

    #[test]
    fn test_soft_path_commutes_with_public_derive() {
        let root = KeyPair::from_string(Scheme::Sr25519, DEV_PHRASE).unwrap();
        let junction = DeriveJunction::from("Alice");
        let via_pair = root.derive([junction]).unwrap().public();
        let via_public = root.public().derive([junction]).unwrap();
        assert_eq!(via_pair, via_public);
    }

    #[test]
    fn test_hard_on_public_rejected() {
        let hard = DeriveJunction::from("Alice").harden();
        for scheme in SCHEMES {
            let public = KeyPair::from_seed(scheme, &[1u8; 32]).unwrap().public();
            assert!(public.derive([hard]).is_err());
        }
    }

    #[test]
    fn test_soft_on_non_sr25519_public_rejected() {
        let soft = DeriveJunction::from("Alice");
        for scheme in [Scheme::Ed25519, Scheme::Ecdsa] {
            let public = KeyPair::from_seed(scheme, &[1u8; 32]).unwrap().public();
            assert!(matches!(
                public.derive([soft]),
                Err(DeriveError::SoftDeriveNotSupported)
            ));
        }
    }

    #[test]
    fn test_soft_path_on_ed25519_pair_fails() {
        let pair = KeyPair::from_seed(Scheme::Ed25519, &[1u8; 32]).unwrap();
        assert!(matches!(
            pair.derive([DeriveJunction::from("Alice")]),
            Err(DeriveError::SoftDeriveNotSupported)
        ));
    }

    #[test]
    fn test_empty_path_is_identity() {
        for scheme in SCHEMES {
            let pair = KeyPair::from_seed(scheme, &[1u8; 32]).unwrap();
            let derived = pair.derive([]).unwrap();
            assert_eq!(pair.public(), derived.public());
        }
    }

    #[test]
    fn test_hard_derivation_diverges_per_scheme() {
        for scheme in SCHEMES {
            let pair = KeyPair::from_seed(scheme, &[1u8; 32]).unwrap();
            let one = pair.derive([DeriveJunction::hard(1u32)]).unwrap();
            let two = pair.derive([DeriveJunction::hard(2u32)]).unwrap();
            assert_ne!(one.public(), two.public());
        }
    }

    #[test]
    fn test_signature_bytes_roundtrip() {
        for scheme in SCHEMES {
            let pair = KeyPair::from_seed(scheme, &[1u8; 32]).unwrap();
            let signature = pair.sign(b"payload");
            let rebuilt = Signature::from_bytes(scheme, signature.as_bytes()).unwrap();
            assert_eq!(signature, rebuilt);
            assert!(Signature::from_bytes(scheme, &signature.as_bytes()[1..]).is_err());
        }
    }

    #[test]
    fn test_ss58_public_roundtrip() {
        for scheme in SCHEMES {
            let public = KeyPair::from_seed(scheme, &[1u8; 32]).unwrap().public();
            let address = public.to_ss58check();
            let (parsed, format) = PublicKey::from_ss58check(scheme, &address).unwrap();
            assert_eq!(public, parsed);
            assert_eq!(format, Ss58AddressFormat::default());
        }
    }

    #[test]
    fn test_public_serde_roundtrip() {
        let public = KeyPair::from_seed(Scheme::Ecdsa, &[1u8; 32]).unwrap().public();
        let json = serde_json::to_string(&public).unwrap();
        let parsed: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(public, parsed);
    }

    proptest! {
        #[test]
        fn prop_sign_verify_roundtrip(
            seed in any::<[u8; 32]>(),
            message in proptest::collection::vec(any::<u8>(), 0..256),
        ) {
            for scheme in SCHEMES {
                // The rare invalid ecdsa scalar is skipped, not failed.
                if let Ok(pair) = KeyPair::from_seed(scheme, &seed) {
                    let signature = pair.sign(&message);
                    prop_assert!(verify(&pair.public(), &message, &signature));
                }
            }
        }

        #[test]
        fn prop_bit_flip_rejected(
            seed in any::<[u8; 32]>(),
            message in proptest::collection::vec(any::<u8>(), 1..128),
            bit in 0usize..512,
        ) {
            for scheme in SCHEMES {
                if let Ok(pair) = KeyPair::from_seed(scheme, &seed) {
                    let signature = pair.sign(&message);
                    let mut bytes = signature.as_bytes().to_vec();
                    let index = bit % (bytes.len() * 8);
                    bytes[index / 8] ^= 1 << (index % 8);
                    let tampered = Signature::from_bytes(scheme, &bytes).unwrap();
                    prop_assert!(!verify(&pair.public(), &message, &tampered));
                }
            }
        }
    }
}
