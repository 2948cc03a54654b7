//! Cryptographic key management for Substrate-compatible chains.
//!
//! Uses audited, production-grade crates:
//! - schnorrkel for sr25519 (Schnorr over Ristretto) signatures
//! - ed25519-dalek for ed25519 signatures
//! - k256 for ECDSA over secp256k1
//! - Blake2b for derivation preimages and pre-signing digests
//! - bip39 + substrate-bip39 for mnemonic seed phrases

pub mod ecdsa;
pub mod ed25519;
pub mod sr25519;

mod hash;
mod mnemonic;
mod pair;

pub use hash::{blake2b_256, blake2b_512};
pub use mnemonic::{generate_mnemonic, seed_from_phrase, DEV_PHRASE};
pub use pair::{verify, KeyPair, Pair, PublicKey, Scheme, SecretStringError, Signature};

use thiserror::Error;

/// Cryptographic errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Seed bytes are not the length the scheme requires
    #[error("bad seed length: expected {expected} bytes, got {got}")]
    BadSeedLength {
        /// Required seed length in bytes
        expected: usize,
        /// Length actually supplied
        got: usize,
    },
    /// Secret key rejected by the underlying curve
    #[error("bad private key: {0}")]
    BadPrivateKey(String),
    /// Invalid public key format
    #[error("bad public key: {0}")]
    BadPublicKey(String),
    /// Invalid signature format
    #[error("bad signature: {0}")]
    BadSignature(String),
    /// Invalid mnemonic phrase
    #[error("bad mnemonic phrase: {0}")]
    BadPhrase(String),
    /// Invalid hex-encoded seed
    #[error("bad hex seed: {0}")]
    BadHex(String),
}

/// Result type for crypto operations
pub type CryptoResult<T> = Result<T, CryptoError>;
