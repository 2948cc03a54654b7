//! # Keyloom
//!
//! Multi-scheme key management for Substrate-compatible chains.
//!
//! ## Architecture
//!
//! Four layers, bottom up:
//! - **Derivation grammar**: the `phrase//hard/soft///password` secret-URI
//!   mini-language and its junction chain codes
//! - **Key pairs**: sr25519, ed25519, and ECDSA/secp256k1 behind one
//!   capability contract, tagged by scheme
//! - **Derivation engines**: hard derivation everywhere, soft derivation
//!   on sr25519 (including on bare public keys)
//! - **SS58 addresses**: checksummed, network-prefixed base-58 rendering
//!   of public keys
//!
//! ## Interoperability
//!
//! Every byte layout here (junction chain codes, HDKD preimages, address
//! checksums) is shared with the rest of the network and reproduces the
//! ecosystem's published test vectors exactly.

#![forbid(unsafe_code)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rust_2018_idioms
)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod address;
pub mod crypto;
pub mod derive;
pub mod signer;

pub use address::{decode as ss58_decode, encode as ss58_encode, AddressError, Ss58AddressFormat};
pub use crypto::{
    verify, CryptoError, CryptoResult, KeyPair, Pair, PublicKey, Scheme, SecretStringError,
    Signature, DEV_PHRASE,
};
pub use derive::{DeriveError, DeriveJunction, PathError, SecretUri};
pub use signer::{Signer, SignerError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
