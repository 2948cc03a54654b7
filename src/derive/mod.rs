//! Hierarchical key derivation paths.
//!
//! A derivation path is an ordered list of junctions applied left to
//! right. Junctions come in two flavours: *soft* (child public keys are
//! computable from the parent public key) and *hard* (one-way, requires
//! the secret). The textual form is the `phrase//hard/soft///password`
//! mini-language shared across the ecosystem's wallets and tools.

mod junction;
mod uri;

pub use junction::{DeriveJunction, JUNCTION_ID_LEN};
pub use uri::SecretUri;

use thiserror::Error;

use crate::crypto::CryptoError;

/// Errors from parsing the textual derivation-path grammar
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// A junction marker with no body, e.g. a trailing `/` or `//`
    #[error("malformed derivation path: empty junction")]
    EmptyJunction,
}

/// Errors from applying a derivation junction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeriveError {
    /// The scheme or entity has no soft derivation
    #[error("soft key derivation is not supported here")]
    SoftDeriveNotSupported,
    /// Hard derivation needs the secret key, which a bare public key lacks
    #[error("hard key derivation requires the secret key")]
    HardDeriveRequiresSecret,
    /// The derived secret was rejected by the underlying curve
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}
