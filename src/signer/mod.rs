//! Account-checked signing glue.
//!
//! The rest of the client signs through a [`Signer`]: a key pair bound to
//! the account it is expected to own. Payloads are SCALE-encoded before
//! signing, so what goes on the wire is exactly what was signed.

use codec::Encode;
use thiserror::Error;

use crate::crypto::{self, KeyPair, PublicKey, Signature};

/// Signing errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignerError {
    /// The wrapped key pair does not own the requested account
    #[error("cannot sign: key pair does not match the requested account")]
    AccountNotFound,
}

/// A key pair bound to the account it signs for.
pub struct Signer {
    pair: KeyPair,
    account: PublicKey,
}

impl Signer {
    /// Wrap a key pair, taking its own public key as the account.
    #[must_use]
    pub fn new(pair: KeyPair) -> Self {
        let account = pair.public();
        Self { pair, account }
    }

    /// Wrap a key pair with an explicitly expected account.
    ///
    /// Signing will fail until the pair actually owns that account; this
    /// exists so a caller can bind the account up front and let the check
    /// happen at signing time.
    #[must_use]
    pub const fn for_account(pair: KeyPair, account: PublicKey) -> Self {
        Self { pair, account }
    }

    /// The account this signer signs for
    #[must_use]
    pub const fn account(&self) -> &PublicKey {
        &self.account
    }

    /// SCALE-encode a payload and sign the encoded bytes.
    ///
    /// # Errors
    /// `AccountNotFound` if the key pair's public key does not byte-match
    /// the expected account.
    pub fn sign<T: Encode>(&self, payload: &T) -> Result<Signature, SignerError> {
        if self.pair.public() != self.account {
            return Err(SignerError::AccountNotFound);
        }
        tracing::trace!(account = %self.account, "signing payload");
        Ok(payload.using_encoded(|bytes| self.pair.sign(bytes)))
    }

    /// Verify a signature over a SCALE-encoded payload.
    ///
    /// Pure and total: returns `false` on any mismatch, never errors.
    #[must_use]
    pub fn verify<T: Encode>(account: &PublicKey, payload: &T, signature: &Signature) -> bool {
        payload.using_encoded(|bytes| crypto::verify(account, bytes, signature))
    }
}
