//! BIP39 mnemonic seed phrase support.
//!
//! Phrases use the standard English word list, but the 64-byte seed is
//! derived from the phrase *entropy* rather than from the BIP39 PBKDF2 seed.
//! That is the derivation Substrate-family networks use, and it is what
//! makes keys from the same phrase match other wallets in the ecosystem.

use bip39::{Language, Mnemonic};
use rand::RngCore;
use zeroize::Zeroizing;

use super::{CryptoError, CryptoResult};

/// The well-known development phrase.
///
/// Keys derived from it are public knowledge and must never guard real
/// funds. Parsing a derivation path with an empty base falls back to it.
pub const DEV_PHRASE: &str =
    "bottom drive obey lake curtain smoke basket hold race lonely fit walk";

/// Generate a random mnemonic with the given word count.
///
/// # Errors
/// Returns an error unless `words` is one of 12, 15, 18, 21 or 24.
pub fn generate_mnemonic(words: usize) -> CryptoResult<Mnemonic> {
    if !matches!(words, 12 | 15 | 18 | 21 | 24) {
        return Err(CryptoError::BadPhrase(format!(
            "invalid word count: {words}"
        )));
    }
    let mut entropy = Zeroizing::new(vec![0u8; words * 4 / 3]);
    rand::rngs::OsRng.fill_bytes(&mut entropy);
    Mnemonic::from_entropy_in(Language::English, &entropy)
        .map_err(|e| CryptoError::BadPhrase(e.to_string()))
}

/// Derive the 64-byte seed for a phrase and optional password.
///
/// The password participates in the seed derivation only; it is not part
/// of the phrase itself.
///
/// # Errors
/// Returns an error if the phrase fails BIP39 validation (unknown words,
/// bad checksum, wrong word count).
pub fn seed_from_phrase(phrase: &str, password: Option<&str>) -> CryptoResult<[u8; 64]> {
    let mnemonic = Mnemonic::parse_in(Language::English, phrase)
        .map_err(|e| CryptoError::BadPhrase(e.to_string()))?;
    let entropy = Zeroizing::new(mnemonic.to_entropy());
    substrate_bip39::seed_from_entropy(&entropy, password.unwrap_or(""))
        .map_err(|_| CryptoError::BadPhrase("invalid entropy length".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_word_counts() {
        for words in [12, 15, 18, 21, 24] {
            let mnemonic = generate_mnemonic(words).unwrap();
            assert_eq!(mnemonic.word_count(), words);
        }
    }

    #[test]
    fn test_generate_rejects_bad_word_count() {
        assert!(generate_mnemonic(13).is_err());
        assert!(generate_mnemonic(0).is_err());
    }

    #[test]
    fn test_dev_phrase_is_valid() {
        assert!(seed_from_phrase(DEV_PHRASE, None).is_ok());
    }

    #[test]
    fn test_seed_deterministic() {
        let a = seed_from_phrase(DEV_PHRASE, None).unwrap();
        let b = seed_from_phrase(DEV_PHRASE, None).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_password_changes_seed() {
        let plain = seed_from_phrase(DEV_PHRASE, None).unwrap();
        let salted = seed_from_phrase(DEV_PHRASE, Some("secret")).unwrap();
        assert_ne!(plain, salted);
    }

    #[test]
    fn test_empty_password_matches_none() {
        let none = seed_from_phrase(DEV_PHRASE, None).unwrap();
        let empty = seed_from_phrase(DEV_PHRASE, Some("")).unwrap();
        assert_eq!(none, empty);
    }

    #[test]
    fn test_invalid_phrase() {
        let result = seed_from_phrase("not a valid mnemonic phrase", None);
        assert!(matches!(result, Err(CryptoError::BadPhrase(_))));
    }
}
