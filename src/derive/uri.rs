//! The textual secret-URI grammar.
//!
//! `<base>( "/" <soft> | "//" <hard> )* ( "///" <password> )?`
//!
//! The base is a mnemonic phrase, a `0x`-prefixed raw seed, or empty (the
//! well-known development phrase). What the base *means* is decided at key
//! construction; this parser only splits the string.

use std::str::FromStr;

use super::{DeriveJunction, PathError};
use crate::crypto::DEV_PHRASE;

/// A parsed secret URI: base phrase, ordered junctions, optional password.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SecretUri {
    /// The base secret: a mnemonic phrase or a `0x`-hex seed. An empty
    /// base in the input is already replaced by [`DEV_PHRASE`] here.
    pub phrase: String,
    /// Derivation junctions in application order (leftmost first)
    pub junctions: Vec<DeriveJunction>,
    /// Password from a `///` suffix, if any
    pub password: Option<String>,
}

impl FromStr for SecretUri {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The password is everything after the first `///` and may itself
        // contain slashes.
        let (rest, password) = match s.find("///") {
            Some(pos) => (&s[..pos], Some(s[pos + 3..].to_string())),
            None => (s, None),
        };

        let (phrase, mut path) = match rest.find('/') {
            Some(pos) => (&rest[..pos], &rest[pos..]),
            None => (rest, ""),
        };

        let mut junctions = Vec::new();
        while !path.is_empty() {
            let hard = path.starts_with("//");
            let marker_len = if hard { 2 } else { 1 };
            let tail = &path[marker_len..];
            let body_end = tail.find('/').unwrap_or(tail.len());
            let body = &tail[..body_end];
            if body.is_empty() {
                return Err(PathError::EmptyJunction);
            }
            let junction = DeriveJunction::from(body);
            junctions.push(if hard { junction.harden() } else { junction });
            path = &tail[body_end..];
        }

        let phrase = if phrase.is_empty() {
            DEV_PHRASE.to_string()
        } else {
            phrase.to_string()
        };

        Ok(Self {
            phrase,
            junctions,
            password,
        })
    }
}
