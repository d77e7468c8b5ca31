//! Argon2 variants and header-prefix dispatch

use crate::{PasswordError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of the prefix inspected by [`variant_of_header`]
pub const HEADER_PREFIX_LEN: usize = 9;

/// Prefix table used to dispatch verification before a full parse.
///
/// `$argon2id` has no trailing `$` so every entry is exactly nine bytes.
const HEADER_TABLE: [(&[u8; HEADER_PREFIX_LEN], Variant); 3] = [
    (b"$argon2i$", Variant::I),
    (b"$argon2d$", Variant::D),
    (b"$argon2id", Variant::ID),
];

/// Argon2 family selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Argon2i, data-independent memory access
    I,
    /// Argon2d, data-dependent memory access
    D,
    /// Argon2id, hybrid (recommended)
    #[default]
    ID,
}

impl Variant {
    /// All variants in table order
    pub const ALL: [Variant; 3] = [Variant::I, Variant::D, Variant::ID];

    /// PHC algorithm identifier, e.g. `argon2id`
    #[must_use]
    pub const fn ident(self) -> &'static str {
        match self {
            Self::I => "argon2i",
            Self::D => "argon2d",
            Self::ID => "argon2id",
        }
    }

    /// Parse a PHC algorithm identifier. Only the exact lower-case tokens match.
    #[must_use]
    pub fn from_ident(ident: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.ident() == ident)
    }

    pub(crate) fn algorithm(self) -> argon2::Algorithm {
        match self {
            Self::I => argon2::Algorithm::Argon2i,
            Self::D => argon2::Algorithm::Argon2d,
            Self::ID => argon2::Algorithm::Argon2id,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ident())
    }
}

/// Determine the variant of an encoded hash from its first nine bytes only.
///
/// # Errors
///
/// Returns [`PasswordError::InvalidHash`] when the prefix is none of
/// `$argon2i$`, `$argon2d$` or `$argon2id`, including inputs shorter than
/// nine bytes.
pub fn variant_of_header(hash: &[u8]) -> Result<Variant> {
    let prefix = hash
        .get(..HEADER_PREFIX_LEN)
        .ok_or_else(|| PasswordError::invalid_hash("hash is shorter than its header"))?;

    HEADER_TABLE
        .iter()
        .find(|(header, _)| header.as_slice() == prefix)
        .map(|(_, variant)| *variant)
        .ok_or_else(|| PasswordError::invalid_hash("unrecognized hash header"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn header_dispatch() {
        assert_eq!(variant_of_header(b"$argon2i$v=19$").ok(), Some(Variant::I));
        assert_eq!(variant_of_header(b"$argon2d$v=19$").ok(), Some(Variant::D));
        assert_eq!(variant_of_header(b"$argon2id$v=19$").ok(), Some(Variant::ID));
    }

    #[test]
    fn unknown_or_short_header_is_invalid_hash() {
        for input in [
            &b"$bcrypt$2b$10$abcdefghijk"[..],
            b"$argon2",
            b"",
            b"tiger",
            b"$ARGON2ID$v=19$",
            b"$argon2x$v=19$",
        ] {
            let err = variant_of_header(input).expect_err("header must be rejected");
            assert_eq!(err.kind(), ErrorKind::InvalidHash);
        }
    }

    #[test]
    fn idents_round_trip() {
        for variant in Variant::ALL {
            assert_eq!(Variant::from_ident(variant.ident()), Some(variant));
        }
        assert_eq!(Variant::from_ident("Argon2id"), None);
        assert_eq!(Variant::default(), Variant::ID);
    }

    #[test]
    fn serde_uses_short_names() {
        let json = serde_json::to_string(&Variant::ID).expect("serialize");
        assert_eq!(json, "\"id\"");
        let parsed: Variant = serde_json::from_str("\"i\"").expect("deserialize");
        assert_eq!(parsed, Variant::I);
    }
}
