//! Password input and text encodings

use crate::{PasswordError, Result};
use zeroize::Zeroizing;

/// Encoding applied to text passwords before hashing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextEncoding {
    /// UTF-8
    #[default]
    Utf8,
    /// ISO-8859-1; code points above U+00FF are rejected
    Latin1,
    /// 7-bit ASCII
    Ascii,
}

impl TextEncoding {
    /// Canonical name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin-1",
            Self::Ascii => "ascii",
        }
    }

    /// Resolve an encoding label such as `utf8`, `latin1` or `ISO-8859-1`
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "utf-8" | "utf8" => Some(Self::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" | "l1" => Some(Self::Latin1),
            "ascii" | "us-ascii" => Some(Self::Ascii),
            _ => None,
        }
    }

    /// Encode `text`; the buffer is wiped on drop.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::PasswordEncoding`] when `text` contains a
    /// character this encoding cannot represent.
    pub fn encode(self, text: &str) -> Result<Zeroizing<Vec<u8>>> {
        let unencodable = || PasswordError::PasswordEncoding {
            encoding: self.name(),
        };
        match self {
            Self::Utf8 => Ok(Zeroizing::new(text.as_bytes().to_vec())),
            Self::Ascii if text.is_ascii() => Ok(Zeroizing::new(text.as_bytes().to_vec())),
            Self::Ascii => Err(unencodable()),
            Self::Latin1 => {
                let mut bytes = Zeroizing::new(Vec::with_capacity(text.len()));
                for c in text.chars() {
                    let byte = u8::try_from(u32::from(c)).map_err(|_| unencodable())?;
                    bytes.push(byte);
                }
                Ok(bytes)
            }
        }
    }
}

/// A password, either text to be encoded or raw bytes used as is
#[derive(Clone, Copy)]
pub enum Secret<'a> {
    /// Text, encoded with the hasher's [`TextEncoding`]
    Text(&'a str),
    /// Bytes passed to the primitive unchanged
    Bytes(&'a [u8]),
}

impl Secret<'_> {
    pub(crate) fn to_bytes(self, encoding: TextEncoding) -> Result<Zeroizing<Vec<u8>>> {
        match self {
            Self::Text(text) => encoding.encode(text),
            Self::Bytes(bytes) => Ok(Zeroizing::new(bytes.to_vec())),
        }
    }
}

impl std::fmt::Debug for Secret<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(_) => f.write_str("Secret::Text(..)"),
            Self::Bytes(_) => f.write_str("Secret::Bytes(..)"),
        }
    }
}

impl<'a> From<&'a str> for Secret<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for Secret<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a [u8]> for Secret<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Secret<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Secret<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::Bytes(bytes)
    }
}
