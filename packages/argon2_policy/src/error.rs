//! Error taxonomy for the password hashing policy layer

use thiserror::Error;

/// Password hashing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    /// A configuration field is missing or outside the accepted range
    #[error("Invalid parameter `{field}`: {reason}")]
    InvalidParameter {
        /// Name of the offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// The configuration is well formed but forbidden on this runtime
    #[error("within constrained runtimes `parallelism` must be set to 1 (got {parallelism})")]
    UnsupportedParams {
        /// Requested parallelism
        parallelism: u32,
    },

    /// The encoded hash does not follow the modular Argon2 format
    #[error("Invalid encoded hash: {0}")]
    InvalidHash(String),

    /// The hash is well formed but was not produced from this password
    #[error("The password does not match the supplied hash")]
    VerifyMismatch,

    /// Verification failed for a reason other than a wrong password
    #[error("Verification error: {0}")]
    Verification(String),

    /// The primitive could not produce a hash
    #[error("Hashing error: {0}")]
    Hashing(String),

    /// A text password has characters the configured encoding cannot represent
    #[error("Password cannot be encoded as {encoding}")]
    PasswordEncoding {
        /// Name of the configured encoding
        encoding: &'static str,
    },
}

/// Discriminant of [`PasswordError`], for callers that only branch on the kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`PasswordError::InvalidParameter`]
    InvalidParameter,
    /// See [`PasswordError::UnsupportedParams`]
    UnsupportedParams,
    /// See [`PasswordError::InvalidHash`]
    InvalidHash,
    /// See [`PasswordError::VerifyMismatch`]
    VerifyMismatch,
    /// See [`PasswordError::Verification`]
    Verification,
    /// See [`PasswordError::Hashing`]
    Hashing,
    /// See [`PasswordError::PasswordEncoding`]
    PasswordEncoding,
}

impl PasswordError {
    /// Create an `InvalidParameter` error
    #[must_use]
    pub fn invalid_parameter(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    /// Create an `InvalidHash` error
    #[must_use]
    pub fn invalid_hash(reason: impl Into<String>) -> Self {
        Self::InvalidHash(reason.into())
    }

    /// Create a `Verification` error
    #[must_use]
    pub fn verification(reason: impl Into<String>) -> Self {
        Self::Verification(reason.into())
    }

    /// Create a `Hashing` error
    #[must_use]
    pub fn hashing(reason: impl Into<String>) -> Self {
        Self::Hashing(reason.into())
    }

    /// The kind of this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            Self::UnsupportedParams { .. } => ErrorKind::UnsupportedParams,
            Self::InvalidHash(_) => ErrorKind::InvalidHash,
            Self::VerifyMismatch => ErrorKind::VerifyMismatch,
            Self::Verification(_) => ErrorKind::Verification,
            Self::Hashing(_) => ErrorKind::Hashing,
            Self::PasswordEncoding { .. } => ErrorKind::PasswordEncoding,
        }
    }

    /// Whether this is a plain wrong-password outcome
    #[must_use]
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::VerifyMismatch)
    }
}

/// Result type for password hashing operations
pub type Result<T> = std::result::Result<T, PasswordError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(
            PasswordError::invalid_hash("x").kind(),
            ErrorKind::InvalidHash
        );
        assert_eq!(PasswordError::VerifyMismatch.kind(), ErrorKind::VerifyMismatch);
        assert!(PasswordError::VerifyMismatch.is_mismatch());
        assert!(!PasswordError::verification("corrupt").is_mismatch());
    }

    #[test]
    fn unsupported_params_message_names_parallelism() {
        let err = PasswordError::UnsupportedParams { parallelism: 4 };
        assert_eq!(
            err.to_string(),
            "within constrained runtimes `parallelism` must be set to 1 (got 4)"
        );
    }
}
