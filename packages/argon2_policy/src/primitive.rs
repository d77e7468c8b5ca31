//! Boundary to the Argon2 key-derivation primitive

use crate::codec::{self, EncodedHash};
use crate::params::{ARGON2_LEGACY_VERSION, ARGON2_VERSION};
use crate::{Parameters, PasswordError, Result};
use argon2::Argon2;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// The memory-hard computation behind [`crate::PasswordHasher`].
///
/// Implementations must be safe to call concurrently.
pub trait Primitive: Send + Sync {
    /// Hash `secret` with `salt` under `params` and return the encoded hash.
    ///
    /// # Errors
    ///
    /// [`PasswordError::Hashing`] when no hash can be produced.
    fn compute(&self, secret: &[u8], salt: &[u8], params: &Parameters) -> Result<String>;

    /// Check `secret` against an already decoded hash.
    ///
    /// # Errors
    ///
    /// [`PasswordError::VerifyMismatch`] for a wrong secret,
    /// [`PasswordError::Verification`] for any other failure.
    fn verify(&self, stored: &EncodedHash, secret: &[u8]) -> Result<()>;
}

/// [`Primitive`] backed by the RustCrypto `argon2` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Primitive;

impl Argon2Primitive {
    /// Run Argon2 under `params` into a buffer of `hash_len` bytes.
    ///
    /// Failures are plain strings; callers pick the error variant.
    fn derive(
        secret: &[u8],
        salt: &[u8],
        params: &Parameters,
        hash_len: usize,
    ) -> std::result::Result<Zeroizing<Vec<u8>>, String> {
        let argon_params = argon2::Params::new(
            params.memory_cost(),
            params.time_cost(),
            params.parallelism(),
            Some(hash_len),
        )
        .map_err(|e| format!("Invalid Argon2 parameters: {e}"))?;

        let version = match params.version() {
            ARGON2_VERSION => argon2::Version::V0x13,
            ARGON2_LEGACY_VERSION => argon2::Version::V0x10,
            other => return Err(format!("unsupported Argon2 version {other}")),
        };

        let argon2 = Argon2::new(params.variant().algorithm(), version, argon_params);

        let mut output = Zeroizing::new(vec![0u8; hash_len]);
        argon2
            .hash_password_into(secret, salt, &mut output)
            .map_err(|e| format!("Argon2 hashing failed: {e}"))?;
        Ok(output)
    }
}

impl Primitive for Argon2Primitive {
    fn compute(&self, secret: &[u8], salt: &[u8], params: &Parameters) -> Result<String> {
        let hash_len = usize::try_from(params.hash_len())
            .map_err(|_| PasswordError::hashing("hash length exceeds address space"))?;

        let output = Self::derive(secret, salt, params, hash_len).map_err(PasswordError::hashing)?;
        Ok(codec::encode(params, salt, &output))
    }

    fn verify(&self, stored: &EncodedHash, secret: &[u8]) -> Result<()> {
        // Costs, version and lengths come from the stored hash, not from this instance.
        let expected = stored.raw_hash();
        let computed = Self::derive(secret, stored.salt(), stored.parameters(), expected.len())
            .map_err(PasswordError::verification)?;

        if bool::from(computed.as_slice().ct_eq(expected)) {
            Ok(())
        } else {
            Err(PasswordError::VerifyMismatch)
        }
    }
}
