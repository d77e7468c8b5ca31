//! High-level password hasher
//!
//! Carries one validated [`Parameters`] so the checks run once per
//! configuration instead of once per hash.

use crate::codec::{self, EncodedHash};
use crate::primitive::{Argon2Primitive, Primitive};
use crate::secret::{Secret, TextEncoding};
use crate::{
    entropy, profiles, variant_of_header, Parameters, ParametersBuilder, PasswordError,
    Result, Runtime, Variant,
};
use std::sync::Arc;
use tracing::{debug, trace};

/// Hashes and verifies passwords under one Argon2 configuration.
///
/// Argon2id with a random salt is the default. Verification accepts any of
/// the three variants as long as the hash is correctly encoded.
///
/// Cloning is cheap; a configured hasher is meant to be kept and shared.
#[derive(Debug)]
pub struct PasswordHasher<P = Argon2Primitive> {
    parameters: Parameters,
    encoding: TextEncoding,
    primitive: Arc<P>,
}

impl<P> Clone for PasswordHasher<P> {
    fn clone(&self) -> Self {
        Self {
            parameters: self.parameters,
            encoding: self.encoding,
            primitive: Arc::clone(&self.primitive),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(Runtime::detect())
    }
}

impl PasswordHasher {
    /// Hasher with the default profile for `runtime`
    #[must_use]
    pub fn new(runtime: Runtime) -> Self {
        Self::configured(profiles::default_parameters(runtime), TextEncoding::default())
    }

    /// Start from the defaults for `runtime` and override individual fields
    #[must_use]
    pub fn builder(runtime: Runtime) -> HasherBuilder {
        HasherBuilder {
            parameters: ParametersBuilder::from(profiles::default_parameters(runtime)),
            encoding: TextEncoding::default(),
            runtime,
        }
    }

    /// Hasher for previously validated `parameters`, e.g. a profile.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::UnsupportedParams`] when `runtime` is
    /// constrained and the parameters use more than one lane.
    pub fn from_parameters(parameters: Parameters, runtime: Runtime) -> Result<Self> {
        runtime.check_parallelism(parameters.parallelism())?;
        Ok(Self::configured(parameters, TextEncoding::default()))
    }

    pub(crate) fn configured(parameters: Parameters, encoding: TextEncoding) -> Self {
        debug!(
            variant = %parameters.variant(),
            time_cost = parameters.time_cost(),
            memory_cost = parameters.memory_cost(),
            parallelism = parameters.parallelism(),
            encoding = encoding.name(),
            "password hasher configured"
        );
        Self {
            parameters,
            encoding,
            primitive: Arc::new(Argon2Primitive),
        }
    }
}

impl<P: Primitive> PasswordHasher<P> {
    /// Same configuration, different primitive
    #[must_use]
    pub fn with_primitive<Q: Primitive>(self, primitive: Q) -> PasswordHasher<Q> {
        PasswordHasher {
            parameters: self.parameters,
            encoding: self.encoding,
            primitive: Arc::new(primitive),
        }
    }

    /// Current parameters
    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Variant used for new hashes
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.parameters.variant()
    }

    /// Number of passes
    #[must_use]
    pub fn time_cost(&self) -> u32 {
        self.parameters.time_cost()
    }

    /// Working memory in KiB
    #[must_use]
    pub fn memory_cost(&self) -> u32 {
        self.parameters.memory_cost()
    }

    /// Number of lanes
    #[must_use]
    pub fn parallelism(&self) -> u32 {
        self.parameters.parallelism()
    }

    /// Raw hash length in bytes
    #[must_use]
    pub fn hash_len(&self) -> u32 {
        self.parameters.hash_len()
    }

    /// Generated salt length in bytes
    #[must_use]
    pub fn salt_len(&self) -> u32 {
        self.parameters.salt_len()
    }

    /// Encoding applied to text passwords
    #[must_use]
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Hash `password` with a fresh random salt and return the encoded hash.
    ///
    /// # Errors
    ///
    /// - [`PasswordError::PasswordEncoding`] when a text password does not fit
    ///   the configured encoding
    /// - [`PasswordError::Hashing`] when the primitive fails
    pub fn hash<'a>(&self, password: impl Into<Secret<'a>>) -> Result<String> {
        let secret = password.into().to_bytes(self.encoding)?;
        self.hash_secret(&secret, None)
    }

    /// Hash `password` with a caller-chosen salt.
    ///
    /// Only for deterministic tests and interoperability checks; reusing a
    /// salt across passwords defeats its purpose.
    ///
    /// # Errors
    ///
    /// Same as [`PasswordHasher::hash`].
    pub fn hash_with_salt<'a>(
        &self,
        password: impl Into<Secret<'a>>,
        salt: &[u8],
    ) -> Result<String> {
        let secret = password.into().to_bytes(self.encoding)?;
        self.hash_secret(&secret, Some(salt))
    }

    pub(crate) fn hash_secret(&self, secret: &[u8], salt: Option<&[u8]>) -> Result<String> {
        let generated;
        let salt = match salt {
            Some(salt) => salt,
            None => {
                let len = usize::try_from(self.parameters.salt_len())
                    .map_err(|_| PasswordError::hashing("salt length exceeds address space"))?;
                generated = entropy::random_bytes(len);
                &generated
            }
        };

        self.primitive
            .compute(secret, salt, &self.parameters)
            .map_err(|e| match e {
                PasswordError::Hashing(_) => e,
                other => PasswordError::hashing(other.to_string()),
            })
    }

    /// Verify that `password` matches `hash`.
    ///
    /// The variant is read from the first nine bytes of `hash`; anything that
    /// is not an Argon2 header is rejected before the hash is parsed further.
    /// Returns `Ok(true)` on success and never `Ok(false)`.
    ///
    /// # Errors
    ///
    /// - [`PasswordError::InvalidHash`] when `hash` is not a well-formed
    ///   encoded hash
    /// - [`PasswordError::VerifyMismatch`] when `password` is wrong
    /// - [`PasswordError::Verification`] for any other primitive failure
    /// - [`PasswordError::PasswordEncoding`] as for [`PasswordHasher::hash`]
    pub fn verify<'a>(
        &self,
        hash: impl AsRef<[u8]>,
        password: impl Into<Secret<'a>>,
    ) -> Result<bool> {
        let stored = dispatch(hash.as_ref())?;
        let secret = password.into().to_bytes(self.encoding)?;
        self.verify_dispatched(&stored, &secret)
    }

    pub(crate) fn verify_secret(&self, hash: &[u8], secret: &[u8]) -> Result<bool> {
        let stored = dispatch(hash)?;
        self.verify_dispatched(&stored, secret)
    }

    fn verify_dispatched(&self, stored: &EncodedHash, secret: &[u8]) -> Result<bool> {
        trace!(variant = %stored.variant(), "dispatching verification");
        self.primitive.verify(stored, secret)?;
        Ok(true)
    }

    /// Whether `hash` was produced with parameters other than the current ones.
    ///
    /// Does not check the password; call it after a successful
    /// [`PasswordHasher::verify`] and rehash while the cleartext is at hand.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::InvalidHash`] when `hash` cannot be parsed.
    pub fn check_needs_rehash(&self, hash: impl AsRef<[u8]>) -> Result<bool> {
        let stored = codec::extract_parameters(as_text(hash.as_ref())?)?;
        let needs_rehash = stored != self.parameters;
        trace!(needs_rehash, "checked stored hash parameters");
        Ok(needs_rehash)
    }
}

/// Header sniff first, then the full parse, which must name the same variant.
fn dispatch(hash: &[u8]) -> Result<EncodedHash> {
    let variant = variant_of_header(hash)?;
    let decoded = codec::decode(as_text(hash)?)?;
    if decoded.variant() != variant {
        return Err(PasswordError::invalid_hash(format!(
            "header names {variant} but hash decodes as {}",
            decoded.variant()
        )));
    }
    Ok(decoded)
}

/// Character checks are left to [`codec::decode`].
fn as_text(hash: &[u8]) -> Result<&str> {
    std::str::from_utf8(hash).map_err(|_| PasswordError::invalid_hash("hash is not text"))
}

/// Builder for [`PasswordHasher`], seeded from the runtime's defaults
#[derive(Debug, Clone)]
pub struct HasherBuilder {
    parameters: ParametersBuilder,
    encoding: TextEncoding,
    runtime: Runtime,
}

impl HasherBuilder {
    /// Set the Argon2 variant; only change for legacy interoperability
    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.parameters = self.parameters.variant(variant);
        self
    }

    /// Set the number of passes
    #[must_use]
    pub fn time_cost(mut self, time_cost: u32) -> Self {
        self.parameters = self.parameters.time_cost(time_cost);
        self
    }

    /// Set the working memory in KiB
    #[must_use]
    pub fn memory_cost(mut self, memory_cost: u32) -> Self {
        self.parameters = self.parameters.memory_cost(memory_cost);
        self
    }

    /// Set the number of lanes
    #[must_use]
    pub fn parallelism(mut self, parallelism: u32) -> Self {
        self.parameters = self.parameters.parallelism(parallelism);
        self
    }

    /// Set the raw hash length in bytes
    #[must_use]
    pub fn hash_len(mut self, hash_len: u32) -> Self {
        self.parameters = self.parameters.hash_len(hash_len);
        self
    }

    /// Set the generated salt length in bytes
    #[must_use]
    pub fn salt_len(mut self, salt_len: u32) -> Self {
        self.parameters = self.parameters.salt_len(salt_len);
        self
    }

    /// Set the encoding for text passwords
    #[must_use]
    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    ///
    /// See [`ParametersBuilder::build`].
    pub fn build(self) -> Result<PasswordHasher> {
        let parameters = self.parameters.build(self.runtime)?;
        Ok(PasswordHasher::configured(parameters, self.encoding))
    }
}
