//! Hashing parameter value type and its validating builder

use crate::{PasswordError, Result, Runtime, Variant};
use serde::Serialize;

/// Argon2 version 1.3, the current format generation
pub const ARGON2_VERSION: u32 = 0x13;

/// Argon2 version 1.0, still accepted for legacy hashes
pub const ARGON2_LEGACY_VERSION: u32 = 0x10;

/// Immutable Argon2 hashing configuration.
///
/// Two values are equal only when every field matches; this is what decides
/// whether a stored hash needs to be regenerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Parameters {
    variant: Variant,
    version: u32,
    time_cost: u32,
    memory_cost: u32,
    parallelism: u32,
    hash_len: u32,
    salt_len: u32,
}

impl Parameters {
    /// Start building a configuration
    #[must_use]
    pub fn builder() -> ParametersBuilder {
        ParametersBuilder::default()
    }

    /// Construct without validation, for compile-time presets and decoded hashes
    pub(crate) const fn from_parts(
        variant: Variant,
        version: u32,
        time_cost: u32,
        memory_cost: u32,
        parallelism: u32,
        hash_len: u32,
        salt_len: u32,
    ) -> Self {
        Self {
            variant,
            version,
            time_cost,
            memory_cost,
            parallelism,
            hash_len,
            salt_len,
        }
    }

    /// Argon2 variant
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Argon2 version number (19 for the current format)
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Number of passes
    #[must_use]
    pub const fn time_cost(&self) -> u32 {
        self.time_cost
    }

    /// Working memory in KiB
    #[must_use]
    pub const fn memory_cost(&self) -> u32 {
        self.memory_cost
    }

    /// Number of lanes; changes the resulting hash
    #[must_use]
    pub const fn parallelism(&self) -> u32 {
        self.parallelism
    }

    /// Raw hash length in bytes
    #[must_use]
    pub const fn hash_len(&self) -> u32 {
        self.hash_len
    }

    /// Length of generated salts in bytes
    #[must_use]
    pub const fn salt_len(&self) -> u32 {
        self.salt_len
    }

    /// Copy with a different parallelism, used when clamping defaults
    pub(crate) const fn with_parallelism(mut self, parallelism: u32) -> Self {
        self.parallelism = parallelism;
        self
    }
}

/// Builder for [`Parameters`].
///
/// `variant` defaults to Argon2id and `version` to 19. Costs and lengths have
/// no default and must be set.
#[derive(Debug, Clone, Default)]
pub struct ParametersBuilder {
    variant: Option<Variant>,
    version: Option<u32>,
    time_cost: Option<u32>,
    memory_cost: Option<u32>,
    parallelism: Option<u32>,
    hash_len: Option<u32>,
    salt_len: Option<u32>,
}

impl From<Parameters> for ParametersBuilder {
    fn from(params: Parameters) -> Self {
        Self {
            variant: Some(params.variant),
            version: Some(params.version),
            time_cost: Some(params.time_cost),
            memory_cost: Some(params.memory_cost),
            parallelism: Some(params.parallelism),
            hash_len: Some(params.hash_len),
            salt_len: Some(params.salt_len),
        }
    }
}

impl ParametersBuilder {
    /// Set the Argon2 variant
    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Set the Argon2 version
    #[must_use]
    pub fn version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }

    /// Set the number of passes
    #[must_use]
    pub fn time_cost(mut self, time_cost: u32) -> Self {
        self.time_cost = Some(time_cost);
        self
    }

    /// Set the working memory in KiB
    #[must_use]
    pub fn memory_cost(mut self, memory_cost: u32) -> Self {
        self.memory_cost = Some(memory_cost);
        self
    }

    /// Set the number of lanes
    #[must_use]
    pub fn parallelism(mut self, parallelism: u32) -> Self {
        self.parallelism = Some(parallelism);
        self
    }

    /// Set the raw hash length in bytes
    #[must_use]
    pub fn hash_len(mut self, hash_len: u32) -> Self {
        self.hash_len = Some(hash_len);
        self
    }

    /// Set the generated salt length in bytes
    #[must_use]
    pub fn salt_len(mut self, salt_len: u32) -> Self {
        self.salt_len = Some(salt_len);
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    ///
    /// - [`PasswordError::InvalidParameter`] when a required field is absent,
    ///   zero, or the version is neither 16 nor 19
    /// - [`PasswordError::UnsupportedParams`] when `runtime` is constrained and
    ///   parallelism is not 1
    pub fn build(self, runtime: Runtime) -> Result<Parameters> {
        let version = self.version.unwrap_or(ARGON2_VERSION);
        if version != ARGON2_VERSION && version != ARGON2_LEGACY_VERSION {
            return Err(PasswordError::invalid_parameter(
                "version",
                format!("unsupported Argon2 version {version}"),
            ));
        }

        let params = Parameters {
            variant: self.variant.unwrap_or_default(),
            version,
            time_cost: required("time_cost", self.time_cost)?,
            memory_cost: required("memory_cost", self.memory_cost)?,
            parallelism: required("parallelism", self.parallelism)?,
            hash_len: required("hash_len", self.hash_len)?,
            salt_len: required("salt_len", self.salt_len)?,
        };

        runtime.check_parallelism(params.parallelism)?;
        Ok(params)
    }
}

fn required(field: &'static str, value: Option<u32>) -> Result<u32> {
    match value {
        None => Err(PasswordError::invalid_parameter(field, "missing")),
        Some(0) => Err(PasswordError::invalid_parameter(field, "must be at least 1")),
        Some(value) => Ok(value),
    }
}
