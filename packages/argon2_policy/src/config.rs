//! Deserializable hasher configuration

use crate::{
    profiles, ParametersBuilder, PasswordError, PasswordHasher, Result, Runtime, TextEncoding,
    Variant,
};
use serde::{Deserialize, Serialize};

/// Hasher settings as they appear in an application's config file.
///
/// Every field is optional. Absent fields take their value from `profile`,
/// or from the runtime's default parameters when no profile is named.
///
/// ```json
/// { "profile": "RFC_9106_LOW_MEMORY", "time_cost": 4, "encoding": "utf-8" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HasherConfig {
    /// Name of a preset from [`crate::profiles`]
    pub profile: Option<String>,
    /// `"i"`, `"d"` or `"id"`
    pub variant: Option<Variant>,
    /// Number of passes
    pub time_cost: Option<u32>,
    /// Working memory in KiB
    pub memory_cost: Option<u32>,
    /// Number of lanes
    pub parallelism: Option<u32>,
    /// Raw hash length in bytes
    pub hash_len: Option<u32>,
    /// Generated salt length in bytes
    pub salt_len: Option<u32>,
    /// Encoding label for text passwords, e.g. `"utf-8"` or `"latin-1"`
    pub encoding: Option<String>,
}

impl HasherConfig {
    /// Parse a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::InvalidParameter`] for malformed JSON, unknown
    /// keys, or values of the wrong type (including negative numbers).
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| PasswordError::invalid_parameter("config", e.to_string()))
    }

    /// Build a hasher for `runtime`.
    ///
    /// # Errors
    ///
    /// - [`PasswordError::InvalidParameter`] for unknown profile or encoding
    ///   names and out-of-range values
    /// - [`PasswordError::UnsupportedParams`] when the resulting parallelism is
    ///   forbidden on `runtime`
    pub fn build(&self, runtime: Runtime) -> Result<PasswordHasher> {
        let base = match &self.profile {
            Some(name) => profiles::by_name(name).ok_or_else(|| {
                PasswordError::invalid_parameter("profile", format!("unknown profile `{name}`"))
            })?,
            None => profiles::default_parameters(runtime),
        };

        let encoding = match &self.encoding {
            Some(label) => TextEncoding::from_label(label).ok_or_else(|| {
                PasswordError::invalid_parameter("encoding", format!("unknown encoding `{label}`"))
            })?,
            None => TextEncoding::default(),
        };

        let mut builder = ParametersBuilder::from(base);
        if let Some(variant) = self.variant {
            builder = builder.variant(variant);
        }
        if let Some(time_cost) = self.time_cost {
            builder = builder.time_cost(time_cost);
        }
        if let Some(memory_cost) = self.memory_cost {
            builder = builder.memory_cost(memory_cost);
        }
        if let Some(parallelism) = self.parallelism {
            builder = builder.parallelism(parallelism);
        }
        if let Some(hash_len) = self.hash_len {
            builder = builder.hash_len(hash_len);
        }
        if let Some(salt_len) = self.salt_len {
            builder = builder.salt_len(salt_len);
        }

        let parameters = builder.build(runtime)?;
        Ok(PasswordHasher::configured(parameters, encoding))
    }
}

impl PasswordHasher {
    /// Hasher described by `config`.
    ///
    /// # Errors
    ///
    /// See [`HasherConfig::build`].
    pub fn from_config(config: &HasherConfig, runtime: Runtime) -> Result<Self> {
        config.build(runtime)
    }
}
