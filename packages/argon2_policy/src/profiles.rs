//! Named parameter presets

use crate::params::ARGON2_VERSION;
use crate::{Parameters, Runtime, Variant};

/// RFC 9106 first recommendation: 2 GiB of memory, one pass
pub const RFC_9106_HIGH_MEMORY: Parameters =
    Parameters::from_parts(Variant::ID, ARGON2_VERSION, 1, 2_097_152, 4, 32, 16);

/// RFC 9106 second recommendation for memory-constrained deployments: 64 MiB, three passes
pub const RFC_9106_LOW_MEMORY: Parameters =
    Parameters::from_parts(Variant::ID, ARGON2_VERSION, 3, 65_536, 4, 32, 16);

/// Defaults used before the RFC 9106 profiles were adopted
pub const PRE_21_2: Parameters =
    Parameters::from_parts(Variant::ID, ARGON2_VERSION, 2, 102_400, 8, 16, 16);

/// Smallest configuration the primitive accepts. Tests only.
pub const CHEAPEST: Parameters = Parameters::from_parts(Variant::ID, ARGON2_VERSION, 1, 8, 1, 4, 8);

const BY_NAME: [(&str, Parameters); 4] = [
    ("RFC_9106_HIGH_MEMORY", RFC_9106_HIGH_MEMORY),
    ("RFC_9106_LOW_MEMORY", RFC_9106_LOW_MEMORY),
    ("PRE_21_2", PRE_21_2),
    ("CHEAPEST", CHEAPEST),
];

/// Default parameters for `runtime`: the low-memory RFC profile, single lane
/// when threads are unavailable.
#[must_use]
pub fn default_parameters(runtime: Runtime) -> Parameters {
    let parallelism = runtime.default_parallelism(RFC_9106_LOW_MEMORY.parallelism());
    RFC_9106_LOW_MEMORY.with_parallelism(parallelism)
}

/// Look a profile up by its constant name, ignoring ASCII case
#[must_use]
pub fn by_name(name: &str) -> Option<Parameters> {
    BY_NAME
        .iter()
        .find(|(profile, _)| profile.eq_ignore_ascii_case(name))
        .map(|(_, params)| *params)
}
