//! Modular encoded-hash format
//!
//! `$argon2<variant>$v=<version>$m=<memory>,t=<time>,p=<lanes>$<salt>$<hash>`
//! with salt and hash in standard base64 without padding. Decoding is strict:
//! stored hashes are untrusted input and nothing is normalised or repaired.

use crate::params::{ARGON2_LEGACY_VERSION, ARGON2_VERSION};
use crate::{Parameters, PasswordError, Result, Variant};
use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};

/// Argon2 needs at least this many KiB per lane
pub const MIN_MEMORY_PER_LANE: u32 = 8;

/// Upper bound on lanes accepted by Argon2
pub const MAX_PARALLELISM: u32 = 0x00FF_FFFF;

/// A parsed encoded hash.
///
/// The salt and hash lengths of [`EncodedHash::parameters`] are taken from
/// the decoded bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedHash {
    parameters: Parameters,
    salt: Vec<u8>,
    raw_hash: Vec<u8>,
}

impl EncodedHash {
    /// Variant named in the header
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.parameters.variant()
    }

    /// Parameters the hash was produced with
    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Decoded salt bytes
    #[must_use]
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Decoded raw hash bytes
    #[must_use]
    pub fn raw_hash(&self) -> &[u8] {
        &self.raw_hash
    }
}

/// Serialize parameters, salt and raw hash into the modular format
#[must_use]
pub fn encode(params: &Parameters, salt: &[u8], raw_hash: &[u8]) -> String {
    format!(
        "${}$v={}$m={},t={},p={}${}${}",
        params.variant().ident(),
        params.version(),
        params.memory_cost(),
        params.time_cost(),
        params.parallelism(),
        STANDARD_NO_PAD.encode(salt),
        STANDARD_NO_PAD.encode(raw_hash),
    )
}

/// Parse an encoded hash.
///
/// # Errors
///
/// Returns [`PasswordError::InvalidHash`] when the text deviates from the
/// format in any way: unknown variant, missing or reordered segments,
/// non-canonical or out-of-range numbers, or invalid base64.
pub fn decode(encoded: &str) -> Result<EncodedHash> {
    if !encoded.is_ascii() {
        return Err(PasswordError::invalid_hash("hash contains non-ASCII characters"));
    }

    let segments: Vec<&str> = encoded.split('$').collect();
    let [leading, ident, version, costs, salt, hash] = segments.as_slice() else {
        return Err(PasswordError::invalid_hash(format!(
            "expected 5 `$`-separated segments, found {}",
            segments.len().saturating_sub(1)
        )));
    };

    if !leading.is_empty() {
        return Err(PasswordError::invalid_hash("hash must start with `$`"));
    }

    let variant = Variant::from_ident(ident)
        .ok_or_else(|| PasswordError::invalid_hash(format!("unknown variant `{ident}`")))?;

    let version = key_value(version, "v")?;
    if version != ARGON2_VERSION && version != ARGON2_LEGACY_VERSION {
        return Err(PasswordError::invalid_hash(format!(
            "unsupported version {version}"
        )));
    }

    let mut costs = costs.split(',');
    let (Some(m), Some(t), Some(p), None) = (costs.next(), costs.next(), costs.next(), costs.next())
    else {
        return Err(PasswordError::invalid_hash(
            "parameter segment must be exactly `m=..,t=..,p=..`",
        ));
    };
    let memory_cost = key_value(m, "m")?;
    let time_cost = key_value(t, "t")?;
    let parallelism = key_value(p, "p")?;

    if time_cost < 1 {
        return Err(PasswordError::invalid_hash("time cost must be at least 1"));
    }
    if !(1..=MAX_PARALLELISM).contains(&parallelism) {
        return Err(PasswordError::invalid_hash(format!(
            "parallelism {parallelism} out of range"
        )));
    }
    if u64::from(memory_cost) < u64::from(MIN_MEMORY_PER_LANE) * u64::from(parallelism) {
        return Err(PasswordError::invalid_hash(format!(
            "memory cost {memory_cost} below minimum for {parallelism} lanes"
        )));
    }

    let salt = base64_segment(salt, "salt")?;
    let raw_hash = base64_segment(hash, "hash")?;

    let parameters = Parameters::from_parts(
        variant,
        version,
        time_cost,
        memory_cost,
        parallelism,
        byte_len(&raw_hash, "hash")?,
        byte_len(&salt, "salt")?,
    );

    Ok(EncodedHash {
        parameters,
        salt,
        raw_hash,
    })
}

/// Parameters of an encoded hash, for rehash decisions.
///
/// # Errors
///
/// Same as [`decode`].
pub fn extract_parameters(encoded: &str) -> Result<Parameters> {
    decode(encoded).map(|decoded| decoded.parameters)
}

fn key_value(segment: &str, key: &str) -> Result<u32> {
    let value = segment
        .strip_prefix(key)
        .and_then(|rest| rest.strip_prefix('='))
        .ok_or_else(|| PasswordError::invalid_hash(format!("expected `{key}=` in `{segment}`")))?;
    decimal(value, key)
}

/// Plain decimal: digits only, no sign, no leading zeros
fn decimal(value: &str, key: &str) -> Result<u32> {
    let canonical = !value.is_empty()
        && value.bytes().all(|b| b.is_ascii_digit())
        && (value == "0" || !value.starts_with('0'));
    if !canonical {
        return Err(PasswordError::invalid_hash(format!(
            "`{key}` is not a decimal number"
        )));
    }
    value
        .parse()
        .map_err(|_| PasswordError::invalid_hash(format!("`{key}` is out of range")))
}

fn base64_segment(segment: &str, what: &str) -> Result<Vec<u8>> {
    if segment.is_empty() {
        return Err(PasswordError::invalid_hash(format!("{what} segment is empty")));
    }
    STANDARD_NO_PAD
        .decode(segment)
        .map_err(|e| PasswordError::invalid_hash(format!("{what} is not valid base64: {e}")))
}

fn byte_len(bytes: &[u8], what: &str) -> Result<u32> {
    u32::try_from(bytes.len())
        .map_err(|_| PasswordError::invalid_hash(format!("{what} is too long")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{profiles, ErrorKind, ParametersBuilder, Runtime};
    use proptest::prelude::*;

    const SAMPLE: &str = "$argon2id$v=19$m=65536,t=3,p=4$c29tZXNhbHRzb21lc2FsdA$\
                          aGFzaGhhc2hoYXNoaGFzaGhhc2hoYXNoaGFzaGhhc2g";

    fn assert_invalid(input: &str) {
        let err = decode(input).expect_err(input);
        assert_eq!(err.kind(), ErrorKind::InvalidHash, "{input}");
    }

    #[test]
    fn decodes_sample() {
        let decoded = decode(SAMPLE).expect("valid hash");
        let params = decoded.parameters();
        assert_eq!(decoded.variant(), Variant::ID);
        assert_eq!(params.version(), 19);
        assert_eq!(params.memory_cost(), 65536);
        assert_eq!(params.time_cost(), 3);
        assert_eq!(params.parallelism(), 4);
        assert_eq!(decoded.salt(), b"somesaltsomesalt");
        assert_eq!(params.salt_len(), 16);
        assert_eq!(params.hash_len(), 32);
        assert_eq!(*params, profiles::RFC_9106_LOW_MEMORY);
    }

    #[test]
    fn encodes_fixed_field_order() {
        let salt = b"somesaltsomesalt";
        let hash = b"hashhashhashhashhashhashhashhash";
        assert_eq!(encode(&profiles::RFC_9106_LOW_MEMORY, salt, hash), SAMPLE);
    }

    #[test]
    fn rejects_structural_errors() {
        for input in [
            "",
            "$",
            "tiger",
            "$bcrypt$2b$10$abcdefghijklmnopqrstuv",
            "$argon2x$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaA",
            "$Argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaA",
            "argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaA",
            "x$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaA",
            "$argon2id$v=19$m=8,t=1,p=1$aGFzaA",
            "$argon2id$v=19$m=8,t=1,p=1$",
            "$argon2id$v=19$m=8,t=1,p=1",
            "$argon2id$v=19$m=8,t=1",
            "$argon2id$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaA",
            "$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaA$extra",
            "$argon2id$v=19$m=8,t=1,p=1$$aGFzaA",
            "$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$",
        ] {
            assert_invalid(input);
        }
    }

    #[test]
    fn rejects_reordered_or_extra_parameters() {
        for costs in ["t=1,m=8,p=1", "m=8,p=1,t=1", "m=8,t=1", "m=8,t=1,p=1,keyid=a", "m=8;t=1;p=1"] {
            assert_invalid(&format!("$argon2id$v=19${costs}$c2FsdHNhbHQ$aGFzaA"));
        }
    }

    #[test]
    fn rejects_non_canonical_numbers() {
        for costs in [
            "m=+8,t=1,p=1",
            "m=-8,t=1,p=1",
            "m= 8,t=1,p=1",
            "m=08,t=1,p=1",
            "m=8,t=,p=1",
            "m=8,t=1.0,p=1",
            "m=8,t=x,p=1",
            "m=4294967296,t=1,p=1",
        ] {
            assert_invalid(&format!("$argon2id$v=19${costs}$c2FsdHNhbHQ$aGFzaA"));
        }
    }

    #[test]
    fn rejects_out_of_range_numbers() {
        for (version, costs) in [
            ("v=18", "m=8,t=1,p=1"),
            ("v=0", "m=8,t=1,p=1"),
            ("v=19", "m=8,t=0,p=1"),
            ("v=19", "m=8,t=1,p=0"),
            ("v=19", "m=8,t=1,p=2"),
            ("v=19", "m=4294967295,t=1,p=16777216"),
        ] {
            assert_invalid(&format!("$argon2id${version}${costs}$c2FsdHNhbHQ$aGFzaA"));
        }
    }

    #[test]
    fn accepts_legacy_version() {
        let params = extract_parameters("$argon2i$v=16$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaA")
            .expect("version 16 is valid");
        assert_eq!(params.version(), 16);
        assert_eq!(params.variant(), Variant::I);
    }

    #[test]
    fn rejects_bad_base64() {
        for (salt, hash) in [
            ("c2FsdHNhbHQ=", "aGFzaA"),
            ("c2FsdHNhbHQ", "aGFzaA=="),
            ("c2FsdH*hbHQ", "aGFzaA"),
            ("c2FsdHNhbHQ", "aGFz-A"),
            ("c2FsdHNhbHQ", "aGFzaB"),
            ("c", "aGFzaA"),
        ] {
            assert_invalid(&format!("$argon2id$v=19$m=8,t=1,p=1${salt}${hash}"));
        }
    }

    #[test]
    fn rejects_non_ascii() {
        assert_invalid("$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaä");
    }

    proptest! {
        #[test]
        fn encode_then_decode_is_identity(
            variant in prop::sample::select(Variant::ALL.to_vec()),
            legacy in any::<bool>(),
            time_cost in 1u32..=u32::MAX,
            parallelism in 1u32..=64,
            extra_memory in 0u32..1_000_000,
            salt in prop::collection::vec(any::<u8>(), 1..64),
            hash in prop::collection::vec(any::<u8>(), 1..128),
        ) {
            let params = ParametersBuilder::default()
                .variant(variant)
                .version(if legacy { ARGON2_LEGACY_VERSION } else { ARGON2_VERSION })
                .time_cost(time_cost)
                .memory_cost(parallelism * MIN_MEMORY_PER_LANE + extra_memory)
                .parallelism(parallelism)
                .hash_len(u32::try_from(hash.len()).expect("small"))
                .salt_len(u32::try_from(salt.len()).expect("small"))
                .build(Runtime::Native)
                .expect("valid parameters");

            let decoded = decode(&encode(&params, &salt, &hash)).expect("round trip");
            prop_assert_eq!(decoded.parameters(), &params);
            prop_assert_eq!(decoded.salt(), salt.as_slice());
            prop_assert_eq!(decoded.raw_hash(), hash.as_slice());
        }

        #[test]
        fn decode_never_panics(input in "\\PC*") {
            let _ = decode(&input);
        }
    }
}
