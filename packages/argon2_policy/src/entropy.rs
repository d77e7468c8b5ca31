//! Salt generation

use rand::RngCore;

/// Fill a fresh buffer of `len` bytes from the thread-local CSPRNG.
///
/// The generator is seeded from the operating system; this is the only place
/// the crate consumes entropy.
#[must_use]
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    rand::rng().fill_bytes(&mut bytes);
    bytes
}
