//! Argon2 password hashing policy
//!
//! Owns the parameter model, the modular encoded-hash format, variant dispatch
//! on verification and the decision when a stored hash must be regenerated.
//! The memory-hard computation itself sits behind [`Primitive`].
//!
//! ```
//! use argon2_policy::{profiles, PasswordHasher, Runtime};
//!
//! let hasher = PasswordHasher::from_parameters(profiles::CHEAPEST, Runtime::detect())?;
//! let stored = hasher.hash("correct battery horse")?;
//!
//! assert!(hasher.verify(&stored, "correct battery horse")?);
//! assert!(!hasher.check_needs_rehash(&stored)?);
//! # Ok::<(), argon2_policy::PasswordError>(())
//! ```

#![forbid(unsafe_code)]

pub mod async_result;
pub mod codec;
pub mod config;
pub mod entropy;
pub mod error;
pub mod hasher;
pub mod params;
pub mod primitive;
pub mod profiles;
pub mod runtime;
pub mod secret;
pub mod variant;

pub use async_result::AsyncPasswordResult;
pub use codec::{decode, encode, extract_parameters, EncodedHash};
pub use config::HasherConfig;
pub use error::{ErrorKind, PasswordError, Result};
pub use hasher::{HasherBuilder, PasswordHasher};
pub use params::{Parameters, ParametersBuilder, ARGON2_VERSION};
pub use primitive::{Argon2Primitive, Primitive};
pub use runtime::Runtime;
pub use secret::{Secret, TextEncoding};
pub use variant::{variant_of_header, Variant};
