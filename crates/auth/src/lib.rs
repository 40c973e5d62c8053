//! Authentication server startup library.
//!
//! - [`config`] -- keystore configuration from the environment.
//! - [`keystore`] -- the token signing key pair, loaded once from PKCS#12.
//! - [`password`] -- Argon2id credential hashing and principal verification.
//! - [`error`] -- fatal startup errors.

pub mod config;
pub mod error;
pub mod keystore;
pub mod password;

pub use config::KeystoreConfig;
pub use error::{ConfigError, KeyMaterialError, KeyMaterialErrorKind, StartupError};
pub use keystore::KeyMaterial;
