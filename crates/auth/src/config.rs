use std::fmt;

use tokenforge_core::types::REDACTED_VALUE;
use validator::{Validate, ValidationError};

use crate::error::ConfigError;

/// Env var holding the keystore file location.
pub const ENV_KEYSTORE_PATH: &str = "JWT_KEYSTORE_PATH";
/// Env var holding the secret that unlocks the keystore.
pub const ENV_KEYSTORE_PASSWORD: &str = "JWT_KEYSTORE_PASSWORD";
/// Env var naming the key pair entry inside the keystore.
pub const ENV_KEYSTORE_KEYPAIR_ALIAS: &str = "JWT_KEYSTORE_KEYPAIR_ALIAS";

/// Location and unlock secret of the PKCS#12 keystore holding the token
/// signing key pair.
///
/// Read once at startup and passed by reference into
/// [`KeyMaterial::load`](crate::keystore::KeyMaterial::load). Never reloaded.
#[derive(Clone, Validate)]
pub struct KeystoreConfig {
    /// Filesystem path of the keystore file.
    #[validate(custom(function = "not_blank"))]
    pub path: String,
    /// Secret unlocking the keystore. Used byte for byte, never trimmed.
    #[validate(custom(function = "not_blank"))]
    pub password: String,
    /// Alias of the key pair entry to use.
    #[validate(custom(function = "not_blank"))]
    pub keypair_alias: String,
}

impl KeystoreConfig {
    /// Load keystore configuration from environment variables.
    ///
    /// | Env Var                      | Required | Default |
    /// |------------------------------|----------|---------|
    /// | `JWT_KEYSTORE_PATH`          | **yes**  | --      |
    /// | `JWT_KEYSTORE_PASSWORD`      | **yes**  | --      |
    /// | `JWT_KEYSTORE_KEYPAIR_ALIAS` | **yes**  | --      |
    ///
    /// Path and alias are trimmed; the password is kept exactly as given. A
    /// blank (empty or whitespace-only) value counts as missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load keystore configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).unwrap_or_default();
        let read_trimmed = |key: &str| read(key).trim().to_string();

        let config = Self {
            path: read_trimmed(ENV_KEYSTORE_PATH),
            password: read(ENV_KEYSTORE_PASSWORD),
            keypair_alias: read_trimmed(ENV_KEYSTORE_KEYPAIR_ALIAS),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that every field is present and not blank.
    ///
    /// Reports all missing keys at once, by env var name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Validate::validate(self).map_err(|errors| {
            let mut missing: Vec<&'static str> = errors
                .field_errors()
                .keys()
                .filter_map(|field| env_key(field))
                .collect();
            missing.sort_unstable();
            ConfigError::Missing(missing)
        })
    }
}

impl fmt::Debug for KeystoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeystoreConfig")
            .field("path", &self.path)
            .field("password", &REDACTED_VALUE)
            .field("keypair_alias", &self.keypair_alias)
            .finish()
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn env_key(field: &str) -> Option<&'static str> {
    match field {
        "path" => Some(ENV_KEYSTORE_PATH),
        "password" => Some(ENV_KEYSTORE_PASSWORD),
        "keypair_alias" => Some(ENV_KEYSTORE_KEYPAIR_ALIAS),
        _ => None,
    }
}
