//! Startup error types.
//!
//! Every variant here is fatal: the process must not go on to serve requests
//! and nothing is retried. Messages name paths, aliases and env vars but never
//! the keystore password or any key material.

/// Keystore configuration is incomplete.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing or empty configuration: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

/// Coarse classification of [`KeyMaterialError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMaterialErrorKind {
    /// Configuration incomplete or keystore file missing/unreadable.
    Configuration,
    /// Wrong password or corrupt container.
    Decryption,
    /// Alias absent, or the entry is not a usable key pair.
    Lookup,
}

/// Failure to provision the token signing key pair.
#[derive(Debug, thiserror::Error)]
pub enum KeyMaterialError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Keystore file '{path}' could not be read: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Keystore '{path}' could not be opened (wrong password or corrupt file)")]
    Decryption { path: String },

    #[error("Alias '{alias}' not found in keystore '{path}'")]
    AliasNotFound { path: String, alias: String },

    #[error("Entry '{alias}' in keystore '{path}' is not a key pair")]
    NotAKeyPair { path: String, alias: String },

    #[error("Entry '{alias}' in keystore '{path}' does not hold an RSA private key")]
    UnsupportedKey { path: String, alias: String },
}

impl KeyMaterialError {
    pub fn kind(&self) -> KeyMaterialErrorKind {
        match self {
            KeyMaterialError::Config(_) | KeyMaterialError::Unreadable { .. } => {
                KeyMaterialErrorKind::Configuration
            }
            KeyMaterialError::Decryption { .. } => KeyMaterialErrorKind::Decryption,
            KeyMaterialError::AliasNotFound { .. }
            | KeyMaterialError::NotAKeyPair { .. }
            | KeyMaterialError::UnsupportedKey { .. } => KeyMaterialErrorKind::Lookup,
        }
    }
}

/// Anything that aborts the startup sequence.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Invalid keystore configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Key material unavailable: {0}")]
    KeyMaterial(#[from] KeyMaterialError),
}
