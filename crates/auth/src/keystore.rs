//! Token signing key material loaded from a password-protected PKCS#12 keystore.
//!
//! The keystore is read and decrypted exactly once, at startup. The resulting
//! [`KeyMaterial`] is read-only and can be shared across threads (e.g. behind
//! an `Arc`) for the lifetime of the process. Signing and verification
//! themselves belong to the token service, which takes the
//! [`EncodingKey`]/[`DecodingKey`] pair handed out here.

use std::fmt;

use jsonwebtoken::{DecodingKey, EncodingKey};
use p12_keystore::{KeyStore, KeyStoreEntry};
use rsa::pkcs1::{EncodeRsaPrivateKey, EncodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

use crate::config::KeystoreConfig;
use crate::error::KeyMaterialError;

/// The asymmetric key pair used to sign and verify tokens.
///
/// The public key is derived from the private key, so the two always match.
/// `Debug` prints the alias and fingerprint only; the private key is never
/// logged, serialized or included in an error.
pub struct KeyMaterial {
    alias: String,
    private_key: RsaPrivateKey,
    public_key: RsaPublicKey,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    public_key_pem: String,
    fingerprint: String,
}

impl KeyMaterial {
    /// Validate `config`, then read, decrypt and extract the configured key pair.
    ///
    /// Configuration problems are reported before any file I/O. Failures are
    /// final: a wrong password is never retried against the keystore.
    pub fn load(config: &KeystoreConfig) -> Result<Self, KeyMaterialError> {
        config.validate()?;

        tracing::debug!(path = %config.path, alias = %config.keypair_alias, "Opening keystore");

        let data = std::fs::read(&config.path).map_err(|source| KeyMaterialError::Unreadable {
            path: config.path.clone(),
            source,
        })?;

        let keystore = KeyStore::from_pkcs12(&data, &config.password).map_err(|_| {
            KeyMaterialError::Decryption {
                path: config.path.clone(),
            }
        })?;

        let (alias, entry) = find_entry(&keystore, &config.keypair_alias).ok_or_else(|| {
            KeyMaterialError::AliasNotFound {
                path: config.path.clone(),
                alias: config.keypair_alias.clone(),
            }
        })?;

        let KeyStoreEntry::PrivateKeyChain(chain) = entry else {
            return Err(KeyMaterialError::NotAKeyPair {
                path: config.path.clone(),
                alias,
            });
        };

        let unsupported = || KeyMaterialError::UnsupportedKey {
            path: config.path.clone(),
            alias: alias.clone(),
        };

        let private_key = RsaPrivateKey::from_pkcs8_der(chain.key()).map_err(|_| unsupported())?;
        let material = Self::from_private_key(&alias, private_key).ok_or_else(unsupported)?;

        tracing::info!(
            alias = %material.alias,
            fingerprint = %material.fingerprint,
            "Loaded token signing key pair"
        );
        Ok(material)
    }

    /// Build the key material from an already-decoded private key.
    fn from_private_key(alias: &str, private_key: RsaPrivateKey) -> Option<Self> {
        let public_key = RsaPublicKey::from(&private_key);

        let private_der = private_key.to_pkcs1_der().ok()?;
        let public_der = public_key.to_pkcs1_der().ok()?;
        let public_key_pem = public_key.to_public_key_pem(LineEnding::LF).ok()?;

        Some(Self {
            alias: alias.to_string(),
            encoding_key: EncodingKey::from_rsa_der(private_der.as_bytes()),
            decoding_key: DecodingKey::from_rsa_der(public_der.as_bytes()),
            fingerprint: format!("{:x}", Sha256::digest(public_der.as_bytes())),
            public_key_pem,
            private_key,
            public_key,
        })
    }

    /// Alias of the keystore entry the pair was loaded from.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Verification key. Safe to share with any verifier.
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    /// Signing key. Must stay in process memory.
    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }

    /// Signing key in the form the token service signs RS256 tokens with.
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Verification key in the form the token service checks RS256 tokens with.
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// SubjectPublicKeyInfo PEM of the public key, for distribution to verifiers.
    pub fn public_key_pem(&self) -> &str {
        &self.public_key_pem
    }

    /// SHA-256 hex digest of the PKCS#1 DER public key.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("alias", &self.alias)
            .field("fingerprint", &self.fingerprint)
            .finish_non_exhaustive()
    }
}

/// Exact alias match first; keytool lower-cases PKCS#12 aliases, so fall back
/// to an ASCII case-insensitive match.
fn find_entry<'a>(keystore: &'a KeyStore, alias: &str) -> Option<(String, &'a KeyStoreEntry)> {
    keystore
        .entries()
        .find(|(name, _)| *name == alias)
        .or_else(|| {
            keystore
                .entries()
                .find(|(name, _)| name.eq_ignore_ascii_case(alias))
        })
        .map(|(name, entry)| (name.to_string(), entry))
}
