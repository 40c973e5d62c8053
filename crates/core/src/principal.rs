//! Authentication principal and the adapter that builds it from an identity.
//!
//! A [`Principal`] is a snapshot: it copies the fields it needs out of an
//! [`IdentityRecord`] and never refers back to it, so later changes to the
//! record do not affect a principal that was already built.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::error::CoreError;
use crate::identity::IdentityRecord;
use crate::types::{DbId, REDACTED_VALUE};

/// Message surfaced to the access-control layer when adaptation fails.
pub const CANNOT_AUTHENTICATE: &str = "Cannot authenticate this identity";

// ---------------------------------------------------------------------------
// Account status
// ---------------------------------------------------------------------------

/// Lifecycle state of an account.
///
/// The four capability flags on [`Principal`] are derived from this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Locked,
    Expired,
    CredentialsExpired,
    Disabled,
}

impl AccountStatus {
    /// Compute the status of the given identity.
    ///
    /// Identity records carry no lifecycle fields, so every identity is
    /// currently [`AccountStatus::Active`].
    pub fn for_identity(_identity: &IdentityRecord) -> Self {
        AccountStatus::Active
    }

    pub fn is_account_non_expired(self) -> bool {
        self != AccountStatus::Expired
    }

    pub fn is_account_non_locked(self) -> bool {
        self != AccountStatus::Locked
    }

    pub fn is_credentials_non_expired(self) -> bool {
        self != AccountStatus::CredentialsExpired
    }

    pub fn is_enabled(self) -> bool {
        self != AccountStatus::Disabled
    }
}

// ---------------------------------------------------------------------------
// Authorities
// ---------------------------------------------------------------------------

/// A capability granted to a principal (e.g. `"ROLE_ADMIN"`, `"orders:read"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Authority(String);

impl Authority {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Adaptation errors
// ---------------------------------------------------------------------------

/// Precondition violation while adapting an identity.
///
/// Local to a single authentication attempt. Convert into [`CoreError`]
/// before handing it to the access-control layer so no internal detail
/// reaches the end user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdaptError {
    #[error("identity is missing required field `{0}`")]
    MissingField(&'static str),
}

impl From<AdaptError> for CoreError {
    fn from(_: AdaptError) -> Self {
        CoreError::Unauthorized(CANNOT_AUTHENTICATE.to_string())
    }
}

// ---------------------------------------------------------------------------
// Principal
// ---------------------------------------------------------------------------

/// Immutable, per-attempt view of an identity.
///
/// The login key ([`Principal::username`]) is always the email. The credential
/// hash is kept for verification only: it is skipped on serialization and
/// redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    user_id: Option<DbId>,
    full_name: String,
    email: String,
    #[serde(skip_serializing)]
    password_hash: String,
    status: AccountStatus,
    authorities: BTreeSet<Authority>,
}

impl Principal {
    /// Build a principal from a snapshot of `identity`.
    ///
    /// Fails if `name`, `email` or `password_hash` is blank. Authorities are
    /// always empty; no role model exists yet.
    pub fn adapt(identity: &IdentityRecord) -> Result<Self, AdaptError> {
        require("name", identity.name())?;
        require("email", identity.email())?;
        require("password_hash", identity.password_hash())?;

        Ok(Self {
            user_id: identity.id(),
            full_name: identity.name().to_string(),
            email: identity.email().to_string(),
            password_hash: identity.password_hash().to_string(),
            status: AccountStatus::for_identity(identity),
            authorities: BTreeSet::new(),
        })
    }

    /// Storage id of the identity, `None` for a transient identity.
    pub fn user_id(&self) -> Option<DbId> {
        self.user_id
    }

    /// A principal without a storage id must be treated as unauthenticated.
    pub fn is_transient(&self) -> bool {
        self.user_id.is_none()
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Login key. Always the email.
    pub fn username(&self) -> &str {
        &self.email
    }

    /// Credential hash, for verification by the access-control layer only.
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn status(&self) -> AccountStatus {
        self.status
    }

    pub fn authorities(&self) -> &BTreeSet<Authority> {
        &self.authorities
    }

    pub fn is_account_non_expired(&self) -> bool {
        self.status.is_account_non_expired()
    }

    pub fn is_account_non_locked(&self) -> bool {
        self.status.is_account_non_locked()
    }

    pub fn is_credentials_non_expired(&self) -> bool {
        self.status.is_credentials_non_expired()
    }

    pub fn is_enabled(&self) -> bool {
        self.status.is_enabled()
    }
}

impl TryFrom<&IdentityRecord> for Principal {
    type Error = AdaptError;

    fn try_from(identity: &IdentityRecord) -> Result<Self, Self::Error> {
        Principal::adapt(identity)
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Principal")
            .field("user_id", &self.user_id)
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password_hash", &REDACTED_VALUE)
            .field("status", &self.status)
            .field("authorities", &self.authorities)
            .finish()
    }
}

/// Adapt an identity record into a principal. See [`Principal::adapt`].
pub fn adapt(identity: &IdentityRecord) -> Result<Principal, AdaptError> {
    Principal::adapt(identity)
}

fn require(field: &'static str, value: &str) -> Result<(), AdaptError> {
    if value.trim().is_empty() {
        return Err(AdaptError::MissingField(field));
    }
    Ok(())
}
