//! Identity record as persisted by storage.
//!
//! The record is a plain data holder. Persistence (save/find/delete) belongs to
//! the storage layer; this crate only reads records handed to it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{DbId, REDACTED_VALUE};

/// Durable representation of a user.
///
/// `email` is the login key and is unique per system (enforced by storage).
/// `password_hash` is opaque credential material -- never a plaintext secret.
///
/// Equality is defined by `id` alone. A transient record (no id yet) is not
/// equal to any record, including itself, which is why only [`PartialEq`] is
/// implemented.
#[derive(Clone, Serialize, Deserialize)]
pub struct IdentityRecord {
    id: Option<DbId>,
    name: String,
    email: String,
    password_hash: String,
}

impl IdentityRecord {
    /// Build a record as loaded from storage.
    pub fn new(
        id: DbId,
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Build a record that storage has not assigned an id to yet.
    pub fn transient(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }

    pub fn id(&self) -> Option<DbId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

impl PartialEq for IdentityRecord {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for IdentityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &REDACTED_VALUE)
            .finish()
    }
}
