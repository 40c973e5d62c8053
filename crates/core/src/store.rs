//! Storage seam for identity records and the principal loader built on it.
//!
//! Storage itself lives outside this workspace. The access-control layer asks
//! [`PrincipalLoader`] for a principal on every authentication decision; the
//! loader fetches the record and adapts it into a fresh [`Principal`].

use async_trait::async_trait;

use crate::error::CoreError;
use crate::identity::IdentityRecord;
use crate::principal::{Principal, CANNOT_AUTHENTICATE};
use crate::types::DbId;

/// Read access to persisted identity records.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Find an identity by its storage id.
    async fn find_by_id(&self, id: DbId) -> Result<Option<IdentityRecord>, CoreError>;

    /// Find an identity by email (the login key).
    async fn find_by_email(&self, email: &str) -> Result<Option<IdentityRecord>, CoreError>;
}

/// Resolves login keys into principals.
pub struct PrincipalLoader<S> {
    store: S,
}

impl<S: IdentityStore> PrincipalLoader<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the principal whose login key is `email`.
    ///
    /// Unknown emails and identities that cannot be adapted both yield
    /// [`CoreError::Unauthorized`] with the same message, so callers cannot
    /// tell the two apart. Storage errors propagate unchanged.
    pub async fn load_by_email(&self, email: &str) -> Result<Principal, CoreError> {
        let Some(identity) = self.store.find_by_email(email).await? else {
            tracing::debug!(email = %email, "No identity for login key");
            return Err(CoreError::Unauthorized(CANNOT_AUTHENTICATE.to_string()));
        };
        adapt_logged(&identity)
    }

    /// Load the principal for a storage id.
    ///
    /// Fails the same way as [`load_by_email`](Self::load_by_email): a missing
    /// id and a broken identity are indistinguishable to the caller.
    pub async fn load_by_id(&self, id: DbId) -> Result<Principal, CoreError> {
        let Some(identity) = self.store.find_by_id(id).await? else {
            tracing::debug!(user_id = id, "No identity for id");
            return Err(CoreError::Unauthorized(CANNOT_AUTHENTICATE.to_string()));
        };
        adapt_logged(&identity)
    }
}

fn adapt_logged(identity: &IdentityRecord) -> Result<Principal, CoreError> {
    Principal::adapt(identity).map_err(|err| {
        tracing::warn!(user_id = ?identity.id(), error = %err, "Identity cannot be adapted");
        CoreError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    struct MemoryStore {
        records: HashMap<DbId, IdentityRecord>,
    }

    impl MemoryStore {
        fn with(records: impl IntoIterator<Item = IdentityRecord>) -> Self {
            Self {
                records: records
                    .into_iter()
                    .filter_map(|r| r.id().map(|id| (id, r)))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl IdentityStore for MemoryStore {
        async fn find_by_id(&self, id: DbId) -> Result<Option<IdentityRecord>, CoreError> {
            Ok(self.records.get(&id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<IdentityRecord>, CoreError> {
            Ok(self.records.values().find(|r| r.email() == email).cloned())
        }
    }

    struct FailingStore;

    #[async_trait]
    impl IdentityStore for FailingStore {
        async fn find_by_id(&self, _id: DbId) -> Result<Option<IdentityRecord>, CoreError> {
            Err(CoreError::Internal("connection refused".into()))
        }

        async fn find_by_email(&self, _email: &str) -> Result<Option<IdentityRecord>, CoreError> {
            Err(CoreError::Internal("connection refused".into()))
        }
    }

    fn loader() -> PrincipalLoader<MemoryStore> {
        PrincipalLoader::new(MemoryStore::with([
            IdentityRecord::new(7, "Ana Silva", "ana@example.com", "$argon2id$hash"),
            IdentityRecord::new(9, "Broken", "broken@example.com", ""),
        ]))
    }

    #[tokio::test]
    async fn test_load_by_email() {
        let principal = loader()
            .load_by_email("ana@example.com")
            .await
            .expect("principal should load");
        assert_eq!(principal.user_id(), Some(7));
        assert_eq!(principal.username(), "ana@example.com");
    }

    #[tokio::test]
    async fn test_load_by_id() {
        let principal = loader().load_by_id(7).await.expect("principal should load");
        assert_eq!(principal.full_name(), "Ana Silva");

    }

    #[tokio::test]
    async fn test_missing_and_broken_ids_look_the_same() {
        let missing = loader().load_by_id(42).await;
        let broken = loader().load_by_id(9).await;

        assert_matches!(missing, Err(CoreError::Unauthorized(ref msg)) if msg == CANNOT_AUTHENTICATE);
        assert_matches!(broken, Err(CoreError::Unauthorized(ref msg)) if msg == CANNOT_AUTHENTICATE);
    }

    #[tokio::test]
    async fn test_unknown_and_broken_identities_look_the_same() {
        let unknown = loader().load_by_email("nobody@example.com").await;
        let broken = loader().load_by_email("broken@example.com").await;

        assert_matches!(unknown, Err(CoreError::Unauthorized(ref msg)) if msg == CANNOT_AUTHENTICATE);
        assert_matches!(broken, Err(CoreError::Unauthorized(ref msg)) if msg == CANNOT_AUTHENTICATE);
    }

    #[tokio::test]
    async fn test_storage_errors_propagate() {
        let result = PrincipalLoader::new(FailingStore)
            .load_by_email("ana@example.com")
            .await;
        assert_matches!(result, Err(CoreError::Internal(_)));
    }
}
