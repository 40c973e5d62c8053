//! End-to-end adaptation of a stored identity into a principal.

use tokenforge_core::identity::IdentityRecord;
use tokenforge_core::principal::{adapt, AccountStatus};

const HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$YW5hLXNhbHQ$YW5hLWhhc2g";

#[test]
fn test_ana_silva_scenario() {
    let record = IdentityRecord::new(7, "Ana Silva", "ana@example.com", HASH);

    let principal = adapt(&record).expect("adapt should succeed");

    assert_eq!(principal.user_id(), Some(7));
    assert_eq!(principal.full_name(), "Ana Silva");
    assert_eq!(principal.email(), "ana@example.com");
    assert_eq!(principal.username(), "ana@example.com");
    assert_eq!(principal.password_hash(), HASH);
    assert!(principal.authorities().is_empty());
    assert!(principal.is_account_non_expired());
    assert!(principal.is_account_non_locked());
    assert!(principal.is_credentials_non_expired());
    assert!(principal.is_enabled());
    assert_eq!(principal.status(), AccountStatus::Active);
}

/// Field mapping holds for a spread of identities, not just one.
#[test]
fn test_field_mapping_for_many_identities() {
    let records = [
        IdentityRecord::new(1, "Bruno", "bruno@example.com", HASH),
        IdentityRecord::new(i64::MAX, "Zoë Ørsted", "zoe@example.org", HASH),
        IdentityRecord::transient("Pending Signup", "pending@example.net", HASH),
    ];

    for record in &records {
        let principal = adapt(record).expect("adapt should succeed");
        assert_eq!(principal.user_id(), record.id());
        assert_eq!(principal.full_name(), record.name());
        assert_eq!(principal.email(), record.email());
        assert!(principal.authorities().is_empty());
        assert!(principal.is_enabled());
    }
}

/// Principals are built independently on concurrent authentication attempts.
#[test]
fn test_concurrent_adaptation() {
    let record = IdentityRecord::new(7, "Ana Silva", "ana@example.com", HASH);
    let expected = adapt(&record).expect("adapt should succeed");

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8).map(|_| scope.spawn(|| adapt(&record))).collect();
        for handle in handles {
            let principal = handle
                .join()
                .expect("thread should not panic")
                .expect("adapt should succeed");
            assert_eq!(principal, expected);
        }
    });
}
