//! Factory and environment-driven repository selection.

mod support;

use labsched::db::factory::{conflict_scope_from_env, RepositoryFactory, RepositoryType};
use labsched::db::repository::{AssignmentRepository, FullRepository};
use labsched::scheduling::ConflictScope;

use support::with_scoped_env;

#[test]
fn test_repository_type_defaults_to_local_without_database_url() {
    with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        || {
            assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
        },
    );
}

#[test]
fn test_database_url_implies_postgres() {
    with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", Some("postgres://localhost/labsched")),
            ("PG_DATABASE_URL", None),
        ],
        || {
            assert_eq!(RepositoryType::from_env(), RepositoryType::Postgres);
        },
    );
}

#[test]
fn test_explicit_repository_type_wins() {
    with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("local")),
            ("DATABASE_URL", Some("postgres://localhost/labsched")),
        ],
        || {
            assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
        },
    );
}

#[test]
fn test_unparsable_repository_type_falls_back_to_local() {
    with_scoped_env(&[("REPOSITORY_TYPE", Some("cassandra"))], || {
        assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
    });
}

#[test]
fn test_conflict_scope_from_env() {
    with_scoped_env(&[("CONFLICT_SCOPE", None)], || {
        assert_eq!(conflict_scope_from_env(), ConflictScope::default());
    });
    with_scoped_env(&[("CONFLICT_SCOPE", Some("slot_only"))], || {
        assert_eq!(conflict_scope_from_env(), ConflictScope::SlotOnly);
    });
    with_scoped_env(&[("CONFLICT_SCOPE", Some("nonsense"))], || {
        assert_eq!(conflict_scope_from_env(), ConflictScope::default());
    });
}

#[tokio::test]
async fn test_factory_builds_a_working_local_repository() {
    let repo = RepositoryFactory::create_local(ConflictScope::SlotOnly);
    assert_eq!(repo.conflict_scope(), ConflictScope::SlotOnly);
    assert!(repo.health_check().await.unwrap());
    assert!(repo.list_assignments().await.unwrap().is_empty());
}

#[test]
fn test_create_rejects_postgres_without_feature_or_config() {
    with_scoped_env(
        &[("DATABASE_URL", None), ("PG_DATABASE_URL", None)],
        || {
            // Without a database URL the Postgres path must fail with a
            // configuration error regardless of enabled features.
            let result = RepositoryFactory::create(RepositoryType::Postgres, ConflictScope::default());
            assert!(result.is_err());
        },
    );
}
