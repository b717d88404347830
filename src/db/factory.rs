//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository
//! instances based on runtime configuration.

use std::str::FromStr;
use std::sync::Arc;

use super::repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
use super::repositories::PostgresRepository;
use super::repository::{FullRepository, RepositoryError, RepositoryResult};
#[cfg(feature = "postgres-repo")]
use super::PostgresConfig;
use crate::scheduling::ConflictScope;

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Postgres + Diesel implementation
    Postgres,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "local" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variable.
    ///
    /// Reads `REPOSITORY_TYPE`. Defaults to Postgres if a database URL is
    /// present, otherwise Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }

        if std::env::var("DATABASE_URL").is_ok() || std::env::var("PG_DATABASE_URL").is_ok() {
            Self::Postgres
        } else {
            Self::Local
        }
    }
}

/// Read the conflict scope from the `CONFLICT_SCOPE` environment variable,
/// falling back to the default scope when unset or unparsable.
pub fn conflict_scope_from_env() -> ConflictScope {
    std::env::var("CONFLICT_SCOPE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_default()
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```ignore
/// use labsched::db::{RepositoryFactory, RepositoryType};
/// use labsched::scheduling::ConflictScope;
///
/// let repo = RepositoryFactory::create_local(ConflictScope::default());
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `scope` - Conflict scope the store enforces
    pub fn create(
        repo_type: RepositoryType,
        scope: ConflictScope,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        match repo_type {
            RepositoryType::Postgres => {
                #[cfg(feature = "postgres-repo")]
                {
                    let config = PostgresConfig::from_env()
                        .map_err(RepositoryError::configuration)?;
                    let pg = Self::create_postgres(&config, scope)?;
                    Ok(pg as Arc<dyn FullRepository>)
                }
                #[cfg(not(feature = "postgres-repo"))]
                {
                    Err(RepositoryError::configuration(
                        "Postgres repository feature not enabled",
                    ))
                }
            }
            RepositoryType::Local => Ok(Self::create_local(scope)),
        }
    }

    /// Create a Postgres repository.
    #[cfg(feature = "postgres-repo")]
    pub fn create_postgres(
        config: &PostgresConfig,
        scope: ConflictScope,
    ) -> RepositoryResult<Arc<PostgresRepository>> {
        let repo = PostgresRepository::new(config.clone(), scope)?;
        Ok(Arc::new(repo))
    }

    /// Create an in-memory local repository.
    pub fn create_local(scope: ConflictScope) -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::with_scope(scope))
    }

    /// Create repository from environment configuration.
    ///
    /// Reads `REPOSITORY_TYPE` and `CONFLICT_SCOPE` to determine which
    /// repository to create and which scope it enforces.
    pub fn from_env() -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = RepositoryType::from_env();
        let scope = conflict_scope_from_env();
        log::info!(
            "creating {:?} repository with {} conflict scope",
            repo_type,
            scope
        );
        Self::create(repo_type, scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::AssignmentRepository;

    #[test]
    fn test_repository_type_parsing() {
        assert_eq!("local".parse::<RepositoryType>().unwrap(), RepositoryType::Local);
        assert_eq!("postgres".parse::<RepositoryType>().unwrap(), RepositoryType::Postgres);
        assert_eq!("PG".parse::<RepositoryType>().unwrap(), RepositoryType::Postgres);
        assert!("mongodb".parse::<RepositoryType>().is_err());
    }

    #[test]
    fn test_create_local_repository() {
        let repo = RepositoryFactory::create_local(ConflictScope::Section);
        assert_eq!(repo.conflict_scope(), ConflictScope::Section);
    }
}
