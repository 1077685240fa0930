//! Application context - dependency injection container

use std::sync::Arc;
use std::time::Duration;

use chronicle_core::{AccountService, ActivityService, IdentityService, ProjectService};
use chronicle_domain::{ChronicleConfig, Result};
use chronicle_infra::{
    Argon2PasswordHasher, DbManager, JwtTokenCodec, SqliteActivityRepository,
    SqliteProjectRepository, SqliteUserRepository,
};

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: ChronicleConfig,
    pub db: Arc<DbManager>,
    pub identity: Arc<IdentityService>,
    pub accounts: Arc<AccountService>,
    pub activities: Arc<ActivityService>,
    pub projects: Arc<ProjectService>,
}

impl AppContext {
    /// Build the full service graph from configuration.
    ///
    /// Opens the database, runs migrations, and wires every repository
    /// into its service.
    pub fn new(config: ChronicleConfig) -> Result<Self> {
        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        db.run_migrations()?;

        let users = Arc::new(SqliteUserRepository::new(Arc::clone(&db)));
        let activity_repo = Arc::new(SqliteActivityRepository::new(Arc::clone(&db)));
        let project_repo = Arc::new(SqliteProjectRepository::new(Arc::clone(&db)));

        let tokens =
            Arc::new(JwtTokenCodec::new(&config.auth.secret, config.auth.token_ttl_days));
        let hasher = Arc::new(Argon2PasswordHasher::new());

        let identity = Arc::new(IdentityService::new(tokens.clone(), users.clone()));
        let accounts = Arc::new(AccountService::new(users.clone(), hasher, tokens));
        let activities = Arc::new(ActivityService::new(
            activity_repo,
            Duration::from_secs(config.batch.insert_timeout_secs),
        ));
        let projects =
            Arc::new(ProjectService::new(project_repo, users, Arc::clone(&activities)));

        Ok(Self { config, db, identity, accounts, activities, projects })
    }
}
