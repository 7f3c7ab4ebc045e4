/// Factories: build auth services and the account store from application `Config`.
use std::sync::Arc;

use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use crate::config::Config;
use crate::error::AppError;
use crate::repos::{AccountRepo, InMemoryAccountRepo, PgAccountRepo};
use crate::services::auth::{AuthService, JwtIssuer, LoginService, password::PasswordHasher};

/// Schema for `PgAccountRepo`, applied on startup.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub fn build_auth_service(config: &Config) -> Arc<AuthService> {
    if config.uses_insecure_jwt_secret() {
        tracing::warn!(
            "JWT_SECRET is not set; using the insecure built-in default. Set JWT_SECRET before exposing this server"
        );
    }
    if config.auth.dev_bypass {
        tracing::warn!("AUTH_DEV_BYPASS is on: every protected request runs as the development admin");
    }

    Arc::new(AuthService::new(&config.auth))
}

pub fn build_login_service(
    config: &Config,
    accounts: Arc<dyn AccountRepo>,
) -> Arc<LoginService> {
    Arc::new(LoginService::new(
        accounts,
        JwtIssuer::new(&config.auth),
        PasswordHasher::new(),
    ))
}

pub async fn build_account_repo(config: &Config) -> Result<Arc<dyn AccountRepo>, AppError> {
    match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(url)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "failed to connect to database");
                    AppError::Internal
                })?;
            MIGRATOR.run(&pool).await.map_err(|e| {
                tracing::error!(error = %e, "failed to apply database migrations");
                AppError::Internal
            })?;
            Ok(Arc::new(PgAccountRepo::new(pool)))
        }
        None => {
            tracing::warn!("DATABASE_URL is not set; accounts are kept in memory");
            Ok(Arc::new(InMemoryAccountRepo::new()))
        }
    }
}
