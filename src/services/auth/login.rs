use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::AppError;
use crate::repos::{AccountRepo, AccountRow, NewAccount};
use crate::services::auth::jwt::JwtIssuer;
use crate::services::auth::password::PasswordHasher;
use crate::services::auth::role::Role;

/// Result of a successful login; handlers map it to the HTTP DTO.
#[derive(Clone, Debug)]
pub struct LoginOutcome {
    pub account: AccountRow,
    pub token: String,
    pub expires_in: u64,
}

/// Credential check + token issuance, and account lookups that back `/auth/me`.
#[derive(Clone)]
pub struct LoginService {
    accounts: Arc<dyn AccountRepo>,
    issuer: JwtIssuer,
    passwords: PasswordHasher,
}

impl std::fmt::Debug for LoginService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginService")
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

impl LoginService {
    pub fn new(
        accounts: Arc<dyn AccountRepo>,
        issuer: JwtIssuer,
        passwords: PasswordHasher,
    ) -> Self {
        Self {
            accounts,
            issuer,
            passwords,
        }
    }

    /// Unknown email and wrong password both yield `Unauthorized`.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let Some(account) = self.accounts.find_by_email(email).await? else {
            debug!("login rejected: unknown email");
            return Err(AppError::Unauthorized);
        };

        let matches = self
            .passwords
            .verify_blocking(password.to_string(), account.password_hash.clone())
            .await?;
        if !matches {
            debug!(account_id = %account.id, "login rejected: password mismatch");
            return Err(AppError::Unauthorized);
        }

        let role = Role::from(account.role.as_str());
        let token = self
            .issuer
            .issue(&account.id.to_string(), &account.email, &role)?;

        info!(account_id = %account.id, role = %role, "login succeeded");

        Ok(LoginOutcome {
            account,
            token,
            expires_in: self.issuer.ttl_seconds(),
        })
    }

    /// Account behind a token subject. A subject that is not one of our ids,
    /// or that no longer exists, is `Unauthorized`.
    pub async fn profile(&self, subject_id: &str) -> Result<AccountRow, AppError> {
        let id = Uuid::parse_str(subject_id).map_err(|_| AppError::Unauthorized)?;

        self.accounts
            .find_by_id(id)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    /// Create an `admin` account unless the email is taken. Returns whether one was created.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<bool, AppError> {
        if self.accounts.find_by_email(email).await?.is_some() {
            info!(email = %email, "bootstrap admin already exists");
            return Ok(false);
        }

        let password_hash = self.passwords.hash_blocking(password.to_string()).await?;

        let account = self
            .accounts
            .insert(NewAccount {
                email: email.to_string(),
                password_hash,
                role: Role::Admin.to_string(),
                first_name: "Admin".to_string(),
                last_name: "User".to_string(),
            })
            .await?;

        info!(account_id = %account.id, email = %email, "bootstrap admin created");
        Ok(true)
    }
}
