/*
 * Responsibility
 * - Request/response DTOs for /auth and /admin
 * - Shape checks (validate()) before anything touches the account store
 * - Responses never carry password hashes
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::AccountRow;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err("email is required");
        }
        if !email.contains('@') {
            return Err("email is invalid");
        }
        if self.password.is_empty() {
            return Err("password is required");
        }
        if self.password.chars().count() < 6 {
            return Err("password must be at least 6 characters");
        }
        Ok(())
    }
}

/// Account as exposed to the frontend.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub nom: String,
    pub prenom: String,
}

impl From<AccountRow> for UserResponse {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            role: row.role,
            nom: row.last_name,
            prenom: row.first_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub token: String,
    pub expires_in: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn login_request_shape_checks() {
        assert!(req("a@b.com", "secret").validate().is_ok());
        assert_eq!(req("  ", "secret").validate(), Err("email is required"));
        assert_eq!(req("ab.com", "secret").validate(), Err("email is invalid"));
        assert_eq!(req("a@b.com", "").validate(), Err("password is required"));
        assert_eq!(
            req("a@b.com", "12345").validate(),
            Err("password must be at least 6 characters")
        );
    }

    #[test]
    fn debug_hides_password() {
        let printed = format!("{:?}", req("a@b.com", "hunter22"));
        assert!(!printed.contains("hunter22"));
    }
}
