/*
 * Responsibility
 * - The "authenticated caller" type visible to handlers
 * - The access middleware verifies the token and stores it in request extensions;
 *   handlers only ever receive this type
 *
 * Notes
 * - Never carries secrets (password hashes stay in the account store)
 * - is_administrator is derived from role at construction and cannot drift
 */
use serde::Serialize;

use crate::services::auth::{Role, VerifiedAccessToken};

/// Identity attached to an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    subject_id: String,
    email: String,
    role: Role,
    is_administrator: bool,
}

impl Identity {
    pub fn new(subject_id: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        let is_administrator = role.is_administrator();
        Self {
            subject_id: subject_id.into(),
            email: email.into(),
            role,
            is_administrator,
        }
    }

    /// Fixed identity used by the development bypass.
    pub fn development_admin() -> Self {
        Self::new("dev-admin-id", "admin@dev.com", Role::Admin)
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn is_administrator(&self) -> bool {
        self.is_administrator
    }
}

impl From<VerifiedAccessToken> for Identity {
    fn from(token: VerifiedAccessToken) -> Self {
        Self::new(token.subject_id, token.email, token.role)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn admin_role_derives_capability() {
        let identity = Identity::new("u1", "a@b.com", Role::Admin);
        assert!(identity.is_administrator());

        let identity = Identity::new("u2", "c@d.com", Role::Intervenant);
        assert!(!identity.is_administrator());
    }

    #[test]
    fn serializes_outbound_shape() {
        let identity = Identity::new("u1", "a@b.com", Role::Admin);
        assert_eq!(
            serde_json::to_value(&identity).unwrap(),
            json!({
                "subjectId": "u1",
                "email": "a@b.com",
                "role": "admin",
                "isAdministrator": true,
            })
        );
    }
}
