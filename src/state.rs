/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - auth: token verifier, login: credential check + token issuance
 * - Cheap to Clone (everything behind Arc)
 * - Read-only after startup; per-request data lives in request extensions
 */
use std::sync::Arc;

use crate::services::auth::{AuthService, LoginService};

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub login: Arc<LoginService>,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>, login: Arc<LoginService>) -> Self {
        Self { auth, login }
    }
}
