/*
 * Responsibility
 * - /admin handlers; only reachable through the admin guard
 */
use axum::Json;

use crate::api::v1::extractors::{CurrentIdentity, Identity};

/// GET /admin/me: the identity the guard let through.
pub async fn me(CurrentIdentity(identity): CurrentIdentity) -> Json<Identity> {
    Json(identity)
}
