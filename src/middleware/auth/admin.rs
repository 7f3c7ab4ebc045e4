//! Administrator capability guard.
//!
//! Must sit inside the access middleware: it only reads the identity that
//! `access` attached, it never looks at the token.

use axum::{
    Router,
    body::Body,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::Identity;
use crate::error::AppError;
use crate::state::AppState;

/// Allow only administrators.
///
/// - no identity -> `Unauthorized` (never `Forbidden`)
/// - identity without the capability -> `Forbidden`
pub fn require_administrator(identity: Option<&Identity>) -> Result<(), AppError> {
    let identity = identity.ok_or(AppError::Unauthorized)?;

    if !identity.is_administrator() {
        tracing::info!(
            subject_id = %identity.subject_id(),
            role = %identity.role(),
            "administrator access denied"
        );
        return Err(AppError::Forbidden);
    }

    Ok(())
}

/// Guard every route of `router` with [`require_administrator`].
pub fn apply(router: Router<AppState>) -> Router<AppState> {
    router.route_layer(middleware::from_fn(admin_guard))
}

async fn admin_guard(req: Request<Body>, next: Next) -> Result<Response, AppError> {
    require_administrator(req.extensions().get::<Identity>())?;
    Ok(next.run(req).await)
}
