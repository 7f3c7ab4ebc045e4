//! Access token (HS256 JWT) validation, then Identity into request extensions.
//!
//! - `Authorization: Bearer <jwt>` is required; missing/malformed/expired/bad
//!   signature all end the request with 401 before any handler runs.
//! - On success the Identity is attached exactly once; guards and handlers read it.
//! - With the development bypass enabled the header is not read and the fixed
//!   development admin is attached instead.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::{Identity, attach_identity};
use crate::error::AppError;
use crate::state::AppState;

/// Put authentication in front of every route of `router`.
///
/// ```ignore
/// let protected = Router::new().route("/auth/me", get(me));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // route_layer: unmatched paths stay 404 instead of turning into 401
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let identity = if state.auth.dev_bypass() {
        Identity::development_admin()
    } else {
        match state.auth.authenticate(req.headers()) {
            Ok(verified) => Identity::from(verified),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    method = %req.method(),
                    path = %req.uri().path(),
                    "access token verification failed"
                );
                return Err(err.into());
            }
        }
    };

    tracing::debug!(subject_id = %identity.subject_id(), role = %identity.role(), "identity attached");

    // middleware -> guard/extractor handoff
    attach_identity(req.extensions_mut(), identity)?;

    Ok(next.run(req).await)
}
