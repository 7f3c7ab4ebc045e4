/*
 * Responsibility
 * - v1 URL layout
 * - Which routes are public, authenticated, or admin-only is decided here:
 *   admin routes get the guard, then everything protected gets the access
 *   middleware on top, so the guard always runs after authentication
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::v1::handlers::{admin, auth, health::health};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health))
        .route("/auth/login", post(auth::login));

    let admin_only =
        middleware::auth::admin::apply(Router::new().route("/admin/me", get(admin::me)));

    let authenticated = Router::new()
        .route("/auth/me", get(auth::me))
        .merge(admin_only);
    let authenticated = middleware::auth::access::apply(authenticated, state);

    public.merge(authenticated)
}
