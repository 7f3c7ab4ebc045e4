use axum::extract::FromRequestParts;
use axum::http::{Extensions, request::Parts};

use crate::error::AppError;

use super::Identity;

/// Store `identity` on the request. Attaching twice is a wiring bug and fails
/// instead of overwriting the first identity.
pub fn attach_identity(extensions: &mut Extensions, identity: Identity) -> Result<(), AppError> {
    if let Some(existing) = extensions.get::<Identity>() {
        tracing::error!(
            existing = %existing.subject_id(),
            incoming = %identity.subject_id(),
            "identity already attached to request"
        );
        return Err(AppError::Internal);
    }

    extensions.insert(identity);
    Ok(())
}

/// The identity attached by the access middleware, exactly as attached.
///
/// No identity means the route was reached without authentication; that is
/// treated as unauthenticated rather than guessed at.
pub fn current_identity(extensions: &Extensions) -> Result<Identity, AppError> {
    extensions.get::<Identity>().cloned().ok_or_else(|| {
        tracing::error!("current identity requested but none attached; is the access middleware applied?");
        AppError::Unauthorized
    })
}

/// Extractor form of [`current_identity`] for handlers.
pub struct CurrentIdentity(pub Identity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        current_identity(&parts.extensions).map(CurrentIdentity)
    }
}
