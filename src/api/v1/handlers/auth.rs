/*
 * Responsibility
 * - POST /auth/login: credentials -> token
 * - GET  /auth/me:    profile of the authenticated caller
 */
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    api::v1::{
        dto::auth::{LoginRequest, LoginResponse, UserResponse},
        extractors::CurrentIdentity,
    },
    error::AppError,
    state::AppState,
};

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    // body rejections use the same error shape as failed validation
    let Json(req) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "login body rejected");
        AppError::bad_request("INVALID_LOGIN", "email and password are required")
    })?;
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_LOGIN", msg))?;

    let out = state.login.login(req.email.trim(), &req.password).await?;

    Ok(Json(LoginResponse {
        user: UserResponse::from(out.account),
        token: out.token,
        expires_in: out.expires_in,
    }))
}

pub async fn me(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<Json<UserResponse>, AppError> {
    let account = state.login.profile(identity.subject_id()).await?;
    Ok(Json(UserResponse::from(account)))
}
