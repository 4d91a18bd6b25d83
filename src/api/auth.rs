//! Authentication endpoints
//!
//! Public: sign-in, sign-up, password-reset request. Protected: sign-out,
//! current identity, profile update, password update. In demo mode the
//! session service synthesizes success for all of these without touching
//! any backend.

use axum::{
    extract::State,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;

use crate::api::middleware::{ApiError, AppState, CurrentSession};
use crate::api::responses::{MessageResponse, SessionResponse};
use crate::models::ProfileUpdate;

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
pub struct RestoreRequest {
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    pub password: String,
}

/// Routes reachable without a session
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/signin", post(sign_in))
        .route("/signup", post(sign_up))
        .route("/restore", post(restore))
        .route("/reset-password", post(reset_password))
}

/// Routes requiring the auth middleware
pub fn protected_router() -> Router<AppState> {
    Router::new()
        .route("/signout", post(sign_out))
        .route("/me", get(me))
        .route("/profile", put(update_profile))
        .route("/password", put(update_password))
}

async fn sign_in(
    State(state): State<AppState>,
    Json(body): Json<SignInRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state.sessions.sign_in(&body.email, &body.password).await?;
    Ok(Json(session.into()))
}

async fn sign_up(
    State(state): State<AppState>,
    Json(body): Json<SignUpRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state
        .sessions
        .sign_up(&body.email, &body.password, &body.first_name, &body.last_name)
        .await?;
    Ok(Json(session.into()))
}

/// Re-enter with a backend access token from a previous visit
async fn restore(
    State(state): State<AppState>,
    Json(body): Json<RestoreRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state.sessions.restore(&body.access_token).await?;
    Ok(Json(session.into()))
}

async fn sign_out(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.sessions.sign_out(&session.token).await?;
    Ok(Json(MessageResponse::new("Signed out")))
}

async fn me(
    Extension(CurrentSession(session)): Extension<CurrentSession>,
) -> Json<SessionResponse> {
    Json(session.into())
}

async fn update_profile(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<SessionResponse>, ApiError> {
    state.sessions.update_profile(&session.token, &update).await?;
    let refreshed = state
        .sessions
        .current(&session.token)
        .await
        .ok_or_else(|| ApiError::unauthorized("Session expired"))?;
    Ok(Json(refreshed.into()))
}

async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.sessions.reset_password(&body.email).await?;
    Ok(Json(MessageResponse::new(
        "If the address exists, a recovery email is on its way",
    )))
}

async fn update_password(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Json(body): Json<UpdatePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .sessions
        .update_password(&session.token, &body.password)
        .await?;
    Ok(Json(MessageResponse::new("Password updated")))
}
