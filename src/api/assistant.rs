//! Assistant relay endpoint
//!
//! - POST /api/v1/assistant - forward one message to the hosted model
//!
//! Contract: a missing or empty message is the only client error (400,
//! `{ "error": ... }`). Everything else answers 200 `{ "response": ... }`;
//! model failures are masked by substituting the canned responder, never
//! surfaced as a 5xx.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::api::middleware::AppState;
use crate::fixtures;
use crate::services::AssistantError;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub message: Option<String>,
    /// Accepted for forward compatibility; not forwarded to the model
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskError {
    pub error: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(ask))
}

async fn ask(
    State(state): State<AppState>,
    Json(body): Json<AskRequest>,
) -> Result<Json<AskResponse>, (StatusCode, Json<AskError>)> {
    let message = match body.message.as_deref().map(str::trim) {
        Some(message) if !message.is_empty() => message.to_string(),
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(AskError {
                    error: "Message is required".to_string(),
                }),
            ));
        }
    };

    let response = match state.assistant.ask(&message).await {
        Ok(text) => text,
        Err(AssistantError::NotConfigured) => fixtures::respond(&message),
        Err(err) => {
            tracing::warn!("Assistant call failed, serving canned response: {}", err);
            fixtures::respond(&message)
        }
    };

    Ok(Json(AskResponse { response }))
}
