//! Contact form endpoint
//!
//! - POST /api/v1/contact - insert a feedback row

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::MessageResponse;
use crate::models::NewFeedback;

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(submit))
}

async fn submit(
    State(state): State<AppState>,
    Json(body): Json<ContactRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if body.name.trim().is_empty()
        || body.email.trim().is_empty()
        || body.message.trim().is_empty()
    {
        return Err(ApiError::validation_error(
            "Name, email and message are all required",
        ));
    }

    state
        .data
        .submit_feedback(NewFeedback::new(body.name, body.email, body.message))
        .await?;
    Ok(Json(MessageResponse::new("Message sent")))
}
