//! Site info endpoint
//!
//! - GET /api/v1/site - operating mode for the frontend's demo banner

use axum::{extract::State, routing::get, Json, Router};

use crate::api::middleware::AppState;
use crate::api::responses::SiteInfoResponse;
use crate::config::DataMode;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(site_info))
}

async fn site_info(State(state): State<AppState>) -> Json<SiteInfoResponse> {
    Json(SiteInfoResponse {
        name: "Wanderhub",
        mode: match state.mode {
            DataMode::Demo => "demo",
            DataMode::Live => "live",
        },
        assistant_enabled: state.assistant.enabled(),
    })
}
