//! Dashboard endpoint (authenticated)
//!
//! - GET /api/v1/dashboard - bookings newest first, plus wishlist tours

use axum::{extract::State, routing::get, Extension, Json, Router};

use crate::api::middleware::{ApiError, AppState, CurrentSession};
use crate::api::responses::DashboardResponse;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

async fn dashboard(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let scope = session.scope();
    let (bookings, wishlist) = tokio::try_join!(
        state.data.list_bookings(&scope),
        state.data.list_wishlist(&scope),
    )?;

    Ok(Json(DashboardResponse { bookings, wishlist }))
}
