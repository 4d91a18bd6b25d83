//! Landing page endpoint
//!
//! - GET /api/v1/home - featured tours, categories and latest news

use axum::{extract::State, routing::get, Json, Router};

use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::HomeResponse;

const FEATURED_LIMIT: usize = 6;
const NEWS_LIMIT: usize = 3;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(home))
}

/// The three independent fetches are issued together and joined before the
/// payload is assembled.
async fn home(State(state): State<AppState>) -> Result<Json<HomeResponse>, ApiError> {
    let (featured_tours, tour_types, latest_news) = tokio::try_join!(
        state.data.featured_tours(FEATURED_LIMIT),
        state.data.list_tour_types(),
        state.data.list_news(Some(NEWS_LIMIT)),
    )?;

    Ok(Json(HomeResponse {
        featured_tours,
        tour_types,
        latest_news,
    }))
}
