//! News endpoints
//!
//! - GET /api/v1/news - published articles, newest first
//! - GET /api/v1/news/{id} - article detail

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::api::middleware::{ApiError, AppState};
use crate::models::NewsArticle;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_news))
        .route("/{id}", get(get_news))
}

async fn list_news(State(state): State<AppState>) -> Result<Json<Vec<NewsArticle>>, ApiError> {
    Ok(Json(state.data.list_news(None).await?))
}

async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NewsArticle>, ApiError> {
    let article = state
        .data
        .get_news(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Article not found"))?;
    Ok(Json(article))
}
