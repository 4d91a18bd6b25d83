//! Cart endpoints (authenticated)
//!
//! - GET /api/v1/cart - lines plus totals
//! - POST /api/v1/cart - add a tour
//! - PUT /api/v1/cart/{id} - change traveler count
//! - DELETE /api/v1/cart/{id} - remove a line
//! - POST /api/v1/cart/checkout - book everything, empty the cart

use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;

use crate::api::middleware::{ApiError, AppState, CurrentSession};
use crate::api::responses::{CartResponse, CheckoutResponse, MessageResponse};
use crate::models::cart_item::{validate_travelers, NewCartItem};
use crate::models::CartItem;

#[derive(Debug, Deserialize)]
pub struct AddCartRequest {
    pub tour_id: String,
    pub travelers: u32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub travelers: u32,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_cart).post(add_to_cart))
        .route("/checkout", post(checkout))
        .route("/{id}", put(update_travelers).delete(remove_item))
}

async fn get_cart(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
) -> Result<Json<CartResponse>, ApiError> {
    let (items, summary) = state.cart.summary(&session.scope()).await?;
    Ok(Json(CartResponse { items, summary }))
}

/// Adding a tour copies its departure dates onto the cart line.
async fn add_to_cart(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Json(body): Json<AddCartRequest>,
) -> Result<Json<CartItem>, ApiError> {
    let travelers = validate_travelers(body.travelers).map_err(ApiError::validation_error)?;
    let tour = state
        .data
        .get_tour(&body.tour_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tour not found"))?;

    let item = state
        .data
        .add_cart_item(
            &session.scope(),
            NewCartItem {
                user_id: session.user_id.clone(),
                tour_id: tour.id,
                start_date: tour.start_date,
                end_date: tour.end_date,
                travelers,
            },
        )
        .await?;
    Ok(Json(item))
}

async fn update_travelers(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Path(id): Path<String>,
    Json(body): Json<UpdateCartRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let travelers = validate_travelers(body.travelers).map_err(ApiError::validation_error)?;
    state
        .data
        .set_cart_travelers(&session.scope(), &id, travelers)
        .await?;
    Ok(Json(MessageResponse::new("Cart updated")))
}

async fn remove_item(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.data.remove_cart_item(&session.scope(), &id).await?;
    Ok(Json(MessageResponse::new("Item removed")))
}

/// Totals are computed from the cart as it stood at checkout, so the
/// response reflects exactly what was booked.
async fn checkout(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let scope = session.scope();
    let (items, summary) = state.cart.summary(&scope).await?;
    if items.is_empty() {
        return Err(ApiError::validation_error("Cart is empty"));
    }
    let bookings = state.cart.checkout(&scope).await?;
    Ok(Json(CheckoutResponse { bookings, summary }))
}
