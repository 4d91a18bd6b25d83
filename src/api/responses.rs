//! Shared API response types
//!
//! Composite payloads assembled by more than one handler. Entity types
//! serialize directly; these wrappers exist where a page joins several
//! fetches into one body.

use serde::{Deserialize, Serialize};

use crate::models::{Booking, CartItem, NewsArticle, Profile, Tour, TourType};
use crate::services::CartSummary;

/// GET /api/v1/home - landing page payload
#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub featured_tours: Vec<Tour>,
    pub tour_types: Vec<TourType>,
    pub latest_news: Vec<NewsArticle>,
}

/// GET /api/v1/tours - list payload
#[derive(Debug, Serialize, Deserialize)]
pub struct TourListResponse {
    pub tours: Vec<Tour>,
    pub tour_types: Vec<TourType>,
    pub total: usize,
}

/// GET /api/v1/cart - cart lines plus totals
#[derive(Debug, Serialize, Deserialize)]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub summary: CartSummary,
}

/// POST /api/v1/cart/checkout - created bookings plus the totals charged
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub bookings: Vec<Booking>,
    pub summary: CartSummary,
}

/// GET /api/v1/dashboard - bookings and wishlist
#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub bookings: Vec<Booking>,
    pub wishlist: Vec<Tour>,
}

/// Successful auth operations: the session token plus the identity
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub token: String,
    pub user_id: String,
    pub email: String,
    pub profile: Profile,
    pub is_demo: bool,
}

impl From<crate::services::Session> for SessionResponse {
    fn from(session: crate::services::Session) -> Self {
        Self {
            token: session.token,
            user_id: session.user_id,
            email: session.email,
            profile: session.profile,
            is_demo: session.is_demo,
        }
    }
}

/// Plain acknowledgement body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// GET /api/v1/site - operating mode banner info
#[derive(Debug, Serialize)]
pub struct SiteInfoResponse {
    pub name: &'static str,
    /// "demo" or "live"
    pub mode: &'static str,
    pub assistant_enabled: bool,
}
