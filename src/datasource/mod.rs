//! Data access abstraction
//!
//! One polymorphic interface over the two operating modes: `FixtureSource`
//! serves the in-memory demo store, `BackendSource` talks to the hosted
//! backend. The variant is selected once at startup from the mode
//! selector, so no page handler branches on demo/live inline. Both
//! variants must honor the same filter/sort semantics for the tour list.

pub mod backend_source;
pub mod fixture;

pub use backend_source::BackendSource;
pub use fixture::FixtureSource;

use async_trait::async_trait;
use std::sync::Arc;

use crate::backend::BackendError;
use crate::config::{BackendConfig, DataMode};
use crate::models::{
    Booking, CartItem, NewBooking, NewCartItem, NewFeedback, NewsArticle, Profile, ProfileUpdate,
    Tour, TourFilter, TourType,
};

/// Errors surfaced by data access operations
#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// A mutation referenced a row that does not exist
    #[error("{0} not found")]
    NotFound(&'static str),
}

pub type Result<T> = std::result::Result<T, DataSourceError>;

/// The user on whose behalf a scoped operation runs.
///
/// Row ownership is enforced by the backend (row-level security keyed on
/// the access token); the application only scopes queries by the session's
/// user id and forwards the token.
#[derive(Debug, Clone)]
pub struct UserScope {
    pub user_id: String,
    /// Backend access token; `None` in demo mode
    pub access_token: Option<String>,
}

impl UserScope {
    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }
}

/// Table-style read/write operations every page depends on.
#[async_trait]
pub trait DataSource: Send + Sync {
    // Catalog
    async fn list_tours(&self, filter: &TourFilter) -> Result<Vec<Tour>>;
    async fn get_tour(&self, id: &str) -> Result<Option<Tour>>;
    async fn featured_tours(&self, limit: usize) -> Result<Vec<Tour>>;
    async fn list_tour_types(&self) -> Result<Vec<TourType>>;

    // News
    async fn list_news(&self, limit: Option<usize>) -> Result<Vec<NewsArticle>>;
    async fn get_news(&self, id: &str) -> Result<Option<NewsArticle>>;

    // Bookings
    async fn list_bookings(&self, user: &UserScope) -> Result<Vec<Booking>>;
    async fn create_bookings(
        &self,
        user: &UserScope,
        bookings: Vec<NewBooking>,
    ) -> Result<Vec<Booking>>;

    // Cart
    async fn list_cart(&self, user: &UserScope) -> Result<Vec<CartItem>>;
    async fn add_cart_item(&self, user: &UserScope, item: NewCartItem) -> Result<CartItem>;
    async fn set_cart_travelers(
        &self,
        user: &UserScope,
        item_id: &str,
        travelers: u32,
    ) -> Result<()>;
    async fn remove_cart_item(&self, user: &UserScope, item_id: &str) -> Result<()>;
    async fn clear_cart(&self, user: &UserScope) -> Result<()>;

    // Dashboard extras
    async fn list_wishlist(&self, user: &UserScope) -> Result<Vec<Tour>>;

    // Contact form
    async fn submit_feedback(&self, feedback: NewFeedback) -> Result<()>;

    // Profile
    async fn get_profile(&self, user: &UserScope) -> Result<Option<Profile>>;
    async fn update_profile(&self, user: &UserScope, update: &ProfileUpdate) -> Result<Profile>;
}

/// Wire the data source matching the configured mode.
pub fn create_data_source(config: &BackendConfig) -> Arc<dyn DataSource> {
    match config.mode() {
        DataMode::Demo => Arc::new(FixtureSource::new()),
        DataMode::Live => Arc::new(BackendSource::new(config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_data_source_demo_when_unconfigured() {
        let source = create_data_source(&BackendConfig::default());
        // Fixture source serves the full catalog without any backend
        let tours = tokio_test::block_on(source.list_tours(&TourFilter::default())).unwrap();
        assert_eq!(tours.len(), 8);
    }
}
