//! Fixture-backed data source
//!
//! Serves the static demo catalog read-only and keeps the mutable demo
//! state (cart, bookings, profile) in process memory. Mutations last for
//! the process lifetime only; nothing here performs I/O.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::fixtures;
use crate::models::{
    Booking, BookingStatus, CartItem, NewBooking, NewCartItem, NewFeedback, NewsArticle, Profile,
    ProfileUpdate, Tour, TourFilter, TourType,
};

use super::{DataSource, DataSourceError, Result, UserScope};

/// Mutable slice of the demo world
struct FixtureState {
    cart: Vec<CartItem>,
    bookings: Vec<Booking>,
    profile: Profile,
    next_id: u64,
}

impl FixtureState {
    fn seed() -> Self {
        Self {
            cart: fixtures::demo_cart(),
            bookings: fixtures::demo_bookings(),
            profile: fixtures::demo_profile(),
            next_id: 100,
        }
    }

    fn issue_id(&mut self) -> String {
        let id = self.next_id;
        self.next_id += 1;
        id.to_string()
    }
}

/// In-memory data source for demo mode
pub struct FixtureSource {
    state: RwLock<FixtureState>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(FixtureState::seed()),
        }
    }
}

impl Default for FixtureSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DataSource for FixtureSource {
    async fn list_tours(&self, filter: &TourFilter) -> Result<Vec<Tour>> {
        Ok(filter.apply(&fixtures::demo_tours()))
    }

    async fn get_tour(&self, id: &str) -> Result<Option<Tour>> {
        let mut tour = fixtures::demo_tour(id);
        if let Some(ref mut tour) = tour {
            tour.tour_type = fixtures::demo_tour_types()
                .into_iter()
                .find(|t| t.id == tour.tour_type_id);
        }
        Ok(tour)
    }

    async fn featured_tours(&self, limit: usize) -> Result<Vec<Tour>> {
        Ok(fixtures::demo_tours()
            .into_iter()
            .filter(|tour| tour.featured)
            .take(limit)
            .collect())
    }

    async fn list_tour_types(&self) -> Result<Vec<TourType>> {
        Ok(fixtures::demo_tour_types())
    }

    async fn list_news(&self, limit: Option<usize>) -> Result<Vec<NewsArticle>> {
        let news = fixtures::demo_news();
        Ok(match limit {
            Some(limit) => news.into_iter().take(limit).collect(),
            None => news,
        })
    }

    async fn get_news(&self, id: &str) -> Result<Option<NewsArticle>> {
        Ok(fixtures::demo_news()
            .into_iter()
            .find(|article| article.id == id))
    }

    async fn list_bookings(&self, _user: &UserScope) -> Result<Vec<Booking>> {
        let state = self.state.read().await;
        let mut bookings = state.bookings.clone();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }

    async fn create_bookings(
        &self,
        _user: &UserScope,
        bookings: Vec<NewBooking>,
    ) -> Result<Vec<Booking>> {
        let mut state = self.state.write().await;
        let mut created = Vec::with_capacity(bookings.len());
        for new in bookings {
            let booking = Booking {
                id: state.issue_id(),
                created_at: Utc::now(),
                tour: fixtures::demo_tour(&new.tour_id),
                user_id: new.user_id,
                tour_id: new.tour_id,
                start_date: new.start_date,
                end_date: new.end_date,
                travelers: new.travelers,
                total_price: new.total_price,
                status: BookingStatus::Confirmed,
            };
            state.bookings.push(booking.clone());
            created.push(booking);
        }
        Ok(created)
    }

    async fn list_cart(&self, _user: &UserScope) -> Result<Vec<CartItem>> {
        Ok(self.state.read().await.cart.clone())
    }

    async fn add_cart_item(&self, _user: &UserScope, item: NewCartItem) -> Result<CartItem> {
        let tour = fixtures::demo_tour(&item.tour_id)
            .ok_or(DataSourceError::NotFound("tour"))?;
        let mut state = self.state.write().await;
        let cart_item = CartItem {
            id: state.issue_id(),
            created_at: Utc::now(),
            user_id: item.user_id,
            tour_id: item.tour_id,
            tour: Some(tour),
            start_date: item.start_date,
            end_date: item.end_date,
            travelers: item.travelers,
        };
        state.cart.push(cart_item.clone());
        Ok(cart_item)
    }

    async fn set_cart_travelers(
        &self,
        _user: &UserScope,
        item_id: &str,
        travelers: u32,
    ) -> Result<()> {
        let mut state = self.state.write().await;
        let item = state
            .cart
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or(DataSourceError::NotFound("cart item"))?;
        item.travelers = travelers;
        Ok(())
    }

    async fn remove_cart_item(&self, _user: &UserScope, item_id: &str) -> Result<()> {
        let mut state = self.state.write().await;
        let before = state.cart.len();
        state.cart.retain(|item| item.id != item_id);
        if state.cart.len() == before {
            return Err(DataSourceError::NotFound("cart item"));
        }
        Ok(())
    }

    async fn clear_cart(&self, _user: &UserScope) -> Result<()> {
        self.state.write().await.cart.clear();
        Ok(())
    }

    async fn list_wishlist(&self, _user: &UserScope) -> Result<Vec<Tour>> {
        Ok(fixtures::demo_wishlist())
    }

    async fn submit_feedback(&self, _feedback: NewFeedback) -> Result<()> {
        // Accepted and dropped; the demo store keeps no inbox
        Ok(())
    }

    async fn get_profile(&self, _user: &UserScope) -> Result<Option<Profile>> {
        Ok(Some(self.state.read().await.profile.clone()))
    }

    async fn update_profile(&self, _user: &UserScope, update: &ProfileUpdate) -> Result<Profile> {
        let mut state = self.state.write().await;
        update.apply_to(&mut state.profile);
        Ok(state.profile.clone())
    }
}
