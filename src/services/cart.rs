//! Cart math and checkout
//!
//! Totals: subtotal = Σ(price × travelers), tax = subtotal × rate,
//! total = subtotal + tax. The rate and currency come from checkout
//! configuration. Checkout turns every cart line into one confirmed
//! booking priced at `tour.price × travelers`, then empties the cart.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::CheckoutConfig;
use crate::datasource::{DataSource, DataSourceError, Result, UserScope};
use crate::models::{Booking, BookingStatus, CartItem, NewBooking};

/// Cart totals for display and checkout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartSummary {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub currency: String,
}

impl CartSummary {
    pub fn compute(items: &[CartItem], config: &CheckoutConfig) -> Self {
        let subtotal: f64 = items.iter().map(CartItem::line_total).sum();
        let tax = subtotal * config.tax_rate;
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
            currency: config.currency.clone(),
        }
    }
}

/// Cart operations over the active data source
pub struct CartService {
    data: Arc<dyn DataSource>,
    config: CheckoutConfig,
}

impl CartService {
    pub fn new(data: Arc<dyn DataSource>, config: CheckoutConfig) -> Self {
        Self { data, config }
    }

    /// Current cart lines plus totals
    pub async fn summary(&self, user: &UserScope) -> Result<(Vec<CartItem>, CartSummary)> {
        let items = self.data.list_cart(user).await?;
        let summary = CartSummary::compute(&items, &self.config);
        Ok((items, summary))
    }

    /// Check out the whole cart: one confirmed booking per line, then the
    /// cart is cleared. An empty cart is a caller error.
    pub async fn checkout(&self, user: &UserScope) -> Result<Vec<Booking>> {
        let items = self.data.list_cart(user).await?;
        if items.is_empty() {
            return Err(DataSourceError::NotFound("cart item"));
        }

        let bookings: Vec<NewBooking> = items
            .iter()
            .map(|item| NewBooking {
                user_id: user.user_id.clone(),
                tour_id: item.tour_id.clone(),
                start_date: item.start_date,
                end_date: item.end_date,
                travelers: item.travelers,
                total_price: item.line_total(),
                status: BookingStatus::Confirmed,
            })
            .collect();

        let created = self.data.create_bookings(user, bookings).await?;
        self.data.clear_cart(user).await?;
        Ok(created)
    }
}
