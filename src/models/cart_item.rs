//! Cart item model
//!
//! Cart lines are created when a tour is added to the cart, mutated only
//! for the traveler count, and deleted on checkout or explicit removal.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::tour::Tour;

/// Allowed traveler-count range per cart line
pub const MIN_TRAVELERS: u32 = 1;
pub const MAX_TRAVELERS: u32 = 8;

/// A line in a user's cart, from the `cart_items` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
    pub tour_id: String,
    /// Embedded tour when the query joined it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tour: Option<Tour>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub travelers: u32,
}

impl CartItem {
    /// Line total: tour price × travelers. Zero when the tour join is
    /// missing, matching how the cart renders an orphaned line.
    pub fn line_total(&self) -> f64 {
        self.tour.as_ref().map_or(0.0, |t| t.price) * self.travelers as f64
    }
}

/// Insert payload for adding a tour to the cart.
#[derive(Debug, Clone, Serialize)]
pub struct NewCartItem {
    pub user_id: String,
    pub tour_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub travelers: u32,
}

/// Validate a requested traveler count against the allowed range
pub fn validate_travelers(travelers: u32) -> Result<u32, String> {
    if (MIN_TRAVELERS..=MAX_TRAVELERS).contains(&travelers) {
        Ok(travelers)
    } else {
        Err(format!(
            "Travelers must be between {} and {}",
            MIN_TRAVELERS, MAX_TRAVELERS
        ))
    }
}
