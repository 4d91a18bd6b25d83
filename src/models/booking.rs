//! Booking model
//!
//! Bookings are created at checkout with `total_price = tour.price ×
//! travelers` and status `confirmed`. Later status transitions (completed,
//! cancelled) are owned by the backend/admin side; this application only
//! reads them back.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::tour::Tour;

/// A booking row from the `bookings` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
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
    pub total_price: f64,
    pub status: BookingStatus,
}

/// Booking lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "pending"),
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
            BookingStatus::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

/// Insert payload for a new booking, built from a cart line at checkout.
#[derive(Debug, Clone, Serialize)]
pub struct NewBooking {
    pub user_id: String,
    pub tour_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub travelers: u32,
    pub total_price: f64,
    pub status: BookingStatus,
}
