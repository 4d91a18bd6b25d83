//! Domain models
//!
//! Rust mirrors of the entity shapes owned by the hosted backend's schema
//! (tables: profiles, tour_types, tours, bookings, cart_items, news,
//! feedback). The application never defines the storage format, only the
//! shape it expects back.

pub mod booking;
pub mod cart_item;
pub mod feedback;
pub mod news;
pub mod profile;
pub mod tour;

pub use booking::{Booking, BookingStatus, NewBooking};
pub use cart_item::{CartItem, NewCartItem};
pub use feedback::NewFeedback;
pub use news::NewsArticle;
pub use profile::{Profile, ProfileUpdate, UserType};
pub use tour::{Tour, TourFilter, TourSort, TourType};
