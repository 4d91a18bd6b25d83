//! Wanderhub - a travel booking storefront service
//!
//! This library provides the core functionality for the Wanderhub API:
//! tour catalog, cart and checkout, bookings, sessions and the assistant
//! relay, backed either by bundled demo fixtures or a hosted backend.

pub mod api;
pub mod backend;
pub mod config;
pub mod datasource;
pub mod fixtures;
pub mod models;
pub mod services;
