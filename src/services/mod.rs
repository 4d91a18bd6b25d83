//! Business services
//!
//! The layer between the HTTP handlers and the data source: session
//! lifecycle, cart math and checkout, and the assistant bridge.

pub mod assistant;
pub mod cart;
pub mod session;

pub use assistant::{AssistantError, AssistantService};
pub use cart::{CartService, CartSummary};
pub use session::{Session, SessionError, SessionService};
