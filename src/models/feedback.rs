//! Contact-form feedback model
//!
//! Write-only from this application: the contact page inserts a row and
//! nothing here ever reads it back.

use serde::{Deserialize, Serialize};

/// Insert payload for the `feedback` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFeedback {
    pub name: String,
    pub email: String,
    pub message: String,
    /// Always false at submission; flipped by the admin side
    pub read: bool,
}

impl NewFeedback {
    pub fn new(name: String, email: String, message: String) -> Self {
        Self {
            name,
            email,
            message,
            read: false,
        }
    }
}
