//! Profile model
//!
//! A profile row is created by the backend at sign-up and mutated only
//! through the profile-update operation; the application never deletes one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User profile as stored in the `profiles` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Backend user id (UUID in live mode, fixed string in demo mode)
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
    pub phone: Option<String>,
    pub user_type: UserType,
}

impl Profile {
    /// Check if the profile belongs to an administrator
    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin
    }

    /// Display name: "First Last" when available, else the email
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self.email.clone(),
        }
    }
}

/// Account tier stored on the profile row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    User,
    Admin,
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserType::User => write!(f, "user"),
            UserType::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(UserType::User),
            "admin" => Ok(UserType::Admin),
            _ => Err(format!("Invalid user type: {}", s)),
        }
    }
}

/// Changed profile fields for an update operation.
///
/// `None` fields are left untouched; only present fields are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    /// True when no field would be written
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone.is_none()
            && self.avatar_url.is_none()
    }

    /// Apply the update to an in-memory profile (demo mode path)
    pub fn apply_to(&self, profile: &mut Profile) {
        if let Some(ref first_name) = self.first_name {
            profile.first_name = Some(first_name.clone());
        }
        if let Some(ref last_name) = self.last_name {
            profile.last_name = Some(last_name.clone());
        }
        if let Some(ref phone) = self.phone {
            profile.phone = Some(phone.clone());
        }
        if let Some(ref avatar_url) = self.avatar_url {
            profile.avatar_url = Some(avatar_url.clone());
        }
    }
}
