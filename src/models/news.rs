//! News article model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A news article from the `news` table. Read-only for this application;
/// only `published = true` rows are ever served.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub image_url: String,
    pub author_id: String,
    pub published: bool,
}
