//! Backend-backed data source
//!
//! Translates each data access call into hosted-backend requests. Tour
//! detail, booking and cart reads embed their joined rows through the
//! backend's embedded-resource selects. The tour-list translation in
//! `apply_tour_filter` must stay semantically aligned with
//! `TourFilter::apply`, the in-memory counterpart used in demo mode.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::backend::{Client, QueryBuilder};
use crate::config::BackendConfig;
use crate::models::{
    Booking, CartItem, NewBooking, NewCartItem, NewFeedback, NewsArticle, Profile, ProfileUpdate,
    Tour, TourFilter, TourSort, TourType,
};

use super::{DataSource, DataSourceError, Result, UserScope};

/// Data source talking to the hosted backend
pub struct BackendSource {
    client: Client,
    /// Secret-tier client, used only where no user token applies
    service: Client,
}

impl BackendSource {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            client: Client::new(config),
            service: Client::service(config),
        }
    }

    /// Featured-strip read. Ordered by creation so the row order matches
    /// the fixture catalog order served in demo mode.
    fn featured_query(&self, limit: usize) -> QueryBuilder<'_> {
        self.client
            .from("tours")
            .eq("featured", "true")
            .order("created_at", true)
            .limit(limit)
    }
}

/// Translate tour-list criteria into backend query parameters.
///
/// Must produce the same filtering and ordering as `TourFilter::apply`:
/// equality on category, inclusive price bounds, case-insensitive country
/// substring, free-text over name and country, and one order key per sort.
pub fn apply_tour_filter<'a>(
    mut query: QueryBuilder<'a>,
    filter: &TourFilter,
) -> QueryBuilder<'a> {
    if let Some(ref query_text) = filter.query {
        let pattern = quoted_pattern(query_text);
        query = query.or(&format!(
            "name.ilike.{},country.ilike.{}",
            pattern, pattern
        ));
    }
    if let Some(ref tour_type) = filter.tour_type {
        query = query.eq("tour_type_id", tour_type);
    }
    if let Some(min_price) = filter.min_price {
        query = query.gte("price", min_price);
    }
    if let Some(max_price) = filter.max_price {
        query = query.lte("price", max_price);
    }
    if let Some(ref country) = filter.country {
        query = query.ilike("country", country);
    }

    match filter.sort {
        TourSort::PriceLow => query.order("price", true),
        TourSort::PriceHigh => query.order("price", false),
        TourSort::Rating => query.order("rating", false),
        TourSort::Featured => query.order("featured", false),
    }
}

/// Wrap a free-text term as a double-quoted `*term*` ilike pattern.
///
/// Quoting keeps commas and parentheses in the term from breaking the
/// `or=(...)` grammar. The text itself is sent raw: percent-encoding is the
/// HTTP client's job and must happen exactly once, or the backend matches
/// the encoded literal instead of the user's words.
fn quoted_pattern(term: &str) -> String {
    let escaped = term.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"*{}*\"", escaped)
}

/// Wishlist rows only matter for the tour they point at
#[derive(Debug, Deserialize)]
struct WishlistRow {
    tour: Option<Tour>,
}

#[async_trait]
impl DataSource for BackendSource {
    async fn list_tours(&self, filter: &TourFilter) -> Result<Vec<Tour>> {
        let query = apply_tour_filter(self.client.from("tours"), filter);
        Ok(query.fetch().await?)
    }

    async fn get_tour(&self, id: &str) -> Result<Option<Tour>> {
        Ok(self
            .client
            .from("tours")
            .select("*, tour_type:tour_types(*)")
            .eq("id", id)
            .fetch_one()
            .await?)
    }

    async fn featured_tours(&self, limit: usize) -> Result<Vec<Tour>> {
        Ok(self.featured_query(limit).fetch().await?)
    }

    async fn list_tour_types(&self) -> Result<Vec<TourType>> {
        Ok(self.client.from("tour_types").fetch().await?)
    }

    async fn list_news(&self, limit: Option<usize>) -> Result<Vec<NewsArticle>> {
        let mut query = self
            .client
            .from("news")
            .eq("published", "true")
            .order("created_at", false);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        Ok(query.fetch().await?)
    }

    async fn get_news(&self, id: &str) -> Result<Option<NewsArticle>> {
        Ok(self.client.from("news").eq("id", id).fetch_one().await?)
    }

    async fn list_bookings(&self, user: &UserScope) -> Result<Vec<Booking>> {
        let mut query = self
            .client
            .from("bookings")
            .select("*, tour:tours(*)")
            .eq("user_id", &user.user_id)
            .order("created_at", false);
        if let Some(token) = user.token() {
            query = query.auth(token);
        }
        Ok(query.fetch().await?)
    }

    async fn create_bookings(
        &self,
        user: &UserScope,
        bookings: Vec<NewBooking>,
    ) -> Result<Vec<Booking>> {
        Ok(self
            .client
            .insert("bookings", &bookings, user.token())
            .await?)
    }

    async fn list_cart(&self, user: &UserScope) -> Result<Vec<CartItem>> {
        let mut query = self
            .client
            .from("cart_items")
            .select("*, tour:tours(*)")
            .eq("user_id", &user.user_id);
        if let Some(token) = user.token() {
            query = query.auth(token);
        }
        Ok(query.fetch().await?)
    }

    async fn add_cart_item(&self, user: &UserScope, item: NewCartItem) -> Result<CartItem> {
        let mut created: Vec<CartItem> = self
            .client
            .insert("cart_items", &[item], user.token())
            .await?;
        created.pop().ok_or(DataSourceError::NotFound("cart item"))
    }

    async fn set_cart_travelers(
        &self,
        user: &UserScope,
        item_id: &str,
        travelers: u32,
    ) -> Result<()> {
        self.client
            .update(
                "cart_items",
                &json!({ "travelers": travelers }),
                &[("id", item_id), ("user_id", &user.user_id)],
                user.token(),
            )
            .await?;
        Ok(())
    }

    async fn remove_cart_item(&self, user: &UserScope, item_id: &str) -> Result<()> {
        self.client
            .delete(
                "cart_items",
                &[("id", item_id), ("user_id", &user.user_id)],
                user.token(),
            )
            .await?;
        Ok(())
    }

    async fn clear_cart(&self, user: &UserScope) -> Result<()> {
        self.client
            .delete("cart_items", &[("user_id", &user.user_id)], user.token())
            .await?;
        Ok(())
    }

    async fn list_wishlist(&self, user: &UserScope) -> Result<Vec<Tour>> {
        let mut query = self
            .client
            .from("wishlist")
            .select("*, tour:tours(*)")
            .eq("user_id", &user.user_id);
        if let Some(token) = user.token() {
            query = query.auth(token);
        }
        let rows: Vec<WishlistRow> = query.fetch().await?;
        Ok(rows.into_iter().filter_map(|row| row.tour).collect())
    }

    /// The feedback table is write-only for visitors, so the insert goes
    /// through the secret tier rather than a user token.
    async fn submit_feedback(&self, feedback: NewFeedback) -> Result<()> {
        let _rows: Vec<Value> = self.service.insert("feedback", &[feedback], None).await?;
        Ok(())
    }

    async fn get_profile(&self, user: &UserScope) -> Result<Option<Profile>> {
        let mut query = self.client.from("profiles").eq("id", &user.user_id);
        if let Some(token) = user.token() {
            query = query.auth(token);
        }
        Ok(query.fetch_one().await?)
    }

    async fn update_profile(&self, user: &UserScope, update: &ProfileUpdate) -> Result<Profile> {
        self.client
            .update("profiles", update, &[("id", &user.user_id)], user.token())
            .await?;
        self.get_profile(user)
            .await?
            .ok_or(DataSourceError::NotFound("profile"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;

    fn client() -> Client {
        Client::new(&BackendConfig {
            url: "https://project.example.co".to_string(),
            publishable_key: "pk-test".to_string(),
            secret_key: String::new(),
        })
    }

    fn params_for(filter: &TourFilter) -> Vec<(String, String)> {
        let client = client();
        apply_tour_filter(client.from("tours"), filter).query_params()
    }

    #[test]
    fn test_default_filter_orders_by_featured() {
        let params = params_for(&TourFilter::default());
        assert_eq!(
            params,
            vec![
                ("select".to_string(), "*".to_string()),
                ("order".to_string(), "featured.desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_full_filter_translation() {
        let filter = TourFilter {
            tour_type: Some("2".to_string()),
            min_price: Some(500.0),
            max_price: Some(3000.0),
            country: Some("switz".to_string()),
            query: None,
            sort: TourSort::PriceLow,
        };
        let params = params_for(&filter);
        assert!(params.contains(&("tour_type_id".to_string(), "eq.2".to_string())));
        assert!(params.contains(&("price".to_string(), "gte.500".to_string())));
        assert!(params.contains(&("price".to_string(), "lte.3000".to_string())));
        assert!(params.contains(&("country".to_string(), "ilike.*switz*".to_string())));
        assert!(params.contains(&("order".to_string(), "price.asc".to_string())));
    }

    #[test]
    fn test_query_text_becomes_disjunction() {
        let filter = TourFilter {
            query: Some("bali".to_string()),
            ..Default::default()
        };
        let params = params_for(&filter);
        assert!(params.contains(&(
            "or".to_string(),
            r#"(name.ilike."*bali*",country.ilike."*bali*")"#.to_string()
        )));
    }

    #[test]
    fn test_multiword_query_is_sent_raw() {
        // The parameter value carries the user's text untouched; the HTTP
        // client percent-encodes it exactly once on send. Pre-encoding here
        // would make the backend match the encoded literal and return
        // nothing for any multi-word search.
        let filter = TourFilter {
            query: Some("new york".to_string()),
            ..Default::default()
        };
        let params = params_for(&filter);
        let (_, or_value) = params
            .into_iter()
            .find(|(key, _)| key == "or")
            .expect("query text produces an or param");
        assert_eq!(
            or_value,
            r#"(name.ilike."*new york*",country.ilike."*new york*")"#
        );
        assert!(!or_value.contains('%'));
    }

    #[test]
    fn test_query_grammar_characters_stay_inside_quotes() {
        let filter = TourFilter {
            query: Some("rome, italy".to_string()),
            ..Default::default()
        };
        let params = params_for(&filter);
        let (_, or_value) = params
            .into_iter()
            .find(|(key, _)| key == "or")
            .unwrap();
        // The comma in the term is inside a quoted pattern, so the
        // disjunction still has exactly two arms
        assert_eq!(
            or_value,
            r#"(name.ilike."*rome, italy*",country.ilike."*rome, italy*")"#
        );
    }

    #[test]
    fn test_quoted_pattern_escapes_quotes_and_backslashes() {
        assert_eq!(quoted_pattern("bali"), r#""*bali*""#);
        assert_eq!(quoted_pattern(r#"a"b"#), r#""*a\"b*""#);
        assert_eq!(quoted_pattern(r"a\b"), r#""*a\\b*""#);
    }

    #[test]
    fn test_featured_query_orders_like_the_catalog() {
        let source = BackendSource::new(&BackendConfig {
            url: "https://project.example.co".to_string(),
            publishable_key: "pk-test".to_string(),
            secret_key: "sk-test".to_string(),
        });
        let params = source.featured_query(6).query_params();
        assert!(params.contains(&("featured".to_string(), "eq.true".to_string())));
        assert!(params.contains(&("order".to_string(), "created_at.asc".to_string())));
        assert!(params.contains(&("limit".to_string(), "6".to_string())));
    }

    #[test]
    fn test_sort_keys_map_to_one_order_param_each() {
        for (sort, expected) in [
            (TourSort::Featured, "featured.desc"),
            (TourSort::PriceLow, "price.asc"),
            (TourSort::PriceHigh, "price.desc"),
            (TourSort::Rating, "rating.desc"),
        ] {
            let filter = TourFilter {
                sort,
                ..Default::default()
            };
            let orders: Vec<_> = params_for(&filter)
                .into_iter()
                .filter(|(key, _)| key == "order")
                .collect();
            assert_eq!(orders, vec![("order".to_string(), expected.to_string())]);
        }
    }
}
