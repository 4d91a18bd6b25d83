//! Table read query builder
//!
//! Builds PostgREST query strings: `eq.`, `gte.`, `lte.`, `ilike.` column
//! operators plus `order`, `limit` and embedded-resource `select` clauses.
//! The parameter list this produces is the live-mode counterpart of the
//! in-memory `TourFilter::apply`, and the two must agree on semantics.

use serde::de::DeserializeOwned;

use super::{BackendError, Client};

/// Accumulates filter/order/limit parameters for one table read.
#[derive(Debug)]
pub struct QueryBuilder<'a> {
    client: &'a Client,
    table: String,
    select: String,
    params: Vec<(String, String)>,
    access_token: Option<String>,
}

impl<'a> QueryBuilder<'a> {
    pub(crate) fn new(client: &'a Client, table: &str) -> Self {
        Self {
            client,
            table: table.to_string(),
            select: "*".to_string(),
            params: Vec::new(),
            access_token: None,
        }
    }

    /// Columns (and embedded resources) to return, e.g. `*, tour:tours(*)`
    pub fn select(mut self, columns: &str) -> Self {
        self.select = columns.to_string();
        self
    }

    /// Perform the read with the user's access token instead of the API key
    pub fn auth(mut self, access_token: &str) -> Self {
        self.access_token = Some(access_token.to_string());
        self
    }

    /// Column equals value
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.params.push((column.to_string(), format!("eq.{}", value)));
        self
    }

    /// Column greater than or equal
    pub fn gte(mut self, column: &str, value: f64) -> Self {
        self.params.push((column.to_string(), format!("gte.{}", value)));
        self
    }

    /// Column less than or equal
    pub fn lte(mut self, column: &str, value: f64) -> Self {
        self.params.push((column.to_string(), format!("lte.{}", value)));
        self
    }

    /// Case-insensitive substring match
    pub fn ilike(mut self, column: &str, value: &str) -> Self {
        self.params
            .push((column.to_string(), format!("ilike.*{}*", value)));
        self
    }

    /// Disjunction of column conditions, e.g.
    /// `name.ilike.*bali*,country.ilike.*bali*`
    pub fn or(mut self, conditions: &str) -> Self {
        self.params
            .push(("or".to_string(), format!("({})", conditions)));
        self
    }

    /// Sort by a column
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.params
            .push(("order".to_string(), format!("{}.{}", column, direction)));
        self
    }

    /// Cap the number of rows returned
    pub fn limit(mut self, count: usize) -> Self {
        self.params.push(("limit".to_string(), count.to_string()));
        self
    }

    /// The full parameter list as it will be sent, select included.
    /// Exposed so the filter-equivalence tests can inspect it.
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.select.clone())];
        params.extend(self.params.iter().cloned());
        params
    }

    /// Execute, expecting any number of rows
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, BackendError> {
        let request = self
            .client
            .http()
            .get(self.client.rest_url(&self.table))
            .query(&self.query_params());
        let response = self
            .client
            .authorize(request, self.access_token.as_deref())
            .send()
            .await?;
        Client::decode(response).await
    }

    /// Execute, expecting at most one row. `Ok(None)` is the not-found
    /// case, which callers render as a dedicated view rather than an error.
    pub async fn fetch_one<T: DeserializeOwned>(self) -> Result<Option<T>, BackendError> {
        let mut rows: Vec<T> = self.limit(1).fetch().await?;
        Ok(rows.pop())
    }
}
