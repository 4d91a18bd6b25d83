//! Tour catalog endpoints
//!
//! - GET /api/v1/tours - filtered/sorted tour list
//! - GET /api/v1/tours/{id} - tour detail with embedded category

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::TourListResponse;
use crate::models::{Tour, TourFilter, TourSort};

/// Query parameters for the tour list
#[derive(Debug, Default, Deserialize)]
pub struct TourListQuery {
    /// Category id
    #[serde(rename = "type")]
    pub tour_type: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub country: Option<String>,
    /// Free-text search over name and country
    pub q: Option<String>,
    pub sort: Option<TourSort>,
}

impl TourListQuery {
    fn into_filter(self) -> TourFilter {
        // Blank form fields arrive as empty strings, which mean "no filter"
        let non_blank = |value: Option<String>| value.filter(|s| !s.trim().is_empty());
        TourFilter {
            tour_type: non_blank(self.tour_type),
            min_price: self.min_price,
            max_price: self.max_price,
            country: non_blank(self.country),
            query: non_blank(self.q),
            sort: self.sort.unwrap_or_default(),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tours))
        .route("/{id}", get(get_tour))
}

/// GET /api/v1/tours - list tours matching the filter
async fn list_tours(
    State(state): State<AppState>,
    Query(query): Query<TourListQuery>,
) -> Result<Json<TourListResponse>, ApiError> {
    let filter = query.into_filter();
    let tours = state.data.list_tours(&filter).await?;
    let tour_types = state.data.list_tour_types().await?;
    Ok(Json(TourListResponse {
        total: tours.len(),
        tours,
        tour_types,
    }))
}

/// GET /api/v1/tours/{id} - tour detail
///
/// An unknown id is a rendered not-found condition, not a failure.
async fn get_tour(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Tour>, ApiError> {
    let tour = state
        .data
        .get_tour(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tour not found"))?;
    Ok(Json(tour))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_params_become_unfiltered() {
        let query = TourListQuery {
            tour_type: Some(String::new()),
            country: Some("  ".to_string()),
            q: None,
            ..Default::default()
        };
        let filter = query.into_filter();
        assert!(filter.is_unfiltered());
        assert_eq!(filter.sort, TourSort::Featured);
    }

    #[test]
    fn test_sort_param_deserializes_kebab_case() {
        let query: TourListQuery =
            serde_urlencoded_like("sort=price-low&type=2&min_price=100");
        assert_eq!(query.sort, Some(TourSort::PriceLow));
        assert_eq!(query.tour_type.as_deref(), Some("2"));
        assert_eq!(query.min_price, Some(100.0));
    }

    // Query-string deserialization via serde_json detour keeps the test
    // free of an extra dev dependency
    fn serde_urlencoded_like(query: &str) -> TourListQuery {
        let mut map = serde_json::Map::new();
        for pair in query.split('&') {
            let (key, value) = pair.split_once('=').unwrap();
            let json_value = if key == "min_price" || key == "max_price" {
                serde_json::json!(value.parse::<f64>().unwrap())
            } else {
                serde_json::json!(value)
            };
            map.insert(key.to_string(), json_value);
        }
        serde_json::from_value(serde_json::Value::Object(map)).unwrap()
    }
}
