//! Tour model and catalog filtering
//!
//! Tours are read-only reference data from this application's perspective:
//! there is no authoring surface here. `TourFilter` carries the tour-list
//! filter/sort criteria and owns the in-memory implementation used in demo
//! mode; the live backend source translates the same criteria into query
//! parameters, and both must agree on semantics.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tour category (reference data from the `tour_types` table).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourType {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub icon: Option<String>,
}

/// A bookable tour from the `tours` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tour {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub description: String,
    pub country: String,
    /// Price per traveler, always positive
    pub price: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub image_url: String,
    #[serde(default)]
    pub gallery: Vec<String>,
    /// Average rating in [0, 5]
    pub rating: f64,
    pub tour_type_id: String,
    /// Embedded category when the query joined it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tour_type: Option<TourType>,
    pub creator_id: String,
    pub featured: bool,
}

impl Tour {
    /// Trip length in nights
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

/// Sort key for the tour list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TourSort {
    /// Featured tours first (default)
    #[default]
    Featured,
    /// Price ascending
    PriceLow,
    /// Price descending
    PriceHigh,
    /// Rating descending
    Rating,
}

impl fmt::Display for TourSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TourSort::Featured => write!(f, "featured"),
            TourSort::PriceLow => write!(f, "price-low"),
            TourSort::PriceHigh => write!(f, "price-high"),
            TourSort::Rating => write!(f, "rating"),
        }
    }
}

impl FromStr for TourSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" => Ok(TourSort::Featured),
            "price-low" => Ok(TourSort::PriceLow),
            "price-high" => Ok(TourSort::PriceHigh),
            "rating" => Ok(TourSort::Rating),
            _ => Err(format!("Invalid sort key: {}", s)),
        }
    }
}

/// Filter/sort criteria for the tour list.
///
/// Empty criteria match everything. Both data sources honor the same
/// semantics: equality on category id, inclusive price bounds,
/// case-insensitive substring match on country, free-text query over name
/// and country.
#[derive(Debug, Clone, Default)]
pub struct TourFilter {
    pub tour_type: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub country: Option<String>,
    pub query: Option<String>,
    pub sort: TourSort,
}

impl TourFilter {
    /// True when no narrowing criterion is set (sort alone does not count)
    pub fn is_unfiltered(&self) -> bool {
        self.tour_type.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.country.is_none()
            && self.query.is_none()
    }

    /// Whether a single tour matches the narrowing criteria
    pub fn matches(&self, tour: &Tour) -> bool {
        if let Some(ref query) = self.query {
            let query = query.to_lowercase();
            if !tour.name.to_lowercase().contains(&query)
                && !tour.country.to_lowercase().contains(&query)
            {
                return false;
            }
        }
        if let Some(ref tour_type) = self.tour_type {
            if tour.tour_type_id != *tour_type {
                return false;
            }
        }
        if let Some(min_price) = self.min_price {
            if tour.price < min_price {
                return false;
            }
        }
        if let Some(max_price) = self.max_price {
            if tour.price > max_price {
                return false;
            }
        }
        if let Some(ref country) = self.country {
            if !tour
                .country
                .to_lowercase()
                .contains(&country.to_lowercase())
            {
                return false;
            }
        }
        true
    }

    /// Filter and sort a catalog in memory (demo-mode path).
    ///
    /// Sorts are stable, so tours that compare equal keep their catalog
    /// order. This mirrors what the backend returns for the equivalent
    /// `order=` parameter.
    pub fn apply(&self, tours: &[Tour]) -> Vec<Tour> {
        let mut filtered: Vec<Tour> = tours
            .iter()
            .filter(|tour| self.matches(tour))
            .cloned()
            .collect();

        match self.sort {
            TourSort::PriceLow => {
                filtered.sort_by(|a, b| a.price.total_cmp(&b.price));
            }
            TourSort::PriceHigh => {
                filtered.sort_by(|a, b| b.price.total_cmp(&a.price));
            }
            TourSort::Rating => {
                filtered.sort_by(|a, b| b.rating.total_cmp(&a.rating));
            }
            TourSort::Featured => {
                filtered.sort_by_key(|tour| !tour.featured);
            }
        }

        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_sort_key_roundtrip() {
        for sort in [
            TourSort::Featured,
            TourSort::PriceLow,
            TourSort::PriceHigh,
            TourSort::Rating,
        ] {
            assert_eq!(sort.to_string().parse::<TourSort>().unwrap(), sort);
        }
        assert!("newest".parse::<TourSort>().is_err());
    }

    #[test]
    fn test_duration_in_nights() {
        let bali = fixtures::demo_tour("1").unwrap();
        assert_eq!(bali.duration_days(), 7);
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let tours = fixtures::demo_tours();
        let filter = TourFilter::default();
        assert!(filter.is_unfiltered());
        assert_eq!(filter.apply(&tours).len(), tours.len());
    }

    #[test]
    fn test_price_bounds_inclusive() {
        let tours = fixtures::demo_tours();
        let filter = TourFilter {
            min_price: Some(1299.0),
            max_price: Some(1299.0),
            ..Default::default()
        };
        let result = filter.apply(&tours);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "1");
    }

    #[test]
    fn test_country_match_is_case_insensitive_substring() {
        let tours = fixtures::demo_tours();
        let filter = TourFilter {
            country: Some("SWITZ".to_string()),
            ..Default::default()
        };
        let result = filter.apply(&tours);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].country, "Switzerland");
    }

    #[test]
    fn test_query_searches_name_and_country() {
        let tours = fixtures::demo_tours();
        let by_name = TourFilter {
            query: Some("safari".to_string()),
            ..Default::default()
        };
        assert_eq!(by_name.apply(&tours).len(), 1);

        let by_country = TourFilter {
            query: Some("japan".to_string()),
            ..Default::default()
        };
        assert_eq!(by_country.apply(&tours).len(), 1);
    }

    #[test]
    fn test_featured_sort_is_stable() {
        let tours = fixtures::demo_tours();
        let filter = TourFilter::default();
        let sorted = filter.apply(&tours);

        // All featured tours precede all non-featured ones
        let first_plain = sorted.iter().position(|t| !t.featured).unwrap();
        assert!(sorted[..first_plain].iter().all(|t| t.featured));
        assert!(sorted[first_plain..].iter().all(|t| !t.featured));

        // Within each group the catalog order is preserved
        let featured_ids: Vec<&str> = sorted[..first_plain].iter().map(|t| t.id.as_str()).collect();
        assert_eq!(featured_ids, vec!["1", "2", "3", "6", "7"]);
    }

    #[test]
    fn test_price_sort_ascending() {
        let tours = fixtures::demo_tours();
        let filter = TourFilter {
            sort: TourSort::PriceLow,
            ..Default::default()
        };
        let sorted = filter.apply(&tours);
        assert!(sorted.windows(2).all(|w| w[0].price <= w[1].price));
    }

    #[test]
    fn test_rating_sort_descending() {
        let tours = fixtures::demo_tours();
        let filter = TourFilter {
            sort: TourSort::Rating,
            ..Default::default()
        };
        let sorted = filter.apply(&tours);
        assert!(sorted.windows(2).all(|w| w[0].rating >= w[1].rating));
        assert_eq!(sorted[0].id, "7"); // Maldives, 5.0
    }

    #[test]
    fn test_combined_filters() {
        let tours = fixtures::demo_tours();
        let filter = TourFilter {
            tour_type: Some("2".to_string()),
            max_price: Some(2500.0),
            ..Default::default()
        };
        let result = filter.apply(&tours);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Swiss Alps Adventure");
    }
}
