use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DataPoint – one geotagged observation
// ---------------------------------------------------------------------------

/// A single geotagged battery-value observation.
///
/// Created by the loader (or the embedding application) and never mutated
/// afterwards; filtering and analysis only ever read these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Opaque unique identifier.
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    /// Categorical attributes, case preserved as stored.
    pub country: String,
    pub continent: String,
    pub climate: String,
    pub value: f64,
    /// RFC 3339 on the wire.
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Dimension – the three categorical axes
// ---------------------------------------------------------------------------

/// One of the categorical axes a point can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Country,
    Continent,
    Climate,
}

impl Dimension {
    /// The point's field for this dimension.
    pub fn field_of<'a>(&self, point: &'a DataPoint) -> &'a str {
        match self {
            Dimension::Country => &point.country,
            Dimension::Continent => &point.continent,
            Dimension::Climate => &point.climate,
        }
    }
}

// ---------------------------------------------------------------------------
// GeoDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full point collection with pre-computed value indexes.
#[derive(Debug, Clone)]
pub struct GeoDataset {
    /// All points, in load order.
    pub points: Vec<DataPoint>,
    /// Sorted unique values per categorical axis.
    pub countries: BTreeSet<String>,
    pub continents: BTreeSet<String>,
    pub climates: BTreeSet<String>,
    /// (min, max) over all point values; (0, 0) when empty.
    pub value_bounds: (f64, f64),
}

impl GeoDataset {
    /// Build the unique-value indexes from the loaded points.
    pub fn from_points(points: Vec<DataPoint>) -> Self {
        let mut countries = BTreeSet::new();
        let mut continents = BTreeSet::new();
        let mut climates = BTreeSet::new();
        let mut bounds: Option<(f64, f64)> = None;

        for p in &points {
            countries.insert(p.country.clone());
            continents.insert(p.continent.clone());
            climates.insert(p.climate.clone());
            bounds = Some(match bounds {
                None => (p.value, p.value),
                Some((lo, hi)) => (lo.min(p.value), hi.max(p.value)),
            });
        }

        GeoDataset {
            points,
            countries,
            continents,
            climates,
            value_bounds: bounds.unwrap_or((0.0, 0.0)),
        }
    }

    /// Country names lower-cased, as the query parser expects them.
    pub fn known_countries_lowercase(&self) -> BTreeSet<String> {
        self.countries.iter().map(|c| c.to_lowercase()).collect()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample::sample_points;

    #[test]
    fn indexes_cover_all_points() {
        let ds = GeoDataset::from_points(sample_points());
        assert_eq!(ds.len(), 15);
        assert!(ds.countries.contains("Germany"));
        assert!(ds.continents.contains("South America"));
        assert!(ds.climates.contains("Polar"));
        assert_eq!(ds.continents.len(), 6);
    }

    #[test]
    fn value_bounds_span_the_data() {
        let ds = GeoDataset::from_points(sample_points());
        assert_eq!(ds.value_bounds, (33.0, 95.0));
    }

    #[test]
    fn empty_dataset_has_zero_bounds() {
        let ds = GeoDataset::from_points(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.value_bounds, (0.0, 0.0));
    }

    #[test]
    fn lowercased_countries_for_the_parser() {
        let ds = GeoDataset::from_points(sample_points());
        let known = ds.known_countries_lowercase();
        assert!(known.contains("united kingdom"));
        assert!(!known.contains("United Kingdom"));
    }
}
