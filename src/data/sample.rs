use chrono::{DateTime, Utc};

use super::model::DataPoint;

// ---------------------------------------------------------------------------
// Bundled sample dataset
// ---------------------------------------------------------------------------

/// One row of the sample table: (id, lat, lng, country, continent, climate,
/// value, timestamp).
type Row = (
    &'static str,
    f64,
    f64,
    &'static str,
    &'static str,
    &'static str,
    f64,
    &'static str,
);

const ROWS: &[Row] = &[
    ("1", 52.5200, 13.4050, "Germany", "Europe", "Temperate", 85.0, "2023-01-15T12:30:45Z"),
    ("2", 40.7128, -74.0060, "United States", "North America", "Continental", 92.0, "2023-01-16T08:15:30Z"),
    ("3", 35.6762, 139.6503, "Japan", "Asia", "Temperate", 78.0, "2023-01-14T22:45:10Z"),
    ("4", -33.8688, 151.2093, "Australia", "Oceania", "Arid", 65.0, "2023-01-17T03:20:55Z"),
    ("5", -23.5505, -46.6333, "Brazil", "South America", "Tropical", 71.0, "2023-01-18T14:10:25Z"),
    ("6", 51.5074, -0.1278, "United Kingdom", "Europe", "Temperate", 81.0, "2023-01-19T09:45:12Z"),
    ("7", 48.8566, 2.3522, "France", "Europe", "Temperate", 88.0, "2023-01-20T16:30:40Z"),
    ("8", 41.9028, 12.4964, "Italy", "Europe", "Temperate", 76.0, "2023-01-21T11:05:33Z"),
    ("9", 55.7558, 37.6173, "Russia", "Europe", "Continental", 58.0, "2023-01-22T19:50:05Z"),
    ("10", -6.2088, 106.8456, "Indonesia", "Asia", "Tropical", 69.0, "2023-01-23T05:35:48Z"),
    ("11", -1.2921, 36.8219, "Kenya", "Africa", "Tropical", 54.0, "2023-01-24T13:20:15Z"),
    ("12", 9.0820, 8.6753, "Nigeria", "Africa", "Tropical", 62.0, "2023-01-25T07:55:28Z"),
    ("13", 45.4215, -75.6972, "Canada", "North America", "Continental", 95.0, "2023-01-26T21:40:50Z"),
    ("14", 30.0444, 31.2357, "Egypt", "Africa", "Arid", 47.0, "2023-01-27T15:25:18Z"),
    ("15", 64.1814, -51.6941, "Greenland", "North America", "Polar", 33.0, "2023-01-28T10:10:02Z"),
];

/// The 15-point sample table the dashboard ships for development and tests.
///
/// Five European points (Germany, United Kingdom, France, Italy, Russia)
/// and exactly four Tropical ones (Brazil, Indonesia, Kenya, Nigeria).
pub fn sample_points() -> Vec<DataPoint> {
    ROWS.iter()
        .map(|&(id, lat, lng, country, continent, climate, value, stamp)| DataPoint {
            id: id.to_string(),
            lat,
            lng,
            country: country.to_string(),
            continent: continent.to_string(),
            climate: climate.to_string(),
            value,
            timestamp: ts(stamp),
        })
        .collect()
}

fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .expect("sample timestamps are valid RFC 3339")
        .with_timezone(&Utc)
}
