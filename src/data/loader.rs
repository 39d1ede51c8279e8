use std::path::Path;

use anyhow::{bail, Context, Result};

use super::model::{DataPoint, GeoDataset};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a point dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – array of point records, the shape `GET /api/data` returns
/// * `.csv`  – header row `id,lat,lng,country,continent,climate,value,timestamp`
///
/// Timestamps are RFC 3339 in both formats.
pub fn load_file(path: &Path) -> Result<GeoDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   {
///     "id": "1",
///     "lat": 52.52,
///     "lng": 13.405,
///     "country": "Germany",
///     "continent": "Europe",
///     "climate": "Temperate",
///     "value": 85.0,
///     "timestamp": "2023-01-15T12:30:45Z"
///   }
/// ]
/// ```
fn load_json(path: &Path) -> Result<GeoDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let points: Vec<DataPoint> = serde_json::from_str(&text).context("parsing JSON records")?;
    log::debug!("loaded {} points from {}", points.len(), path.display());
    Ok(GeoDataset::from_points(points))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<GeoDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;

    let mut points = Vec::new();
    for (row_no, result) in reader.deserialize::<DataPoint>().enumerate() {
        let point = result.with_context(|| format!("CSV row {row_no}"))?;
        points.push(point);
    }

    log::debug!("loaded {} points from {}", points.len(), path.display());
    Ok(GeoDataset::from_points(points))
}
