use std::collections::BTreeMap;

use crate::data::model::DataPoint;

// ---------------------------------------------------------------------------
// Summary statistics over a filtered subset
// ---------------------------------------------------------------------------

/// Aggregates recomputed on every filter change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisResult {
    /// 0.0 when the input is empty, never NaN.
    pub average_value: f64,
    pub min_value: f64,
    pub max_value: f64,
    /// Count per 10-wide value bucket, keyed `"{lo}-{lo+9}"`.
    pub value_distribution: BTreeMap<String, usize>,
    pub continent_distribution: BTreeMap<String, usize>,
    pub climate_distribution: BTreeMap<String, usize>,
}

/// Label of the 10-wide bucket containing `value`.
///
/// Floors toward negative infinity, so -5 lands in `"-10--1"` rather than
/// sharing a bucket with 5.
fn bucket_label(value: f64) -> String {
    let lo = (value / 10.0).floor() as i64 * 10;
    format!("{}-{}", lo, lo + 9)
}

/// Summarise a point collection in one linear pass.
///
/// Deterministic and side-effect free; the empty input yields all-zero
/// statistics and empty distribution maps.
pub fn analyze<'a, I>(points: I) -> AnalysisResult
where
    I: IntoIterator<Item = &'a DataPoint>,
{
    let mut sum = 0.0;
    let mut count = 0usize;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut result = AnalysisResult::default();

    for p in points {
        sum += p.value;
        count += 1;
        min = min.min(p.value);
        max = max.max(p.value);

        *result.value_distribution.entry(bucket_label(p.value)).or_default() += 1;
        *result
            .continent_distribution
            .entry(p.continent.clone())
            .or_default() += 1;
        *result.climate_distribution.entry(p.climate.clone()).or_default() += 1;
    }

    if count > 0 {
        result.average_value = sum / count as f64;
        result.min_value = min;
        result.max_value = max;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample::sample_points;

    #[test]
    fn empty_input_yields_zeros_not_nan() {
        let empty: Vec<DataPoint> = Vec::new();
        let result = analyze(&empty);
        assert_eq!(result, AnalysisResult::default());
        assert!(!result.average_value.is_nan());
    }

    #[test]
    fn bucket_counts_sum_to_the_input_length() {
        let points = sample_points();
        let result = analyze(&points);
        let total: usize = result.value_distribution.values().sum();
        assert_eq!(total, points.len());
    }

    #[test]
    fn extrema_and_mean_over_the_sample() {
        let points = sample_points();
        let result = analyze(&points);
        assert_eq!(result.min_value, 33.0);
        assert_eq!(result.max_value, 95.0);
        let expected: f64 =
            points.iter().map(|p| p.value).sum::<f64>() / points.len() as f64;
        assert!((result.average_value - expected).abs() < 1e-9);
    }

    #[test]
    fn distributions_count_per_category() {
        let points = sample_points();
        let result = analyze(&points);
        assert_eq!(result.continent_distribution["Europe"], 5);
        assert_eq!(result.climate_distribution["Tropical"], 4);
        assert_eq!(result.climate_distribution["Polar"], 1);
    }

    #[test]
    fn bucket_labels_are_ten_wide() {
        assert_eq!(bucket_label(85.0), "80-89");
        assert_eq!(bucket_label(90.0), "90-99");
        assert_eq!(bucket_label(0.0), "0-9");
        assert_eq!(bucket_label(-5.0), "-10--1");
    }

    #[test]
    fn single_point_is_its_own_average() {
        let points = sample_points();
        let result = analyze(std::iter::once(&points[0]));
        assert_eq!(result.average_value, 85.0);
        assert_eq!(result.min_value, 85.0);
        assert_eq!(result.max_value, 85.0);
    }
}
