//! End-to-end scenarios over the bundled sample table: free-text query →
//! predicate → filter → analysis, the way the dashboard drives the core.

use battscope::data::sample::sample_points;
use battscope::{
    analyze, apply, apply_predicate, parse, DataPoint, Dimension, ExplorerState, FilterState,
    GeoDataset, Predicate, ThresholdOp,
};

fn dataset() -> GeoDataset {
    GeoDataset::from_points(sample_points())
}

#[test]
fn find_all_data_in_europe() {
    let ds = dataset();
    let predicate = parse("Find all data in Europe", &ds.known_countries_lowercase());
    assert_eq!(
        predicate,
        Predicate::DimensionEquals {
            dimension: Dimension::Continent,
            value: "europe".to_string(),
        }
    );

    let filtered = apply_predicate(&ds.points, &predicate);
    let countries: Vec<_> = filtered.iter().map(|p| p.country.as_str()).collect();
    assert_eq!(
        countries,
        ["Germany", "United Kingdom", "France", "Italy", "Russia"]
    );
}

#[test]
fn greater_than_80_end_to_end() {
    let ds = dataset();
    let predicate = parse("show me points greater than 80", &ds.known_countries_lowercase());
    assert_eq!(
        predicate,
        Predicate::ValueThreshold {
            op: ThresholdOp::Above,
            threshold: 80.0,
        }
    );

    let filtered = apply_predicate(&ds.points, &predicate);
    assert_eq!(filtered.len(), 5);
    assert!(filtered.iter().all(|p| p.value > 80.0));
}

#[test]
fn structured_identity_preserves_order() {
    let ds = dataset();
    let filtered = apply(&ds.points, &FilterState::default());
    assert_eq!(filtered, ds.points);
}

#[test]
fn tropical_checkboxes_match_the_sample_table() {
    let ds = dataset();
    let mut filters = FilterState::default();
    filters.climates.insert("Tropical".to_string());
    filters.set_value_range(0.0, 100.0).unwrap();

    let filtered = apply(&ds.points, &filters);
    let countries: Vec<_> = filtered.iter().map(|p| p.country.as_str()).collect();
    assert_eq!(countries, ["Brazil", "Indonesia", "Kenya", "Nigeria"]);
}

#[test]
fn unparsable_date_is_fail_open() {
    let ds = dataset();
    let predicate = parse("before banana", &ds.known_countries_lowercase());
    assert_eq!(predicate, Predicate::DateRange { start: None, end: None });
    assert_eq!(apply_predicate(&ds.points, &predicate).len(), ds.len());
}

#[test]
fn date_window_filters_by_timestamp() {
    let ds = dataset();
    let predicate = parse(
        "everything after january 20 2023",
        &ds.known_countries_lowercase(),
    );
    let filtered = apply_predicate(&ds.points, &predicate);
    // Points 7..15 carry timestamps from Jan 20 onward.
    assert_eq!(filtered.len(), 9);
    assert!(filtered.iter().all(|p| p.id.parse::<u32>().unwrap() >= 7));
}

#[test]
fn explorer_drives_the_full_pipeline() {
    let mut state = ExplorerState::default();
    state.set_dataset(dataset());

    state.run_query("Find all data in Europe");
    let analysis = state.analysis();
    assert_eq!(analysis.continent_distribution["Europe"], 5);
    assert_eq!(analysis.continent_distribution.len(), 1);
    assert_eq!(analysis.min_value, 58.0);
    assert_eq!(analysis.max_value, 88.0);

    let trace = state.last_query.as_ref().expect("query trace recorded");
    assert_eq!(trace.result_count, 5);
}

#[test]
fn analysis_of_an_empty_filter_result_is_all_zeros() {
    let ds = dataset();
    let mut filters = FilterState::default();
    filters.countries.insert("Atlantis".to_string());

    let filtered = apply(&ds.points, &filters);
    assert!(filtered.is_empty());

    let analysis = analyze(&filtered);
    assert_eq!(analysis.average_value, 0.0);
    assert_eq!(analysis.min_value, 0.0);
    assert_eq!(analysis.max_value, 0.0);
    assert!(analysis.value_distribution.is_empty());
}

#[test]
fn bucket_counts_sum_to_survivor_count() {
    let ds = dataset();
    let predicate = parse("less than 70", &ds.known_countries_lowercase());
    let filtered: Vec<DataPoint> = apply_predicate(&ds.points, &predicate);
    let analysis = analyze(&filtered);
    let total: usize = analysis.value_distribution.values().sum();
    assert_eq!(total, filtered.len());
    assert!(filtered.iter().all(|p| p.value < 70.0));
}
