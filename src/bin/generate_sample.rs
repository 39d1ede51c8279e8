use battscope::data::sample::sample_points;

/// Write the bundled sample dataset to `sample_data.json` and
/// `sample_data.csv` in the working directory, in the formats the loader
/// reads back.
fn main() {
    env_logger::init();

    let points = sample_points();

    let json = serde_json::to_string_pretty(&points).expect("sample serializes");
    std::fs::write("sample_data.json", json).expect("Failed to write sample_data.json");

    let mut writer =
        csv::Writer::from_path("sample_data.csv").expect("Failed to create sample_data.csv");
    for point in &points {
        writer.serialize(point).expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV");

    println!(
        "Wrote {} points to sample_data.json and sample_data.csv",
        points.len()
    );
}
