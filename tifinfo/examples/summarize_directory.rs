use anyhow::Result;
use tifinfo::{SurveyConfig, SurveyDriver};

/// Example: summarize every GeoTIFF of a directory into tifinfo.csv
/// Usage: cargo run --example summarize_directory -- <directory>
fn main() -> Result<()> {
    let dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Geotiff/batch1".to_string());

    println!("=== Summarizing GeoTIFFs in {} ===\n", dir);

    let config = SurveyConfig::new(&dir).with_summary("tifinfo.csv");
    let report = SurveyDriver::new(config).run()?;

    println!("Entries in directory: {}", report.entries);
    println!("Processed: {}", report.processed());
    for failure in report.failures() {
        println!("  - {} skipped ({}): {}", failure.filename, failure.kind, failure.message);
    }
    if let Some(path) = &report.summary_path {
        println!("\nSummary written to {:?}", path);
    }

    Ok(())
}
