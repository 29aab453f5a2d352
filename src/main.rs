mod color;
mod config;
mod data;
mod plot;
mod report;

use std::path::Path;

use plot::ScatterPlot;

/// Batch pipeline: load → validate → emit. Schema errors and statistical
/// warnings are collected into the report and never abort; only an
/// unreadable input or an unwritable artifact exits non-zero.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let config = config::load(Path::new(&config_path))?;

    let (table, mut findings) = data::loader::load_and_validate(&config.microperimetry)?;

    let base = Path::new(".");
    report::ensure_output_dirs(base)?;

    findings
        .warnings
        .extend(data::stats::validate_spatial_distribution(&table));

    report::emit(&table, &findings, &ScatterPlot::default(), base)?;
    report::print_summary(&findings);

    Ok(())
}
