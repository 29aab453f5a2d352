use std::fs::{self, File};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::data::model::{MeasurementTable, ValidationReport};
use crate::data::stats::BOUND_BOX_THRESHOLD;
use crate::plot::LayoutRenderer;

// ---------------------------------------------------------------------------
// Artifact channels
// ---------------------------------------------------------------------------

/// Primary output channel: validated/normalized data.
pub const PRIMARY_DIR: &str = "output";
/// Secondary channel: derived artifacts (visualization).
pub const SECONDARY_DIR: &str = "secondary";

/// Tab-separated copy of the measurement table.
pub const TABLE_PATH: &str = "output/microperimetry.tsv";
/// Machine-readable findings report.
pub const REPORT_PATH: &str = "product.json";
/// Best-effort scatter plot of the sampling grid.
pub const LAYOUT_PLOT_PATH: &str = "secondary/dataLayout.png";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Hard failures of the emit stage. A half-written artifact must never be
/// silently treated as success.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("could not write output {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not write output {path}: {source}")]
    Table {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("could not write output {path}: {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Emitters
// ---------------------------------------------------------------------------

/// Create both artifact channels under `base`. Idempotent.
pub fn ensure_output_dirs(base: &Path) -> Result<(), EmitError> {
    for dir in [PRIMARY_DIR, SECONDARY_DIR] {
        let path = base.join(dir);
        fs::create_dir_all(&path).map_err(|source| EmitError::Io { path, source })?;
    }
    Ok(())
}

/// Write the table as tab-separated text: header row, no index column,
/// rows in original order.
pub fn write_table(table: &MeasurementTable, path: &Path) -> Result<(), EmitError> {
    let file = File::create(path).map_err(|source| EmitError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = csv::WriterBuilder::new().delimiter(b'\t').from_writer(file);

    let table_err = |source| EmitError::Table {
        path: path.to_path_buf(),
        source,
    };
    writer.write_record(&table.columns).map_err(table_err)?;
    for row in &table.rows {
        writer
            .write_record(row.iter().map(|cell| cell.to_string()))
            .map_err(table_err)?;
    }
    writer.flush().map_err(|source| EmitError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Serialize the report as `{"errors": [...], "warnings": [...], "meta": {}}`.
/// Compact JSON with sorted meta keys, so identical findings produce
/// byte-identical output.
pub fn write_report(report: &ValidationReport, path: &Path) -> Result<(), EmitError> {
    let file = File::create(path).map_err(|source| EmitError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::to_writer(file, report).map_err(|source| EmitError::Report {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Write every artifact under `base`: the TSV table, the findings report,
/// and a best-effort layout plot. A failed plot degrades to a log line;
/// a failed table or report write aborts.
pub fn emit(
    table: &MeasurementTable,
    report: &ValidationReport,
    renderer: &dyn LayoutRenderer,
    base: &Path,
) -> Result<(), EmitError> {
    write_table(table, &base.join(TABLE_PATH))?;
    write_report(report, &base.join(REPORT_PATH))?;

    let plot_path = base.join(LAYOUT_PLOT_PATH);
    if let Err(err) = renderer.render(table, (0.0, 0.0), BOUND_BOX_THRESHOLD, &plot_path) {
        log::warn!("layout plot not written: {err}");
    }
    Ok(())
}

/// Mirror the report on stdout, ending with the completion marker.
pub fn print_summary(report: &ValidationReport) {
    println!("warnings--");
    for warning in &report.warnings {
        println!("  {warning}");
    }
    println!("errors--");
    for error in &report.errors {
        println!("  {error}");
    }
    println!("done");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_and_validate;
    use crate::data::model::CellValue;
    use std::error::Error;

    fn sample_table() -> MeasurementTable {
        MeasurementTable {
            columns: vec![
                "ID".into(),
                "x_deg".into(),
                "y_deg".into(),
                "Threshold".into(),
            ],
            rows: vec![
                vec![
                    CellValue::Integer(1),
                    CellValue::Float(-9.5),
                    CellValue::Float(0.25),
                    CellValue::Integer(24),
                ],
                vec![
                    CellValue::String("P2".into()),
                    CellValue::Float(3.0),
                    CellValue::Float(-4.5),
                    CellValue::Float(26.5),
                ],
            ],
        }
    }

    #[test]
    fn output_dirs_are_created_idempotently() {
        let dir = tempfile::tempdir().unwrap();
        ensure_output_dirs(dir.path()).unwrap();
        ensure_output_dirs(dir.path()).unwrap();
        assert!(dir.path().join(PRIMARY_DIR).is_dir());
        assert!(dir.path().join(SECONDARY_DIR).is_dir());
    }

    #[test]
    fn table_roundtrips_through_the_tsv_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("microperimetry.tsv");
        let table = sample_table();
        write_table(&table, &path).unwrap();

        let (reloaded, report) = load_and_validate(&path).unwrap();
        assert!(report.errors.is_empty());
        assert_eq!(reloaded.columns, table.columns);
        assert_eq!(reloaded.len(), table.len());
        for (a, b) in reloaded.rows.iter().flatten().zip(table.rows.iter().flatten()) {
            assert_eq!(a.to_string(), b.to_string());
        }
    }

    #[test]
    fn artifacts_are_byte_identical_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let table = sample_table();
        let mut report = ValidationReport::default();
        report.warnings.push("w".into());

        let tsv_a = dir.path().join("a.tsv");
        let tsv_b = dir.path().join("b.tsv");
        write_table(&table, &tsv_a).unwrap();
        write_table(&table, &tsv_b).unwrap();
        assert_eq!(fs::read(&tsv_a).unwrap(), fs::read(&tsv_b).unwrap());

        let json_a = dir.path().join("a.json");
        let json_b = dir.path().join("b.json");
        write_report(&report, &json_a).unwrap();
        write_report(&report, &json_b).unwrap();
        assert_eq!(fs::read(&json_a).unwrap(), fs::read(&json_b).unwrap());
    }

    #[test]
    fn report_document_has_the_three_fixed_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("product.json");
        let mut report = ValidationReport::default();
        report.errors.push("there should be exactly 4 columns".into());
        report
            .warnings
            .push("Significant centroid deviation detected for X dimension".into());
        write_report(&report, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert_eq!(value["errors"][0], "there should be exactly 4 columns");
        assert_eq!(
            value["warnings"][0],
            "Significant centroid deviation detected for X dimension"
        );
        assert!(value["meta"].as_object().unwrap().is_empty());
    }

    /// A renderer that always fails, standing in for a broken plotting
    /// backend.
    struct FailingRenderer;

    impl LayoutRenderer for FailingRenderer {
        fn render(
            &self,
            _table: &MeasurementTable,
            _center: (f64, f64),
            _radius: f64,
            _out: &Path,
        ) -> Result<(), Box<dyn Error>> {
            Err("no display".into())
        }
    }

    #[test]
    fn emit_survives_a_failing_renderer() {
        let dir = tempfile::tempdir().unwrap();
        ensure_output_dirs(dir.path()).unwrap();

        let table = sample_table();
        let report = ValidationReport::default();
        emit(&table, &report, &FailingRenderer, dir.path()).unwrap();

        assert!(dir.path().join(TABLE_PATH).is_file());
        assert!(dir.path().join(REPORT_PATH).is_file());
        assert!(!dir.path().join(LAYOUT_PLOT_PATH).exists());
    }
}
