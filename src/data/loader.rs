use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{CellValue, MeasurementTable, ValidationReport, EXPECTED_COLUMNS};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Hard failures of the load stage. Without a parsed table there is nothing
/// to validate, so these abort the pipeline instead of landing in the report.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read input {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse input {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a whitespace-delimited measurement table and run the schema checks.
///
/// Schema violations are collected into the returned [`ValidationReport`]
/// rather than raised; processing continues so every problem is surfaced in
/// one pass. Only an unreadable or unparseable file is a hard failure.
pub fn load_and_validate(path: &Path) -> Result<(MeasurementTable, ValidationReport), LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let table = parse_table(&text).map_err(|reason| LoadError::Parse {
        path: path.to_path_buf(),
        reason,
    })?;

    log::info!(
        "loaded {} rows with columns {:?}",
        table.len(),
        table.columns
    );

    let mut report = ValidationReport::default();
    check_schema(&table, &mut report);

    Ok((table, report))
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Split the raw text into a header row plus typed data rows. Fields are
/// separated by runs of whitespace; blank lines are skipped. Every data row
/// must have exactly as many fields as the header.
fn parse_table(text: &str) -> Result<MeasurementTable, String> {
    let mut columns: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<CellValue>> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();

        match &columns {
            None => {
                columns = Some(fields.iter().map(|f| f.to_string()).collect());
            }
            Some(header) => {
                if fields.len() != header.len() {
                    return Err(format!(
                        "line {}: expected {} fields, found {}",
                        idx + 1,
                        header.len(),
                        fields.len()
                    ));
                }
                rows.push(fields.iter().map(|f| CellValue::parse(f)).collect());
            }
        }
    }

    let columns = columns.ok_or_else(|| "empty file: missing header row".to_string())?;
    Ok(MeasurementTable { columns, rows })
}

// ---------------------------------------------------------------------------
// Schema checks
// ---------------------------------------------------------------------------

/// Best-effort schema validation: every violated check appends its own
/// error and checking continues. A header position that is absent entirely
/// is reported as a mismatch against its expected name.
fn check_schema(table: &MeasurementTable, report: &mut ValidationReport) {
    if table.columns.len() != EXPECTED_COLUMNS.len() {
        report
            .errors
            .push("there should be exactly 4 columns".to_string());
    }

    for (i, expected) in EXPECTED_COLUMNS.iter().enumerate() {
        match table.columns.get(i) {
            Some(name) if name == expected => {}
            _ => report
                .errors
                .push(format!("column {} header should be {}", i + 1, expected)),
        }
    }
}
