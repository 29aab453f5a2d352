use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Schema constants
// ---------------------------------------------------------------------------

/// Expected header, in order. Column position encodes meaning, not just name.
pub const EXPECTED_COLUMNS: [&str; 4] = ["ID", "x_deg", "y_deg", "Threshold"];

/// Horizontal eccentricity column position.
pub const X_COLUMN: usize = 1;
/// Vertical eccentricity column position.
pub const Y_COLUMN: usize = 2;
/// Sensitivity measurement column position.
pub const THRESHOLD_COLUMN: usize = 3;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the measurement table
// ---------------------------------------------------------------------------

/// A dynamically-typed table cell mirroring common Pandas dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
}

impl CellValue {
    /// Parse a raw whitespace-delimited field: integer, then float,
    /// then fall back to opaque text.
    pub fn parse(raw: &str) -> Self {
        if let Ok(i) = raw.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = raw.parse::<f64>() {
            return CellValue::Float(f);
        }
        CellValue::String(raw.to_string())
    }

    /// Try to interpret the cell as an `f64` for the statistics stage.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::String(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
        }
    }
}

// ---------------------------------------------------------------------------
// MeasurementTable – the complete loaded table
// ---------------------------------------------------------------------------

/// The parsed measurement table. Kept generic over column count so a
/// structurally wrong input still flows through to the emitter (schema
/// violations are collected, not raised). Never mutated after load.
#[derive(Debug, Clone)]
pub struct MeasurementTable {
    /// Header names, in file order.
    pub columns: Vec<String>,
    /// Data rows, in file order. Every row has `columns.len()` cells.
    pub rows: Vec<Vec<CellValue>>,
}

impl MeasurementTable {
    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Collect the numeric values of one column by position.
    /// Cells that are absent or not numeric are skipped.
    pub fn numeric_column(&self, index: usize) -> Vec<f64> {
        self.rows
            .iter()
            .filter_map(|row| row.get(index).and_then(CellValue::as_f64))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// ValidationReport – accumulated findings
// ---------------------------------------------------------------------------

/// Findings accumulated across the pipeline and serialized to `product.json`.
///
/// Errors are schema violations; they do not stop processing. Warnings are
/// statistical anomalies. `meta` is reserved for future diagnostic values.
#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub meta: BTreeMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_parse_picks_narrowest_type() {
        assert_eq!(CellValue::parse("12"), CellValue::Integer(12));
        assert_eq!(CellValue::parse("-3"), CellValue::Integer(-3));
        assert_eq!(CellValue::parse("1.5"), CellValue::Float(1.5));
        assert_eq!(CellValue::parse("-9.0"), CellValue::Float(-9.0));
        assert_eq!(CellValue::parse("A1"), CellValue::String("A1".into()));
    }

    #[test]
    fn cell_display_roundtrips_through_parse() {
        for raw in ["42", "-7", "2.25", "P13", "0.5"] {
            let cell = CellValue::parse(raw);
            let rendered = cell.to_string();
            assert_eq!(CellValue::parse(&rendered).to_string(), rendered);
        }
    }

    #[test]
    fn as_f64_covers_numeric_variants_only() {
        assert_eq!(CellValue::Integer(4).as_f64(), Some(4.0));
        assert_eq!(CellValue::Float(-2.5).as_f64(), Some(-2.5));
        assert_eq!(CellValue::String("x".into()).as_f64(), None);
    }

    #[test]
    fn numeric_column_skips_text_cells() {
        let table = MeasurementTable {
            columns: vec!["ID".into(), "x_deg".into()],
            rows: vec![
                vec![CellValue::Integer(1), CellValue::Float(-3.0)],
                vec![CellValue::Integer(2), CellValue::String("n/a".into())],
                vec![CellValue::Integer(3), CellValue::Integer(5)],
            ],
        };
        assert_eq!(table.numeric_column(X_COLUMN), vec![-3.0, 5.0]);
        assert!(table.numeric_column(7).is_empty());
    }

    #[test]
    fn report_serializes_with_fixed_keys() {
        let mut report = ValidationReport::default();
        report.errors.push("boom".into());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["errors"][0], "boom");
        assert!(json["warnings"].as_array().unwrap().is_empty());
        assert!(json["meta"].as_object().unwrap().is_empty());
    }
}
