use super::model::{MeasurementTable, X_COLUMN, Y_COLUMN};

// ---------------------------------------------------------------------------
// Domain constants
// ---------------------------------------------------------------------------

/// Maximum tolerated offset of the median sample position from the origin,
/// in degrees.
pub const CENTROID_DEVIATION_THRESHOLD: f64 = 1.5;

/// Expected extent of the sampling grid on each side of each axis, in degrees.
pub const BOUND_BOX_THRESHOLD: f64 = 10.0;

/// Tolerance band inward from the expected edge, in degrees.
pub const EDGE_TOLERANCE: f64 = 3.0;

/// The device places this many points near each extremum; edge estimates
/// average over that cluster instead of trusting a single min/max.
pub const EDGE_WINDOW: usize = 8;

// ---------------------------------------------------------------------------
// Axis descriptors
// ---------------------------------------------------------------------------

struct Axis {
    dimension: &'static str,
    column: usize,
    negative_side: &'static str,
    positive_side: &'static str,
}

const AXES: [Axis; 2] = [
    Axis {
        dimension: "X",
        column: X_COLUMN,
        negative_side: "left",
        positive_side: "right",
    },
    Axis {
        dimension: "Y",
        column: Y_COLUMN,
        negative_side: "inferior",
        positive_side: "superior",
    },
];

// ---------------------------------------------------------------------------
// Robust estimators
// ---------------------------------------------------------------------------

/// Boundary estimates for one axis, derived from order statistics.
/// Transient: only used to decide warnings, never persisted.
#[derive(Debug, Clone, Copy)]
pub struct BoundaryEstimate {
    pub min_edge: f64,
    pub max_edge: f64,
}

/// Median of a non-empty slice. Even-length input averages the two middle
/// values after an ascending sort.
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Edge estimates from the mean of the [`EDGE_WINDOW`] most extreme values
/// on each side. With fewer values than the window, the estimate degrades
/// to the mean of whatever is available.
fn boundary_estimate(values: &[f64]) -> BoundaryEstimate {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let window = EDGE_WINDOW.min(sorted.len());
    let low = &sorted[..window];
    let high = &sorted[sorted.len() - window..];

    BoundaryEstimate {
        min_edge: low.iter().sum::<f64>() / window as f64,
        max_edge: high.iter().sum::<f64>() / window as f64,
    }
}

// ---------------------------------------------------------------------------
// Spatial distribution checks
// ---------------------------------------------------------------------------

/// Check that the sampling grid is centered and correctly bounded.
///
/// Pure function over the coordinate columns (by schema position, since
/// position encodes meaning). Returns advisory warnings in a fixed order:
/// X centroid, Y centroid, then the four boundary checks. An axis with no
/// numeric values skips its checks entirely.
pub fn validate_spatial_distribution(table: &MeasurementTable) -> Vec<String> {
    let mut warnings = Vec::new();

    if table.is_empty() {
        log::warn!("table has no rows, skipping spatial distribution checks");
        return warnings;
    }

    for axis in &AXES {
        let values = table.numeric_column(axis.column);
        if values.is_empty() {
            log::warn!(
                "no numeric values for {} dimension, skipping centroid check",
                axis.dimension
            );
            continue;
        }

        let center = median(&values);
        if center < -CENTROID_DEVIATION_THRESHOLD || center > CENTROID_DEVIATION_THRESHOLD {
            warnings.push(format!(
                "Significant centroid deviation detected for {} dimension",
                axis.dimension
            ));
        }
    }

    for axis in &AXES {
        let values = table.numeric_column(axis.column);
        if values.is_empty() {
            continue;
        }

        let estimate = boundary_estimate(&values);
        let inner_edge = BOUND_BOX_THRESHOLD - EDGE_TOLERANCE;

        if estimate.min_edge < -BOUND_BOX_THRESHOLD || estimate.min_edge > -inner_edge {
            warnings.push(format!(
                "Significant negative ({}) boundary deviation detected for {} dimension",
                axis.negative_side, axis.dimension
            ));
        }
        if estimate.max_edge < inner_edge || estimate.max_edge > BOUND_BOX_THRESHOLD {
            warnings.push(format!(
                "Significant positive ({}) boundary deviation detected for {} dimension",
                axis.positive_side, axis.dimension
            ));
        }
    }

    warnings
}
