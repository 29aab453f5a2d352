use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use crate::color::threshold_color;
use crate::data::model::{MeasurementTable, THRESHOLD_COLUMN, X_COLUMN, Y_COLUMN};

// ---------------------------------------------------------------------------
// Rendering seam
// ---------------------------------------------------------------------------

/// Narrow rendering interface. The validation core depends only on this
/// trait, never on a concrete plotting backend, so the statistics can be
/// tested without any rendering capability present.
pub trait LayoutRenderer {
    /// Draw the sampling grid with a reference circle of `radius` around
    /// `center` and write the image to `out`.
    fn render(
        &self,
        table: &MeasurementTable,
        center: (f64, f64),
        radius: f64,
        out: &Path,
    ) -> Result<(), Box<dyn Error>>;
}

// ---------------------------------------------------------------------------
// Scatter plot implementation
// ---------------------------------------------------------------------------

/// Scatter plot of sample coordinates colored by threshold, rendered to a
/// square bitmap so degrees map to equal pixel spans on both axes.
pub struct ScatterPlot {
    pub size: (u32, u32),
}

impl Default for ScatterPlot {
    fn default() -> Self {
        Self { size: (800, 800) }
    }
}

impl LayoutRenderer for ScatterPlot {
    fn render(
        &self,
        table: &MeasurementTable,
        center: (f64, f64),
        radius: f64,
        out: &Path,
    ) -> Result<(), Box<dyn Error>> {
        let points: Vec<(f64, f64, f64)> = table
            .rows
            .iter()
            .filter_map(|row| {
                let x = row.get(X_COLUMN)?.as_f64()?;
                let y = row.get(Y_COLUMN)?.as_f64()?;
                let threshold = row.get(THRESHOLD_COLUMN)?.as_f64()?;
                Some((x, y, threshold))
            })
            .collect();

        let (threshold_min, threshold_max) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, _, t)| {
                (lo.min(t), hi.max(t))
            });

        // Symmetric ranges covering every point and the reference circle.
        let mut extent = radius;
        for &(x, y, _) in &points {
            extent = extent.max((x - center.0).abs()).max((y - center.1).abs());
        }
        extent *= 1.1;

        let root = BitMapBackend::new(out, self.size).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Sampling grid layout", ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(
                center.0 - extent..center.0 + extent,
                center.1 - extent..center.1 + extent,
            )?;

        chart
            .configure_mesh()
            .x_desc("Horizontal eccentricity")
            .y_desc("Vertical eccentricity")
            .draw()?;

        let circle = (0..=360).map(|deg| {
            let angle = f64::from(deg).to_radians();
            (
                center.0 + radius * angle.cos(),
                center.1 + radius * angle.sin(),
            )
        });
        chart.draw_series(LineSeries::new(circle, BLACK.mix(0.6)))?;

        chart.draw_series(points.iter().map(|&(x, y, threshold)| {
            Circle::new(
                (x, y),
                4,
                threshold_color(threshold, threshold_min, threshold_max).filled(),
            )
        }))?;

        root.present()?;
        Ok(())
    }
}
