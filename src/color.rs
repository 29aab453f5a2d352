use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Threshold colour ramp
// ---------------------------------------------------------------------------

/// Map a threshold value onto a blue→red hue ramp over `[min, max]`.
/// A degenerate range (all thresholds equal) maps to the midpoint colour.
pub fn threshold_color(value: f64, min: f64, max: f64) -> RGBColor {
    let span = max - min;
    let t = if span.abs() < f64::EPSILON {
        0.5
    } else {
        ((value - min) / span).clamp(0.0, 1.0)
    };

    // Hue 240° (blue, low sensitivity) down to 0° (red, high sensitivity).
    let hue = 240.0 * (1.0 - t as f32);
    let hsl = Hsl::new(hue, 0.75, 0.55);
    let rgb: Srgb = hsl.into_color();
    RGBColor(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}
