use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Band palette
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
///
/// Hues start at the blue of the default bar fill so band 0 stays close to
/// the plain chart.
pub fn generate_palette(n: usize) -> Vec<RGBColor> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = 210.0 + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.60);
            let rgb: Srgb = hsl.into_color();
            RGBColor(
                (rgb.red * 255.0).round() as u8,
                (rgb.green * 255.0).round() as u8,
                (rgb.blue * 255.0).round() as u8,
            )
        })
        .collect()
}

/// Maps an octave band index to a bar fill.
#[derive(Debug, Clone)]
pub struct BandColors {
    bands: Vec<RGBColor>,
    default_color: RGBColor,
}

impl BandColors {
    /// One colour per band between `bound_count` boundaries.
    pub fn new(bound_count: usize, default_color: RGBColor) -> Self {
        Self {
            bands: generate_palette(bound_count.saturating_sub(1)),
            default_color,
        }
    }

    /// Every band uses the default fill.
    pub fn uniform(default_color: RGBColor) -> Self {
        Self {
            bands: Vec::new(),
            default_color,
        }
    }

    pub fn color_for(&self, band: Option<usize>) -> RGBColor {
        band.and_then(|i| self.bands.get(i))
            .copied()
            .unwrap_or(self.default_color)
    }
}
