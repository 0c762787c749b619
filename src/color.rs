use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Categorical palette
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = 220.0 + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Continuous grade scale
// ---------------------------------------------------------------------------

/// Plasma control points (dark blue → magenta → yellow), evenly spaced.
const PLASMA: [(u8, u8, u8); 10] = [
    (13, 8, 135),
    (70, 3, 159),
    (114, 1, 168),
    (156, 23, 158),
    (189, 55, 134),
    (216, 87, 107),
    (237, 121, 83),
    (251, 159, 58),
    (253, 202, 38),
    (240, 249, 33),
];

/// Maps a numeric grade onto the plasma ramp between the observed min and max.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeScale {
    pub min: f64,
    pub max: f64,
}

impl GradeScale {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Position of `value` on the scale, clamped to `[0, 1]`.
    /// A degenerate range maps everything to the middle.
    pub fn normalize(&self, value: f64) -> f64 {
        let range = self.max - self.min;
        if !range.is_finite() || range.abs() < f64::EPSILON {
            return 0.5;
        }
        ((value - self.min) / range).clamp(0.0, 1.0)
    }

    pub fn color_at(t: f64) -> Color32 {
        let t = t.clamp(0.0, 1.0) as f32;
        let last = (PLASMA.len() - 1) as f32;
        let scaled = t * last;
        let lo = (scaled as usize).min(PLASMA.len() - 2);
        let frac = scaled - lo as f32;

        let a: LinSrgb = Srgb::<u8>::from(PLASMA[lo]).into_format::<f32>().into_linear();
        let b: LinSrgb = Srgb::<u8>::from(PLASMA[lo + 1]).into_format::<f32>().into_linear();
        to_color32(Srgb::from_linear(a.mix(b, frac)))
    }

    /// Bucket index in `0..bins` for `value`, used to batch points by colour.
    pub fn bin_for(&self, value: f64, bins: usize) -> usize {
        let bins = bins.max(1);
        ((self.normalize(value) * bins as f64) as usize).min(bins - 1)
    }

    /// Representative colour for a bucket produced by [`GradeScale::bin_for`].
    pub fn bin_color(bin: usize, bins: usize) -> Color32 {
        let bins = bins.max(1);
        Self::color_at((bin as f64 + 0.5) / bins as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_distinct() {
        let colors = generate_palette(2);
        assert_eq!(colors.len(), 2);
        assert_ne!(colors[0], colors[1]);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn test_scale_endpoints() {
        assert_eq!(GradeScale::color_at(0.0), Color32::from_rgb(13, 8, 135));
        assert_eq!(GradeScale::color_at(1.0), Color32::from_rgb(240, 249, 33));
    }

    #[test]
    fn test_normalize_clamps_and_handles_flat_range() {
        let scale = GradeScale::new(0.0, 2.0);
        assert_eq!(scale.normalize(1.0), 0.5);
        assert_eq!(scale.normalize(-3.0), 0.0);
        assert_eq!(scale.normalize(9.0), 1.0);
        assert_eq!(GradeScale::new(1.0, 1.0).normalize(1.0), 0.5);
    }

    #[test]
    fn test_bins_cover_range() {
        let scale = GradeScale::new(0.0, 1.0);
        assert_eq!(scale.bin_for(0.0, 16), 0);
        assert_eq!(scale.bin_for(1.0, 16), 15);
        assert_eq!(scale.bin_for(0.5, 16), 8);
    }
}
