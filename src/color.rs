use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours by stepping the hue wheel with the
/// golden angle, so neighbouring categories never share similar hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    const GOLDEN_ANGLE: f32 = 137.508;

    (0..n)
        .map(|i| {
            let hue = (i as f32 * GOLDEN_ANGLE) % 360.0;
            let hsl = Hsl::new(hue, 0.7, 0.5);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps category labels (launch sites, booster version categories) to stable
/// colours. Built once from the dataset, so colours do not shift when the
/// filters change.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    /// Assign palette colours to labels in the given order.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let palette = generate_palette(labels.len());
        ColorMap {
            mapping: labels.into_iter().zip(palette).collect(),
        }
    }

    /// Look up the colour for a label. Unknown labels fall back to gray.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping.get(label).copied().unwrap_or(Color32::GRAY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colors() {
        assert!(generate_palette(0).is_empty());
        let palette = generate_palette(8);
        assert_eq!(palette.len(), 8);
        for (i, a) in palette.iter().enumerate() {
            for b in palette.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn labels_map_to_stable_colors() {
        let map = ColorMap::new(["FT", "v1.0", "v1.1"]);
        assert_eq!(map.color_for("FT"), map.color_for("FT"));
        assert_ne!(map.color_for("FT"), map.color_for("v1.0"));
        assert_eq!(map.color_for("B5"), Color32::GRAY);
    }
}
