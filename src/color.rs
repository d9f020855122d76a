use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
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
// Color mapping: sample name → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct sample identifiers of the loaded table to distinct
/// colours, so a sample keeps its colour when the selection changes.
#[derive(Debug, Clone, Default)]
pub struct SampleColors {
    mapping: BTreeMap<String, Color32>,
}

impl SampleColors {
    /// Build a colour map over the distinct sample names (sorted order).
    pub fn new(samples: &[String]) -> Self {
        let palette = generate_palette(samples.len());
        let mapping = samples
            .iter()
            .cloned()
            .zip(palette.into_iter())
            .collect();
        SampleColors { mapping }
    }

    /// Look up the colour for a sample.
    pub fn color_for(&self, sample: &str) -> Color32 {
        self.mapping.get(sample).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_samples_get_distinct_colors() {
        let colors = SampleColors::new(&["control".to_string(), "treated".to_string()]);
        assert_ne!(colors.color_for("control"), colors.color_for("treated"));
        assert_eq!(colors.color_for("unknown"), Color32::GRAY);
    }

    #[test]
    fn empty_palette_is_empty() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(4).len(), 4);
    }
}
