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
// Trace colours
// ---------------------------------------------------------------------------

/// The curves drawn by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Trace {
    Signal,
    Absorbance,
    Tauc,
    FitDomain,
    FitLine,
}

impl Trace {
    pub const ALL: [Trace; 5] = [
        Trace::Signal,
        Trace::Absorbance,
        Trace::Tauc,
        Trace::FitDomain,
        Trace::FitLine,
    ];
}

/// One distinct colour per trace; the band-gap marker is always red.
#[derive(Debug, Clone)]
pub struct TracePalette {
    mapping: BTreeMap<Trace, Color32>,
}

impl Default for TracePalette {
    fn default() -> Self {
        let mapping = Trace::ALL
            .into_iter()
            .zip(generate_palette(Trace::ALL.len()))
            .collect();
        Self { mapping }
    }
}

impl TracePalette {
    pub fn color_for(&self, trace: Trace) -> Color32 {
        self.mapping.get(&trace).copied().unwrap_or(Color32::LIGHT_BLUE)
    }

    pub fn band_gap_marker(&self) -> Color32 {
        Color32::RED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_size_and_distinctness() {
        assert!(generate_palette(0).is_empty());
        let colours = generate_palette(5);
        assert_eq!(colours.len(), 5);
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn every_trace_has_its_own_colour() {
        let palette = TracePalette::default();
        let colours: Vec<Color32> = Trace::ALL.iter().map(|&t| palette.color_for(t)).collect();
        assert_eq!(colours[0], generate_palette(5)[0]);
        assert_ne!(colours[2], colours[4]);
    }
}
