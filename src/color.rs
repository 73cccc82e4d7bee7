use eframe::egui::Color32;
use palette::{IntoColor, LinSrgb, Srgb};

// ---------------------------------------------------------------------------
// Continuous colour scales
// ---------------------------------------------------------------------------

/// Perceptual scales used by the charts and maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScale {
    Viridis,
    Plasma,
    Cividis,
}

impl ColorScale {
    fn stops(self) -> &'static [(u8, u8, u8)] {
        match self {
            ColorScale::Viridis => &[
                (0x44, 0x01, 0x54),
                (0x3b, 0x52, 0x8b),
                (0x21, 0x91, 0x8c),
                (0x5e, 0xc9, 0x62),
                (0xfd, 0xe7, 0x25),
            ],
            ColorScale::Plasma => &[
                (0x0d, 0x08, 0x87),
                (0x7e, 0x03, 0xa8),
                (0xcc, 0x47, 0x78),
                (0xf8, 0x95, 0x40),
                (0xf0, 0xf9, 0x21),
            ],
            ColorScale::Cividis => &[
                (0x00, 0x22, 0x4e),
                (0x41, 0x4d, 0x6b),
                (0x7c, 0x7b, 0x78),
                (0xbc, 0xaf, 0x6f),
                (0xfe, 0xe8, 0x38),
            ],
        }
    }

    /// Colour at position `t` in `[0, 1]`, interpolated in linear RGB.
    pub fn sample(self, t: f32) -> Color32 {
        let stops = self.stops();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let pos = t * (stops.len() - 1) as f32;
        let lo = (pos.floor() as usize).min(stops.len() - 2);
        let frac = pos - lo as f32;

        let a = linear(stops[lo]);
        let b = linear(stops[lo + 1]);
        let mixed = LinSrgb::new(
            a.red + (b.red - a.red) * frac,
            a.green + (b.green - a.green) * frac,
            a.blue + (b.blue - a.blue) * frac,
        );
        let rgb: Srgb = mixed.into_color();
        Color32::from_rgb(
            (rgb.red * 255.0).round() as u8,
            (rgb.green * 255.0).round() as u8,
            (rgb.blue * 255.0).round() as u8,
        )
    }

    /// `n` colours evenly spaced along the scale.
    pub fn palette(self, n: usize) -> Vec<Color32> {
        match n {
            0 => Vec::new(),
            1 => vec![self.sample(0.5)],
            _ => (0..n)
                .map(|i| self.sample(i as f32 / (n - 1) as f32))
                .collect(),
        }
    }
}

fn linear((r, g, b): (u8, u8, u8)) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_color()
}

// ---------------------------------------------------------------------------
// Value → colour mapping
// ---------------------------------------------------------------------------

/// Maps numeric values within an observed range onto a [`ColorScale`].
#[derive(Debug, Clone)]
pub struct ColorMap {
    scale: ColorScale,
    min: f64,
    max: f64,
}

impl ColorMap {
    /// Build a map spanning the finite values in `values`.
    pub fn new(scale: ColorScale, values: impl IntoIterator<Item = f64>) -> Self {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        ColorMap { scale, min, max }
    }

    pub fn color_for(&self, value: f64) -> Color32 {
        let range = self.max - self.min;
        if !range.is_finite() || range.abs() < f64::EPSILON {
            return self.scale.sample(0.5);
        }
        self.scale.sample(((value - self.min) / range) as f32)
    }

    /// Legend entries (value label → colour) from low to high.
    pub fn legend_entries(&self, steps: usize) -> Vec<(String, Color32)> {
        if !self.min.is_finite() || steps < 2 {
            return Vec::new();
        }
        (0..steps)
            .map(|i| {
                let v = self.min + (self.max - self.min) * i as f64 / (steps - 1) as f64;
                (format_compact(v), self.color_for(v))
            })
            .collect()
    }
}

/// Short human-readable number: `1.2B`, `34.5M`, `7.1K`, `0.45`.
pub fn format_compact(v: f64) -> String {
    let abs = v.abs();
    if abs >= 1e9 {
        format!("{:.1}B", v / 1e9)
    } else if abs >= 1e6 {
        format!("{:.1}M", v / 1e6)
    } else if abs >= 1e4 {
        format!("{:.1}K", v / 1e3)
    } else if abs >= 100.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}
