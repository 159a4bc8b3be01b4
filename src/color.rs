use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// RGB color representation for configuration and scene styles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const BLACK: RgbColor = RgbColor::new(0, 0, 0);
    pub const WHITE: RgbColor = RgbColor::new(255, 255, 255);
    pub const RED: RgbColor = RgbColor::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse from hex string like "#FF0000" or "FF0000"
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
        let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
        let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
        Some(Self { r, g, b })
    }

    pub fn to_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Composite this color at `opacity` over `background`.
    pub fn over(self, background: RgbColor, opacity: f32) -> RgbColor {
        let (r, g, b) = lerp_color(background.to_tuple(), self.to_tuple(), opacity);
        RgbColor { r, g, b }
    }
}

impl From<(u8, u8, u8)> for RgbColor {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Fill palette for the two fan patterns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Classic,
    Ocean,
    Fire,
    Forest,
    Purple,
    Monochrome,
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "ocean" => Ok(Self::Ocean),
            "fire" => Ok(Self::Fire),
            "forest" => Ok(Self::Forest),
            "purple" => Ok(Self::Purple),
            "mono" | "monochrome" => Ok(Self::Monochrome),
            _ => Err(format!("Unknown color scheme: {}", s)),
        }
    }
}

/// Light blue used for the alpha pattern in the classic scheme.
const CLASSIC_ALPHA: RgbColor = RgbColor::new(0xAD, 0xEB, 0xF6);
const CLASSIC_BETA: RgbColor = RgbColor::new(0xF6, 0xD0, 0xAD);

impl ColorScheme {
    /// Get color for a given position (0.0 to 1.0) along the scheme's range
    pub fn get_color(&self, position: f32) -> (u8, u8, u8) {
        let (h, s, l) = match self {
            ColorScheme::Classic => {
                // Fixed light blue -> pale orange pair
                return lerp_color(CLASSIC_ALPHA.to_tuple(), CLASSIC_BETA.to_tuple(), position);
            }
            ColorScheme::Ocean => {
                // Deep blue -> cyan -> teal
                let hue = 180.0 + position * 60.0;
                (hue, 0.8, 0.6)
            }
            ColorScheme::Fire => {
                // Red -> orange -> yellow
                let hue = position * 60.0;
                (hue, 0.95, 0.6)
            }
            ColorScheme::Forest => {
                // Deep green -> lime -> yellow-green
                let hue = 80.0 + position * 60.0;
                (hue, 0.75, 0.5)
            }
            ColorScheme::Purple => {
                // Deep purple -> magenta -> pink
                let hue = 270.0 + position * 60.0;
                (hue, 0.8, 0.65)
            }
            ColorScheme::Monochrome => (0.0, 0.0, 0.35 + position * 0.3),
        };

        let hsl = Hsl::new(h, s, l);
        let rgb: Srgb = hsl.into_color();

        (
            (rgb.red * 255.0) as u8,
            (rgb.green * 255.0) as u8,
            (rgb.blue * 255.0) as u8,
        )
    }

    /// Fill colors for the alpha and beta patterns: the two ends of the scheme.
    pub fn pattern_fills(&self) -> (RgbColor, RgbColor) {
        (self.get_color(0.0).into(), self.get_color(1.0).into())
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorScheme::Classic => "classic",
            ColorScheme::Ocean => "ocean",
            ColorScheme::Fire => "fire",
            ColorScheme::Forest => "forest",
            ColorScheme::Purple => "purple",
            ColorScheme::Monochrome => "monochrome",
        }
    }

    pub fn all() -> &'static [ColorScheme] {
        &[
            ColorScheme::Classic,
            ColorScheme::Ocean,
            ColorScheme::Fire,
            ColorScheme::Forest,
            ColorScheme::Purple,
            ColorScheme::Monochrome,
        ]
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|c| c == self).unwrap_or(0);
        all[(current + 1) % all.len()]
    }
}

/// Interpolate between two colors
pub fn lerp_color(a: (u8, u8, u8), b: (u8, u8, u8), t: f32) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    (
        (a.0 as f32 + (b.0 as f32 - a.0 as f32) * t).round() as u8,
        (a.1 as f32 + (b.1 as f32 - a.1 as f32) * t).round() as u8,
        (a.2 as f32 + (b.2 as f32 - a.2 as f32) * t).round() as u8,
    )
}
