use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::color::{ColorScheme, RgbColor};
use crate::scene::SceneStyle;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub form: FormConfig,
    pub plot: PlotConfig,
}

/// Initial text of the input form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FormConfig {
    pub index: String,
    pub radius: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlotConfig {
    pub color_scheme: ColorScheme,
    pub show_rings: bool,
    pub show_grid: bool,
    pub show_legend: bool,
    pub fill_opacity: f32,
    pub ring_opacity: f32,
    /// Length unit printed after the lens area, e.g. "sq in"
    pub units: String,
    /// Decimal places in plot labels and readouts
    pub precision: usize,
    /// Arrow-key nudges in the plot view
    pub index_step: f64,
    pub radius_step: f64,
    pub background: RgbColor,
    pub text_color: RgbColor,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::Classic,
            show_rings: true,
            show_grid: true,
            show_legend: true,
            fill_opacity: 0.4,
            ring_opacity: 0.3,
            units: "in".to_string(),
            precision: 2,
            index_step: 0.5,
            radius_step: 0.5,
            background: RgbColor::WHITE,
            text_color: RgbColor::BLACK,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config.sanitized())
    }

    /// Get the default XDG config path (~/.config/fanlap/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fanlap").join("config.toml"))
    }

    /// Load config from the default XDG path if it exists
    /// Returns None if file doesn't exist, logs warning on parse errors
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            match Self::load(&path) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    Some(config)
                }
                Err(e) => {
                    warn!("{:#}. Using defaults.", e);
                    None
                }
            }
        } else {
            None
        }
    }

    /// Initialize default config file at XDG path, returns the path
    pub fn init_default_config() -> Result<PathBuf> {
        let path = Self::default_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, Self::generate_config_template())?;

        Ok(path)
    }

    /// Generate a commented TOML config template
    pub fn generate_config_template() -> String {
        r#"# Fanlap Configuration
# This file is auto-generated. Edit as needed.

[form]
# Text the input fields start with (leave empty for a blank form)
index = ""
radius = ""

[plot]
# Fill colors: "classic", "ocean", "fire", "forest", "purple", "monochrome"
color_scheme = "classic"
# Concentric reference rings at every whole unit of radius
show_rings = true
# Background grid
show_grid = true
# Legend naming the two fan patterns
show_legend = true
# Fill opacity of the two patterns (0.0-1.0)
fill_opacity = 0.4
# Opacity of the reference rings (0.0-1.0)
ring_opacity = 0.3
# Unit printed after the lens area ("sq in")
units = "in"
# Decimal places in labels
precision = 2
# Arrow keys in the plot view: left/right change the index, up/down the radius
index_step = 0.5
radius_step = 0.5
# Plot colors
background = { r = 255, g = 255, b = 255 }
text_color = { r = 0, g = 0, b = 0 }
"#
        .to_string()
    }

    /// Clamp values that would make the plot unreadable.
    fn sanitized(mut self) -> Self {
        self.plot.fill_opacity = self.plot.fill_opacity.clamp(0.0, 1.0);
        self.plot.ring_opacity = self.plot.ring_opacity.clamp(0.0, 1.0);
        self.plot.precision = self.plot.precision.min(10);
        self
    }

    /// Merge CLI arguments into config (CLI takes priority)
    pub fn merge_args(&mut self, args: &crate::Args) {
        if let Some(ref index) = args.index {
            self.form.index = index.clone();
        }
        if let Some(ref radius) = args.radius {
            self.form.radius = radius.clone();
        }

        if let Some(scheme) = args.colors {
            self.plot.color_scheme = scheme;
        }
        if let Some(ref units) = args.units {
            self.plot.units = units.clone();
        }
        if let Some(precision) = args.precision {
            self.plot.precision = precision;
        }
        if let Some(ref hex) = args.background {
            match RgbColor::from_hex(hex) {
                Some(color) => self.plot.background = color,
                None => warn!("Ignoring invalid background color '{}'", hex),
            }
        }
        if args.no_rings {
            self.plot.show_rings = false;
        }
        if args.no_grid {
            self.plot.show_grid = false;
        }
        if args.no_legend {
            self.plot.show_legend = false;
        }

        *self = std::mem::take(self).sanitized();
    }

    /// Scene appearance derived from the plot settings.
    pub fn scene_style(&self) -> SceneStyle {
        SceneStyle {
            color_scheme: self.plot.color_scheme,
            stroke: self.plot.text_color,
            fill_opacity: self.plot.fill_opacity,
            ring_opacity: self.plot.ring_opacity,
            show_rings: self.plot.show_rings,
            show_grid: self.plot.show_grid,
            units: self.plot.units.clone(),
            precision: self.plot.precision,
            ..SceneStyle::default()
        }
    }
}
