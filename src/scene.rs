//! Drawable description of an overlap calculation.
//!
//! A [`Scene`] is an ordered list of primitives in world coordinates (the
//! same units as the index and radius), listed back to front.

use tracing::debug;

use crate::color::{ColorScheme, RgbColor};
use crate::overlap::{OverlapResult, PatternInput};

pub const ALPHA_LABEL: &str = "Fan Pattern α";
pub const BETA_LABEL: &str = "Fan Pattern β";

/// Summary labels hang this many radii below the center line.
const SUMMARY_DEPTH: f64 = 1.75;

/// Reference rings are skipped for radii with more whole units than this.
pub const MAX_RINGS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleStyle {
    pub stroke: RgbColor,
    /// `None` draws the outline only
    pub fill: Option<RgbColor>,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleShape {
    pub center: Point,
    pub radius: f64,
    pub style: CircleStyle,
    /// Legend entry, if any
    pub label: Option<String>,
}

impl CircleShape {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let dx = x - self.center.x;
        let dy = y - self.center.y;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: RgbColor,
    /// Draw the text inside a box with this background
    pub boxed: Option<RgbColor>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub anchor: Point,
    /// Screen-space shift in text lines, positive is up
    pub line_offset: i16,
    pub text: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub from: Point,
    pub to: Point,
    pub color: RgbColor,
    /// Heads at both ends; otherwise only at `to`
    pub double_headed: bool,
}

impl Arrow {
    pub fn length(&self) -> f64 {
        (self.to.x - self.from.x).hypot(self.to.y - self.from.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Circle(CircleShape),
    Annotation(Annotation),
    Arrow(Arrow),
}

/// Visible world rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl ViewBounds {
    /// Square bounds `[-extent, extent]` on both axes.
    pub fn square(extent: f64) -> Self {
        Self {
            x: [-extent, extent],
            y: [-extent, extent],
        }
    }

    pub fn width(&self) -> f64 {
        self.x[1] - self.x[0]
    }

    pub fn height(&self) -> f64 {
        self.y[1] - self.y[0]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub primitives: Vec<Primitive>,
    pub bounds: ViewBounds,
    pub grid: bool,
}

impl Scene {
    pub fn circles(&self) -> impl Iterator<Item = &CircleShape> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Circle(c) => Some(c),
            _ => None,
        })
    }

    pub fn annotations(&self) -> impl Iterator<Item = &Annotation> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Annotation(a) => Some(a),
            _ => None,
        })
    }

    pub fn arrows(&self) -> impl Iterator<Item = &Arrow> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Arrow(a) => Some(a),
            _ => None,
        })
    }

    /// Labeled circles, in drawing order.
    pub fn legend(&self) -> impl Iterator<Item = (&str, &CircleStyle)> {
        self.circles()
            .filter_map(|c| c.label.as_deref().map(|label| (label, &c.style)))
    }
}

/// Appearance knobs for [`build_scene`].
#[derive(Debug, Clone, PartialEq)]
pub struct SceneStyle {
    pub color_scheme: ColorScheme,
    pub stroke: RgbColor,
    pub fill_opacity: f32,
    pub ring_opacity: f32,
    pub show_rings: bool,
    pub show_grid: bool,
    pub label_color: RgbColor,
    pub label_box: RgbColor,
    pub units: String,
    pub precision: usize,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::Classic,
            stroke: RgbColor::BLACK,
            fill_opacity: 0.4,
            ring_opacity: 0.3,
            show_rings: true,
            show_grid: true,
            label_color: RgbColor::RED,
            label_box: RgbColor::WHITE,
            units: "in".to_string(),
            precision: 2,
        }
    }
}

/// Lay out the two fan patterns, the lens arrow and the summary labels.
pub fn build_scene(input: &PatternInput, result: &OverlapResult, style: &SceneStyle) -> Scene {
    let r = input.radius;
    let half = input.half_index();
    let precision = style.precision;
    let (alpha_fill, beta_fill) = style.color_scheme.pattern_fills();

    let ring_count = r.floor() as u64;
    let mut primitives = Vec::new();

    for (center, fill, label) in [
        (Point::new(-half, 0.0), alpha_fill, ALPHA_LABEL),
        (Point::new(half, 0.0), beta_fill, BETA_LABEL),
    ] {
        if style.show_rings && ring_count <= MAX_RINGS {
            let ring_style = CircleStyle {
                stroke: style.stroke,
                fill: None,
                opacity: style.ring_opacity,
            };
            for ring in 1..=ring_count {
                primitives.push(Primitive::Circle(CircleShape {
                    center,
                    radius: ring as f64,
                    style: ring_style,
                    label: None,
                }));
            }
        }

        primitives.push(Primitive::Circle(CircleShape {
            center,
            radius: r,
            style: CircleStyle {
                stroke: style.stroke,
                fill: Some(fill),
                opacity: style.fill_opacity,
            },
            label: Some(label.to_string()),
        }));
    }

    primitives.push(Primitive::Annotation(Annotation {
        anchor: Point::ORIGIN,
        line_offset: 1,
        text: format!("{:.*}", precision, result.lens_diameter),
        style: TextStyle {
            color: style.stroke,
            boxed: None,
        },
    }));

    let half_lens = result.lens_diameter / 2.0;
    primitives.push(Primitive::Arrow(Arrow {
        from: Point::new(-half_lens, 0.0),
        to: Point::new(half_lens, 0.0),
        color: style.stroke,
        double_headed: true,
    }));

    let summary_anchor = Point::new(0.0, -r * SUMMARY_DEPTH);
    let summary_style = TextStyle {
        color: style.label_color,
        boxed: Some(style.label_box),
    };
    primitives.push(Primitive::Annotation(Annotation {
        anchor: summary_anchor,
        line_offset: 1,
        text: format!("Overlap: {:.*}%", precision, result.overlap_percentage),
        style: summary_style,
    }));
    primitives.push(Primitive::Annotation(Annotation {
        anchor: summary_anchor,
        line_offset: -1,
        text: format!(
            "Lens area: {:.*} sq {}",
            precision, result.lens_area, style.units
        ),
        style: summary_style,
    }));

    debug!(
        "Built scene with {} primitives for index={} radius={}",
        primitives.len(),
        input.index,
        input.radius
    );

    Scene {
        primitives,
        bounds: ViewBounds::square(2.0 * r),
        grid: style.show_grid,
    }
}
