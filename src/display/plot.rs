//! Scene rendering onto a ratatui canvas.
//!
//! Drawing happens in passes: translucent fills (composited per pixel so the
//! lens shows the blend of both patterns), the background grid, circle
//! outlines, arrows, and finally text. Half-block pixels keep the plot square.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as Segment, Painter, Shape};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use super::layout::{fit_square, grid_lines, grid_step};
use crate::color::RgbColor;
use crate::overlap::{OverlapResult, PatternInput};
use crate::scene::{Annotation, Arrow, CircleShape, Scene, ViewBounds};

const GRID_LINES: usize = 8;
const GRID_OPACITY: f32 = 0.15;

pub fn rgb(color: RgbColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Color of the point `(x, y)` after stacking every filled circle that
/// covers it over `background`, or `None` if no fill covers it.
pub fn composite_at(circles: &[&CircleShape], background: RgbColor, x: f64, y: f64) -> Option<RgbColor> {
    let mut color = background;
    let mut covered = false;
    for circle in circles {
        if let Some(fill) = circle.style.fill {
            if circle.contains(x, y) {
                color = fill.over(color, circle.style.opacity);
                covered = true;
            }
        }
    }
    covered.then_some(color)
}

/// All filled circles of a scene, sampled at pixel centers.
struct CompositeFill<'a> {
    circles: Vec<&'a CircleShape>,
    background: RgbColor,
    bounds: ViewBounds,
    resolution: (usize, usize),
}

impl Shape for CompositeFill<'_> {
    fn draw(&self, painter: &mut Painter<'_, '_>) {
        let (w, h) = self.resolution;
        if w == 0 || h == 0 || self.circles.is_empty() {
            return;
        }
        let dx = self.bounds.width() / w as f64;
        let dy = self.bounds.height() / h as f64;

        for row in 0..h {
            let y = self.bounds.y[1] - (row as f64 + 0.5) * dy;
            for col in 0..w {
                let x = self.bounds.x[0] + (col as f64 + 0.5) * dx;
                if let Some(color) = composite_at(&self.circles, self.background, x, y) {
                    if let Some((px, py)) = painter.get_point(x, y) {
                        painter.paint(px, py, rgb(color));
                    }
                }
            }
        }
    }
}

/// Square plot of a [`Scene`] with an optional legend in the top-right corner.
pub struct PlotView<'a> {
    scene: &'a Scene,
    background: RgbColor,
    foreground: RgbColor,
    show_legend: bool,
}

impl<'a> PlotView<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            background: RgbColor::WHITE,
            foreground: RgbColor::BLACK,
            show_legend: true,
        }
    }

    pub fn colors(mut self, background: RgbColor, foreground: RgbColor) -> Self {
        self.background = background;
        self.foreground = foreground;
        self
    }

    pub fn legend(mut self, show: bool) -> Self {
        self.show_legend = show;
        self
    }
}

impl Widget for PlotView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let plot_area = fit_square(area);
        if plot_area.width < 4 || plot_area.height < 2 {
            return;
        }

        let scene = self.scene;
        let bounds = scene.bounds;
        let background = self.background;
        let col_width = bounds.width() / plot_area.width as f64;
        let row_height = bounds.height() / plot_area.height as f64;

        let fill = CompositeFill {
            circles: scene.circles().filter(|c| c.style.fill.is_some()).collect(),
            background,
            bounds,
            resolution: (plot_area.width as usize, plot_area.height as usize * 2),
        };
        let grid_color = rgb(self.foreground.over(background, GRID_OPACITY));
        let step = grid_step(bounds.width(), GRID_LINES);

        Canvas::default()
            .marker(Marker::HalfBlock)
            .x_bounds(bounds.x)
            .y_bounds(bounds.y)
            .background_color(rgb(background))
            .paint(|ctx| {
                ctx.draw(&fill);

                if scene.grid {
                    draw_grid(ctx, &bounds, step, grid_color);
                }

                for circle in scene.circles() {
                    ctx.draw(&Circle {
                        x: circle.center.x,
                        y: circle.center.y,
                        radius: circle.radius,
                        color: rgb(circle.style.stroke.over(background, circle.style.opacity)),
                    });
                }

                for arrow in scene.arrows() {
                    draw_arrow(ctx, arrow, col_width);
                }

                for note in scene.annotations() {
                    print_annotation(ctx, note, &bounds, col_width, row_height);
                }
            })
            .render(plot_area, buf);

        if self.show_legend {
            render_legend(scene, background, self.foreground, plot_area, buf);
        }
    }
}

fn draw_grid(ctx: &mut Context, bounds: &ViewBounds, step: f64, color: Color) {
    for x in grid_lines(bounds.x[0], bounds.x[1], step) {
        ctx.draw(&Segment::new(x, bounds.y[0], x, bounds.y[1], color));
    }
    for y in grid_lines(bounds.y[0], bounds.y[1], step) {
        ctx.draw(&Segment::new(bounds.x[0], y, bounds.x[1], y, color));
    }
}

fn draw_arrow(ctx: &mut Context, arrow: &Arrow, col_width: f64) {
    let color = rgb(arrow.color);
    ctx.draw(&Segment::new(arrow.from.x, arrow.from.y, arrow.to.x, arrow.to.y, color));

    // Heads would cover each other on a lens narrower than one column
    if arrow.length() < col_width {
        return;
    }
    let style = Style::default().fg(color);
    if arrow.double_headed {
        ctx.print(arrow.from.x, arrow.from.y, Span::styled("◀", style));
    }
    ctx.print(arrow.to.x, arrow.to.y, Span::styled("▶", style));
}

fn print_annotation(ctx: &mut Context, note: &Annotation, bounds: &ViewBounds, col_width: f64, row_height: f64) {
    let mut style = Style::default().fg(rgb(note.style.color));
    let text = match note.style.boxed {
        Some(box_color) => {
            style = style.bg(rgb(box_color));
            format!(" {} ", note.text)
        }
        None => note.text.clone(),
    };

    let width = text.chars().count() as f64 * col_width;
    let x = (note.anchor.x - width / 2.0).clamp(bounds.x[0], bounds.x[1]);
    let y = (note.anchor.y + note.line_offset as f64 * row_height).clamp(bounds.y[0], bounds.y[1]);
    ctx.print(x, y, Span::styled(text, style));
}

fn render_legend(scene: &Scene, background: RgbColor, foreground: RgbColor, plot_area: Rect, buf: &mut Buffer) {
    let entries: Vec<Line> = scene
        .legend()
        .map(|(label, style)| {
            let swatch = style.fill.unwrap_or(style.stroke).over(background, style.opacity);
            Line::from(vec![
                Span::styled("██", Style::default().fg(rgb(swatch))),
                Span::raw(" "),
                Span::raw(label.to_string()),
            ])
        })
        .collect();
    if entries.is_empty() {
        return;
    }

    let width = entries.iter().map(|l| l.width() as u16).max().unwrap_or(0) + 2;
    let height = entries.len() as u16 + 2;
    if width + 2 > plot_area.width || height + 2 > plot_area.height {
        return;
    }
    let area = Rect::new(plot_area.right() - width - 1, plot_area.y + 1, width, height);

    let colors = Style::default().fg(rgb(foreground)).bg(rgb(background));
    Clear.render(area, buf);
    Paragraph::new(entries)
        .style(colors)
        .block(Block::default().borders(Borders::ALL).style(colors))
        .render(area, buf);
}

/// Numeric results beside the plot.
pub struct Readouts<'a> {
    pub input: &'a PatternInput,
    pub result: &'a OverlapResult,
    pub units: &'a str,
    pub precision: usize,
}

impl Readouts<'_> {
    pub fn lines(&self) -> Vec<String> {
        let p = self.precision;
        vec![
            format!("Path index:     {:.*} {}", p, self.input.index, self.units),
            format!("Pattern radius: {:.*} {}", p, self.input.radius, self.units),
            format!("Pattern area:   {:.*} sq {}", p, self.result.circle_area, self.units),
            String::new(),
            format!("Lens area:      {:.*} sq {}", p, self.result.lens_area, self.units),
            format!("Overlap:        {:.*}%", p, self.result.overlap_percentage),
            format!("Lens diameter:  {:.*} {}", p, self.result.lens_diameter, self.units),
        ]
    }
}

impl Widget for Readouts<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = self.lines().into_iter().map(Line::from).collect();
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Results "))
            .render(area, buf);
    }
}
