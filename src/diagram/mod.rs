//! Schematic diagrams of a chute, drawn from its parameters alone.
//!
//! A [`Figure`] is a title plus a row of [`Panel`]s. Each panel holds a small
//! display list of [`Mark`]s in millimeters (x to the right, y up) and is fitted
//! into its cell with equal scale on both axes. The same display list renders
//! to a fixed-size raster (`image-io`, drawn with plotters) and to a vector
//! drawing (`svg-io`). Both carry the titles and labels.

pub mod views;

use crate::float_types::Real;
use crate::io::{IoError, write_atomic};
use log::info;
use nalgebra::Point2;
use std::path::{Path, PathBuf};

/// Output width in pixels.
pub const WIDTH: u32 = 1200;
/// Output height in pixels.
pub const HEIGHT: u32 = 800;

const MARGIN: Real = 40.0;
const TITLE_BAND: Real = 60.0;
const PANEL_TITLE_BAND: Real = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const WHITE: Color = Color([255, 255, 255]);
    pub const BLACK: Color = Color([0, 0, 0]);
    pub const GRAY: Color = Color([128, 128, 128]);
    pub const LIGHT_GRAY: Color = Color([220, 220, 220]);
    pub const BLUE: Color = Color([31, 90, 200]);
    pub const LIGHT_BLUE: Color = Color([200, 222, 245]);
    pub const RED: Color = Color([210, 40, 40]);
    pub const PINK: Color = Color([250, 210, 215]);
    pub const GREEN: Color = Color([30, 150, 60]);
    pub const LIGHT_GREEN: Color = Color([205, 238, 205]);
    pub const ORANGE: Color = Color([240, 150, 20]);
    pub const YELLOW: Color = Color([250, 235, 120]);

    pub fn hex(&self) -> String {
        let [r, g, b] = self.0;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

/// Fill and outline of a mark. Widths are in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub width: Real,
    pub dashed: bool,
}

impl Style {
    pub const fn filled(fill: Color, stroke: Color) -> Self {
        Self {
            fill: Some(fill),
            stroke: Some(stroke),
            width: 2.0,
            dashed: false,
        }
    }

    pub const fn outline(stroke: Color, width: Real) -> Self {
        Self {
            fill: None,
            stroke: Some(stroke),
            width,
            dashed: false,
        }
    }

    pub const fn dashed(self) -> Self {
        Self { dashed: true, ..self }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    /// Closed polygon.
    Polygon { points: Vec<Point2<Real>>, style: Style },
    /// Open polyline, stroke only.
    Polyline { points: Vec<Point2<Real>>, style: Style },
    Circle {
        center: Point2<Real>,
        radius: Real,
        style: Style,
    },
    Label {
        at: Point2<Real>,
        text: String,
        color: Color,
    },
}

/// One drawing area with its own coordinate window.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: String,
    pub min: Point2<Real>,
    pub max: Point2<Real>,
    pub marks: Vec<Mark>,
}

impl Panel {
    pub fn new(title: impl Into<String>, min: Point2<Real>, max: Point2<Real>) -> Self {
        Self {
            title: title.into(),
            min,
            max,
            marks: Vec::new(),
        }
    }

    pub fn polygon(&mut self, points: Vec<Point2<Real>>, style: Style) -> &mut Self {
        self.marks.push(Mark::Polygon { points, style });
        self
    }

    pub fn rect(&mut self, min: Point2<Real>, max: Point2<Real>, style: Style) -> &mut Self {
        self.polygon(
            vec![min, Point2::new(max.x, min.y), max, Point2::new(min.x, max.y)],
            style,
        )
    }

    pub fn line(&mut self, a: Point2<Real>, b: Point2<Real>, style: Style) -> &mut Self {
        self.marks.push(Mark::Polyline {
            points: vec![a, b],
            style,
        });
        self
    }

    pub fn circle(&mut self, center: Point2<Real>, radius: Real, style: Style) -> &mut Self {
        self.marks.push(Mark::Circle { center, radius, style });
        self
    }

    pub fn label(&mut self, at: Point2<Real>, text: impl Into<String>, color: Color) -> &mut Self {
        self.marks.push(Mark::Label {
            at,
            text: text.into(),
            color,
        });
        self
    }

    /// Dimension line from `a` to `b` with end ticks and a centered label.
    pub fn dimension(&mut self, a: Point2<Real>, b: Point2<Real>, text: impl Into<String>, color: Color) -> &mut Self {
        let style = Style::outline(color, 1.5);
        let along = b - a;
        let tick = match along.try_normalize(Real::EPSILON) {
            Some(dir) => nalgebra::Vector2::new(-dir.y, dir.x) * 4.0,
            None => nalgebra::Vector2::zeros(),
        };
        self.line(a, b, style)
            .line(a - tick, a + tick, style)
            .line(b - tick, b + tick, style)
            .label(a + along / 2.0 + tick * 2.0, text, color)
    }
}

/// A titled row of panels.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    pub panels: Vec<Panel>,
}

/// Maps one panel's window onto its cell, y flipped.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    left: Real,
    top: Real,
    scale: Real,
    min: Point2<Real>,
    max: Point2<Real>,
}

impl Viewport {
    fn cell(index: usize, cells: usize) -> (Real, Real, Real, Real) {
        let cells = cells.max(1) as Real;
        let width = (WIDTH as Real - MARGIN * (cells + 1.0)) / cells;
        let height = HEIGHT as Real - TITLE_BAND - PANEL_TITLE_BAND - MARGIN;
        let left = MARGIN + index as Real * (width + MARGIN);
        (left, TITLE_BAND + PANEL_TITLE_BAND, width, height)
    }

    fn new(index: usize, cells: usize, panel: &Panel) -> Self {
        let (left, top, width, height) = Self::cell(index, cells);
        let span_x = (panel.max.x - panel.min.x).max(Real::EPSILON);
        let span_y = (panel.max.y - panel.min.y).max(Real::EPSILON);
        let scale = (width / span_x).min(height / span_y);
        Self {
            left: left + (width - span_x * scale) / 2.0,
            top: top + (height - span_y * scale) / 2.0,
            scale,
            min: panel.min,
            max: panel.max,
        }
    }

    fn to_px(&self, p: &Point2<Real>) -> Point2<Real> {
        Point2::new(
            self.left + (p.x - self.min.x) * self.scale,
            self.top + (self.max.y - p.y) * self.scale,
        )
    }
}

impl Figure {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            panels: Vec::new(),
        }
    }

    pub fn panel(mut self, panel: Panel) -> Self {
        self.panels.push(panel);
        self
    }

    fn viewports(&self) -> impl Iterator<Item = (&Panel, Viewport)> {
        let cells = self.panels.len();
        self.panels
            .iter()
            .enumerate()
            .map(move |(k, panel)| (panel, Viewport::new(k, cells, panel)))
    }

    /// Write `<dir>/<stem>.png` and, with `svg-io`, `<dir>/<stem>.svg`.
    pub fn save(&self, dir: &Path, stem: &str) -> Result<Vec<PathBuf>, IoError> {
        let mut written = Vec::new();
        #[cfg(feature = "image-io")]
        {
            let path = dir.join(format!("{stem}.png"));
            write_atomic(&path, &self.to_png()?)?;
            written.push(path);
        }
        #[cfg(feature = "svg-io")]
        {
            let path = dir.join(format!("{stem}.svg"));
            write_atomic(&path, self.to_svg().to_string().as_bytes())?;
            written.push(path);
        }
        for path in &written {
            info!("wrote {}", path.display());
        }
        Ok(written)
    }
}

#[cfg(feature = "image-io")]
mod raster {
    use super::*;
    use crate::float_types::TAU;
    use image::RgbImage;
    use plotters::backend::{BitMapBackend, RGBPixel};
    use plotters::coord::Shift;
    use plotters::drawing::{DrawingArea, IntoDrawingArea};
    use plotters::element::{Circle, DashedPathElement, PathElement, Polygon, Rectangle};
    use plotters::style::text_anchor::{HPos, Pos, VPos};
    use plotters::style::{Color as _, IntoFont, RGBColor, ShapeStyle};

    type Area<'a> = DrawingArea<BitMapBackend<'a, RGBPixel>, Shift>;

    const DASH: u32 = 8;

    fn rgb(color: Color) -> RGBColor {
        let [r, g, b] = color.0;
        RGBColor(r, g, b)
    }

    fn px(view: &Viewport, p: &Point2<Real>) -> (i32, i32) {
        let q = view.to_px(p);
        (q.x.round() as i32, q.y.round() as i32)
    }

    fn text(area: &Area, content: &str, at: (Real, Real), size: u32, color: Color) -> Result<(), IoError> {
        let color = rgb(color);
        let style = ("sans-serif", size)
            .into_font()
            .color(&color)
            .pos(Pos::new(HPos::Center, VPos::Center));
        area.draw_text(content, &style, (at.0.round() as i32, at.1.round() as i32))?;
        Ok(())
    }

    fn stroke(area: &Area, mut points: Vec<(i32, i32)>, closed: bool, style: &Style) -> Result<(), IoError> {
        let Some(color) = style.stroke else {
            return Ok(());
        };
        if closed {
            points.extend(points.first().copied());
        }
        let shape = rgb(color).stroke_width(style.width.round().max(1.0) as u32);
        if style.dashed {
            area.draw(&DashedPathElement::new(points, DASH, DASH, shape))?;
        } else {
            area.draw(&PathElement::new(points, shape))?;
        }
        Ok(())
    }

    fn draw_mark(area: &Area, view: &Viewport, mark: &Mark) -> Result<(), IoError> {
        match mark {
            Mark::Polygon { points, style } => {
                let points: Vec<(i32, i32)> = points.iter().map(|p| px(view, p)).collect();
                if let Some(fill) = style.fill {
                    area.draw(&Polygon::new(points.clone(), rgb(fill).filled()))?;
                }
                stroke(area, points, true, style)
            },
            Mark::Polyline { points, style } => {
                stroke(area, points.iter().map(|p| px(view, p)).collect(), false, style)
            },
            Mark::Circle { center, radius, style } => {
                let c = px(view, center);
                let r = radius * view.scale;
                if let Some(fill) = style.fill {
                    area.draw(&Circle::new(c, r.round() as i32, rgb(fill).filled()))?;
                }
                // 64 chords are smooth at this size
                let ring = (0..64)
                    .map(|i| {
                        let a = TAU * i as Real / 64.0;
                        ((c.0 as Real + r * a.cos()).round() as i32, (c.1 as Real + r * a.sin()).round() as i32)
                    })
                    .collect();
                stroke(area, ring, true, style)
            },
            Mark::Label { at, text: content, color } => {
                let p = view.to_px(at);
                text(area, content, (p.x, p.y), 13, *color)
            },
        }
    }

    impl Figure {
        /// Rasterize at [`WIDTH`] x [`HEIGHT`], titles and labels included.
        pub fn render(&self) -> Result<RgbImage, IoError> {
            let mut buffer = vec![0u8; WIDTH as usize * HEIGHT as usize * 3];
            {
                let area = BitMapBackend::<RGBPixel>::with_buffer_and_format(&mut buffer, (WIDTH, HEIGHT))
                    .map_err(|error| IoError::Plot(error.to_string()))?
                    .into_drawing_area();
                area.fill(&rgb(Color::WHITE))?;
                text(&area, &self.title, (WIDTH as Real / 2.0, TITLE_BAND * 0.6), 24, Color::BLACK)?;

                let cells = self.panels.len();
                for (index, (panel, view)) in self.viewports().enumerate() {
                    let (left, top, width, height) = Viewport::cell(index, cells);
                    let frame: ShapeStyle = rgb(Color::LIGHT_GRAY).stroke_width(1);
                    area.draw(&Rectangle::new(
                        [
                            (left.round() as i32, top.round() as i32),
                            ((left + width).round() as i32, (top + height).round() as i32),
                        ],
                        frame,
                    ))?;
                    text(&area, &panel.title, (left + width / 2.0, top - PANEL_TITLE_BAND / 2.0), 16, Color::BLACK)?;
                    for mark in &panel.marks {
                        draw_mark(&area, &view, mark)?;
                    }
                }
                area.present()?;
            }
            RgbImage::from_raw(WIDTH, HEIGHT, buffer).ok_or_else(|| IoError::Plot("raster buffer size mismatch".into()))
        }

        /// PNG-encoded [`Figure::render`].
        pub fn to_png(&self) -> Result<Vec<u8>, IoError> {
            let mut cursor = std::io::Cursor::new(Vec::new());
            self.render()?.write_to(&mut cursor, image::ImageFormat::Png)?;
            Ok(cursor.into_inner())
        }
    }
}

#[cfg(feature = "svg-io")]
mod vector {
    use super::*;
    use svg::Document;
    use svg::Node;
    use svg::node::element::{Circle, Element, Polygon, Polyline, Rectangle};

    fn points_attr(view: &Viewport, points: &[Point2<Real>]) -> String {
        points
            .iter()
            .map(|p| {
                let q = view.to_px(p);
                format!("{:.2},{:.2}", q.x, q.y)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn styled<T: Node>(mut node: T, style: &Style) -> T {
        node.assign("fill", style.fill.map_or_else(|| "none".to_string(), |c| c.hex()));
        node.assign("fill-opacity", 0.6);
        if let Some(stroke) = style.stroke {
            node.assign("stroke", stroke.hex());
            node.assign("stroke-width", style.width);
            if style.dashed {
                node.assign("stroke-dasharray", "8 8");
            }
        }
        node
    }

    fn text(x: Real, y: Real, content: &str, size: Real, color: Color) -> Element {
        let mut element = Element::new("text");
        element.assign("x", x);
        element.assign("y", y);
        element.assign("text-anchor", "middle");
        element.assign("font-family", "sans-serif");
        element.assign("font-size", size);
        element.assign("fill", color.hex());
        element.append(svg::node::Text::new(content));
        element
    }

    impl Figure {
        /// Vector rendering with every label.
        pub fn to_svg(&self) -> Document {
            let mut document = Document::new()
                .set("viewBox", (0, 0, WIDTH, HEIGHT))
                .set("width", WIDTH)
                .set("height", HEIGHT)
                .add(
                    Rectangle::new()
                        .set("width", WIDTH)
                        .set("height", HEIGHT)
                        .set("fill", Color::WHITE.hex()),
                )
                .add(text(WIDTH as Real / 2.0, TITLE_BAND * 0.6, &self.title, 24.0, Color::BLACK));

            let cells = self.panels.len();
            for (index, (panel, view)) in self.viewports().enumerate() {
                let (left, top, width, _) = Viewport::cell(index, cells);
                document = document.add(text(left + width / 2.0, top - 8.0, &panel.title, 16.0, Color::BLACK));
                for mark in &panel.marks {
                    document = match mark {
                        Mark::Polygon { points, style } => {
                            document.add(styled(Polygon::new().set("points", points_attr(&view, points)), style))
                        },
                        Mark::Polyline { points, style } => document.add(styled(
                            Polyline::new().set("points", points_attr(&view, points)),
                            &Style { fill: None, ..*style },
                        )),
                        Mark::Circle { center, radius, style } => {
                            let c = view.to_px(center);
                            document.add(styled(
                                Circle::new()
                                    .set("cx", c.x)
                                    .set("cy", c.y)
                                    .set("r", radius * view.scale),
                                style,
                            ))
                        },
                        Mark::Label { at, text: content, color } => {
                            let p = view.to_px(at);
                            document.add(text(p.x, p.y, content, 13.0, *color))
                        },
                    };
                }
            }
            document
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square_panel() -> Panel {
        let mut panel = Panel::new("square", Point2::new(0.0, 0.0), Point2::new(100.0, 100.0));
        panel.rect(
            Point2::new(10.0, 10.0),
            Point2::new(90.0, 90.0),
            Style::filled(Color::LIGHT_BLUE, Color::BLUE),
        );
        panel
    }

    #[test]
    fn viewport_flips_y_and_keeps_aspect() {
        let panel = square_panel();
        let view = Viewport::new(0, 1, &panel);
        let low = view.to_px(&Point2::new(0.0, 0.0));
        let high = view.to_px(&Point2::new(100.0, 100.0));
        assert!(high.y < low.y);
        assert_relative_eq!(high.x - low.x, low.y - high.y, epsilon = 1e-9);
    }

    #[cfg(feature = "image-io")]
    #[test]
    fn raster_has_fixed_size_and_fills_shapes() {
        let figure = Figure::new("test").panel(square_panel());
        let image = figure.render().unwrap();
        assert_eq!(image.dimensions(), (WIDTH, HEIGHT));
        let view = Viewport::new(0, 1, &figure.panels[0]);
        let center = view.to_px(&Point2::new(50.0, 50.0));
        assert_eq!(image.get_pixel(center.x as u32, center.y as u32).0, Color::LIGHT_BLUE.0);
        assert_eq!(image.get_pixel(1, 1).0, Color::WHITE.0);
    }

    #[cfg(feature = "image-io")]
    #[test]
    fn raster_draws_label_text() {
        let at = Point2::new(50.0, 95.0);
        let bare = Figure::new("labels").panel(square_panel()).render().unwrap();
        let mut panel = square_panel();
        panel.label(at, "240mm", Color::RED);
        let labelled = Figure::new("labels").panel(panel).render().unwrap();

        let center = Viewport::new(0, 1, &Panel::new("", Point2::new(0.0, 0.0), Point2::new(100.0, 100.0))).to_px(&at);
        let (cx, cy) = (center.x as i64, center.y as i64);
        let changed = (cx - 30..cx + 30)
            .flat_map(|x| (cy - 8..cy + 8).map(move |y| (x as u32, y as u32)))
            .filter(|&(x, y)| bare.get_pixel(x, y) != labelled.get_pixel(x, y))
            .count();
        assert!(changed > 20, "only {changed} pixels changed");
        assert_eq!(bare.get_pixel(1, 1), labelled.get_pixel(1, 1));
    }

    #[cfg(feature = "svg-io")]
    #[test]
    fn vector_carries_labels() {
        let mut panel = square_panel();
        panel.label(Point2::new(50.0, 50.0), "240mm", Color::BLACK);
        let text = Figure::new("labels").panel(panel).to_svg().to_string();
        assert!(text.contains("240mm"));
        assert!(text.contains("labels"));
    }
}
