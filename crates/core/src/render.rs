//! Visual debug overlay for extracted grids.
//!
//! [`Overlay`] turns a [`Grid`] into two independent annotation layers:
//! full-span lines at every boundary, and one rectangle per populated cell.
//! [`SvgWriter`] draws a page and any number of overlays as SVG.

use std::io::Write;

use crate::error::Result;
use crate::geometry::Rect;
use crate::grid::Grid;
use crate::source::PageContent;

/// RGB color with components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(pub f64, pub f64, pub f64);

impl Color {
    pub const GREEN: Color = Color(0.0, 1.0, 0.0);
    pub const RED: Color = Color(1.0, 0.0, 0.0);
    pub const GRAY: Color = Color(0.5, 0.5, 0.5);

    fn to_svg(self) -> String {
        let c = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("rgb({},{},{})", c(self.0), c(self.1), c(self.2))
    }
}

/// A straight segment from `(x0, y0)` to `(x1, y1)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

/// Shapes drawn with one stroke style.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub color: Color,
    pub stroke_width: f64,
    pub segments: Vec<Segment>,
    pub rects: Vec<Rect>,
}

impl Layer {
    pub fn new(color: Color, stroke_width: f64) -> Self {
        Self {
            color,
            stroke_width,
            segments: Vec::new(),
            rects: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.rects.is_empty()
    }
}

/// Annotation layers for one grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Overlay {
    pub grid_lines: Layer,
    pub cells: Layer,
}

impl Overlay {
    pub const STROKE_WIDTH: f64 = 0.5;

    pub fn from_grid(grid: &Grid) -> Self {
        let mut grid_lines = Layer::new(Color::GREEN, Self::STROKE_WIDTH);
        let mut cells = Layer::new(Color::RED, Self::STROKE_WIDTH);

        if let (Some(&min_x), Some(&max_x), Some(&min_y), Some(&max_y)) = (
            grid.columns.first(),
            grid.columns.last(),
            grid.rows.first(),
            grid.rows.last(),
        ) {
            for &x in &grid.columns {
                grid_lines.segments.push(Segment {
                    x0: x,
                    y0: min_y,
                    x1: x,
                    y1: max_y,
                });
            }
            for &y in &grid.rows {
                grid_lines.segments.push(Segment {
                    x0: min_x,
                    y0: y,
                    x1: max_x,
                    y1: y,
                });
            }
        }

        cells.rects.extend(grid.cells.iter().map(|c| c.bbox));
        Self { grid_lines, cells }
    }
}

/// SVG writer for debug overlays.
pub struct SvgWriter<W: Write> {
    outfp: W,
    scale: f64,
    show_text: bool,
}

impl<W: Write> SvgWriter<W> {
    pub fn new(outfp: W) -> Self {
        Self {
            outfp,
            scale: 1.0,
            show_text: true,
        }
    }

    pub fn with_options(outfp: W, scale: f64, show_text: bool) -> Self {
        Self {
            outfp,
            scale,
            show_text,
        }
    }

    pub fn into_inner(self) -> W {
        self.outfp
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.outfp.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Write a complete SVG document: the page, its tokens, then overlays.
    pub fn write_page(&mut self, page: &PageContent, overlays: &[Overlay]) -> Result<()> {
        let s = self.scale;
        self.write(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" \
             viewBox=\"0 0 {} {}\">\n",
            page.width * s,
            page.height * s,
            page.width * s,
            page.height * s
        ))?;
        self.write(&format!(
            "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"white\"/>\n",
            page.width * s,
            page.height * s
        ))?;

        if self.show_text {
            self.write(&format!("<g fill=\"{}\">\n", Color::GRAY.to_svg()))?;
            for t in &page.tokens {
                let size = (t.y1 - t.y0).abs() * s;
                let s_text = format!(
                    "<text x=\"{}\" y=\"{}\" font-size=\"{}\">{}</text>\n",
                    t.x0.min(t.x1) * s,
                    t.y0.max(t.y1) * s,
                    size,
                    html_escape::encode_text(&t.text)
                );
                self.write(&s_text)?;
            }
            self.write("</g>\n")?;
        }

        for overlay in overlays {
            self.write_layer(&overlay.grid_lines)?;
            self.write_layer(&overlay.cells)?;
        }
        self.write("</svg>\n")
    }

    fn write_layer(&mut self, layer: &Layer) -> Result<()> {
        if layer.is_empty() {
            return Ok(());
        }
        let s = self.scale;
        self.write(&format!(
            "<g stroke=\"{}\" stroke-width=\"{}\" fill=\"none\">\n",
            layer.color.to_svg(),
            layer.stroke_width
        ))?;
        for seg in &layer.segments {
            self.write(&format!(
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"/>\n",
                seg.x0 * s,
                seg.y0 * s,
                seg.x1 * s,
                seg.y1 * s
            ))?;
        }
        for r in &layer.rects {
            self.write(&format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/>\n",
                r.0 * s,
                r.1 * s,
                (r.2 - r.0) * s,
                (r.3 - r.1) * s
            ))?;
        }
        self.write("</g>\n")
    }

    pub fn flush(&mut self) -> Result<()> {
        self.outfp.flush()?;
        Ok(())
    }
}
