//! SVG export.
//!
//! Tiles are written as filled paths of arcs, the disk boundary as a
//! circle, and the dual graph, when enabled, as open paths on top.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use poincare_kernel_math::Point2;
use poincare_kernel_tessellate::Tessellation;
use tracing::debug;

use crate::{dual_paths, polygon_path, RenderStyle, Result};

#[derive(Debug, Clone)]
enum Element {
    Circle {
        center: Point2,
        radius: f64,
        stroke: String,
        width: f64,
    },
    Path {
        data: String,
        fill: Option<String>,
        stroke: String,
        width: f64,
    },
}

/// SVG document builder.
///
/// Accumulates circles and paths and writes them in insertion order.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    view_box: [f64; 4],
    elements: Vec<Element>,
}

impl SvgDocument {
    /// Empty document showing the rectangle `(x, y, width, height)`.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            view_box: [x, y, width, height],
            elements: Vec::new(),
        }
    }

    /// Number of elements added so far.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Add an unfilled circle.
    pub fn add_circle(&mut self, center: Point2, radius: f64, stroke: &str, width: f64) {
        self.elements.push(Element::Circle {
            center,
            radius,
            stroke: stroke.to_string(),
            width,
        });
    }

    /// Add a path from SVG path data. `None` leaves it unfilled.
    pub fn add_path(&mut self, data: String, fill: Option<&str>, stroke: &str, width: f64) {
        self.elements.push(Element::Path {
            data,
            fill: fill.map(str::to_string),
            stroke: stroke.to_string(),
            width,
        });
    }

    /// Write the document.
    pub fn write_to(&self, writer: &mut impl Write) -> std::io::Result<()> {
        let [x, y, w, h] = self.view_box;
        writeln!(
            writer,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="{x:.3} {y:.3} {w:.3} {h:.3}">"#
        )?;

        for element in &self.elements {
            match element {
                Element::Circle {
                    center,
                    radius,
                    stroke,
                    width,
                } => {
                    writeln!(
                        writer,
                        r#"  <circle cx="{:.3}" cy="{:.3}" r="{radius:.3}" fill="none" stroke="{stroke}" stroke-width="{width}"/>"#,
                        center.x, center.y
                    )?;
                }
                Element::Path {
                    data,
                    fill,
                    stroke,
                    width,
                } => {
                    let fill = fill.as_deref().unwrap_or("none");
                    writeln!(
                        writer,
                        r#"  <path d="{data}" fill="{fill}" stroke="{stroke}" stroke-width="{width}"/>"#
                    )?;
                }
            }
        }

        writeln!(writer, "</svg>")?;
        Ok(())
    }

    /// Export to an SVG file.
    pub fn export(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()
    }
}

/// Build the document for `tess`: tiles, then the disk boundary, then the
/// dual graph if `style.show_dual` is set.
pub fn document(tess: &Tessellation, style: &RenderStyle) -> Result<SvgDocument> {
    style.validate()?;

    let disk = tess.disk();
    let pad = style.stroke_width;
    let side = 2.0 * (disk.radius + pad);
    let mut doc = SvgDocument::new(
        disk.center.x - disk.radius - pad,
        disk.center.y - disk.radius - pad,
        side,
        side,
    );

    for poly in tess.polygons() {
        let path = polygon_path(tess, poly)?;
        doc.add_path(
            path.svg_data(),
            Some(style.fill(path.parity)),
            &style.tile_stroke,
            style.stroke_width,
        );
    }

    doc.add_circle(disk.center, disk.radius, &style.disk_stroke, style.stroke_width);

    let mut duals = 0;
    if style.show_dual {
        for dual in dual_paths(tess)? {
            doc.add_path(dual.svg_data(), None, &style.dual_stroke, style.stroke_width);
            duals += 1;
        }
    }

    debug!(
        polygons = tess.polygon_count(),
        dual_edges = duals,
        "svg document built"
    );
    Ok(doc)
}

/// Write `tess` as SVG.
pub fn write_svg(tess: &Tessellation, style: &RenderStyle, mut writer: impl Write) -> Result<()> {
    document(tess, style)?.write_to(&mut writer)?;
    Ok(())
}

/// Render `tess` to an SVG string.
pub fn to_svg_string(tess: &Tessellation, style: &RenderStyle) -> Result<String> {
    let mut buf = Vec::new();
    write_svg(tess, style, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write `tess` to an SVG file.
pub fn export_svg(tess: &Tessellation, style: &RenderStyle, path: impl AsRef<Path>) -> Result<()> {
    document(tess, style)?.export(path)?;
    Ok(())
}
