//! SVG output for a [`ChartSpec`] through plotters.

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use thiserror::Error;

use crate::rendering::primitives::{Color as ChartColor, LineStyle, Point, Shape, Stroke};
use crate::rendering::spec::ChartSpec;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid canvas size {width}x{height}")]
    InvalidSize { width: f32, height: f32 },
    #[error("drawing backend failed: {0}")]
    Backend(String),
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

const LINE_SPACING: f64 = 1.2;
const LEGEND_ROW: i32 = 18;

/// Render the scene to an SVG document.
pub fn render_svg(spec: &ChartSpec) -> Result<String, RenderError> {
    let size = canvas_size(spec)?;
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, size).into_drawing_area();
        draw_scene(&root, spec)?;
        root.present().map_err(backend_err)?;
    }
    Ok(buf)
}

/// Render the scene and write it to `path`.
pub fn write_svg(spec: &ChartSpec, path: &Path) -> Result<(), RenderError> {
    let svg = render_svg(spec)?;
    std::fs::write(path, svg).map_err(|source| RenderError::Io {
        path: path.display().to_string(),
        source,
    })?;
    log::info!("wrote chart to {}", path.display());
    Ok(())
}

fn canvas_size(spec: &ChartSpec) -> Result<(u32, u32), RenderError> {
    let valid = |v: f32| v.is_finite() && v >= 1.0;
    if !valid(spec.width) || !valid(spec.height) {
        return Err(RenderError::InvalidSize {
            width: spec.width,
            height: spec.height,
        });
    }
    Ok((spec.width.round() as u32, spec.height.round() as u32))
}

fn backend_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Backend(e.to_string())
}

fn draw_scene<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
) -> Result<(), RenderError> {
    root.fill(&rgba(spec.background_color)).map_err(backend_err)?;

    for shape in &spec.shapes {
        match shape {
            Shape::Sector { outline, fill, .. } => {
                if outline.len() < 3 {
                    continue;
                }
                let pts: Vec<(i32, i32)> = outline.iter().map(|p| pixel(*p)).collect();
                root.draw(&Polygon::new(pts, rgba(*fill).filled()))
                    .map_err(backend_err)?;
            }
            Shape::Line { from, to, stroke } => draw_line(root, *from, *to, stroke)?,
            Shape::Text {
                position,
                content,
                size,
                color,
            } => draw_text(root, *position, content, *size, *color)?,
            Shape::Marker {
                center,
                size,
                color,
                ..
            } => {
                let radius = (*size / 2.0).round().max(1.0) as i32;
                root.draw(&Circle::new(pixel(*center), radius, rgba(*color).filled()))
                    .map_err(backend_err)?;
            }
        }
    }

    draw_title(root, spec)?;
    draw_legend(root, spec)
}

fn draw_line<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    from: Point,
    to: Point,
    stroke: &Stroke,
) -> Result<(), RenderError> {
    let style = rgba(stroke.color).stroke_width(stroke.width.round().max(1.0) as u32);
    let (dash, gap) = match stroke.style {
        LineStyle::Solid => {
            return root
                .draw(&PathElement::new(vec![pixel(from), pixel(to)], style))
                .map_err(backend_err);
        }
        LineStyle::Dashed => (6.0_f32, 4.0_f32),
        LineStyle::Dotted => (1.5_f32, 3.0_f32),
    };

    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let length = (dx * dx + dy * dy).sqrt();
    if !length.is_finite() || length == 0.0 {
        return Ok(());
    }
    let at = |t: f32| Point {
        x: from.x + dx * t / length,
        y: from.y + dy * t / length,
    };

    let mut t = 0.0;
    while t < length {
        let end = (t + dash).min(length);
        root.draw(&PathElement::new(vec![pixel(at(t)), pixel(at(end))], style))
            .map_err(backend_err)?;
        t += dash + gap;
    }
    Ok(())
}

fn draw_text<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    position: Point,
    content: &str,
    size: f32,
    color: ChartColor,
) -> Result<(), RenderError> {
    let fill = rgba(color);
    let style = TextStyle::from(("sans-serif", size as f64).into_font())
        .color(&fill)
        .pos(Pos::new(HPos::Center, VPos::Top));

    let step = (size as f64 * LINE_SPACING).round() as i32;
    let (x, y) = pixel(position);
    for (i, line) in content.lines().enumerate() {
        root.draw(&Text::new(line.to_string(), (x, y + i as i32 * step), style.clone()))
            .map_err(backend_err)?;
    }
    Ok(())
}

fn draw_title<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
) -> Result<(), RenderError> {
    let title = &spec.metadata.title;
    if title.is_empty() {
        return Ok(());
    }
    let position = Point {
        x: spec.width / 2.0,
        y: 8.0,
    };
    draw_text(root, position, title, 18.0, ChartColor::BLACK)
}

fn draw_legend<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
) -> Result<(), RenderError> {
    for (i, entry) in spec.metadata.legend.iter().enumerate() {
        let y = 16 + i as i32 * LEGEND_ROW;
        root.draw(&Circle::new((16, y), 5, rgba(entry.color).filled()))
            .map_err(backend_err)?;
        let label = TextStyle::from(("sans-serif", 12.0).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));
        root.draw(&Text::new(entry.label.clone(), (28, y), label))
            .map_err(backend_err)?;
    }
    Ok(())
}

fn pixel(p: Point) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

fn rgba(c: ChartColor) -> RGBAColor {
    RGBAColor(c.r, c.g, c.b, c.alpha())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_canvas() {
        let spec = ChartSpec::new(0.0, 400.0);
        assert!(matches!(
            render_svg(&spec),
            Err(RenderError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_text_is_centred_on_its_position() {
        let mut spec = ChartSpec::new(200.0, 200.0);
        spec.shapes.push(Shape::Text {
            position: Point { x: 100.0, y: 100.0 },
            content: "Ashwini".to_string(),
            size: 12.0,
            color: ChartColor::BLACK,
        });
        let svg = render_svg(&spec).unwrap();
        assert!(svg.contains("Ashwini"));
        assert!(svg.contains("text-anchor=\"middle\""));
    }

    #[test]
    fn test_blank_scene_is_svg() {
        let spec = ChartSpec::new(200.0, 200.0);
        let svg = render_svg(&spec).unwrap();
        assert!(svg.contains("<svg"));
    }
}
