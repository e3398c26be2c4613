use crate::positions::{CelestialLongitude, CoordinateMode};
use crate::rendering::primitives::{Color, Point, Ring, Shape, Stroke};
use crate::rendering::spec::{ChartMetadata, ChartSpec, LegendEntry};
use crate::rendering::visual_config::VisualConfig;
use crate::vedic::bins::{bin_width, AngularBin};
use crate::vedic::nakshatra::nakshatra_bins;
use crate::vedic::rashi::rashi_bins;

/// Layout switches for one chart.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: f32,
    pub height: f32,
    pub show_rashi_circle: bool,
    pub show_nakshatras: bool,
    pub title: String,
    pub mode: Option<CoordinateMode>,
    pub ayanamsa: Option<f64>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 1000.0,
            show_rashi_circle: true,
            show_nakshatras: true,
            title: "Astrological Chart".to_string(),
            mode: None,
            ayanamsa: None,
        }
    }
}

/// Geometry shared by every wedge of one ring.
struct RingLayout<'a> {
    ring: Ring,
    bins: &'a [AngularBin],
    radius_inner: f32,
    radius_outer: f32,
    label_radius: f32,
    boundary: &'a Stroke,
}

/// ChartSpec generator - converts positions into a polar scene
pub struct ChartSpecGenerator {
    visual_config: VisualConfig,
}

impl ChartSpecGenerator {
    /// Create a new generator with default configs
    pub fn new() -> Self {
        Self {
            visual_config: VisualConfig::default(),
        }
    }

    /// Generate ChartSpec from positions
    pub fn generate(&self, positions: &[CelestialLongitude], options: &RenderOptions) -> ChartSpec {
        let cfg = &self.visual_config;
        let mut spec = ChartSpec::new(options.width, options.height);
        spec.background_color = cfg.background_color;
        spec.radial_max = cfg.radial_max;
        let usable = options.width.min(options.height) / 2.0 - cfg.margin;
        spec.radial_scale = if cfg.radial_max > 0.0 {
            (usable / cfg.radial_max).max(0.0)
        } else {
            0.0
        };

        if options.show_rashi_circle {
            let layout = RingLayout {
                ring: Ring::Rashi,
                bins: rashi_bins(),
                radius_inner: cfg.rashi_radius_inner,
                radius_outer: cfg.rashi_radius_outer,
                label_radius: cfg.rashi_label_radius,
                boundary: &cfg.rashi_boundary,
            };
            let shapes = self.ring_shapes(&spec, &layout);
            spec.shapes.extend(shapes);
        }

        if options.show_nakshatras {
            let layout = RingLayout {
                ring: Ring::Nakshatra,
                bins: nakshatra_bins(),
                radius_inner: cfg.nakshatra_radius_inner,
                radius_outer: cfg.nakshatra_radius_outer,
                label_radius: cfg.nakshatra_label_radius,
                boundary: &cfg.nakshatra_boundary,
            };
            let shapes = self.ring_shapes(&spec, &layout);
            spec.shapes.extend(shapes);
        }

        let mut legend = Vec::with_capacity(positions.len());
        for position in positions {
            let color = Color::from_css(&position.color)
                .unwrap_or(cfg.fallback_body_color);
            let center = spec.project(position.degree, position.display_radius);
            spec.shapes.push(Shape::Marker {
                center,
                label: position.body_name.clone(),
                lon: position.degree,
                size: cfg.marker_size,
                color,
            });
            spec.shapes.push(Shape::Text {
                position: Point {
                    x: center.x,
                    y: center.y + cfg.body_label_offset,
                },
                content: marker_label(position),
                size: cfg.body_label_size,
                color,
            });
            legend.push(LegendEntry {
                label: position.body_name.clone(),
                color,
            });
        }

        spec.metadata = ChartMetadata {
            title: options.title.clone(),
            mode: options.mode.map(|m| m.to_string()),
            ayanamsa: options.ayanamsa,
            legend,
        };
        spec
    }

    /// Wedges, boundary lines and labels for one ring.
    fn ring_shapes(&self, spec: &ChartSpec, layout: &RingLayout<'_>) -> Vec<Shape> {
        let cfg = &self.visual_config;
        let width = bin_width(layout.bins.len());
        let mut shapes = Vec::with_capacity(layout.bins.len() * 3);

        for (idx, bin) in layout.bins.iter().enumerate() {
            let start_lon = idx as f64 * width;
            let end_lon = start_lon + width;

            shapes.push(Shape::Sector {
                ring: layout.ring,
                index: idx as u8,
                name: bin.name.clone(),
                start_lon,
                end_lon,
                radius_inner: layout.radius_inner,
                radius_outer: layout.radius_outer,
                outline: sector_outline(
                    spec,
                    start_lon,
                    end_lon,
                    layout.radius_inner as f64,
                    layout.radius_outer as f64,
                    cfg.arc_step_deg,
                ),
                fill: match layout.ring {
                    Ring::Rashi => cfg.rashi_fill(idx),
                    Ring::Nakshatra => cfg.nakshatra_fill(idx),
                },
            });

            shapes.push(Shape::Line {
                from: spec.project(start_lon, 0.0),
                to: spec.project(start_lon, layout.radius_outer as f64),
                stroke: layout.boundary.clone(),
            });

            shapes.push(Shape::Text {
                position: spec.project((start_lon + end_lon) / 2.0, layout.label_radius as f64),
                content: bin.name.clone(),
                size: cfg.label_size,
                color: cfg.label_color,
            });
        }

        shapes
    }
}

impl Default for ChartSpecGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// "<name>\n<degree>°\n<nakshatra>" as shown beside each marker.
pub fn marker_label(position: &CelestialLongitude) -> String {
    format!(
        "{}\n{:.2}°\n{}",
        position.body_name,
        position.degree,
        position.nakshatra_name()
    )
}

/// Closed outline of a wedge, outer arc first then inner arc reversed.
///
/// Returns no points when the band or span is degenerate.
pub fn sector_outline(
    spec: &ChartSpec,
    start_lon: f64,
    end_lon: f64,
    radius_inner: f64,
    radius_outer: f64,
    step_deg: f64,
) -> Vec<Point> {
    let finite = [start_lon, end_lon, radius_inner, radius_outer, step_deg]
        .iter()
        .all(|v| v.is_finite());
    if !finite
        || radius_inner < 0.0
        || radius_inner >= radius_outer
        || end_lon <= start_lon
        || step_deg <= 0.0
        || spec.radial_scale <= 0.0
    {
        return Vec::new();
    }

    let steps = ((end_lon - start_lon) / step_deg).ceil().max(1.0) as usize;
    let arc = |radius: f64| -> Vec<Point> {
        (0..=steps)
            .map(|i| {
                let lon = start_lon + (end_lon - start_lon) * i as f64 / steps as f64;
                spec.project(lon, radius)
            })
            .collect()
    };

    let mut outline = arc(radius_outer);
    if radius_inner == 0.0 {
        outline.push(spec.center);
    } else {
        outline.extend(arc(radius_inner).into_iter().rev());
    }
    outline
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_sector_is_empty() {
        let mut spec = ChartSpec::new(100.0, 100.0);
        spec.radial_scale = 10.0;
        assert!(sector_outline(&spec, 0.0, 30.0, 2.2, 2.0, 1.0).is_empty());
        assert!(sector_outline(&spec, 30.0, 30.0, 0.0, 2.0, 1.0).is_empty());
        assert!(sector_outline(&spec, 0.0, f64::NAN, 0.0, 2.0, 1.0).is_empty());
    }

    #[test]
    fn test_pie_slice_closes_on_center() {
        let mut spec = ChartSpec::new(100.0, 100.0);
        spec.radial_scale = 10.0;
        let outline = sector_outline(&spec, 0.0, 30.0, 0.0, 2.0, 10.0);
        // 4 outer arc points plus the center
        assert_eq!(outline.len(), 5);
        assert_eq!(outline.last().copied(), Some(spec.center));
    }
}
