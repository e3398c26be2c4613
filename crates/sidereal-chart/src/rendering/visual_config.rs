use crate::rendering::primitives::{Color, LineStyle, Stroke};

/// Visual styling configuration for chart elements.
///
/// Radii are in chart data units; the radial axis runs from 0 to
/// `radial_max`.
#[derive(Debug, Clone)]
pub struct VisualConfig {
    pub radial_max: f32,
    /// Gap between the plot and the image edge, in pixels.
    pub margin: f32,

    pub rashi_radius_inner: f32,
    pub rashi_radius_outer: f32,
    pub rashi_label_radius: f32,
    pub rashi_boundary: Stroke,

    pub nakshatra_radius_inner: f32,
    pub nakshatra_radius_outer: f32,
    pub nakshatra_label_radius: f32,
    pub nakshatra_boundary: Stroke,

    /// Longitude step used when tracing wedge arcs, in degrees.
    pub arc_step_deg: f64,
    pub sector_alpha: f32,

    pub marker_size: f32,
    pub label_size: f32,
    pub body_label_size: f32,
    /// Vertical gap between a marker and its label, in pixels.
    pub body_label_offset: f32,
    pub label_color: Color,
    pub fallback_body_color: Color,
    pub background_color: Color,
}

impl VisualConfig {
    /// Fill for the `index`-th rashi wedge.
    pub fn rashi_fill(&self, index: usize) -> Color {
        let i = index as i32;
        Color::rgba(
            channel(50 + i * 10),
            channel(100 + i * 5),
            channel(150 - i * 5),
            self.sector_alpha,
        )
    }

    /// Fill for the `index`-th nakshatra wedge.
    pub fn nakshatra_fill(&self, index: usize) -> Color {
        let i = index as i32;
        Color::rgba(
            channel(100 + i * 5),
            channel(150 + i * 3),
            channel(200 - i * 4),
            self.sector_alpha,
        )
    }
}

fn channel(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            radial_max: 2.5,
            margin: 40.0,

            rashi_radius_inner: 2.0,
            rashi_radius_outer: 2.2,
            rashi_label_radius: 2.4,
            rashi_boundary: Stroke {
                color: Color::BLACK,
                width: 1.0,
                style: LineStyle::Dashed,
            },

            nakshatra_radius_inner: 0.0,
            nakshatra_radius_outer: 2.0,
            nakshatra_label_radius: 2.1,
            nakshatra_boundary: Stroke {
                color: Color::GRAY,
                width: 1.0,
                style: LineStyle::Dotted,
            },

            arc_step_deg: 2.0,
            sector_alpha: 0.1,

            marker_size: 12.0,
            label_size: 12.0,
            body_label_size: 11.0,
            body_label_offset: 10.0,
            label_color: Color::BLACK,
            fallback_body_color: Color::GRAY,
            background_color: Color::WHITE,
        }
    }
}
