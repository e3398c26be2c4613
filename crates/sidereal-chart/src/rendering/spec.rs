use crate::rendering::primitives::{Color, Point, Shape};
use serde::{Deserialize, Serialize};

/// Chart metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartMetadata {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ayanamsa: Option<f64>,
    pub legend: Vec<LegendEntry>,
}

/// One entry of the legend, in plotting order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
}

/// Chart specification - declarative description of chart to render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    pub width: f32,
    pub height: f32,
    pub center: Point,
    /// Pixels per radial data unit.
    pub radial_scale: f32,
    /// Largest radial data value that fits the plot.
    pub radial_max: f32,
    /// Screen angle of 0° longitude, degrees counterclockwise from +x.
    /// Longitude increases counterclockwise.
    pub rotation: f32,
    pub background_color: Color,
    pub shapes: Vec<Shape>,
    pub metadata: ChartMetadata,
}

impl ChartSpec {
    /// Create a new empty chart spec
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            center: Point {
                x: width / 2.0,
                y: height / 2.0,
            },
            radial_scale: 1.0,
            radial_max: 1.0,
            rotation: 90.0,
            background_color: Color::WHITE,
            shapes: Vec::new(),
            metadata: ChartMetadata::default(),
        }
    }

    /// Pixel position of a longitude/radius pair under this chart's axes.
    pub fn project(&self, lon_deg: f64, radius: f64) -> Point {
        let theta = (self.rotation as f64 + lon_deg).to_radians();
        let r = radius * self.radial_scale as f64;
        Point {
            x: (self.center.x as f64 + r * theta.cos()) as f32,
            y: (self.center.y as f64 - r * theta.sin()) as f32,
        }
    }

    /// Shapes of one kind, for consumers that only need part of the scene.
    pub fn markers(&self) -> impl Iterator<Item = &Shape> {
        self.shapes
            .iter()
            .filter(|shape| matches!(shape, Shape::Marker { .. }))
    }
}
