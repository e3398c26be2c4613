use serde::{Deserialize, Serialize};

/// Point in 2D pixel space, y pointing down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Color in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

// CSS keywords used by the chart palette
const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("orange", (255, 165, 0)),
    ("blue", (0, 0, 255)),
    ("green", (0, 128, 0)),
    ("pink", (255, 192, 203)),
    ("red", (255, 0, 0)),
    ("purple", (128, 0, 128)),
    ("brown", (165, 42, 42)),
];

impl Color {
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };

    pub const BLACK: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };

    pub const GRAY: Color = Color {
        r: 128,
        g: 128,
        b: 128,
        a: 255,
    };

    /// Opaque color from components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    /// Color with a fractional alpha in [0, 1].
    pub fn rgba(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Color {
            r,
            g,
            b,
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
        }
    }

    /// Create color from hex string (e.g., "#FF0000" or "#FF0000FF")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            6 => Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Color {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
                a: channel(6)?,
            }),
            _ => None,
        }
    }

    /// Resolve a CSS color keyword or hex string.
    pub fn from_css(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.starts_with('#') {
            return Self::from_hex(value);
        }
        let wanted = value.to_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == wanted)
            .map(|(_, (r, g, b))| Color::rgb(*r, *g, *b))
    }

    /// Alpha as a fraction in [0, 1].
    pub fn alpha(&self) -> f64 {
        self.a as f64 / 255.0
    }
}

/// Line style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

/// Stroke style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    pub style: LineStyle,
}

/// Which background division a sector belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ring {
    Rashi,
    Nakshatra,
}

/// Shape primitives for chart rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Shape {
    /// Filled wedge between two ecliptic longitudes.
    Sector {
        ring: Ring,
        index: u8,
        name: String,
        start_lon: f64,
        end_lon: f64,
        radius_inner: f32,
        radius_outer: f32,
        /// Closed outline in pixel space; empty for degenerate geometry.
        outline: Vec<Point>,
        fill: Color,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Text {
        position: Point,
        content: String,
        size: f32,
        color: Color,
    },
    Marker {
        center: Point,
        label: String,
        lon: f64,
        size: f32,
        color: Color,
    },
}
