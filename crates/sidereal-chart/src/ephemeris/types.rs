use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

impl GeoLocation {
    /// New Delhi, the default observer.
    pub const DELHI: GeoLocation = GeoLocation {
        lat: 28.6139,
        lon: 77.2090,
    };
}

impl Default for GeoLocation {
    fn default() -> Self {
        Self::DELHI
    }
}

/// Bodies whose apparent longitude comes straight from the ephemeris.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
}

pub const ALL_BODIES: [Body; 7] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
];

impl Body {
    pub const fn all() -> &'static [Body; 7] {
        &ALL_BODIES
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
        }
    }

    /// Swiss Ephemeris planet number.
    pub const fn swe_id(self) -> i32 {
        match self {
            Self::Sun => 0,
            Self::Moon => 1,
            Self::Mercury => 2,
            Self::Venus => 3,
            Self::Mars => 4,
            Self::Jupiter => 5,
            Self::Saturn => 6,
        }
    }

    /// Chart radius in data units; radial axis spans 0..2.5.
    pub const fn display_radius(self) -> f64 {
        match self {
            Self::Sun => 1.3,
            Self::Moon => 1.4,
            Self::Mercury => 1.5,
            Self::Venus => 1.6,
            Self::Mars => 1.7,
            Self::Jupiter => 1.8,
            Self::Saturn => 1.9,
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::Sun => "orange",
            Self::Moon => "blue",
            Self::Mercury => "green",
            Self::Venus => "pink",
            Self::Mars => "red",
            Self::Jupiter => "purple",
            Self::Saturn => "brown",
        }
    }
}

impl FromStr for Body {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ALL_BODIES
            .iter()
            .copied()
            .find(|body| body.name().to_lowercase() == wanted)
            .ok_or_else(|| s.to_string())
    }
}

/// Mean lunar nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LunarNode {
    /// Ascending node.
    Rahu,
    /// Descending node, always Rahu + 180°.
    Ketu,
}

impl LunarNode {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    pub const fn display_radius(self) -> f64 {
        match self {
            Self::Rahu => 2.0,
            Self::Ketu => 2.1,
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::Rahu => "black",
            Self::Ketu => "gray",
        }
    }
}

/// Anything placed on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartPoint {
    Body(Body),
    Node(LunarNode),
}

impl ChartPoint {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Body(body) => body.name(),
            Self::Node(node) => node.name(),
        }
    }

    pub const fn display_radius(self) -> f64 {
        match self {
            Self::Body(body) => body.display_radius(),
            Self::Node(node) => node.display_radius(),
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::Body(body) => body.color(),
            Self::Node(node) => node.color(),
        }
    }
}

/// Which data set backs the ephemeris.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EphemerisDataset {
    /// Swiss Ephemeris `.se1` files under `path` (1800–2400 CE).
    SwissFiles { path: PathBuf },
    /// Built-in Moshier analytical ephemeris; lower precision, no files.
    Moshier,
}

impl EphemerisDataset {
    /// Supported Julian-day (UT) range.
    pub fn jd_range(&self) -> (f64, f64) {
        match self {
            // 1800-01-01 .. 2400-01-01
            Self::SwissFiles { .. } => (2_378_496.5, 2_597_641.5),
            // 3000 BCE .. 3000 CE
            Self::Moshier => (625_673.5, 2_816_787.5),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::SwissFiles { path } => format!("Swiss Ephemeris ({})", path.display()),
            Self::Moshier => "Moshier (built-in)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_from_str() {
        assert_eq!("moon".parse::<Body>(), Ok(Body::Moon));
        assert_eq!(" Saturn ".parse::<Body>(), Ok(Body::Saturn));
        assert_eq!("pluto".parse::<Body>(), Err("pluto".to_string()));
    }

    #[test]
    fn test_radii_increase_outward() {
        let radii: Vec<f64> = ALL_BODIES.iter().map(|b| b.display_radius()).collect();
        assert!(radii.windows(2).all(|w| w[0] < w[1]));
        assert!(LunarNode::Rahu.display_radius() > Body::Saturn.display_radius());
    }
}
