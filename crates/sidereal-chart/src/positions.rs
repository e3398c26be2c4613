//! Turns raw tropical longitudes into the records shown on the chart.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ephemeris::types::{Body, ChartPoint, LunarNode};
use crate::vedic::bins::normalize_degrees;
use crate::vedic::nakshatra::{nakshatra_at, NakshatraPlacement};
use crate::vedic::rashi::rashi_name;

/// Radius step between a body's sidereal marker and its tropical twin in
/// `Both` mode. Display tuning only.
pub const BOTH_MODE_RADIUS_DECREMENT: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateMode {
    Tropical,
    #[default]
    Sidereal,
    Both,
}

impl CoordinateMode {
    /// Whether this mode needs an ayanamsa at all.
    pub fn uses_ayanamsa(self) -> bool {
        !matches!(self, Self::Tropical)
    }

    /// Whether the nakshatra ring belongs on the chart.
    pub fn shows_nakshatras(self) -> bool {
        self.uses_ayanamsa()
    }
}

impl fmt::Display for CoordinateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Tropical => "Tropical",
            Self::Sidereal => "Sidereal",
            Self::Both => "Both",
        })
    }
}

impl FromStr for CoordinateMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tropical" => Ok(Self::Tropical),
            "sidereal" => Ok(Self::Sidereal),
            "both" => Ok(Self::Both),
            other => Err(format!(
                "unknown coordinate mode {other:?}; expected tropical, sidereal or both"
            )),
        }
    }
}

/// Zodiac a single record is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zodiac {
    Tropical,
    Sidereal,
}

/// One position ready for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CelestialLongitude {
    /// Display label, e.g. "Moon" or "Moon (Tropical)".
    pub body_name: String,
    pub point: ChartPoint,
    pub zodiac: Zodiac,
    /// Longitude drawn on the chart.
    pub degree: f64,
    pub tropical_degree: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidereal_degree: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nakshatra: Option<NakshatraPlacement>,
    pub rashi: String,
    pub display_radius: f64,
    pub color: String,
}

impl CelestialLongitude {
    fn new(
        body_name: String,
        point: ChartPoint,
        zodiac: Zodiac,
        degree: f64,
        tropical_degree: f64,
        with_nakshatra: bool,
        display_radius: f64,
    ) -> Self {
        let degree = normalize_degrees(degree);
        Self {
            body_name,
            point,
            zodiac,
            degree,
            tropical_degree: normalize_degrees(tropical_degree),
            sidereal_degree: (zodiac == Zodiac::Sidereal).then_some(degree),
            nakshatra: with_nakshatra.then(|| nakshatra_at(degree)),
            rashi: rashi_name(degree).to_string(),
            display_radius,
            color: point.color().to_string(),
        }
    }

    /// Nakshatra display name, empty when the record carries none.
    pub fn nakshatra_name(&self) -> &str {
        self.nakshatra
            .as_ref()
            .map(|n| n.nakshatra.name.as_str())
            .unwrap_or("")
    }

    /// Whether this is the tropical twin produced in `Both` mode.
    pub fn is_tropical_twin(&self) -> bool {
        self.zodiac == Zodiac::Tropical && self.body_name.ends_with("(Tropical)")
    }
}

/// `(tropical − ayanamsa) mod 360`.
pub fn sidereal_degree(tropical_degree: f64, ayanamsa: f64) -> f64 {
    normalize_degrees(tropical_degree - ayanamsa)
}

/// Records for one observed body.
///
/// `Both` yields the tropical twin first, then the sidereal record.
pub fn adapt(
    body: Body,
    tropical_degree: f64,
    mode: CoordinateMode,
    ayanamsa: f64,
) -> Vec<CelestialLongitude> {
    let point = ChartPoint::Body(body);
    let radius = body.display_radius();
    match mode {
        CoordinateMode::Tropical => {
            // The Sun carries no nakshatra in tropical mode.
            let with_nakshatra = body != Body::Sun;
            vec![CelestialLongitude::new(
                body.name().to_string(),
                point,
                Zodiac::Tropical,
                tropical_degree,
                tropical_degree,
                with_nakshatra,
                radius,
            )]
        }
        CoordinateMode::Sidereal => vec![sidereal_record(body, tropical_degree, ayanamsa)],
        CoordinateMode::Both => vec![
            CelestialLongitude::new(
                format!("{} (Tropical)", body.name()),
                point,
                Zodiac::Tropical,
                tropical_degree,
                tropical_degree,
                false,
                radius - BOTH_MODE_RADIUS_DECREMENT,
            ),
            sidereal_record(body, tropical_degree, ayanamsa),
        ],
    }
}

fn sidereal_record(body: Body, tropical_degree: f64, ayanamsa: f64) -> CelestialLongitude {
    CelestialLongitude::new(
        body.name().to_string(),
        ChartPoint::Body(body),
        Zodiac::Sidereal,
        sidereal_degree(tropical_degree, ayanamsa),
        tropical_degree,
        true,
        body.display_radius(),
    )
}

/// Rahu and Ketu from the mean node's tropical longitude.
///
/// Both nodes always carry a nakshatra and are never duplicated in `Both`
/// mode.
pub fn lunar_nodes(
    mean_node_tropical: f64,
    mode: CoordinateMode,
    ayanamsa: f64,
) -> [CelestialLongitude; 2] {
    let (zodiac, rahu) = if mode.uses_ayanamsa() {
        (Zodiac::Sidereal, sidereal_degree(mean_node_tropical, ayanamsa))
    } else {
        (Zodiac::Tropical, normalize_degrees(mean_node_tropical))
    };
    let ketu = normalize_degrees(rahu + 180.0);
    let ketu_tropical = normalize_degrees(mean_node_tropical + 180.0);

    let node = |node: LunarNode, degree: f64, tropical: f64| {
        CelestialLongitude::new(
            node.name().to_string(),
            ChartPoint::Node(node),
            zodiac,
            degree,
            tropical,
            true,
            node.display_radius(),
        )
    };
    [
        node(LunarNode::Rahu, rahu, mean_node_tropical),
        node(LunarNode::Ketu, ketu, ketu_tropical),
    ]
}

/// One line of the textual positions listing.
///
/// Tropical twins show only the rashi.
pub fn describe(record: &CelestialLongitude) -> String {
    if record.is_tropical_twin() {
        format!(
            "{}: {:.2}°, Rashi: {}",
            record.body_name, record.degree, record.rashi
        )
    } else {
        format!(
            "{}: {:.2}°, Nakshatra: {}, Rashi: {}",
            record.body_name,
            record.degree,
            record.nakshatra_name(),
            record.rashi
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidereal_degree_wraps() {
        assert!((sidereal_degree(100.0, 27.85) - 72.15).abs() < 1e-9);
        assert!((sidereal_degree(10.0, 27.85) - 342.15).abs() < 1e-9);
    }

    #[test]
    fn test_tropical_sun_has_no_nakshatra() {
        let sun = adapt(Body::Sun, 45.0, CoordinateMode::Tropical, 0.0);
        assert_eq!(sun.len(), 1);
        assert!(sun[0].nakshatra.is_none());
        assert_eq!(sun[0].nakshatra_name(), "");
        assert_eq!(sun[0].rashi, "Taurus");

        let moon = adapt(Body::Moon, 45.0, CoordinateMode::Tropical, 0.0);
        assert_eq!(moon[0].nakshatra_name(), "Rohini");
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Both".parse::<CoordinateMode>(), Ok(CoordinateMode::Both));
        assert!("galactic".parse::<CoordinateMode>().is_err());
    }

    #[test]
    fn test_describe_formats() {
        let records = adapt(Body::Mars, 100.0, CoordinateMode::Both, 27.85);
        assert_eq!(describe(&records[0]), "Mars (Tropical): 100.00°, Rashi: Cancer");
        assert_eq!(
            describe(&records[1]),
            "Mars: 72.15°, Nakshatra: Ardra, Rashi: Gemini"
        );
    }
}
