#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use sidereal_chart::ephemeris::{Body, EphemerisError, EphemerisSource, GeoLocation, ALL_BODIES};
use sidereal_chart::vedic::{AyanamsaError, AyanamsaMethod, AyanamsaProvider};

/// Ephemeris that reports the same longitudes at every instant.
pub struct FixedSky {
    /// Tropical longitudes in `ALL_BODIES` order.
    pub bodies: [f64; 7],
    pub mean_node: f64,
    pub warning: Option<String>,
    /// Instants after this are rejected as out of range.
    pub valid_until: Option<DateTime<Utc>>,
}

impl FixedSky {
    pub fn new() -> Self {
        Self {
            // Sun, Moon, Mercury, Venus, Mars, Jupiter, Saturn
            bodies: [10.0, 45.0, 350.0, 200.0, 100.0, 275.5, 330.25],
            mean_node: 30.0,
            warning: None,
            valid_until: None,
        }
    }

    fn check(&self, label: &str, at: DateTime<Utc>) -> Result<(), EphemerisError> {
        match self.valid_until {
            Some(limit) if at > limit => Err(EphemerisError::OutOfRange {
                dataset: format!("fixed sky ({label})"),
                datetime: at,
                min_jd: 0.0,
                max_jd: 0.0,
            }),
            _ => Ok(()),
        }
    }
}

impl EphemerisSource for FixedSky {
    fn tropical_longitude(&self, body: Body, at: DateTime<Utc>) -> Result<f64, EphemerisError> {
        self.check(body.name(), at)?;
        let idx = ALL_BODIES.iter().position(|b| *b == body).unwrap_or(0);
        Ok(self.bodies[idx])
    }

    fn mean_node_longitude(&self, at: DateTime<Utc>) -> Result<f64, EphemerisError> {
        self.check("Mean Node", at)?;
        Ok(self.mean_node)
    }

    fn location(&self) -> GeoLocation {
        GeoLocation::DELHI
    }

    fn fallback_warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }
}

/// Provider that refuses every request.
pub struct UnavailableAyanamsa;

impl AyanamsaProvider for UnavailableAyanamsa {
    fn ayanamsa(&self, method: AyanamsaMethod, jd_tt: f64) -> Result<f64, AyanamsaError> {
        Err(AyanamsaError::OutOfRange {
            method,
            jd_tt,
            min_jd: 0.0,
            max_jd: 0.0,
        })
    }
}

pub fn instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 6, 30, 0).unwrap()
}
