//! Ayanamsa selection and resolution.
//!
//! The ayanamsa is the angular offset between the tropical zodiac (anchored
//! to the vernal equinox) and the sidereal zodiac (anchored to the fixed
//! stars). Sidereal longitude = tropical longitude − ayanamsa.
//!
//! Epoch-dependent methods are computed by an [`AyanamsaProvider`]. The
//! bundled [`PrecessionAyanamsa`] adds IAU 2006 general precession in
//! longitude to each method's J2000.0 reference value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::time::{centuries_since_j2000, julian_day_tt};
use crate::vedic::bins::normalize_degrees;
use crate::vedic::rashi::{sign_to_degree, Dms, SignError};

/// Offset used by the built-in default scheme, in degrees.
pub const DEFAULT_AYANAMSA_DEG: f64 = 27.85;

/// First Julian day (TT) covered by the bundled provider: 1800-01-01.
pub const PROVIDER_MIN_JD: f64 = 2_378_496.5;
/// Last Julian day (TT) covered by the bundled provider: 2400-01-01.
pub const PROVIDER_MAX_JD: f64 = 2_597_641.5;

#[derive(Error, Debug, PartialEq)]
pub enum AyanamsaError {
    #[error("{method} ayanamsa is not available for JD(TT) {jd_tt:.5}; supported range is {min_jd:.1}..{max_jd:.1}")]
    OutOfRange {
        method: AyanamsaMethod,
        jd_tt: f64,
        min_jd: f64,
        max_jd: f64,
    },
    #[error("Ayanamsa value {value} is not a finite number")]
    NotFinite { value: f64 },
    #[error(transparent)]
    Sign(#[from] SignError),
}

/// Epoch-dependent ayanamsa methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AyanamsaMethod {
    /// Lahiri (Chitrapaksha): Spica at 0° Libra sidereal.
    Lahiri,
    /// Krishnamurti Paddhati sidereal coordinates.
    Krishnamurti,
}

impl AyanamsaMethod {
    /// Ayanamsa at J2000.0 in degrees.
    pub const fn reference_j2000_deg(self) -> f64 {
        match self {
            Self::Lahiri => 23.857_092,
            // About 5.8' behind Lahiri at every epoch
            Self::Krishnamurti => 23.760_240,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Lahiri => "Lahiri",
            Self::Krishnamurti => "KP",
        }
    }
}

impl std::fmt::Display for AyanamsaMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How the offset for one render cycle is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AyanamsaSelection {
    FixedConstant(f64),
    ComputedAtEpoch(AyanamsaMethod, DateTime<Utc>),
}

/// The ayanamsa options offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "degrees", rename_all = "snake_case")]
pub enum AyanamsaChoice {
    /// Built-in fixed offset of [`DEFAULT_AYANAMSA_DEG`].
    Default,
    Kp,
    Lahiri,
    Custom(f64),
}

impl AyanamsaChoice {
    /// Selection to resolve for a chart cast at `instant`.
    pub fn selection_at(self, instant: DateTime<Utc>) -> AyanamsaSelection {
        match self {
            Self::Default => AyanamsaSelection::FixedConstant(DEFAULT_AYANAMSA_DEG),
            Self::Kp => AyanamsaSelection::ComputedAtEpoch(AyanamsaMethod::Krishnamurti, instant),
            Self::Lahiri => AyanamsaSelection::ComputedAtEpoch(AyanamsaMethod::Lahiri, instant),
            Self::Custom(degrees) => AyanamsaSelection::FixedConstant(degrees),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Default => format!("Default ({DEFAULT_AYANAMSA_DEG}°)"),
            Self::Kp => "KP".to_string(),
            Self::Lahiri => "Lahiri".to_string(),
            Self::Custom(degrees) => format!("Custom ({degrees}°)"),
        }
    }
}

/// Computes epoch-dependent ayanamsa values.
pub trait AyanamsaProvider {
    /// Ayanamsa in degrees for `method` at Julian day `jd_tt` (Terrestrial Time).
    fn ayanamsa(&self, method: AyanamsaMethod, jd_tt: f64) -> Result<f64, AyanamsaError>;
}

/// Mean-equinox ayanamsa: J2000.0 reference plus general precession.
#[derive(Debug, Clone, Copy)]
pub struct PrecessionAyanamsa {
    pub min_jd: f64,
    pub max_jd: f64,
}

impl Default for PrecessionAyanamsa {
    fn default() -> Self {
        Self {
            min_jd: PROVIDER_MIN_JD,
            max_jd: PROVIDER_MAX_JD,
        }
    }
}

/// IAU 2006 general precession in ecliptic longitude, in arcseconds.
pub fn general_precession_longitude_arcsec(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;
    5028.796195 * t + 1.1054348 * t2 + 0.00007964 * t3 - 0.000023857 * t4 - 0.0000000383 * t5
}

impl AyanamsaProvider for PrecessionAyanamsa {
    fn ayanamsa(&self, method: AyanamsaMethod, jd_tt: f64) -> Result<f64, AyanamsaError> {
        if !jd_tt.is_finite() || jd_tt < self.min_jd || jd_tt > self.max_jd {
            return Err(AyanamsaError::OutOfRange {
                method,
                jd_tt,
                min_jd: self.min_jd,
                max_jd: self.max_jd,
            });
        }
        let t = centuries_since_j2000(jd_tt);
        Ok(method.reference_j2000_deg() + general_precession_longitude_arcsec(t) / 3600.0)
    }
}

/// Resolve a selection into a single offset in degrees.
pub fn resolve<P: AyanamsaProvider + ?Sized>(
    selection: AyanamsaSelection,
    provider: &P,
) -> Result<f64, AyanamsaError> {
    let value = match selection {
        AyanamsaSelection::FixedConstant(degrees) => degrees,
        AyanamsaSelection::ComputedAtEpoch(method, instant) => {
            let jd_tt = julian_day_tt(instant);
            let value = provider.ayanamsa(method, jd_tt)?;
            log::debug!("{method} ayanamsa at JD(TT) {jd_tt:.5}: {value:.6}°");
            value
        }
    };
    if !value.is_finite() {
        return Err(AyanamsaError::NotFinite { value });
    }
    Ok(value)
}

/// Empirical ayanamsa from a tropical longitude and its known sidereal value.
pub fn calibrate_ayanamsa(tropical_degree: f64, sidereal_degree: f64) -> f64 {
    normalize_degrees(tropical_degree - sidereal_degree)
}

/// [`calibrate_ayanamsa`] with the sidereal reference given as sign + DMS.
pub fn calibrate_from_sign(
    tropical_degree: f64,
    sidereal_sign: &str,
    sidereal_dms: Dms,
) -> Result<f64, AyanamsaError> {
    let sidereal = sign_to_degree(sidereal_sign, sidereal_dms)?;
    Ok(calibrate_ayanamsa(tropical_degree, sidereal))
}
