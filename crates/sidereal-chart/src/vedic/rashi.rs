//! Rashi (zodiac sign) lookups and degree-minute-second conversions.
//!
//! The ecliptic is divided into 12 signs of 30 degrees each, starting from
//! Aries (Mesha) at 0 degrees.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vedic::bins::{bin_index, build_uniform_bins, normalize_degrees, AngularBin};

pub const RASHI_COUNT: usize = 12;
pub const RASHI_SIZE: f64 = 360.0 / RASHI_COUNT as f64;

// (slug, western name, sanskrit name)
pub const RASHI_ORDER: &[(&str, &str, &str); RASHI_COUNT] = &[
    ("aries", "Aries", "Mesha"),
    ("taurus", "Taurus", "Vrishabha"),
    ("gemini", "Gemini", "Mithuna"),
    ("cancer", "Cancer", "Karka"),
    ("leo", "Leo", "Simha"),
    ("virgo", "Virgo", "Kanya"),
    ("libra", "Libra", "Tula"),
    ("scorpio", "Scorpio", "Vrischika"),
    ("sagittarius", "Sagittarius", "Dhanu"),
    ("capricorn", "Capricorn", "Makara"),
    ("aquarius", "Aquarius", "Kumbha"),
    ("pisces", "Pisces", "Meena"),
];

#[derive(Error, Debug, PartialEq)]
pub enum SignError {
    #[error("Unknown sign: {sign}. Valid signs: {valid:?}")]
    UnknownSign { sign: String, valid: Vec<String> },
    #[error("Invalid DMS {degrees}:{minutes}:{seconds}; expected degrees 0-29, minutes 0-59, seconds 0-59.999")]
    InvalidDms {
        degrees: u16,
        minutes: u8,
        seconds: f64,
    },
}

/// Degrees-minutes-seconds representation of an angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dms {
    pub degrees: u16,
    pub minutes: u8,
    pub seconds: f64,
}

impl Dms {
    pub fn new(degrees: u16, minutes: u8, seconds: f64) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
        }
    }

    /// Whether this is a valid offset inside a single 30° sign.
    pub fn is_within_sign(&self) -> bool {
        self.degrees < 30 && self.minutes < 60 && (0.0..60.0).contains(&self.seconds)
    }

    pub fn to_decimal(&self) -> f64 {
        dms_to_decimal(self.degrees as f64, self.minutes as f64, self.seconds)
    }
}

impl std::fmt::Display for Dms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°{:02}'{:05.2}\"", self.degrees, self.minutes, self.seconds)
    }
}

/// Position expressed as a sign plus an offset inside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignPosition {
    pub sign: String,
    #[serde(rename = "signIndex")]
    pub sign_index: usize,
    #[serde(rename = "degreeInSign")]
    pub degree_in_sign: f64,
    pub dms: Dms,
}

lazy_static::lazy_static! {
    static ref RASHI_BINS: Vec<AngularBin> = {
        let names: Vec<&str> = RASHI_ORDER.iter().map(|(_, name, _)| *name).collect();
        build_uniform_bins(&names)
    };
}

/// The 12 sign bins in ecliptic order, starting with Aries at 0°.
pub fn rashi_bins() -> &'static [AngularBin] {
    &RASHI_BINS
}

/// Western display name of the sign containing the given longitude.
pub fn rashi_name(longitude: f64) -> &'static str {
    RASHI_ORDER[bin_index(longitude, RASHI_COUNT)].1
}

pub fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    degrees + minutes / 60.0 + seconds / 3600.0
}

/// Convert decimal degrees to degrees-minutes-seconds; sign of input is dropped.
pub fn deg_to_dms(deg: f64) -> Dms {
    let d = deg.abs();
    let whole = d.floor();
    let remainder = (d - whole) * 60.0;
    let minutes = remainder.floor();
    Dms {
        degrees: whole as u16,
        minutes: minutes as u8,
        seconds: (remainder - minutes) * 60.0,
    }
}

/// Index of a sign by western name, slug, or sanskrit name (case-insensitive).
pub fn sign_index(sign: &str) -> Result<usize, SignError> {
    let wanted = sign.trim().to_lowercase();
    RASHI_ORDER
        .iter()
        .position(|(slug, western, sanskrit)| {
            *slug == wanted || western.to_lowercase() == wanted || sanskrit.to_lowercase() == wanted
        })
        .ok_or_else(|| SignError::UnknownSign {
            sign: sign.to_string(),
            valid: RASHI_ORDER.iter().map(|(_, name, _)| name.to_string()).collect(),
        })
}

/// Absolute ecliptic degree of `sign` plus a DMS offset within it.
pub fn sign_to_degree(sign: &str, dms: Dms) -> Result<f64, SignError> {
    if !dms.is_within_sign() {
        return Err(SignError::InvalidDms {
            degrees: dms.degrees,
            minutes: dms.minutes,
            seconds: dms.seconds,
        });
    }
    let idx = sign_index(sign)?;
    Ok(idx as f64 * RASHI_SIZE + dms.to_decimal())
}

/// Split an absolute longitude into its sign and the DMS offset within it.
pub fn degree_to_sign_dms(longitude: f64) -> SignPosition {
    let lon = normalize_degrees(longitude);
    let idx = bin_index(lon, RASHI_COUNT);
    let degree_in_sign = (lon - idx as f64 * RASHI_SIZE).clamp(0.0, RASHI_SIZE);
    SignPosition {
        sign: RASHI_ORDER[idx].1.to_string(),
        sign_index: idx,
        degree_in_sign,
        dms: deg_to_dms(degree_in_sign),
    }
}
