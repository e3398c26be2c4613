//! The 27 lunar mansions.
//!
//! Each nakshatra spans 13°20' of the sidereal ecliptic, starting with
//! Ashwini at 0°, and splits into four padas of 3°20'.

use serde::{Deserialize, Serialize};

use crate::vedic::bins::{bin_index, build_uniform_bins, normalize_degrees, AngularBin};

pub const NAKSHATRA_COUNT: usize = 27;
pub const NAKSHATRA_SPAN: f64 = 360.0 / NAKSHATRA_COUNT as f64;
pub const PADA_SPAN: f64 = NAKSHATRA_SPAN / 4.0;

/// (slug, name, ruling graha) in ecliptic order.
pub const NAKSHATRAS: &[(&str, &str, &str); NAKSHATRA_COUNT] = &[
    ("ashwini", "Ashwini", "ketu"),
    ("bharani", "Bharani", "venus"),
    ("krittika", "Krittika", "sun"),
    ("rohini", "Rohini", "moon"),
    ("mrigashira", "Mrigashira", "mars"),
    ("ardra", "Ardra", "rahu"),
    ("punarvasu", "Punarvasu", "jupiter"),
    ("pushya", "Pushya", "saturn"),
    ("ashlesha", "Ashlesha", "mercury"),
    ("magha", "Magha", "ketu"),
    ("purva_phalguni", "Purva Phalguni", "venus"),
    ("uttara_phalguni", "Uttara Phalguni", "sun"),
    ("hasta", "Hasta", "moon"),
    ("chitra", "Chitra", "mars"),
    ("swati", "Swati", "rahu"),
    ("vishakha", "Vishakha", "jupiter"),
    ("anuradha", "Anuradha", "saturn"),
    ("jyeshtha", "Jyeshtha", "mercury"),
    ("mula", "Mula", "ketu"),
    ("purva_ashadha", "Purva Ashadha", "venus"),
    ("uttara_ashadha", "Uttara Ashadha", "sun"),
    ("shravana", "Shravana", "moon"),
    ("dhanishta", "Dhanishta", "mars"),
    ("shatabhisha", "Shatabhisha", "rahu"),
    ("purva_bhadrapada", "Purva Bhadrapada", "jupiter"),
    ("uttara_bhadrapada", "Uttara Bhadrapada", "saturn"),
    ("revati", "Revati", "mercury"),
];

/// Static facts about one nakshatra.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nakshatra {
    pub slug: String,
    pub name: String,
    pub lord: String,
    pub index: usize,
    #[serde(rename = "startDegree")]
    pub start_degree: f64,
    #[serde(rename = "endDegree")]
    pub end_degree: f64,
}

impl Nakshatra {
    fn from_index(index: usize) -> Self {
        let (slug, name, lord) = NAKSHATRAS[index % NAKSHATRA_COUNT];
        let start_degree = index as f64 * NAKSHATRA_SPAN;
        Self {
            slug: slug.to_string(),
            name: name.to_string(),
            lord: lord.to_string(),
            index,
            start_degree,
            end_degree: start_degree + NAKSHATRA_SPAN,
        }
    }
}

/// Where a longitude falls inside its nakshatra.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NakshatraPlacement {
    #[serde(flatten)]
    pub nakshatra: Nakshatra,
    /// Degrees past the nakshatra's start.
    #[serde(rename = "offsetDegree")]
    pub offset_degree: f64,
    /// Fraction of the nakshatra already traversed, in [0, 1].
    pub progress: f64,
    /// Quarter, 1 to 4.
    pub pada: u8,
    #[serde(rename = "padaProgress")]
    pub pada_progress: f64,
}

lazy_static::lazy_static! {
    static ref NAKSHATRA_BINS: Vec<AngularBin> = {
        let names: Vec<&str> = NAKSHATRAS.iter().map(|(_, name, _)| *name).collect();
        build_uniform_bins(&names)
    };
}

/// Bin table for [`crate::vedic::bins::classify`].
pub fn nakshatra_bins() -> &'static [AngularBin] {
    &NAKSHATRA_BINS
}

pub fn nakshatra_name(longitude: f64) -> &'static str {
    NAKSHATRAS[bin_index(longitude, NAKSHATRA_COUNT)].1
}

/// Nakshatra, pada and progress for a sidereal longitude.
pub fn nakshatra_at(longitude: f64) -> NakshatraPlacement {
    let lon = normalize_degrees(longitude);
    let nakshatra = Nakshatra::from_index(bin_index(lon, NAKSHATRA_COUNT));

    // float noise at a segment edge must stay inside pada 4
    let offset_degree = (lon - nakshatra.start_degree).clamp(0.0, NAKSHATRA_SPAN);
    let quarter = ((offset_degree / PADA_SPAN).floor() as u8).min(3);

    NakshatraPlacement {
        nakshatra,
        offset_degree,
        progress: offset_degree / NAKSHATRA_SPAN,
        pada: quarter + 1,
        pada_progress: (offset_degree - quarter as f64 * PADA_SPAN) / PADA_SPAN,
    }
}
