//! Equal-width angular bins over the ecliptic.
//!
//! Both the 12 rashis and the 27 nakshatras are fixed, ordered partitions of
//! [0, 360) into bins of identical width. Classification is the same for
//! either table; only the bin list differs.

use serde::{Deserialize, Serialize};

/// A named division of the ecliptic starting at `start_degree`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngularBin {
    pub start_degree: f64,
    pub name: String,
}

impl AngularBin {
    pub fn new(start_degree: f64, name: impl Into<String>) -> Self {
        Self {
            start_degree,
            name: name.into(),
        }
    }
}

/// Normalize degrees to [0, 360).
///
/// Non-finite input maps to 0.
pub fn normalize_degrees(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let normalized = value.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Width of each bin when `count` bins share the full circle.
pub fn bin_width(count: usize) -> f64 {
    360.0 / count as f64
}

/// Index of the bin containing `degree` among `count` equal bins.
///
/// The trailing modulo absorbs the case where rounding pushes the quotient
/// onto `count` itself.
pub fn bin_index(degree: f64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let lon = normalize_degrees(degree);
    (lon / bin_width(count)).floor() as usize % count
}

/// Name of the bin containing `degree`.
///
/// Returns an empty string only for an empty table.
pub fn classify(degree: f64, bins: &[AngularBin]) -> &str {
    if bins.is_empty() {
        return "";
    }
    &bins[bin_index(degree, bins.len())].name
}

/// Build an evenly spaced table from display names in ecliptic order.
pub fn build_uniform_bins(names: &[&str]) -> Vec<AngularBin> {
    let width = bin_width(names.len());
    names
        .iter()
        .enumerate()
        .map(|(idx, name)| AngularBin::new(idx as f64 * width, *name))
        .collect()
}
