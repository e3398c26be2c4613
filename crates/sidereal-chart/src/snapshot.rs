//! One render cycle: observe, resolve the ayanamsa, adapt, lay out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ephemeris::{EphemerisError, EphemerisSource, ALL_BODIES};
use crate::positions::{adapt, describe, lunar_nodes, CelestialLongitude, CoordinateMode};
use crate::rendering::{ChartSpec, ChartSpecGenerator, RenderOptions};
use crate::vedic::ayanamsa::{resolve, AyanamsaChoice, AyanamsaError, AyanamsaProvider};

#[derive(Error, Debug)]
pub enum ChartError {
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error(transparent)]
    Ayanamsa(#[from] AyanamsaError),
}

/// User-facing controls for one chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub mode: CoordinateMode,
    pub ayanamsa: AyanamsaChoice,
    pub show_rashi_circle: bool,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartRequest {
    fn default() -> Self {
        Self {
            mode: CoordinateMode::Sidereal,
            ayanamsa: AyanamsaChoice::Default,
            show_rashi_circle: true,
            width: 1200,
            height: 1000,
        }
    }
}

/// Everything computed for one instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub instant: DateTime<Utc>,
    pub request: ChartRequest,
    /// Offset applied to every sidereal record; 0 in tropical mode.
    pub ayanamsa_deg: f64,
    pub positions: Vec<CelestialLongitude>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Compute every position for `instant`.
///
/// Any ephemeris or ayanamsa failure aborts the whole snapshot.
pub fn compute_snapshot<E, P>(
    ephemeris: &E,
    provider: &P,
    request: &ChartRequest,
    instant: DateTime<Utc>,
) -> Result<ChartSnapshot, ChartError>
where
    E: EphemerisSource + ?Sized,
    P: AyanamsaProvider + ?Sized,
{
    let ayanamsa_deg = if request.mode.uses_ayanamsa() {
        resolve(request.ayanamsa.selection_at(instant), provider)?
    } else {
        0.0
    };
    log::debug!(
        "casting {} chart at {instant} with ayanamsa {ayanamsa_deg:.6}°",
        request.mode
    );

    let mut positions = Vec::with_capacity(ALL_BODIES.len() * 2 + 2);
    for body in ALL_BODIES {
        let tropical = ephemeris.tropical_longitude(body, instant)?;
        positions.extend(adapt(body, tropical, request.mode, ayanamsa_deg));
    }
    let node = ephemeris.mean_node_longitude(instant)?;
    positions.extend(lunar_nodes(node, request.mode, ayanamsa_deg));

    let warnings = ephemeris
        .fallback_warning()
        .map(|w| vec![w.to_string()])
        .unwrap_or_default();

    Ok(ChartSnapshot {
        instant,
        request: *request,
        ayanamsa_deg,
        positions,
        warnings,
    })
}

impl ChartSnapshot {
    /// Text listing, one line per record.
    pub fn report_lines(&self) -> Vec<String> {
        self.positions.iter().map(describe).collect()
    }

    /// Lay the snapshot out as a polar scene.
    pub fn scene(&self, generator: &ChartSpecGenerator) -> ChartSpec {
        let mode = self.request.mode;
        let options = RenderOptions {
            width: self.request.width as f32,
            height: self.request.height as f32,
            show_rashi_circle: self.request.show_rashi_circle,
            show_nakshatras: mode.shows_nakshatras(),
            title: format!("{mode} positions at {}", self.instant.format("%Y-%m-%d %H:%M UTC")),
            mode: Some(mode),
            ayanamsa: mode.uses_ayanamsa().then_some(self.ayanamsa_deg),
        };
        generator.generate(&self.positions, &options)
    }
}
