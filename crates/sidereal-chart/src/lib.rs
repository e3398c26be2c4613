//! Sidereal and tropical position charts.
//!
//! Raw tropical longitudes come from an [`ephemeris::EphemerisSource`], are
//! shifted by a resolved ayanamsa, classified into rashi and nakshatra
//! divisions and laid out as a polar [`rendering::ChartSpec`].

pub mod ephemeris;
pub mod positions;
pub mod rendering;
pub mod snapshot;
pub mod time;
pub mod vedic;

pub use ephemeris::{Body, EphemerisError, EphemerisSource, GeoLocation, SwissEphemerisAdapter};
pub use positions::{adapt, lunar_nodes, CelestialLongitude, CoordinateMode};
pub use rendering::{ChartSpec, ChartSpecGenerator, RenderError, RenderOptions};
pub use snapshot::{compute_snapshot, ChartError, ChartRequest, ChartSnapshot};
pub use vedic::{classify, AyanamsaChoice, AyanamsaProvider, PrecessionAyanamsa};
