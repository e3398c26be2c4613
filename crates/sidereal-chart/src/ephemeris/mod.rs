pub mod adapter;
pub mod types;

pub use adapter::{
    has_ephemeris_files, parse_body, EphemerisError, EphemerisSource, SwissEphemerisAdapter,
};
pub use types::{Body, ChartPoint, EphemerisDataset, GeoLocation, LunarNode, ALL_BODIES};
