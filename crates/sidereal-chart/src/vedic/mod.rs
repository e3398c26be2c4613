pub mod ayanamsa;
pub mod bins;
pub mod nakshatra;
pub mod rashi;

pub use ayanamsa::{
    calibrate_ayanamsa, calibrate_from_sign, resolve, AyanamsaChoice, AyanamsaError,
    AyanamsaMethod, AyanamsaProvider, AyanamsaSelection, PrecessionAyanamsa,
};
pub use bins::{classify, normalize_degrees, AngularBin};
pub use nakshatra::{nakshatra_at, nakshatra_bins, nakshatra_name, Nakshatra, NakshatraPlacement};
pub use rashi::{
    degree_to_sign_dms, dms_to_decimal, rashi_bins, rashi_name, sign_to_degree, Dms, SignError,
    SignPosition,
};
