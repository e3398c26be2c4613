use crate::ephemeris::types::{Body, EphemerisDataset, GeoLocation};
use crate::time::julian_day_utc;
use crate::vedic::bins::normalize_degrees;
use chrono::{DateTime, Utc};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use swisseph::swe::{calc_ut, set_ephe_path};
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Unsupported body: {name}. Valid bodies: {valid:?}")]
    UnsupportedBody { name: String, valid: Vec<String> },
    #[error("{datetime} is outside the {dataset} range (JD {min_jd:.1}..{max_jd:.1})")]
    OutOfRange {
        dataset: String,
        datetime: DateTime<Utc>,
        min_jd: f64,
        max_jd: f64,
    },
    #[error("Failed to calculate position for {body} at {datetime}: {message}")]
    CalculationFailed {
        body: String,
        datetime: DateTime<Utc>,
        message: String,
    },
}

const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

// Swiss Ephemeris flag bits
const FLG_SWIEPH: i32 = 2;
const FLG_MOSEPH: i32 = 4;
const FLG_SPEED: i32 = 256;
const FLG_TOPOCTR: i32 = 32 * 1024;

/// Extension of the Swiss Ephemeris planetary and lunar data files.
const EPHEMERIS_FILE_EXT: &str = "se1";

/// SE_MEAN_NODE
const MEAN_NODE_ID: i32 = 10;

/// Source of raw tropical positions for a fixed observer.
pub trait EphemerisSource {
    /// Apparent tropical ecliptic longitude of `body` at `at`, in [0, 360).
    fn tropical_longitude(&self, body: Body, at: DateTime<Utc>) -> Result<f64, EphemerisError>;

    /// Tropical longitude of the mean ascending lunar node at `at`, in [0, 360).
    fn mean_node_longitude(&self, at: DateTime<Utc>) -> Result<f64, EphemerisError>;

    fn location(&self) -> GeoLocation;

    /// Warning to surface when the preferred data set could not be used.
    fn fallback_warning(&self) -> Option<&str> {
        None
    }
}

/// Look up a body by display or lowercase name.
pub fn parse_body(name: &str) -> Result<Body, EphemerisError> {
    name.parse::<Body>()
        .map_err(|name| EphemerisError::UnsupportedBody {
            name,
            valid: Body::all().iter().map(|b| b.name().to_string()).collect(),
        })
}

/// Swiss Ephemeris adapter implementation
///
/// Positions are topocentric for `location` at sea level.
pub struct SwissEphemerisAdapter {
    dataset: EphemerisDataset,
    location: GeoLocation,
    fallback_warning: Option<String>,
    /// Set when the library silently answered from Moshier despite files being configured.
    runtime_fallback: OnceLock<String>,
}

/// True when `path` is a directory holding at least one `.se1` data file.
pub fn has_ephemeris_files(path: &Path) -> bool {
    let Ok(entries) = std::fs::read_dir(path) else {
        return false;
    };
    entries.flatten().any(|entry| {
        entry
            .path()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(EPHEMERIS_FILE_EXT))
    })
}

/// True when a calculation asked for the file ephemeris but the returned
/// flags show another source answered.
fn answered_without_files(requested: i32, returned: i32) -> bool {
    requested & FLG_SWIEPH != 0 && returned & FLG_SWIEPH == 0
}

impl SwissEphemerisAdapter {
    /// Open the ephemeris for an observer.
    ///
    /// Uses `ephemeris_path`, then `SWISS_EPHEMERIS_PATH`, then the system
    /// default. A directory without `.se1` files is not fatal: the adapter
    /// switches to the built-in Moshier ephemeris and records a warning.
    pub fn open(ephemeris_path: Option<PathBuf>, location: GeoLocation) -> Self {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
        });

        let (dataset, fallback_warning) = if has_ephemeris_files(&path) {
            log::info!("Using Swiss Ephemeris files from {}", path.display());
            set_ephe_path(&path.to_string_lossy());
            (EphemerisDataset::SwissFiles { path }, None)
        } else {
            let warning = moshier_warning(&path);
            log::warn!("{warning}");
            (EphemerisDataset::Moshier, Some(warning))
        };

        // Observer position is process-wide state in the C library.
        unsafe {
            libswisseph_sys::swe_set_topo(location.lon, location.lat, 0.0);
        }

        Self {
            dataset,
            location,
            fallback_warning,
            runtime_fallback: OnceLock::new(),
        }
    }

    pub fn dataset(&self) -> &EphemerisDataset {
        &self.dataset
    }

    fn flags(&self) -> i32 {
        let source = match self.dataset {
            EphemerisDataset::SwissFiles { .. } => FLG_SWIEPH,
            EphemerisDataset::Moshier => FLG_MOSEPH,
        };
        source | FLG_SPEED | FLG_TOPOCTR
    }

    /// Record that the file ephemeris was requested but not used.
    fn note_runtime_fallback(&self) {
        if let EphemerisDataset::SwissFiles { path } = &self.dataset {
            if self.runtime_fallback.get().is_none() {
                let warning = moshier_warning(path);
                log::warn!("{warning}");
                let _ = self.runtime_fallback.set(warning);
            }
        }
    }

    fn check_range(&self, at: DateTime<Utc>) -> Result<f64, EphemerisError> {
        let jd = julian_day_utc(at);
        let (min_jd, max_jd) = self.dataset.jd_range();
        if jd < min_jd || jd > max_jd {
            return Err(EphemerisError::OutOfRange {
                dataset: self.dataset.label(),
                datetime: at,
                min_jd,
                max_jd,
            });
        }
        Ok(jd)
    }

    /// Longitude of a Swiss Ephemeris object number.
    fn calc_longitude(
        &self,
        label: &str,
        code: i32,
        at: DateTime<Utc>,
    ) -> Result<f64, EphemerisError> {
        let jd = self.check_range(at)?;
        let flags = self.flags();
        let result = calc_ut(jd, code as u32, flags as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                body: label.to_string(),
                datetime: at,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;
        if answered_without_files(flags, result.code) {
            self.note_runtime_fallback();
        }

        let longitude = result.out[0];
        if !longitude.is_finite() {
            return Err(EphemerisError::CalculationFailed {
                body: label.to_string(),
                datetime: at,
                message: format!("non-finite longitude {longitude}"),
            });
        }
        Ok(normalize_degrees(longitude))
    }
}

impl EphemerisSource for SwissEphemerisAdapter {
    fn tropical_longitude(&self, body: Body, at: DateTime<Utc>) -> Result<f64, EphemerisError> {
        self.calc_longitude(body.name(), body.swe_id(), at)
    }

    fn mean_node_longitude(&self, at: DateTime<Utc>) -> Result<f64, EphemerisError> {
        self.calc_longitude("Mean Node", MEAN_NODE_ID, at)
    }

    fn location(&self) -> GeoLocation {
        self.location
    }

    fn fallback_warning(&self) -> Option<&str> {
        self.fallback_warning
            .as_deref()
            .or_else(|| self.runtime_fallback.get().map(String::as_str))
    }
}

fn moshier_warning(path: &Path) -> String {
    format!(
        "Unable to load Swiss Ephemeris files from {}. Falling back to the built-in Moshier ephemeris.",
        path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir_with_data_file() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sepl_18.se1"), b"").unwrap();
        dir
    }

    #[test]
    fn test_missing_path_falls_back_to_moshier() {
        let adapter = SwissEphemerisAdapter::open(
            Some(PathBuf::from("/definitely/not/a/swisseph/dir")),
            GeoLocation::DELHI,
        );
        assert_eq!(adapter.dataset(), &EphemerisDataset::Moshier);
        assert!(adapter.fallback_warning().is_some());
        assert_eq!(adapter.flags(), FLG_MOSEPH | FLG_SPEED | FLG_TOPOCTR);
    }

    #[test]
    fn test_empty_directory_falls_back_to_moshier() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = SwissEphemerisAdapter::open(Some(dir.path().to_path_buf()), GeoLocation::DELHI);
        assert_eq!(adapter.dataset(), &EphemerisDataset::Moshier);
        let warning = adapter.fallback_warning().unwrap();
        assert!(warning.contains(&dir.path().display().to_string()));
    }

    #[test]
    fn test_directory_with_data_files_uses_files() {
        let dir = dir_with_data_file();
        let adapter = SwissEphemerisAdapter::open(Some(dir.path().to_path_buf()), GeoLocation::DELHI);
        assert!(matches!(adapter.dataset(), EphemerisDataset::SwissFiles { .. }));
        assert!(adapter.fallback_warning().is_none());
        assert_eq!(adapter.flags(), FLG_SWIEPH | FLG_SPEED | FLG_TOPOCTR);
    }

    #[test]
    fn test_positions_are_topocentric() {
        let adapter = SwissEphemerisAdapter::open(None, GeoLocation::DELHI);
        assert_ne!(adapter.flags() & FLG_TOPOCTR, 0);
    }

    #[test]
    fn test_has_ephemeris_files_ignores_other_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("README.txt"), b"").unwrap();
        assert!(!has_ephemeris_files(dir.path()));
        std::fs::write(dir.path().join("SEMO_18.SE1"), b"").unwrap();
        assert!(has_ephemeris_files(dir.path()));
    }

    #[test]
    fn test_answered_without_files() {
        let requested = FLG_SWIEPH | FLG_SPEED | FLG_TOPOCTR;
        assert!(!answered_without_files(requested, requested));
        assert!(answered_without_files(requested, FLG_MOSEPH | FLG_SPEED | FLG_TOPOCTR));
        let moshier = FLG_MOSEPH | FLG_SPEED;
        assert!(!answered_without_files(moshier, moshier));
    }

    #[test]
    fn test_runtime_fallback_surfaces_warning_once() {
        let dir = dir_with_data_file();
        let adapter = SwissEphemerisAdapter::open(Some(dir.path().to_path_buf()), GeoLocation::DELHI);
        assert!(adapter.fallback_warning().is_none());
        adapter.note_runtime_fallback();
        adapter.note_runtime_fallback();
        let warning = adapter.fallback_warning().unwrap();
        assert!(warning.contains("Moshier"));
        assert!(warning.contains(&dir.path().display().to_string()));
    }

    #[test]
    fn test_range_check_rejects_far_future() {
        let dir = dir_with_data_file();
        let adapter = SwissEphemerisAdapter::open(Some(dir.path().to_path_buf()), GeoLocation::DELHI);
        let far = chrono::DateTime::parse_from_rfc3339("2500-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let err = adapter.tropical_longitude(Body::Sun, far).unwrap_err();
        assert!(matches!(err, EphemerisError::OutOfRange { .. }));
    }

    #[test]
    fn test_parse_body_unknown() {
        assert!(matches!(
            parse_body("Vulcan"),
            Err(EphemerisError::UnsupportedBody { .. })
        ));
        assert_eq!(parse_body("mars").unwrap(), Body::Mars);
    }
}
