//! Instants, Julian days and the UTC → Terrestrial Time step.

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone, Utc};

pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
pub const J2000_JD: f64 = 2_451_545.0;
pub const DAYS_PER_CENTURY: f64 = 36_525.0;
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// TT − TAI in seconds.
const TT_MINUS_TAI: f64 = 32.184;

// (year, month) from which TAI − UTC took the given value
const LEAP_SECONDS: &[(i32, u32, f64)] = &[
    (1972, 1, 10.0),
    (1972, 7, 11.0),
    (1973, 1, 12.0),
    (1974, 1, 13.0),
    (1975, 1, 14.0),
    (1976, 1, 15.0),
    (1977, 1, 16.0),
    (1978, 1, 17.0),
    (1979, 1, 18.0),
    (1980, 1, 19.0),
    (1981, 7, 20.0),
    (1982, 7, 21.0),
    (1983, 7, 22.0),
    (1985, 7, 23.0),
    (1988, 1, 24.0),
    (1990, 1, 25.0),
    (1991, 1, 26.0),
    (1992, 7, 27.0),
    (1993, 7, 28.0),
    (1994, 7, 29.0),
    (1996, 1, 30.0),
    (1997, 7, 31.0),
    (1999, 1, 32.0),
    (2006, 1, 33.0),
    (2009, 1, 34.0),
    (2012, 7, 35.0),
    (2015, 7, 36.0),
    (2017, 1, 37.0),
];

/// Julian day (UT) for a UTC instant.
pub fn julian_day_utc(dt: DateTime<Utc>) -> f64 {
    let seconds = dt.timestamp() as f64 + dt.timestamp_subsec_nanos() as f64 * 1e-9;
    UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY
}

/// TAI − UTC in seconds at `dt`. Instants before 1972 use the 1972 value.
pub fn tai_minus_utc(dt: DateTime<Utc>) -> f64 {
    use chrono::Datelike;
    let key = (dt.year(), dt.month());
    LEAP_SECONDS
        .iter()
        .rev()
        .find(|(year, month, _)| (*year, *month) <= key)
        .map(|(_, _, seconds)| *seconds)
        .unwrap_or(LEAP_SECONDS[0].2)
}

/// Julian day in Terrestrial Time for a UTC instant.
pub fn julian_day_tt(dt: DateTime<Utc>) -> f64 {
    julian_day_utc(dt) + (tai_minus_utc(dt) + TT_MINUS_TAI) / SECONDS_PER_DAY
}

/// Julian centuries since J2000.0 for a Julian day.
pub fn centuries_since_j2000(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Parse a user-supplied instant.
///
/// Accepts RFC 3339 (`2024-03-20T12:00:00+05:30`) or a naive
/// `YYYY-MM-DD HH:MM[:SS]` / `YYYY-MM-DDTHH:MM[:SS]` read in `local_offset`.
pub fn parse_instant(
    text: &str,
    local_offset: FixedOffset,
) -> Result<DateTime<Utc>, chrono::ParseError> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    let mut parsed = NaiveDateTime::parse_from_str(text, NAIVE_FORMATS[0]);
    for fmt in &NAIVE_FORMATS[1..] {
        if parsed.is_ok() {
            break;
        }
        parsed = NaiveDateTime::parse_from_str(text, fmt);
    }
    let naive = parsed?;
    let shift = Duration::seconds(local_offset.local_minus_utc() as i64);
    Ok(Utc.from_utc_datetime(&(naive - shift)))
}

/// Offset for `minutes` east of UTC; `None` outside ±24h.
pub fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(minutes.checked_mul(60)?)
}
