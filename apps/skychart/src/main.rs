use anyhow::Context;
use chrono::{DateTime, FixedOffset, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use sidereal_chart::ephemeris::{parse_body, EphemerisSource, GeoLocation, SwissEphemerisAdapter};
use sidereal_chart::positions::CoordinateMode;
use sidereal_chart::rendering::{write_svg, ChartSpec, ChartSpecGenerator};
use sidereal_chart::snapshot::{compute_snapshot, ChartRequest, ChartSnapshot};
use sidereal_chart::time::{offset_from_minutes, parse_instant};
use sidereal_chart::vedic::ayanamsa::AyanamsaMethod;
use sidereal_chart::vedic::rashi::degree_to_sign_dms;
use sidereal_chart::vedic::{
    calibrate_ayanamsa, resolve, sign_to_degree, AyanamsaChoice, AyanamsaSelection, Dms,
    PrecessionAyanamsa,
};
use sidereal_config::{load_chart_config, ChartConfig};

const WIDTH_RANGE: (u32, u32) = (600, 1600);
const HEIGHT_RANGE: (u32, u32) = (400, 1200);
const SIZE_STEP: u32 = 100;

#[derive(Parser, Debug)]
#[command(name = "skychart", author, version, about = "Sidereal and tropical position charts")]
struct Cli {
    /// Path to chart.toml (default: configs/chart.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute positions and draw the chart
    Chart(ChartArgs),
    /// Derive an ayanamsa from a known sidereal position
    Calibrate(CalibrateArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Tropical,
    Sidereal,
    Both,
}

impl From<ModeArg> for CoordinateMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Tropical => CoordinateMode::Tropical,
            ModeArg::Sidereal => CoordinateMode::Sidereal,
            ModeArg::Both => CoordinateMode::Both,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum AyanamsaArg {
    /// Fixed 27.85°
    Default,
    /// Krishnamurti Paddhati
    Kp,
    Lahiri,
    /// Use --custom or the configured degrees
    Custom,
}

#[derive(Args, Debug)]
struct ChartArgs {
    #[arg(long, value_enum, default_value_t = ModeArg::Sidereal)]
    mode: ModeArg,

    /// Ayanamsa scheme (default: from config)
    #[arg(long, value_enum)]
    ayanamsa: Option<AyanamsaArg>,

    /// Custom ayanamsa in degrees; implies --ayanamsa custom
    #[arg(long, allow_negative_numbers = true)]
    custom: Option<f64>,

    /// Hide the 12-sign ring
    #[arg(long)]
    no_rashi_circle: bool,

    /// Chart width in pixels (600-1600, step 100)
    #[arg(long)]
    width: Option<u32>,

    /// Chart height in pixels (400-1200, step 100)
    #[arg(long)]
    height: Option<u32>,

    /// Instant to chart; RFC 3339, or local "YYYY-MM-DD HH:MM[:SS]" in the observer timezone
    #[arg(long)]
    at: Option<String>,

    /// Write the chart as SVG
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Write positions and scene as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CalibrateArgs {
    /// Body whose reference position is known
    #[arg(long, default_value = "moon")]
    body: String,

    /// Sidereal sign of the reference position
    #[arg(long, requires = "dms", conflicts_with = "degree")]
    sign: Option<String>,

    /// Offset within the sign as D:M:S
    #[arg(long, requires = "sign")]
    dms: Option<String>,

    /// Absolute sidereal longitude in degrees
    #[arg(long)]
    degree: Option<f64>,

    /// Instant of the reference position (default: now)
    #[arg(long)]
    at: Option<String>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    snapshot: &'a ChartSnapshot,
    scene: &'a ChartSpec,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = load_chart_config(cli.config.as_deref())?;
    log::debug!("config: {config:?}");

    match cli.command {
        Command::Chart(args) => run_chart(&config, args),
        Command::Calibrate(args) => run_calibrate(&config, args),
    }
}

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .try_init();
}

fn observer_offset(config: &ChartConfig) -> anyhow::Result<FixedOffset> {
    let minutes = config.observer.utc_offset_minutes;
    offset_from_minutes(minutes)
        .with_context(|| format!("invalid observer.utc_offset_minutes {minutes}"))
}

fn open_ephemeris(config: &ChartConfig) -> SwissEphemerisAdapter {
    let location = GeoLocation {
        lat: config.observer.latitude,
        lon: config.observer.longitude,
    };
    SwissEphemerisAdapter::open(config.ephemeris_path(), location)
}

fn instant_arg(at: Option<&str>, offset: FixedOffset) -> anyhow::Result<DateTime<Utc>> {
    match at {
        Some(text) => parse_instant(text, offset).with_context(|| format!("malformed instant {text:?}")),
        None => Ok(Utc::now()),
    }
}

fn check_dimension(name: &str, value: u32, (min, max): (u32, u32)) -> anyhow::Result<u32> {
    if value < min || value > max || value % SIZE_STEP != 0 {
        anyhow::bail!("{name} must be between {min} and {max} in steps of {SIZE_STEP}, got {value}");
    }
    Ok(value)
}

fn ayanamsa_choice(
    arg: Option<AyanamsaArg>,
    custom: Option<f64>,
    config: &ChartConfig,
) -> anyhow::Result<AyanamsaChoice> {
    let scheme = match (arg, custom) {
        (Some(arg), _) => arg,
        (None, Some(_)) => AyanamsaArg::Custom,
        (None, None) => AyanamsaArg::from_str(&config.chart.ayanamsa, true)
            .map_err(|e| anyhow::anyhow!("chart.ayanamsa: {e}"))?,
    };
    if custom.is_some() && scheme != AyanamsaArg::Custom {
        anyhow::bail!("--custom only applies to --ayanamsa custom");
    }
    Ok(match scheme {
        AyanamsaArg::Default => AyanamsaChoice::Default,
        AyanamsaArg::Kp => AyanamsaChoice::Kp,
        AyanamsaArg::Lahiri => AyanamsaChoice::Lahiri,
        AyanamsaArg::Custom => {
            let degrees = custom.unwrap_or(config.chart.default_ayanamsa_degrees);
            if !degrees.is_finite() {
                anyhow::bail!("custom ayanamsa must be a finite number");
            }
            AyanamsaChoice::Custom(degrees)
        }
    })
}

fn run_chart(config: &ChartConfig, args: ChartArgs) -> anyhow::Result<()> {
    let offset = observer_offset(config)?;
    let instant = instant_arg(args.at.as_deref(), offset)?;
    let request = ChartRequest {
        mode: args.mode.into(),
        ayanamsa: ayanamsa_choice(args.ayanamsa, args.custom, config)?,
        show_rashi_circle: config.chart.show_rashi_circle && !args.no_rashi_circle,
        width: check_dimension("width", args.width.unwrap_or(config.chart.width), WIDTH_RANGE)?,
        height: check_dimension("height", args.height.unwrap_or(config.chart.height), HEIGHT_RANGE)?,
    };

    let ephemeris = open_ephemeris(config);
    let snapshot = compute_snapshot(&ephemeris, &PrecessionAyanamsa::default(), &request, instant)
        .context("chart computation failed")?;

    for warning in &snapshot.warnings {
        eprintln!("warning: {warning}");
    }
    println!(
        "{} chart for {} ({:.4}°N, {:.4}°E)",
        request.mode,
        instant.with_timezone(&offset).format("%Y-%m-%d %H:%M:%S %:z"),
        ephemeris.location().lat,
        ephemeris.location().lon,
    );
    if request.mode.uses_ayanamsa() {
        println!(
            "Ayanamsa: {:.6}° [{}]",
            snapshot.ayanamsa_deg,
            request.ayanamsa.label()
        );
    }
    for line in snapshot.report_lines() {
        println!("{line}");
    }

    if args.svg.is_none() && args.json.is_none() {
        return Ok(());
    }
    let scene = snapshot.scene(&ChartSpecGenerator::new());
    if let Some(path) = &args.svg {
        write_svg(&scene, path)?;
    }
    if let Some(path) = &args.json {
        write_json(path, &snapshot, &scene)?;
    }
    Ok(())
}

fn write_json(path: &Path, snapshot: &ChartSnapshot, scene: &ChartSpec) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(&JsonOutput { snapshot, scene })?;
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("wrote JSON to {}", path.display());
    Ok(())
}

/// Parse "D:M:S" (seconds may be fractional).
fn parse_dms(text: &str) -> anyhow::Result<Dms> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    let [d, m, s] = parts.as_slice() else {
        anyhow::bail!("expected D:M:S, got {text:?}");
    };
    Ok(Dms::new(
        d.trim().parse().with_context(|| format!("bad degrees in {text:?}"))?,
        m.trim().parse().with_context(|| format!("bad minutes in {text:?}"))?,
        s.trim().parse().with_context(|| format!("bad seconds in {text:?}"))?,
    ))
}

fn run_calibrate(config: &ChartConfig, args: CalibrateArgs) -> anyhow::Result<()> {
    let sidereal = match (&args.sign, &args.dms, args.degree) {
        (Some(sign), Some(dms), None) => sign_to_degree(sign, parse_dms(dms)?)?,
        (None, None, Some(degree)) => degree,
        _ => anyhow::bail!("give either --sign with --dms, or --degree"),
    };
    let body = parse_body(&args.body)?;

    let offset = observer_offset(config)?;
    let instant = instant_arg(args.at.as_deref(), offset)?;
    let ephemeris = open_ephemeris(config);
    if let Some(warning) = ephemeris.fallback_warning() {
        eprintln!("warning: {warning}");
    }
    let tropical = ephemeris.tropical_longitude(body, instant)?;
    let ayanamsa = calibrate_ayanamsa(tropical, sidereal);
    let reference = degree_to_sign_dms(sidereal);

    println!(
        "Instant: {}",
        instant.with_timezone(&offset).format("%Y-%m-%d %H:%M:%S %:z")
    );
    println!("Tropical {}: {tropical:.6}°", body.name());
    println!(
        "Reference sidereal {}: {sidereal:.6}° ({} {})",
        body.name(),
        reference.sign,
        reference.dms
    );
    println!("Empirical ayanamsa: {ayanamsa:.6}°");

    let provider = PrecessionAyanamsa::default();
    for method in [AyanamsaMethod::Lahiri, AyanamsaMethod::Krishnamurti] {
        match resolve(AyanamsaSelection::ComputedAtEpoch(method, instant), &provider) {
            Ok(value) => println!(
                "  {method}: {value:.6}° (difference {:+.2}')",
                (ayanamsa - value) * 60.0
            ),
            Err(e) => log::warn!("{e}"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dms() {
        let dms = parse_dms("13:49:17").unwrap();
        assert_eq!((dms.degrees, dms.minutes, dms.seconds), (13, 49, 17.0));
        assert!(parse_dms("13:49").is_err());
        assert!(parse_dms("a:b:c").is_err());
    }

    #[test]
    fn test_dimensions_follow_slider_steps() {
        assert_eq!(check_dimension("width", 1200, WIDTH_RANGE).unwrap(), 1200);
        assert!(check_dimension("width", 1250, WIDTH_RANGE).is_err());
        assert!(check_dimension("width", 500, WIDTH_RANGE).is_err());
        assert!(check_dimension("height", 1300, HEIGHT_RANGE).is_err());
    }

    #[test]
    fn test_ayanamsa_choice() {
        let config = ChartConfig::default();
        assert_eq!(ayanamsa_choice(None, None, &config).unwrap(), AyanamsaChoice::Default);
        assert_eq!(
            ayanamsa_choice(None, Some(23.5), &config).unwrap(),
            AyanamsaChoice::Custom(23.5)
        );
        assert_eq!(
            ayanamsa_choice(Some(AyanamsaArg::Custom), None, &config).unwrap(),
            AyanamsaChoice::Custom(27.85)
        );
        assert!(ayanamsa_choice(Some(AyanamsaArg::Kp), Some(23.5), &config).is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "skychart", "chart", "--mode", "both", "--ayanamsa", "lahiri", "--width", "800",
        ])
        .unwrap();
        match cli.command {
            Command::Chart(args) => {
                assert!(matches!(args.mode, ModeArg::Both));
                assert_eq!(args.ayanamsa, Some(AyanamsaArg::Lahiri));
                assert_eq!(args.width, Some(800));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
