mod common;

use common::{instant, FixedSky};
use sidereal_chart::positions::CoordinateMode;
use sidereal_chart::rendering::primitives::{Color, LineStyle, Ring, Shape};
use sidereal_chart::rendering::{render_svg, write_svg, ChartSpec, ChartSpecGenerator};
use sidereal_chart::snapshot::{compute_snapshot, ChartRequest, ChartSnapshot};
use sidereal_chart::vedic::PrecessionAyanamsa;

fn snapshot(request: ChartRequest) -> ChartSnapshot {
    compute_snapshot(&FixedSky::new(), &PrecessionAyanamsa::default(), &request, instant()).unwrap()
}

fn sectors(spec: &ChartSpec, ring: Ring) -> Vec<&Shape> {
    spec.shapes
        .iter()
        .filter(|s| matches!(s, Shape::Sector { ring: r, .. } if *r == ring))
        .collect()
}

#[test]
fn test_sidereal_scene_has_both_rings() {
    let spec = snapshot(ChartRequest::default()).scene(&ChartSpecGenerator::new());

    assert_eq!(sectors(&spec, Ring::Rashi).len(), 12);
    assert_eq!(sectors(&spec, Ring::Nakshatra).len(), 27);
    assert_eq!(spec.markers().count(), 9);
    assert_eq!(spec.metadata.legend.len(), 9);
    assert_eq!(spec.metadata.mode.as_deref(), Some("Sidereal"));
    assert_eq!(spec.metadata.ayanamsa, Some(27.85));

    let rashi_lines = spec
        .shapes
        .iter()
        .filter(|s| matches!(s, Shape::Line { stroke, .. } if stroke.style == LineStyle::Dashed))
        .count();
    let nakshatra_lines = spec
        .shapes
        .iter()
        .filter(|s| matches!(s, Shape::Line { stroke, .. } if stroke.style == LineStyle::Dotted))
        .count();
    assert_eq!(rashi_lines, 12);
    assert_eq!(nakshatra_lines, 27);
}

#[test]
fn test_tropical_scene_hides_nakshatras() {
    let request = ChartRequest {
        mode: CoordinateMode::Tropical,
        ..ChartRequest::default()
    };
    let spec = snapshot(request).scene(&ChartSpecGenerator::new());
    assert_eq!(sectors(&spec, Ring::Rashi).len(), 12);
    assert!(sectors(&spec, Ring::Nakshatra).is_empty());
    assert_eq!(spec.metadata.ayanamsa, None);
}

#[test]
fn test_rashi_circle_toggle() {
    let request = ChartRequest {
        show_rashi_circle: false,
        ..ChartRequest::default()
    };
    let spec = snapshot(request).scene(&ChartSpecGenerator::new());
    assert!(sectors(&spec, Ring::Rashi).is_empty());
    assert_eq!(sectors(&spec, Ring::Nakshatra).len(), 27);
}

#[test]
fn test_radial_axis_fits_canvas() {
    let spec = snapshot(ChartRequest::default()).scene(&ChartSpecGenerator::new());
    assert_eq!(spec.width, 1200.0);
    assert_eq!(spec.height, 1000.0);
    assert_eq!(spec.radial_max, 2.5);
    // (1000 / 2 - 40) / 2.5
    assert!((spec.radial_scale - 184.0).abs() < 1e-4);
}

#[test]
fn test_zero_at_top_counterclockwise() {
    let spec = snapshot(ChartRequest::default()).scene(&ChartSpecGenerator::new());
    let c = spec.center;

    let top = spec.project(0.0, 1.0);
    assert!((top.x - c.x).abs() < 1e-3);
    assert!(top.y < c.y);

    let left = spec.project(90.0, 1.0);
    assert!(left.x < c.x);
    assert!((left.y - c.y).abs() < 1e-3);

    let bottom = spec.project(180.0, 1.0);
    assert!(bottom.y > c.y);
}

#[test]
fn test_marker_label_and_color() {
    let spec = snapshot(ChartRequest::default()).scene(&ChartSpecGenerator::new());
    let label = spec.shapes.iter().find_map(|s| match s {
        Shape::Text { content, color, .. } if content.starts_with("Mars\n") => {
            Some((content.clone(), *color))
        }
        _ => None,
    });
    let (content, color) = label.unwrap();
    assert_eq!(content, "Mars\n72.15°\nArdra");
    assert_eq!(color, Color::rgb(255, 0, 0));

    let mars_marker = spec
        .markers()
        .find(|s| matches!(s, Shape::Marker { label, .. } if label == "Mars"))
        .unwrap();
    if let Shape::Marker { center, size, lon, .. } = mars_marker {
        assert_eq!(*size, 12.0);
        assert!((lon - 72.15).abs() < 1e-9);
        let expected = spec.project(72.15, 1.7);
        assert!((center.x - expected.x).abs() < 0.5);
        assert!((center.y - expected.y).abs() < 0.5);
    }
}

#[test]
fn test_sector_outlines_are_closed_wedges() {
    let spec = snapshot(ChartRequest::default()).scene(&ChartSpecGenerator::new());
    for shape in sectors(&spec, Ring::Nakshatra) {
        if let Shape::Sector { outline, .. } = shape {
            assert!(outline.len() >= 3);
            assert_eq!(outline.last().copied(), Some(spec.center));
        }
    }
    for shape in sectors(&spec, Ring::Rashi) {
        if let Shape::Sector { outline, .. } = shape {
            assert!(outline.len() >= 4);
        }
    }
}

#[test]
fn test_scene_json_round_trip() {
    let spec = snapshot(ChartRequest::default()).scene(&ChartSpecGenerator::new());
    let json = serde_json::to_string(&spec).unwrap();
    assert!(json.contains("\"type\":\"Sector\""));
    // Every label is centred and longitude always runs counterclockwise
    assert!(!json.contains("\"anchor\""));
    assert!(!json.contains("\"direction\""));
    let back: ChartSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(back.shapes.len(), spec.shapes.len());
    assert_eq!(back.metadata.title, spec.metadata.title);
}

#[test]
fn test_svg_output() {
    let spec = snapshot(ChartRequest::default()).scene(&ChartSpecGenerator::new());
    let svg = render_svg(&spec).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Ardra"));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.svg");
    write_svg(&spec, &path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, svg);
}
