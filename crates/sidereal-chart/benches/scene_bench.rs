use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sidereal_chart::ephemeris::ALL_BODIES;
use sidereal_chart::positions::{adapt, lunar_nodes, CelestialLongitude, CoordinateMode};
use sidereal_chart::rendering::{render_svg, ChartSpecGenerator, RenderOptions};

fn positions(mode: CoordinateMode) -> Vec<CelestialLongitude> {
    let mut out: Vec<CelestialLongitude> = ALL_BODIES
        .iter()
        .enumerate()
        .flat_map(|(i, body)| adapt(*body, i as f64 * 47.0 + 3.5, mode, 24.1))
        .collect();
    out.extend(lunar_nodes(15.0, mode, 24.1));
    out
}

fn bench_generate(c: &mut Criterion) {
    let generator = ChartSpecGenerator::new();
    let both = positions(CoordinateMode::Both);
    let options = RenderOptions {
        mode: Some(CoordinateMode::Both),
        ..RenderOptions::default()
    };

    c.bench_function("generate_scene_both", |b| {
        b.iter(|| generator.generate(black_box(&both), black_box(&options)))
    });

    let spec = generator.generate(&both, &options);
    c.bench_function("render_svg", |b| b.iter(|| render_svg(black_box(&spec))));
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
