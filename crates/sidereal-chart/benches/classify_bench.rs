use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sidereal_chart::positions::{adapt, CoordinateMode};
use sidereal_chart::vedic::{classify, nakshatra_at, nakshatra_bins, rashi_bins};
use sidereal_chart::Body;

fn bench_classify(c: &mut Criterion) {
    let rashis = rashi_bins();
    let nakshatras = nakshatra_bins();

    c.bench_function("classify_rashi", |b| {
        b.iter(|| classify(black_box(343.82), black_box(rashis)))
    });

    c.bench_function("classify_nakshatra", |b| {
        b.iter(|| classify(black_box(-12.5), black_box(nakshatras)))
    });

    c.bench_function("nakshatra_placement", |b| {
        b.iter(|| nakshatra_at(black_box(72.15)))
    });
}

fn bench_adapt(c: &mut Criterion) {
    c.bench_function("adapt_both", |b| {
        b.iter(|| {
            adapt(
                black_box(Body::Mars),
                black_box(100.0),
                CoordinateMode::Both,
                black_box(27.85),
            )
        })
    });
}

criterion_group!(benches, bench_classify, bench_adapt);
criterion_main!(benches);
