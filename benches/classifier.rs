use criterion::{black_box, criterion_group, criterion_main, Criterion};

use color_lens::color::RgbColor;
use color_lens::palette;

pub fn bench_classifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("Color Classification");

    group.bench_function("exact web-color hit", |bencher| {
        bencher.iter(|| palette::classify(black_box(RgbColor::new(255, 215, 0))))
    });

    group.bench_function("nearest palette fallback", |bencher| {
        bencher.iter(|| palette::classify(black_box(RgbColor::new(250, 5, 5))))
    });

    group.finish();
}

criterion_group!(benches, bench_classifier);
criterion_main!(benches);
