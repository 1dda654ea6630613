use coinscan::tools::synthetic_coin_image;
use coinscan::{Detector, DetectorConfig};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

const COINS: &[(usize, usize, usize)] = &[(90, 80, 30), (220, 100, 24), (160, 180, 36)];

fn bench_detect_small(c: &mut Criterion) {
    let rgb = synthetic_coin_image(320, 240, COINS);
    let detector = Detector::new();
    c.bench_function("detect_320x240", |bench| {
        bench.iter(|| detector.detect(black_box(&rgb), black_box(320), black_box(240)))
    });
}

fn bench_detect_medium(c: &mut Criterion) {
    let rgb = synthetic_coin_image(640, 480, COINS);
    let detector = Detector::new();
    c.bench_function("detect_640x480", |bench| {
        bench.iter(|| detector.detect(black_box(&rgb), black_box(640), black_box(480)))
    });
}

fn bench_detect_medium_parallel(c: &mut Criterion) {
    let rgb = synthetic_coin_image(640, 480, COINS);
    let detector = Detector::with_config(DetectorConfig::parallel());
    c.bench_function("detect_parallel_640x480", |bench| {
        bench.iter(|| detector.detect(black_box(&rgb), black_box(640), black_box(480)))
    });
}

criterion_group!(
    benches,
    bench_detect_small,
    bench_detect_medium,
    bench_detect_medium_parallel
);
criterion_main!(benches);
