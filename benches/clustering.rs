use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array2;
use rand::prelude::*;
use rock::cluster::Rock;
use rock::{similarity_matrix, Metric};

fn bench_rock(c: &mut Criterion) {
    let mut group = c.benchmark_group("rock");

    // Synthetic sparse binary profile
    let mut rng = StdRng::seed_from_u64(42);
    let n = 200;
    let d = 32;
    let data = Array2::from_shape_fn((n, d), |_| u8::from(rng.random_bool(0.2)));

    group.bench_function("similarity_n200_d32", |b| {
        b.iter(|| similarity_matrix(black_box(data.view()), Metric::Jaccard).unwrap())
    });

    group.bench_function("fit_n200_d32_k8", |b| {
        b.iter(|| {
            let model = Rock::new(8).with_threshold(0.3);
            model.fit(black_box(data.view())).unwrap();
        })
    });

    group.finish();
}

criterion_group!(benches, bench_rock);
criterion_main!(benches);
