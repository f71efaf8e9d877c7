use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use mrtk_tensor::{Range, Tensor};

fn sample_tensor() -> Tensor<f32> {
    Tensor::from_shape_val(&[256, 256, 8], 0.0_f32).unwrap()
}

fn bench_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("View");
    let tensor = sample_tensor();

    group.bench_function("resolve_channel", |b| {
        let ranges = [Range::all(), Range::all(), Range::single(3).unwrap()];
        b.iter(|| black_box(&tensor).view(black_box(&ranges)).unwrap())
    });

    group.bench_function("resolve_strided", |b| {
        let ranges = [
            Range::strided(0, 2, 255).unwrap(),
            Range::strided(255, -4, 0).unwrap(),
            Range::all(),
        ];
        b.iter(|| black_box(&tensor).view(black_box(&ranges)).unwrap())
    });

    group.bench_function("parse_and_resolve", |b| {
        b.iter(|| black_box(&tensor).view_str(black_box("0:127, 128:255, 0:2:7")).unwrap())
    });

    group.bench_function("to_tensor", |b| {
        let view = tensor
            .view(&[Range::all(), Range::single(17).unwrap(), Range::all()])
            .unwrap();
        b.iter(|| black_box(&view).to_tensor().unwrap())
    });

    group.bench_function("fill", |b| {
        b.iter_batched(
            sample_tensor,
            |mut t| {
                t.view_mut(&[Range::span(64, 191).unwrap(), Range::all()])
                    .unwrap()
                    .fill(1.0);
                t
            },
            criterion::BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_view);
criterion_main!(benches);
