use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mrtk_tensor::Tensor;
use mrtk_tensor_ops::{ops, Transpose};
use num_complex::Complex;

fn bench_dot(c: &mut Criterion) {
    let mut group = c.benchmark_group("dot");

    for size in [8, 128, 1024, 16384] {
        let a = Tensor::<f32>::from_shape_fn(&[size], |idx| (idx[0] % 7) as f32).unwrap();
        let b = Tensor::<f32>::from_shape_fn(&[size], |idx| (idx[0] % 5) as f32).unwrap();

        group.bench_function(format!("f32_size_{}", size), |bencher| {
            bencher.iter(|| black_box(ops::dot(&a, &b).unwrap()))
        });

        let ac = a.map(|&v| Complex::new(v, -v));
        let bc = b.map(|&v| Complex::new(v, v));
        group.bench_function(format!("c32_dotc_size_{}", size), |bencher| {
            bencher.iter(|| black_box(ops::dotc(&ac, &bc).unwrap()))
        });
    }

    group.finish();
}

fn bench_matmul(c: &mut Criterion) {
    let mut group = c.benchmark_group("matmul");

    for size in [16, 64, 128] {
        let a = Tensor::<Complex<f32>>::from_shape_fn(&[size, size], |idx| {
            Complex::new(idx[0] as f32, idx[1] as f32)
        })
        .unwrap();

        group.bench_function(format!("c32_adjoint_size_{}", size), |bencher| {
            bencher.iter(|| {
                black_box(ops::matmul(&a, Transpose::Adjoint, &a, Transpose::None).unwrap())
            })
        });
    }

    group.finish();
}

fn bench_sum_elements(c: &mut Criterion) {
    let t = Tensor::<f32>::from_shape_val(&[256, 256, 8], 1.0).unwrap();

    c.bench_function("sum_elements_channels", |b| {
        b.iter(|| black_box(ops::sum_elements(black_box(&t), 2).unwrap()))
    });
}

criterion_group!(benches, bench_dot, bench_matmul, bench_sum_elements);
criterion_main!(benches);
