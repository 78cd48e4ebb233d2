use criterion::{black_box, Criterion};
use emgrad_tensor::Tensor;

pub fn basic(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduction");

    for (rows, cols) in [(64, 64), (512, 512)] {
        let data: Vec<f32> = (0..rows * cols).map(|i| i as f32).collect();
        let x = Tensor::from_flat_vec(data, &[rows, cols]).unwrap();

        group.bench_function(format!("sum_dim0_{}x{}", rows, cols), |b| {
            b.iter(|| black_box(x.sum(0, false)).unwrap())
        });
        group.bench_function(format!("sum_all_{}x{}", rows, cols), |b| {
            b.iter(|| black_box(x.sum_all()).unwrap())
        });
    }

    group.finish();
}
