use criterion::{black_box, Criterion};
use emgrad_core::error::Result;
use emgrad_tensor::Tensor;

const SIZES: [(usize, &str); 3] = [(100, "small"), (5000, "medium"), (100_000, "large")];

fn bench_unary_op<F>(b: &mut criterion::Bencher, size: usize, op_fn: F)
where
    F: Fn(&Tensor) -> Result<Tensor>,
{
    let data: Vec<f32> = (0..size).map(|i| (i as f32) * 0.01 + 0.5).collect();
    let x = Tensor::new(data).unwrap();

    b.iter(|| black_box(op_fn(&x)).unwrap())
}

pub fn basic(c: &mut Criterion) {
    let mut group = c.benchmark_group("unary");

    for (size, label) in SIZES {
        group.bench_function(format!("neg_{}", label), |b| {
            bench_unary_op(b, size, |x| x.neg())
        });
        group.bench_function(format!("exp_{}", label), |b| {
            bench_unary_op(b, size, |x| x.exp())
        });
        group.bench_function(format!("tanh_{}", label), |b| {
            bench_unary_op(b, size, |x| x.tanh())
        });
    }

    group.finish();
}
