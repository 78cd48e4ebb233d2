use criterion::{black_box, Criterion};
use emgrad_core::error::Result;
use emgrad_tensor::Tensor;

const SIZES: [(usize, &str); 3] = [(100, "small"), (5000, "medium"), (100_000, "large")];

fn bench_binary_op<F>(b: &mut criterion::Bencher, size: usize, op_fn: F)
where
    F: Fn(&Tensor, &Tensor) -> Result<Tensor>,
{
    let x_data: Vec<f32> = (0..size).map(|i| i as f32).collect();
    let y_data: Vec<f32> = (0..size).map(|i| (i + 1) as f32).collect();
    let x = Tensor::new(x_data).unwrap();
    let y = Tensor::new(y_data).unwrap();

    b.iter(|| black_box(op_fn(&x, &y)).unwrap())
}

pub fn basic(c: &mut Criterion) {
    let mut group = c.benchmark_group("binary");

    for (size, label) in SIZES {
        group.bench_function(format!("add_{}", label), |b| {
            bench_binary_op(b, size, |x, y| x.add(y))
        });
        group.bench_function(format!("mul_{}", label), |b| {
            bench_binary_op(b, size, |x, y| x.mul(y))
        });
        group.bench_function(format!("div_{}", label), |b| {
            bench_binary_op(b, size, |x, y| x.div(y))
        });
    }

    group.bench_function("mul_broadcast_256x256", |b| {
        let col = Tensor::from_flat_vec((0..256).map(|i| i as f32).collect(), &[256, 1]).unwrap();
        let row = Tensor::from_flat_vec((0..256).map(|i| (i + 1) as f32).collect(), &[1, 256]).unwrap();
        b.iter(|| black_box(col.mul(&row)).unwrap())
    });

    group.finish();
}
