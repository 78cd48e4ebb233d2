use criterion::{black_box, Criterion};
use emgrad_tensor::Tensor;

// forward + backward through a small expression graph, rebuilt per iteration
pub fn basic(c: &mut Criterion) {
    let mut group = c.benchmark_group("autograd");

    for size in [100usize, 10_000] {
        let data: Vec<f32> = (0..size).map(|i| (i as f32) * 0.001 + 0.1).collect();

        group.bench_function(format!("mul_chain_backward_{}", size), |b| {
            b.iter(|| {
                let mut x = Tensor::new(data.clone()).unwrap();
                x.with_grad().unwrap();
                let y = x.mul(&x).unwrap().add(&x).unwrap().sum_all().unwrap();
                y.backward().unwrap();
                black_box(x.grad().unwrap())
            })
        });
    }

    group.bench_function("deep_chain_backward_1000", |b| {
        b.iter(|| {
            let mut x = Tensor::new(vec![1.0f32]).unwrap();
            x.with_grad().unwrap();
            let mut y = x.clone();
            for _ in 0..1000 {
                y = y.add_scalar(1.0).unwrap();
            }
            y.backward().unwrap();
            black_box(x.grad().unwrap())
        })
    });

    group.finish();
}
