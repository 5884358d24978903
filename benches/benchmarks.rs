use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use line_rfi::{algos, math, params::FlagParams};
use ndarray::{Array2, Array4};
use num_complex::Complex64;
use rand::prelude::*;

const BENCH_BLOCK_TIMES: usize = 2048;
const BENCH_BLOCK_CHANNELS: usize = 512;

fn random_block(nt: usize, nfreq: usize) -> Array2<Complex64> {
    let mut rng = rand::thread_rng();
    Array2::from_shape_fn((nt, nfreq), |_| Complex64::new(rng.gen(), rng.gen()))
}

pub fn edge_time_mean(c: &mut Criterion) {
    let block = random_block(BENCH_BLOCK_TIMES, BENCH_BLOCK_CHANNELS);
    c.bench_function("edge_time_mean", |b| {
        b.iter(|| math::mean::edge_time_mean(black_box(block.view()), 10, false))
    });
}

pub fn upper_quantile(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let xs: Vec<f64> = (0..BENCH_BLOCK_CHANNELS).map(|_| rng.gen()).collect();
    c.bench_function("upper_quantile", |b| {
        b.iter(|| math::quantile::upper_quantile(black_box(&xs), 0.1))
    });
}

pub fn flag_block(c: &mut Criterion) {
    let params = FlagParams::default();
    let block = random_block(BENCH_BLOCK_TIMES, BENCH_BLOCK_CHANNELS);
    c.bench_function("flag_block", |b| {
        b.iter_batched(
            || block.clone(),
            |mut block| algos::flag_block(black_box(block.view_mut()), &params),
            BatchSize::LargeInput,
        )
    });
}

pub fn flag_timestream(c: &mut Criterion) {
    let params = FlagParams::default();
    let mut rng = rand::thread_rng();
    // 8 antennas -> 36 baselines, 4 pols
    let data = Array4::from_shape_fn((128, 36, 4, BENCH_BLOCK_CHANNELS), |_| {
        Complex64::new(rng.gen(), rng.gen())
    });
    c.bench_function("flag_timestream", |b| {
        b.iter_batched(
            || data.clone(),
            |mut data| algos::flag_timestream(black_box(data.view_mut()), &params),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    benches,
    edge_time_mean,
    upper_quantile,
    flag_block,
    flag_timestream,
);
criterion_main!(benches);
