#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};
use seamcarve::energy::calculate_energy;
use seamcarve::grayscale::{pack_rgb, to_grayscale};
use seamcarve::{SeamCarver, TwoDimensionalMap};

fn sample(width: u32, height: u32) -> TwoDimensionalMap<u32> {
    TwoDimensionalMap::from_fn(width, height, |x, y| {
        let l = ((x * 37 + y * 91 + x * y * 13) % 256) as u8;
        pack_rgb(l, l / 2, 255 - l)
    })
}

fn energy_benchmark(c: &mut Criterion) {
    let gray = to_grayscale(&sample(320, 240));
    c.bench_function("energy 320x240", move |b| b.iter(|| calculate_energy(black_box(&gray))));
}

fn carve_benchmark(c: &mut Criterion) {
    let pixels = sample(320, 240);
    c.bench_function("carve 32 seams from 320x240", move |b| {
        b.iter(|| {
            let mut carver = SeamCarver::new(pixels.clone()).unwrap();
            carver.carve_columns(black_box(32)).unwrap();
            carver
        })
    });
}

criterion_group!(benches, energy_benchmark, carve_benchmark);
criterion_main!(benches);
