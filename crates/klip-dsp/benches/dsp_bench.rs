//! Criterion benchmarks for the klip engine
//!
//! Run with: cargo bench -p klip-dsp
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use klip_dsp::{
    ClipCurve, ControlValues, EngineSettings, KlipProcessor, MidSideMode, Recombination,
};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 256, 1024];

fn generate_test_signal(size: usize, freq: f32) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * freq * t).sin() * 1.2
        })
        .collect()
}

fn bench_curves(c: &mut Criterion) {
    let mut group = c.benchmark_group("ClipCurve");
    let input = generate_test_signal(1024, 440.0);

    for curve in ClipCurve::ALL {
        group.bench_function(curve.name(), |b| {
            b.iter(|| {
                for &sample in &input {
                    black_box(curve.apply(black_box(sample), 0.5));
                }
            })
        });
    }

    group.finish();
}

fn bench_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("KlipProcessor");

    for mode in MidSideMode::ALL {
        let controls = ControlValues {
            threshold: 0.75,
            curve: ClipCurve::SoftClip,
            mode: Some(mode),
        };

        for &block_size in BLOCK_SIZES {
            let left = generate_test_signal(block_size, 440.0);
            let right = generate_test_signal(block_size, 660.0);

            group.bench_with_input(
                BenchmarkId::new(mode.name(), block_size),
                &block_size,
                |b, _| {
                    let mut klip = KlipProcessor::new(SAMPLE_RATE);
                    let mut l = left.clone();
                    let mut r = right.clone();
                    b.iter(|| {
                        l.copy_from_slice(&left);
                        r.copy_from_slice(&right);
                        klip.process_block_with(&mut l, &mut r, controls);
                        black_box((&l, &r));
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_variants(c: &mut Criterion) {
    let mut group = c.benchmark_group("KlipProcessor variants");
    let block_size = 256;
    let left = generate_test_signal(block_size, 55.0);
    let right = generate_test_signal(block_size, 82.5);
    let controls = ControlValues::from_raw(0.75, ClipCurve::HardClip.index(), 2);

    let variants = [
        ("default", EngineSettings::default()),
        (
            "dynamic_gain",
            EngineSettings {
                apply_dynamic_gain: true,
                ..EngineSettings::default()
            },
        ),
        (
            "phase_aligned",
            EngineSettings {
                recombination: Recombination::PhaseAligned,
                ..EngineSettings::default()
            },
        ),
    ];

    for (name, settings) in variants {
        group.bench_function(name, |b| {
            let mut klip = KlipProcessor::with_settings(SAMPLE_RATE, settings);
            let mut l = left.clone();
            let mut r = right.clone();
            b.iter(|| {
                l.copy_from_slice(&left);
                r.copy_from_slice(&right);
                klip.process_block_with(&mut l, &mut r, controls);
                black_box((&l, &r));
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_curves, bench_modes, bench_variants);
criterion_main!(benches);
