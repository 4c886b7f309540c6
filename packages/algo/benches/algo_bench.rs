//! Benchmark suite for voice-algo
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use voice_algo::{
    aggregate_risk, score_batch, AcousticFeatures, ClassificationScores, ClinicalScaleMapper,
    VoiceSample,
};

fn sample(i: usize) -> VoiceSample {
    let x = (i % 7) as f64 / 6.0;
    VoiceSample {
        scores: ClassificationScores::new(1.0 - x, x * 0.4, x * 0.7, x * 0.5),
        features: AcousticFeatures {
            pitch_mean: Some(120.0 + x * 100.0),
            pitch_std: Some(10.0 + x * 30.0),
            jitter_mean: Some(0.01),
            shimmer_mean: Some(0.04),
            hnr: Some(18.0),
            speech_rate: Some(2.0 + x * 3.0),
            rms_mean: Some(0.08),
            spectral_centroid_mean: Some(1800.0),
        },
    }
}

fn bench_aggregate_risk(c: &mut Criterion) {
    let scores = ClassificationScores::new(0.3, 0.2, 0.4, 0.1);
    c.bench_function("aggregate_risk", |b| b.iter(|| aggregate_risk(black_box(&scores))));
}

fn bench_score_batch(c: &mut Criterion) {
    let mapper = ClinicalScaleMapper::default();
    let mut group = c.benchmark_group("score_batch");

    for size in [16usize, 256, 4096] {
        let samples: Vec<VoiceSample> = (0..size).map(sample).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &samples, |b, samples| {
            b.iter(|| score_batch(&mapper, black_box(samples)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_aggregate_risk, bench_score_batch);
criterion_main!(benches);
