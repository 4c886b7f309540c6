//! Input normalization
//!
//! Turns optional, possibly non-finite upstream values into plain finite numbers
//! before any scoring happens. Absent, NaN and infinite values all become `0`.

use serde::{Deserialize, Serialize};

use crate::types::{AcousticFeatures, ClassificationScores};

/// Classification probabilities after defaulting and clamping to [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Probabilities {
    pub normal: f64,
    pub anxiety: f64,
    pub depression: f64,
    pub stress: f64,
}

impl Probabilities {
    pub fn max(&self) -> f64 {
        self.normal
            .max(self.anxiety)
            .max(self.depression)
            .max(self.stress)
    }
}

/// Acoustic features after defaulting; every value is finite and non-negative
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Features {
    pub pitch_mean: f64,
    pub pitch_std: f64,
    pub jitter_mean: f64,
    pub shimmer_mean: f64,
    pub hnr: f64,
    pub speech_rate: f64,
    pub rms_mean: f64,
    pub spectral_centroid_mean: f64,
}

/// Reference range used to map a raw feature into [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRange {
    pub min: f64,
    pub max: f64,
}

impl FeatureRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Linear position of `value` inside the range, clamped to [0, 1].
    /// A degenerate range yields `0`.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if !span.is_finite() || span <= 0.0 {
            return 0.0;
        }
        finite_or_zero((value - self.min) / span).clamp(0.0, 1.0)
    }
}

pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Clamp into `[lo, hi]`, mapping non-finite input to `lo`
pub fn clamp_finite(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_finite() {
        value.clamp(lo, hi)
    } else {
        lo
    }
}

pub fn sanitize_probability(value: Option<f64>) -> f64 {
    clamp_finite(value.unwrap_or(0.0), 0.0, 1.0)
}

pub fn sanitize_feature(value: Option<f64>) -> f64 {
    finite_or_zero(value.unwrap_or(0.0)).max(0.0)
}

pub fn sanitize_scores(scores: &ClassificationScores) -> Probabilities {
    Probabilities {
        normal: sanitize_probability(scores.normal),
        anxiety: sanitize_probability(scores.anxiety),
        depression: sanitize_probability(scores.depression),
        stress: sanitize_probability(scores.stress),
    }
}

pub fn sanitize_features(features: &AcousticFeatures) -> Features {
    Features {
        pitch_mean: sanitize_feature(features.pitch_mean),
        pitch_std: sanitize_feature(features.pitch_std),
        jitter_mean: sanitize_feature(features.jitter_mean),
        shimmer_mean: sanitize_feature(features.shimmer_mean),
        hnr: sanitize_feature(features.hnr),
        speech_rate: sanitize_feature(features.speech_rate),
        rms_mean: sanitize_feature(features.rms_mean),
        spectral_centroid_mean: sanitize_feature(features.spectral_centroid_mean),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_probability() {
        assert_eq!(sanitize_probability(None), 0.0);
        assert_eq!(sanitize_probability(Some(f64::NAN)), 0.0);
        assert_eq!(sanitize_probability(Some(f64::NEG_INFINITY)), 0.0);
        assert_eq!(sanitize_probability(Some(1.7)), 1.0);
        assert_eq!(sanitize_probability(Some(-0.2)), 0.0);
        assert_eq!(sanitize_probability(Some(0.42)), 0.42);
    }

    #[test]
    fn test_sanitize_feature() {
        assert_eq!(sanitize_feature(None), 0.0);
        assert_eq!(sanitize_feature(Some(f64::INFINITY)), 0.0);
        assert_eq!(sanitize_feature(Some(-3.0)), 0.0);
        assert_eq!(sanitize_feature(Some(180.0)), 180.0);
    }

    #[test]
    fn test_feature_range_normalize() {
        let range = FeatureRange::new(80.0, 300.0);
        assert_eq!(range.normalize(80.0), 0.0);
        assert_eq!(range.normalize(300.0), 1.0);
        assert_eq!(range.normalize(0.0), 0.0);
        assert_eq!(range.normalize(1_000.0), 1.0);
        assert!((range.normalize(190.0) - 0.5).abs() < 1e-12);

        let degenerate = FeatureRange::new(5.0, 5.0);
        assert_eq!(degenerate.normalize(5.0), 0.0);
    }

    #[test]
    fn test_probabilities_max() {
        let p = sanitize_scores(&ClassificationScores::new(0.1, 0.6, 0.2, f64::NAN));
        assert_eq!(p.stress, 0.0);
        assert_eq!(p.max(), 0.6);
    }
}
