//! Clinical scale mapping
//!
//! Maps classifier probabilities and acoustic biomarkers onto PHQ-9, GAD-7,
//! PSS and WEMWBS. Each scale is a normalized weighted sum of its predictors in
//! [0, 1], stretched over the scale range, rounded to whole points and banded.
//!
//! | Scale  | Predictors                                                          |
//! |--------|---------------------------------------------------------------------|
//! | PHQ-9  | depression, low pitch variability, slow speech, low energy          |
//! | GAD-7  | anxiety, raised pitch, jitter, fast speech                          |
//! | PSS    | stress, shimmer, raised pitch, fast speech, bright spectrum         |
//! | WEMWBS | normal, natural pitch variation, even rhythm, clear voice (HNR)     |

pub mod bands;
pub mod config;

pub use bands::{severity_label, to_scale_points, SeverityBand};
pub use config::{FeatureNormalization, ScaleConfig, Target};

use crate::sanitize::{sanitize_features, sanitize_scores, Features, Probabilities};
use crate::types::{AcousticFeatures, ClassificationScores, ClinicalScale, ClinicalScales, ClinicalScore};

#[derive(Debug, Clone, Default)]
pub struct ClinicalScaleMapper {
    config: ScaleConfig,
}

impl ClinicalScaleMapper {
    pub fn new(config: ScaleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScaleConfig {
        &self.config
    }

    /// Map one sample onto all four scales. Never fails.
    pub fn map(&self, scores: &ClassificationScores, features: &AcousticFeatures) -> ClinicalScales {
        let p = sanitize_scores(scores);
        let f = sanitize_features(features);

        ClinicalScales {
            phq9: build_score(ClinicalScale::Phq9, self.phq9_fraction(&p, &f)),
            gad7: build_score(ClinicalScale::Gad7, self.gad7_fraction(&p, &f)),
            pss: build_score(ClinicalScale::Pss, self.pss_fraction(&p, &f)),
            wemwbs: build_score(ClinicalScale::Wemwbs, self.wemwbs_fraction(&p, &f)),
        }
    }

    fn phq9_fraction(&self, p: &Probabilities, f: &Features) -> f64 {
        let w = &self.config.phq9;
        let n = &self.config.normalization;

        let pitch_variability_deficit = 1.0 - n.pitch_std.normalize(f.pitch_std);
        let speech_rate_deficit = 1.0 - n.speech_rate.normalize(f.speech_rate);
        let energy_deficit = 1.0 - n.rms_mean.normalize(f.rms_mean);

        let weighted = w.depression * p.depression
            + w.pitch_variability_deficit * pitch_variability_deficit
            + w.speech_rate_deficit * speech_rate_deficit
            + w.energy_deficit * energy_deficit;

        weighted / w.total().max(1e-6)
    }

    fn gad7_fraction(&self, p: &Probabilities, f: &Features) -> f64 {
        let w = &self.config.gad7;
        let n = &self.config.normalization;

        let weighted = w.anxiety * p.anxiety
            + w.pitch_elevation * n.pitch_mean.normalize(f.pitch_mean)
            + w.jitter * n.jitter_mean.normalize(f.jitter_mean)
            + w.speech_rate * n.speech_rate.normalize(f.speech_rate);

        weighted / w.total().max(1e-6)
    }

    fn pss_fraction(&self, p: &Probabilities, f: &Features) -> f64 {
        let w = &self.config.pss;
        let n = &self.config.normalization;

        // faster speech stands in for shortened pauses
        let weighted = w.stress * p.stress
            + w.shimmer * n.shimmer_mean.normalize(f.shimmer_mean)
            + w.pitch_elevation * n.pitch_mean.normalize(f.pitch_mean)
            + w.speech_rate * n.speech_rate.normalize(f.speech_rate)
            + w.spectral_centroid * n.spectral_centroid_mean.normalize(f.spectral_centroid_mean);

        weighted / w.total().max(1e-6)
    }

    fn wemwbs_fraction(&self, p: &Probabilities, f: &Features) -> f64 {
        let w = &self.config.wemwbs;
        let n = &self.config.normalization;

        let pitch_variation = self.config.natural_pitch_variation.closeness(f.pitch_std);
        let rhythm = self.config.natural_speech_rate.closeness(f.speech_rate);

        let weighted = w.normal * p.normal
            + w.pitch_variation * pitch_variation
            + w.rhythm * rhythm
            + w.hnr * n.hnr.normalize(f.hnr);

        weighted / w.total().max(1e-6)
    }
}

fn build_score(scale: ClinicalScale, fraction: f64) -> ClinicalScore {
    let (min, max) = scale.range();
    let fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
    let points = to_scale_points(scale, min + fraction * (max - min));

    ClinicalScore {
        value: points as f64,
        min,
        max,
        severity: severity_label(scale, points).to_string(),
    }
}

/// Map one sample with the default weights
pub fn map_clinical_scales(scores: &ClassificationScores, features: &AcousticFeatures) -> ClinicalScales {
    ClinicalScaleMapper::default().map(scores, features)
}
