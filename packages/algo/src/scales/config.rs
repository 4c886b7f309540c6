use serde::{Deserialize, Serialize};

use crate::sanitize::FeatureRange;

/// Reference ranges used to normalize raw acoustic features
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureNormalization {
    pub pitch_mean: FeatureRange,
    pub pitch_std: FeatureRange,
    pub jitter_mean: FeatureRange,
    pub shimmer_mean: FeatureRange,
    pub hnr: FeatureRange,
    pub speech_rate: FeatureRange,
    pub rms_mean: FeatureRange,
    pub spectral_centroid_mean: FeatureRange,
}

impl Default for FeatureNormalization {
    fn default() -> Self {
        Self {
            pitch_mean: FeatureRange::new(80.0, 300.0),
            pitch_std: FeatureRange::new(0.0, 60.0),
            jitter_mean: FeatureRange::new(0.0, 0.03),
            shimmer_mean: FeatureRange::new(0.0, 0.15),
            hnr: FeatureRange::new(0.0, 30.0),
            speech_rate: FeatureRange::new(0.0, 6.0),
            rms_mean: FeatureRange::new(0.0, 0.2),
            spectral_centroid_mean: FeatureRange::new(500.0, 4000.0),
        }
    }
}

/// U-shaped closeness target: score 1 at `ideal`, 0 at `ideal ± tolerance`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub ideal: f64,
    pub tolerance: f64,
}

impl Target {
    pub fn closeness(&self, value: f64) -> f64 {
        if self.tolerance <= 0.0 || !self.tolerance.is_finite() {
            return 0.0;
        }
        let distance = (value - self.ideal).abs() / self.tolerance;
        (1.0 - distance).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Phq9Weights {
    pub depression: f64,
    pub pitch_variability_deficit: f64,
    pub speech_rate_deficit: f64,
    pub energy_deficit: f64,
}

impl Default for Phq9Weights {
    fn default() -> Self {
        Self {
            depression: 0.55,
            pitch_variability_deficit: 0.15,
            speech_rate_deficit: 0.15,
            energy_deficit: 0.15,
        }
    }
}

impl Phq9Weights {
    pub fn total(&self) -> f64 {
        self.depression + self.pitch_variability_deficit + self.speech_rate_deficit + self.energy_deficit
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Gad7Weights {
    pub anxiety: f64,
    pub pitch_elevation: f64,
    pub jitter: f64,
    pub speech_rate: f64,
}

impl Default for Gad7Weights {
    fn default() -> Self {
        Self {
            anxiety: 0.55,
            pitch_elevation: 0.15,
            jitter: 0.15,
            speech_rate: 0.15,
        }
    }
}

impl Gad7Weights {
    pub fn total(&self) -> f64 {
        self.anxiety + self.pitch_elevation + self.jitter + self.speech_rate
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PssWeights {
    pub stress: f64,
    pub shimmer: f64,
    pub pitch_elevation: f64,
    pub speech_rate: f64,
    pub spectral_centroid: f64,
}

impl Default for PssWeights {
    fn default() -> Self {
        Self {
            stress: 0.50,
            shimmer: 0.125,
            pitch_elevation: 0.125,
            speech_rate: 0.125,
            spectral_centroid: 0.125,
        }
    }
}

impl PssWeights {
    pub fn total(&self) -> f64 {
        self.stress + self.shimmer + self.pitch_elevation + self.speech_rate + self.spectral_centroid
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WemwbsWeights {
    pub normal: f64,
    pub pitch_variation: f64,
    pub rhythm: f64,
    pub hnr: f64,
}

impl Default for WemwbsWeights {
    fn default() -> Self {
        Self {
            normal: 0.55,
            pitch_variation: 0.15,
            rhythm: 0.15,
            hnr: 0.15,
        }
    }
}

impl WemwbsWeights {
    pub fn total(&self) -> f64 {
        self.normal + self.pitch_variation + self.rhythm + self.hnr
    }
}

/// Tunable parameters of the clinical scale mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    pub normalization: FeatureNormalization,
    pub phq9: Phq9Weights,
    pub gad7: Gad7Weights,
    pub pss: PssWeights,
    pub wemwbs: WemwbsWeights,
    /// Pitch standard deviation (Hz) of relaxed, expressive speech
    pub natural_pitch_variation: Target,
    /// Speech rate (syllables/s) of an even conversational rhythm
    pub natural_speech_rate: Target,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            normalization: FeatureNormalization::default(),
            phq9: Phq9Weights::default(),
            gad7: Gad7Weights::default(),
            pss: PssWeights::default(),
            wemwbs: WemwbsWeights::default(),
            natural_pitch_variation: Target {
                ideal: 30.0,
                tolerance: 30.0,
            },
            natural_speech_rate: Target {
                ideal: 4.0,
                tolerance: 3.0,
            },
        }
    }
}

impl ScaleConfig {
    /// Parse a JSON document; missing sections keep their defaults
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
