//! Common Types and Constants
//!
//! Shared data structures used across all scoring modules.

use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Default number of samples required before a baseline is established
pub const DEFAULT_TARGET_SAMPLES: u32 = 10;

/// Default number of recent samples used for personalization volatility
pub const DEFAULT_PERSONALIZATION_WINDOW: usize = 10;

/// Risk-percentage standard deviation that halves the personalization score
pub const VOLATILITY_SCALE: f64 = 10.0;

/// PHQ-9 maximum score
pub const PHQ9_MAX: f64 = 27.0;

/// GAD-7 maximum score
pub const GAD7_MAX: f64 = 21.0;

/// PSS maximum score
pub const PSS_MAX: f64 = 40.0;

/// WEMWBS minimum score
pub const WEMWBS_MIN: f64 = 14.0;

/// WEMWBS maximum score
pub const WEMWBS_MAX: f64 = 70.0;

// ==================== Inputs ====================

/// Classifier output for one voice sample.
///
/// Every probability is optional; absent values count as `0`.
/// The four values are not required to sum to one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationScores {
    #[serde(default)]
    pub normal: Option<f64>,
    #[serde(default)]
    pub anxiety: Option<f64>,
    #[serde(default)]
    pub depression: Option<f64>,
    #[serde(default)]
    pub stress: Option<f64>,
}

impl ClassificationScores {
    pub fn new(normal: f64, anxiety: f64, depression: f64, stress: f64) -> Self {
        Self {
            normal: Some(normal),
            anxiety: Some(anxiety),
            depression: Some(depression),
            stress: Some(stress),
        }
    }
}

/// Acoustic biomarkers extracted upstream from one voice sample.
///
/// Units follow the extractor: Hz for pitch and spectral centroid, dB for HNR,
/// syllables per second for speech rate, fractions for jitter/shimmer/RMS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AcousticFeatures {
    #[serde(default)]
    pub pitch_mean: Option<f64>,
    #[serde(default)]
    pub pitch_std: Option<f64>,
    #[serde(default)]
    pub jitter_mean: Option<f64>,
    #[serde(default)]
    pub shimmer_mean: Option<f64>,
    #[serde(default)]
    pub hnr: Option<f64>,
    #[serde(default)]
    pub speech_rate: Option<f64>,
    #[serde(default)]
    pub rms_mean: Option<f64>,
    #[serde(default)]
    pub spectral_centroid_mean: Option<f64>,
}

/// One scored unit of work for batch processing
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VoiceSample {
    #[serde(default)]
    pub scores: ClassificationScores,
    #[serde(default)]
    pub features: AcousticFeatures,
}

// ==================== Risk Types ====================

/// Four-level risk category derived from the risk percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    pub fn from_percentage(risk_percentage: f64) -> Self {
        if risk_percentage < 25.0 {
            Self::Low
        } else if risk_percentage < 50.0 {
            Self::Moderate
        } else if risk_percentage < 75.0 {
            Self::High
        } else {
            Self::Critical
        }
    }
}

/// Aggregate risk for one sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Risk in [0, 100]
    pub risk_percentage: f64,
    pub risk_level: RiskLevel,
    /// `100 - risk_percentage`
    pub mental_health_score: f64,
    /// Strongest classifier probability, [0, 1]
    pub confidence: f64,
}

// ==================== Clinical Scale Types ====================

/// Identifies one of the four supported clinical scales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClinicalScale {
    #[serde(rename = "PHQ9")]
    Phq9,
    #[serde(rename = "GAD7")]
    Gad7,
    #[serde(rename = "PSS")]
    Pss,
    #[serde(rename = "WEMWBS")]
    Wemwbs,
}

impl ClinicalScale {
    pub const ALL: [ClinicalScale; 4] = [Self::Phq9, Self::Gad7, Self::Pss, Self::Wemwbs];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Phq9 => "PHQ9",
            Self::Gad7 => "GAD7",
            Self::Pss => "PSS",
            Self::Wemwbs => "WEMWBS",
        }
    }

    /// Inclusive numeric range of the scale
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Phq9 => (0.0, PHQ9_MAX),
            Self::Gad7 => (0.0, GAD7_MAX),
            Self::Pss => (0.0, PSS_MAX),
            Self::Wemwbs => (WEMWBS_MIN, WEMWBS_MAX),
        }
    }

    /// Higher values mean better outcomes only for WEMWBS
    pub fn higher_is_better(&self) -> bool {
        matches!(self, Self::Wemwbs)
    }
}

/// Score on a single clinical scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalScore {
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub severity: String,
}

/// All four clinical scale scores for one sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalScales {
    pub phq9: ClinicalScore,
    pub gad7: ClinicalScore,
    pub pss: ClinicalScore,
    pub wemwbs: ClinicalScore,
}

impl ClinicalScales {
    pub fn get(&self, scale: ClinicalScale) -> &ClinicalScore {
        match scale {
            ClinicalScale::Phq9 => &self.phq9,
            ClinicalScale::Gad7 => &self.gad7,
            ClinicalScale::Pss => &self.pss,
            ClinicalScale::Wemwbs => &self.wemwbs,
        }
    }
}

/// Risk and scale output for one batch item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleScores {
    pub risk: RiskAssessment,
    pub scales: ClinicalScales,
}

// ==================== Baseline Types ====================

/// Baseline personalization progress for one subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineProgress {
    pub samples_collected: u32,
    pub target_samples: u32,
    pub samples_remaining: u32,
    /// [0, 100]
    pub progress_percentage: f64,
    pub today_samples: u32,
    pub streak_days: u32,
    pub baseline_established: bool,
    /// `None` until the baseline is established
    pub personalization_score: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_breakpoints() {
        assert_eq!(RiskLevel::from_percentage(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_percentage(24.999), RiskLevel::Low);
        assert_eq!(RiskLevel::from_percentage(25.0), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_percentage(49.999), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_percentage(50.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_percentage(74.999), RiskLevel::High);
        assert_eq!(RiskLevel::from_percentage(75.0), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_percentage(100.0), RiskLevel::Critical);
    }

    #[test]
    fn test_risk_level_is_ordered() {
        assert!(RiskLevel::Low < RiskLevel::Moderate);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }

    #[test]
    fn test_missing_fields_deserialize_as_none() {
        let scores: ClassificationScores = serde_json::from_str(r#"{"anxiety":0.4}"#).unwrap();
        assert_eq!(scores.anxiety, Some(0.4));
        assert_eq!(scores.normal, None);

        let features: AcousticFeatures = serde_json::from_str("{}").unwrap();
        assert_eq!(features, AcousticFeatures::default());
    }

    #[test]
    fn test_scale_serializes_with_clinical_name() {
        let json = serde_json::to_string(&ClinicalScale::Phq9).unwrap();
        assert_eq!(json, "\"PHQ9\"");
        assert_eq!(ClinicalScale::Wemwbs.range(), (14.0, 70.0));
        assert!(ClinicalScale::Wemwbs.higher_is_better());
        assert!(!ClinicalScale::Pss.higher_is_better());
    }
}
