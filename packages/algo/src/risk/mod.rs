//! Risk aggregation
//!
//! Combines the four classifier probabilities into a single risk percentage:
//!
//! ```text
//! risk_from_scores = mean(depression, anxiety, stress) * 100
//! risk_from_normal = (1 - normal) * 100
//! risk_percentage  = clamp((risk_from_scores + risk_from_normal) / 2, 0, 100)
//! ```
//!
//! An all-zero input yields 50 (`Moderate`): a missing "normal" probability is
//! read as no evidence of normal speech, not as absence of risk.

use crate::sanitize::{clamp_finite, sanitize_scores, Probabilities};
use crate::types::{ClassificationScores, RiskAssessment, RiskLevel};

/// Both halves of the risk formula, before averaging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskComponents {
    pub risk_from_scores: f64,
    pub risk_from_normal: f64,
}

pub fn risk_components(p: &Probabilities) -> RiskComponents {
    RiskComponents {
        risk_from_scores: ((p.depression + p.anxiety + p.stress) / 3.0) * 100.0,
        risk_from_normal: (1.0 - p.normal) * 100.0,
    }
}

pub fn risk_percentage(p: &Probabilities) -> f64 {
    let c = risk_components(p);
    clamp_finite((c.risk_from_scores + c.risk_from_normal) / 2.0, 0.0, 100.0)
}

/// Aggregate classifier output into a [`RiskAssessment`]. Never fails.
///
/// Each probability is clamped to `[0, 1]` (missing or non-finite as 0)
/// before the formula, so out-of-range inputs score as their clamped value.
pub fn aggregate_risk(scores: &ClassificationScores) -> RiskAssessment {
    let p = sanitize_scores(scores);
    let risk_percentage = risk_percentage(&p);

    RiskAssessment {
        risk_percentage,
        risk_level: RiskLevel::from_percentage(risk_percentage),
        mental_health_score: 100.0 - risk_percentage,
        confidence: p.max(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_zero_is_moderate() {
        let zero = ClassificationScores::new(0.0, 0.0, 0.0, 0.0);
        let r = aggregate_risk(&zero);
        assert_eq!(r.risk_percentage, 50.0);
        assert_eq!(r.risk_level, RiskLevel::Moderate);

        let absent = aggregate_risk(&ClassificationScores::default());
        assert_eq!(absent, r);
    }

    #[test]
    fn test_fully_normal_is_low() {
        let r = aggregate_risk(&ClassificationScores::new(1.0, 0.0, 0.0, 0.0));
        assert_eq!(r.risk_percentage, 0.0);
        assert_eq!(r.risk_level, RiskLevel::Low);
        assert_eq!(r.mental_health_score, 100.0);
        assert_eq!(r.confidence, 1.0);
    }

    #[test]
    fn test_all_risk_is_critical() {
        let scores = ClassificationScores::new(0.0, 1.0, 1.0, 1.0);
        let c = risk_components(&sanitize_scores(&scores));
        assert_eq!(c.risk_from_scores, 100.0);
        assert_eq!(c.risk_from_normal, 100.0);

        let r = aggregate_risk(&scores);
        assert_eq!(r.risk_percentage, 100.0);
        assert_eq!(r.risk_level, RiskLevel::Critical);
        assert_eq!(r.mental_health_score, 0.0);
    }

    #[test]
    fn test_exact_25_is_moderate() {
        let r = aggregate_risk(&ClassificationScores::new(0.5, 0.0, 0.0, 0.0));
        assert_eq!(r.risk_percentage, 25.0);
        assert_eq!(r.risk_level, RiskLevel::Moderate);
    }

    #[test]
    fn test_out_of_range_inputs_are_clamped() {
        let r = aggregate_risk(&ClassificationScores {
            normal: Some(-4.0),
            anxiety: Some(9.0),
            depression: Some(f64::NAN),
            stress: Some(f64::INFINITY),
        });
        // normal -> 0, anxiety -> 1, depression/stress -> 0
        let expected = ((1.0 / 3.0) * 100.0 + 100.0) / 2.0;
        assert!((r.risk_percentage - expected).abs() < 1e-9);
        assert!(r.risk_percentage.is_finite());
    }

    #[test]
    fn test_probability_above_one_scores_as_one() {
        let over = aggregate_risk(&ClassificationScores::new(2.0, 0.0, 0.0, 0.0));
        let at_one = aggregate_risk(&ClassificationScores::new(1.0, 0.0, 0.0, 0.0));
        assert_eq!(over, at_one);
        assert_eq!(over.risk_percentage, 0.0);
        assert_eq!(over.confidence, 1.0);
    }

    #[test]
    fn test_mixed_profile() {
        let r = aggregate_risk(&ClassificationScores::new(0.2, 0.3, 0.6, 0.3));
        // scores: 40, normal: 80 -> 60
        assert!((r.risk_percentage - 60.0).abs() < 1e-9);
        assert_eq!(r.risk_level, RiskLevel::High);
        assert_eq!(r.confidence, 0.6);
    }
}
