use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use voice_algo::{
    aggregate_risk, score_batch, AcousticFeatures, BaselineProgress, ClassificationScores,
    ClinicalScaleMapper, ClinicalScales, RiskAssessment, SampleScores, VoiceSample,
};

use crate::services::baseline_tracker::BaselineTracker;

/// Everything computed for one submitted voice sample
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub id: Uuid,
    pub subject_id: String,
    pub assessed_at: DateTime<Utc>,
    pub risk: RiskAssessment,
    pub scales: ClinicalScales,
    pub baseline: BaselineProgress,
}

pub struct AssessmentService {
    tracker: Arc<BaselineTracker>,
    mapper: Arc<ClinicalScaleMapper>,
}

impl AssessmentService {
    pub fn new(tracker: Arc<BaselineTracker>, mapper: Arc<ClinicalScaleMapper>) -> Self {
        Self { tracker, mapper }
    }

    pub fn tracker(&self) -> &BaselineTracker {
        &self.tracker
    }

    pub fn risk(&self, scores: &ClassificationScores) -> RiskAssessment {
        aggregate_risk(scores)
    }

    pub fn scales(&self, scores: &ClassificationScores, features: &AcousticFeatures) -> ClinicalScales {
        self.mapper.map(scores, features)
    }

    pub fn score_batch(&self, samples: &[VoiceSample]) -> Vec<SampleScores> {
        score_batch(&self.mapper, samples)
    }

    /// Score a sample and count it toward the subject's baseline
    pub fn assess(
        &self,
        subject_id: &str,
        scores: &ClassificationScores,
        features: &AcousticFeatures,
    ) -> AssessmentReport {
        let risk = aggregate_risk(scores);
        let scales = self.mapper.map(scores, features);
        let baseline = self.tracker.record_sample_with_scores(subject_id, scores);

        tracing::debug!(
            subject_id,
            risk = risk.risk_percentage,
            level = risk.risk_level.as_str(),
            phq9 = scales.phq9.value,
            gad7 = scales.gad7.value,
            "sample assessed"
        );

        AssessmentReport {
            id: Uuid::new_v4(),
            subject_id: subject_id.to_string(),
            assessed_at: Utc::now(),
            risk,
            scales,
            baseline,
        }
    }
}
