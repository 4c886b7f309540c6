use rayon::prelude::*;

use crate::risk::aggregate_risk;
use crate::scales::ClinicalScaleMapper;
use crate::types::{SampleScores, VoiceSample};

/// Below this many samples the rayon fan-out costs more than it saves
const PARALLEL_THRESHOLD: usize = 64;

pub fn score_sample(mapper: &ClinicalScaleMapper, sample: &VoiceSample) -> SampleScores {
    SampleScores {
        risk: aggregate_risk(&sample.scores),
        scales: mapper.map(&sample.scores, &sample.features),
    }
}

/// Score many samples, preserving input order
pub fn score_batch(mapper: &ClinicalScaleMapper, samples: &[VoiceSample]) -> Vec<SampleScores> {
    if samples.len() < PARALLEL_THRESHOLD {
        return samples.iter().map(|s| score_sample(mapper, s)).collect();
    }

    samples
        .par_iter()
        .map(|s| score_sample(mapper, s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AcousticFeatures, ClassificationScores};

    fn samples(n: usize) -> Vec<VoiceSample> {
        (0..n)
            .map(|i| {
                let x = (i % 11) as f64 / 10.0;
                VoiceSample {
                    scores: ClassificationScores::new(1.0 - x, x * 0.5, x, x * 0.8),
                    features: AcousticFeatures {
                        pitch_mean: Some(100.0 + i as f64),
                        speech_rate: Some(x * 6.0),
                        ..AcousticFeatures::default()
                    },
                }
            })
            .collect()
    }

    #[test]
    fn test_batch_matches_single_sample_scoring() {
        let mapper = ClinicalScaleMapper::default();
        for n in [0, 3, 200] {
            let input = samples(n);
            let batch = score_batch(&mapper, &input);
            assert_eq!(batch.len(), n);
            for (sample, scored) in input.iter().zip(&batch) {
                assert_eq!(scored, &score_sample(&mapper, sample));
            }
        }
    }
}
