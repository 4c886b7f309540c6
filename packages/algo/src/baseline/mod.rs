//! Baseline personalization progress
//!
//! Per-subject state machine `Collecting -> BaselineEstablished`. The state is
//! plain data so callers decide how it is shared and persisted; every
//! operation takes the calendar date explicitly.

use std::collections::VecDeque;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::sanitize::clamp_finite;
use crate::types::{BaselineProgress, VOLATILITY_SCALE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselinePhase {
    Collecting,
    BaselineEstablished,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaselineState {
    pub samples_collected: u32,
    /// Samples recorded on `last_sample_date`
    pub today_samples: u32,
    pub streak_days: u32,
    pub last_sample_date: Option<NaiveDate>,
    /// Latched once the target is reached
    pub baseline_established: bool,
    /// Risk percentages of the most recent scored samples
    #[serde(default)]
    pub recent_risks: VecDeque<f64>,
}

impl BaselineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> BaselinePhase {
        if self.baseline_established {
            BaselinePhase::BaselineEstablished
        } else {
            BaselinePhase::Collecting
        }
    }

    /// Count one sample taken on `date`.
    ///
    /// Returns `true` when this sample moved the subject into
    /// `BaselineEstablished`.
    pub fn record(&mut self, date: NaiveDate, target_samples: u32, risk_percentage: Option<f64>, window: usize) -> bool {
        self.samples_collected = self.samples_collected.saturating_add(1);

        match self.last_sample_date {
            Some(last) if date <= last => {
                // same day, or a clock that went backwards: stay on the last day
                self.today_samples = self.today_samples.saturating_add(1);
            }
            Some(last) if date.pred_opt() == Some(last) => {
                self.streak_days = self.streak_days.saturating_add(1);
                self.today_samples = 1;
                self.last_sample_date = Some(date);
            }
            _ => {
                self.streak_days = 1;
                self.today_samples = 1;
                self.last_sample_date = Some(date);
            }
        }

        if let Some(risk) = risk_percentage {
            if window > 0 {
                self.recent_risks.push_back(clamp_finite(risk, 0.0, 100.0));
                while self.recent_risks.len() > window {
                    self.recent_risks.pop_front();
                }
            }
        }

        self.latch(target_samples)
    }

    /// Store the established flag once `target_samples` is reached.
    ///
    /// Returns `true` only on the call that sets it. The flag is never
    /// cleared, whatever target a later call uses.
    pub fn latch(&mut self, target_samples: u32) -> bool {
        if self.baseline_established || self.samples_collected < target_samples.max(1) {
            return false;
        }
        self.baseline_established = true;
        true
    }

    /// Progress as seen on `today`.
    ///
    /// Reports the stored flag only; call [`latch`](Self::latch) first when
    /// the target may have changed since the last sample.
    pub fn progress(&self, today: NaiveDate, target_samples: u32) -> BaselineProgress {
        let target = target_samples.max(1);
        let established = self.baseline_established;

        let today_samples = match self.last_sample_date {
            Some(last) if last == today => self.today_samples,
            _ => 0,
        };
        let streak_days = match self.last_sample_date {
            Some(last) if last == today || today.pred_opt() == Some(last) => self.streak_days,
            _ => 0,
        };

        let progress_percentage = (self.samples_collected as f64 / target as f64 * 100.0).min(100.0);

        BaselineProgress {
            samples_collected: self.samples_collected,
            target_samples: target,
            samples_remaining: target.saturating_sub(self.samples_collected),
            progress_percentage,
            today_samples,
            streak_days,
            baseline_established: established,
            personalization_score: established.then(|| personalization_score(&self.recent_risks)),
        }
    }
}

/// Consistency of recent samples in (0, 1]: `1 / (1 + sd / VOLATILITY_SCALE)`
/// over the population standard deviation of their risk percentages.
/// Fewer than two samples count as perfectly consistent.
pub fn personalization_score(recent_risks: &VecDeque<f64>) -> f64 {
    if recent_risks.len() < 2 {
        return 1.0;
    }

    let n = recent_risks.len() as f64;
    let mean = recent_risks.iter().sum::<f64>() / n;
    let variance = recent_risks.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.max(0.0).sqrt();

    clamp_finite(1.0 / (1.0 + std_dev / VOLATILITY_SCALE), 0.0, 1.0)
}
