use std::sync::Arc;
use std::time::{Instant, SystemTime};

use voice_algo::{ClinicalScaleMapper, ScaleConfig};

use crate::config::Config;
use crate::services::{AssessmentService, BaselineTracker, SnapshotStore};

#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    started_at_system: SystemTime,
    config: Arc<Config>,
    tracker: Arc<BaselineTracker>,
    assessment: Arc<AssessmentService>,
}

impl AppState {
    pub fn new(config: Config, tracker: Arc<BaselineTracker>, scale_config: ScaleConfig) -> Self {
        let mapper = Arc::new(ClinicalScaleMapper::new(scale_config));
        let assessment = Arc::new(AssessmentService::new(Arc::clone(&tracker), mapper));

        Self {
            started_at: Instant::now(),
            started_at_system: SystemTime::now(),
            config: Arc::new(config),
            tracker,
            assessment,
        }
    }

    /// Wire services from configuration. Unreadable optional files are
    /// logged and replaced by defaults.
    pub fn from_config(config: Config) -> Self {
        let scale_config = config.load_scale_config().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to default scale weights");
            ScaleConfig::default()
        });

        let tracker = Self::create_tracker(&config);
        Self::new(config, Arc::new(tracker), scale_config)
    }

    fn create_tracker(config: &Config) -> BaselineTracker {
        let tracker = BaselineTracker::new(config.baseline_target_samples, config.personalization_window);
        let Some(path) = &config.baseline_snapshot_path else {
            return tracker;
        };

        let fallback = BaselineTracker::new(config.baseline_target_samples, config.personalization_window);
        tracker
            .with_snapshot(SnapshotStore::new(path))
            .unwrap_or_else(|err| {
                tracing::warn!(
                    error = %err,
                    path = %path.display(),
                    "baseline snapshot unavailable, starting in memory"
                );
                fallback
            })
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn started_at_system(&self) -> SystemTime {
        self.started_at_system
    }

    pub fn config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    pub fn tracker(&self) -> Arc<BaselineTracker> {
        Arc::clone(&self.tracker)
    }

    pub fn assessment(&self) -> Arc<AssessmentService> {
        Arc::clone(&self.assessment)
    }
}
