use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use parking_lot::{Mutex, RwLock};
use tokio::task::JoinHandle;
use voice_algo::risk::risk_percentage;
use voice_algo::sanitize::sanitize_scores;
use voice_algo::{BaselineProgress, BaselineState, ClassificationScores};

use crate::services::snapshot::{SnapshotError, SnapshotStore};

type SubjectSlot = Arc<Mutex<BaselineState>>;

/// Long-lived per-subject baseline progress.
///
/// Each subject has its own lock: updates for one subject serialize, updates
/// for different subjects run in parallel. Recording only marks the tracker
/// dirty; the snapshot file is rewritten by [`flush`](Self::flush).
pub struct BaselineTracker {
    target_samples: u32,
    window: usize,
    subjects: RwLock<HashMap<String, SubjectSlot>>,
    snapshot: Option<SnapshotStore>,
    dirty: AtomicBool,
}

impl BaselineTracker {
    pub fn new(target_samples: u32, window: usize) -> Self {
        Self {
            target_samples: target_samples.max(1),
            window,
            subjects: RwLock::new(HashMap::new()),
            snapshot: None,
            dirty: AtomicBool::new(false),
        }
    }

    /// Attach a snapshot file and load any subjects it already holds.
    ///
    /// Subjects that already meet the current target are latched here, so a
    /// target lowered between runs establishes them for good.
    pub fn with_snapshot(mut self, store: SnapshotStore) -> Result<Self, SnapshotError> {
        let loaded = store.load()?;
        tracing::info!(
            path = %store.path().display(),
            subjects = loaded.len(),
            "baseline snapshot loaded"
        );
        {
            let mut subjects = self.subjects.write();
            for (subject_id, mut state) in loaded {
                if state.latch(self.target_samples) {
                    self.dirty.store(true, Ordering::Relaxed);
                }
                subjects.insert(subject_id, Arc::new(Mutex::new(state)));
            }
        }
        self.snapshot = Some(store);
        Ok(self)
    }

    pub fn target_samples(&self) -> u32 {
        self.target_samples
    }

    pub fn subject_count(&self) -> usize {
        self.subjects.read().len()
    }

    pub fn record_sample(&self, subject_id: &str) -> BaselineProgress {
        self.record_sample_on(subject_id, today(), None)
    }

    /// Record a sample and feed its risk into the personalization window
    pub fn record_sample_with_scores(&self, subject_id: &str, scores: &ClassificationScores) -> BaselineProgress {
        let risk = risk_percentage(&sanitize_scores(scores));
        self.record_sample_on(subject_id, today(), Some(risk))
    }

    pub fn record_sample_on(&self, subject_id: &str, date: NaiveDate, risk_percentage: Option<f64>) -> BaselineProgress {
        let slot = self.slot(subject_id);
        let progress = {
            let mut state = slot.lock();
            let established_now = state.record(date, self.target_samples, risk_percentage, self.window);
            if established_now {
                tracing::info!(
                    subject_id,
                    samples = state.samples_collected,
                    "baseline established"
                );
            }
            state.progress(date, self.target_samples)
        };

        tracing::debug!(
            subject_id,
            samples = progress.samples_collected,
            streak = progress.streak_days,
            "baseline sample recorded"
        );

        if self.snapshot.is_some() {
            self.dirty.store(true, Ordering::Relaxed);
        }
        progress
    }

    pub fn get_progress(&self, subject_id: &str) -> BaselineProgress {
        self.progress_on(subject_id, today())
    }

    /// Unknown subjects read as a fresh, zeroed state
    pub fn progress_on(&self, subject_id: &str, date: NaiveDate) -> BaselineProgress {
        let slot = self.subjects.read().get(subject_id).cloned();
        match slot {
            Some(slot) => slot.lock().progress(date, self.target_samples),
            None => BaselineState::new().progress(date, self.target_samples),
        }
    }

    /// Copy of every subject's state
    pub fn states(&self) -> HashMap<String, BaselineState> {
        let slots: Vec<(String, SubjectSlot)> = self
            .subjects
            .read()
            .iter()
            .map(|(id, slot)| (id.clone(), Arc::clone(slot)))
            .collect();

        slots
            .into_iter()
            .map(|(id, slot)| {
                let state = slot.lock().clone();
                (id, state)
            })
            .collect()
    }

    fn slot(&self, subject_id: &str) -> SubjectSlot {
        if let Some(slot) = self.subjects.read().get(subject_id) {
            return Arc::clone(slot);
        }

        let mut subjects = self.subjects.write();
        Arc::clone(
            subjects
                .entry(subject_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(BaselineState::new()))),
        )
    }

    pub fn has_pending_changes(&self) -> bool {
        self.dirty.load(Ordering::Relaxed)
    }

    /// Rewrite the snapshot file if anything changed since the last flush.
    ///
    /// Returns whether a file was written. A failed write leaves the tracker
    /// dirty so the next flush retries.
    pub fn flush(&self) -> Result<bool, SnapshotError> {
        let Some(store) = &self.snapshot else {
            return Ok(false);
        };
        if !self.dirty.swap(false, Ordering::AcqRel) {
            return Ok(false);
        }

        match store.save_with(|| self.states()) {
            Ok(()) => Ok(true),
            Err(err) => {
                self.dirty.store(true, Ordering::Relaxed);
                Err(err)
            }
        }
    }

    /// Flush on a fixed interval until the returned task is aborted.
    /// Returns `None` when no snapshot file is attached.
    pub fn start_snapshot_flusher(self: &Arc<Self>, interval: Duration) -> Option<JoinHandle<()>> {
        self.snapshot.as_ref()?;

        let tracker = Arc::clone(self);
        Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;

                let flushing = Arc::clone(&tracker);
                match tokio::task::spawn_blocking(move || flushing.flush()).await {
                    Ok(Ok(true)) => tracing::debug!(subjects = tracker.subject_count(), "baseline snapshot written"),
                    Ok(Ok(false)) => {}
                    Ok(Err(err)) => tracing::warn!(error = %err, "failed to write baseline snapshot"),
                    Err(err) => tracing::warn!(error = %err, "baseline snapshot task failed"),
                }
            }
        }))
    }
}

impl Default for BaselineTracker {
    fn default() -> Self {
        Self::new(
            voice_algo::DEFAULT_TARGET_SAMPLES,
            voice_algo::DEFAULT_PERSONALIZATION_WINDOW,
        )
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
