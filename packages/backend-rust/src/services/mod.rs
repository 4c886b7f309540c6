pub mod assessment;
pub mod baseline_tracker;
pub mod snapshot;

pub use assessment::{AssessmentReport, AssessmentService};
pub use baseline_tracker::BaselineTracker;
pub use snapshot::{SnapshotError, SnapshotStore};
