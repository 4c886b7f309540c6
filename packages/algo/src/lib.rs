//! # voice-algo - voice-derived mental-health scoring
//!
//! Pure Rust scoring core for voice screening:
//!
//! - **Risk aggregation** - classifier probabilities to a risk percentage and level
//! - **Clinical scale mapping** - PHQ-9, GAD-7, PSS and WEMWBS with severity bands
//! - **Baseline progress** - per-subject sample counts, streaks, personalization quality
//!
//! ## Design
//!
//! - **Total** - every function is defined for every input; absent or
//!   non-finite values are normalized to `0` and outputs are clamped
//! - **Stateless scoring** - risk and scale mapping are pure and thread-safe
//! - **Explicit state** - baseline progress is plain data the caller owns
//!
//! ## Modules
//!
//! - [`risk`] - risk aggregation
//! - [`scales`] - clinical scale mapping, banding tables, tunable weights
//! - [`baseline`] - baseline state machine and personalization score
//! - [`batch`] - parallel scoring of many samples
//! - [`sanitize`] - input normalization
//! - [`types`] - shared types and constants
//!
//! ## Example
//!
//! ```rust
//! use voice_algo::{aggregate_risk, map_clinical_scales, AcousticFeatures, ClassificationScores, RiskLevel};
//!
//! let scores = ClassificationScores::new(0.5, 0.0, 0.0, 0.0);
//! let risk = aggregate_risk(&scores);
//! assert_eq!(risk.risk_percentage, 25.0);
//! assert_eq!(risk.risk_level, RiskLevel::Moderate);
//!
//! let scales = map_clinical_scales(&scores, &AcousticFeatures::default());
//! assert!(scales.gad7.value <= 21.0);
//! ```

pub mod baseline;
pub mod batch;
pub mod risk;
pub mod sanitize;
pub mod scales;
pub mod types;

pub use types::*;

pub use baseline::{personalization_score, BaselinePhase, BaselineState};
pub use batch::{score_batch, score_sample};
pub use risk::{aggregate_risk, RiskComponents};
pub use scales::{map_clinical_scales, ClinicalScaleMapper, ScaleConfig};
