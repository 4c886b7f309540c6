use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use voice_algo::{AcousticFeatures, ClassificationScores, VoiceSample};

use crate::response::{ok, AppError};
use crate::routes::validate_subject_id;
use crate::state::AppState;

pub const MAX_BATCH_SAMPLES: usize = 1000;

#[derive(Debug, Deserialize)]
struct RiskBody {
    #[serde(default)]
    scores: ClassificationScores,
}

#[derive(Debug, Deserialize)]
struct ScalesBody {
    #[serde(default)]
    scores: ClassificationScores,
    #[serde(default)]
    features: AcousticFeatures,
}

#[derive(Debug, Deserialize)]
struct BatchBody {
    samples: Vec<VoiceSample>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssessBody {
    subject_id: String,
    #[serde(default)]
    scores: ClassificationScores,
    #[serde(default)]
    features: AcousticFeatures,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/risk", post(risk))
        .route("/scales", post(scales))
        .route("/batch", post(batch))
        .route("/assess", post(assess))
}

async fn risk(State(state): State<AppState>, Json(body): Json<RiskBody>) -> impl IntoResponse {
    ok(state.assessment().risk(&body.scores))
}

async fn scales(State(state): State<AppState>, Json(body): Json<ScalesBody>) -> impl IntoResponse {
    ok(state.assessment().scales(&body.scores, &body.features))
}

async fn batch(
    State(state): State<AppState>,
    Json(body): Json<BatchBody>,
) -> Result<impl IntoResponse, AppError> {
    if body.samples.len() > MAX_BATCH_SAMPLES {
        return Err(AppError::bad_request(format!(
            "at most {MAX_BATCH_SAMPLES} samples per batch"
        )));
    }

    let service = state.assessment();
    let scored = tokio::task::spawn_blocking(move || service.score_batch(&body.samples))
        .await
        .map_err(|err| AppError::internal(format!("batch scoring task failed: {err}")))?;

    Ok(ok(scored))
}

async fn assess(
    State(state): State<AppState>,
    Json(body): Json<AssessBody>,
) -> Result<impl IntoResponse, AppError> {
    let subject_id = validate_subject_id(&body.subject_id)?;

    let service = state.assessment();
    let report = tokio::task::spawn_blocking(move || {
        service.assess(&subject_id, &body.scores, &body.features)
    })
    .await
    .map_err(|err| AppError::internal(format!("assessment task failed: {err}")))?;

    Ok(ok(report))
}
