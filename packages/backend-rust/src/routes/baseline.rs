use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use voice_algo::ClassificationScores;

use crate::response::{ok, AppError};
use crate::routes::validate_subject_id;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
struct RecordSampleBody {
    #[serde(default)]
    scores: Option<ClassificationScores>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:subject_id", get(get_progress))
        .route("/:subject_id/samples", post(record_sample))
}

async fn get_progress(
    State(state): State<AppState>,
    Path(subject_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let subject_id = validate_subject_id(&subject_id)?;
    Ok(ok(state.tracker().get_progress(&subject_id)))
}

/// The body is optional; when it carries classifier scores they feed the
/// personalization window. A non-empty body that is not valid JSON for
/// [`RecordSampleBody`] is rejected before anything is recorded.
async fn record_sample(
    State(state): State<AppState>,
    Path(subject_id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let subject_id = validate_subject_id(&subject_id)?;
    let scores = parse_body(&body)?.scores;

    let tracker = state.tracker();
    let progress = tokio::task::spawn_blocking(move || match scores {
        Some(scores) => tracker.record_sample_with_scores(&subject_id, &scores),
        None => tracker.record_sample(&subject_id),
    })
    .await
    .map_err(|err| AppError::internal(format!("baseline update task failed: {err}")))?;

    Ok(ok(progress))
}

fn parse_body(raw: &[u8]) -> Result<RecordSampleBody, AppError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(RecordSampleBody::default());
    }
    serde_json::from_slice(raw).map_err(|err| AppError::bad_request(format!("invalid sample body: {err}")))
}
