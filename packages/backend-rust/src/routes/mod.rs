mod baseline;
mod health;
mod screening;

use axum::response::{IntoResponse, Response};
use axum::Router;

use crate::response::AppError;
use crate::state::AppState;

pub use screening::MAX_BATCH_SAMPLES;

const MAX_SUBJECT_ID_LEN: usize = 128;

pub fn router(state: AppState) -> Router {
    let mut app = Router::new()
        .nest("/api/screening", screening::router())
        .nest("/api/baseline", baseline::router());

    for path in ["/health", "/api/health"] {
        app = app.nest(path, health::router());
    }

    app.fallback(fallback_handler).with_state(state)
}

pub(crate) fn validate_subject_id(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("subject id is required"));
    }
    if trimmed.chars().count() > MAX_SUBJECT_ID_LEN {
        return Err(AppError::validation(format!(
            "subject id must be at most {MAX_SUBJECT_ID_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

async fn fallback_handler() -> Response {
    AppError::not_found("route not found").into_response()
}
